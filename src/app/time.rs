/// Format seconds as `m:ss`.
///
/// Minutes are not padded and there is no hour component, so an hour-long
/// track reads `60:00`. Negative or non-finite input reads `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let minutes = (seconds / 60.0).floor() as u64;
    let rem = (seconds % 60.0).floor() as u64;
    format!("{minutes}:{rem:02}")
}
