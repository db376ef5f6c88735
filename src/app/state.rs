use std::time::Duration;

use super::time::format_time;

/// Everything the view needs to render the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub current_index: usize,
    pub is_playing: bool,
    /// `0.0..=100.0`.
    pub progress_percent: f64,
    pub current_time_label: String,
    pub duration_label: String,
    /// `0.0..=1.0`. Kept while muted.
    pub volume: f32,
    pub is_muted: bool,
    /// Most recent non-fatal playback error.
    pub last_error: Option<String>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl PlayerState {
    pub fn new(volume: f32) -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            progress_percent: 0.0,
            current_time_label: format_time(0.0),
            duration_label: format_time(0.0),
            volume: volume.clamp(0.0, 1.0),
            is_muted: false,
            last_error: None,
        }
    }

    pub(super) fn reset_progress(&mut self) {
        self.progress_percent = 0.0;
        self.current_time_label = format_time(0.0);
        self.duration_label = format_time(0.0);
    }

    /// `duration` must be non-zero.
    pub(super) fn apply_progress(&mut self, position: Duration, duration: Duration) {
        let position = position.as_secs_f64();
        let duration = duration.as_secs_f64();
        self.progress_percent = (position / duration * 100.0).clamp(0.0, 100.0);
        self.current_time_label = format_time(position);
        self.duration_label = format_time(duration);
    }
}
