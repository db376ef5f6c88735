use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub name: String,
    pub audio_source: PathBuf,
    pub artwork_source: Option<PathBuf>,
}
