//! Utilities for creating `rodio` sinks from audio files.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::mixer::Mixer;
use rodio::{Decoder, Sink, Source};

use crate::error::PlaybackError;

pub(super) struct OpenedSink {
    pub sink: Sink,
    pub duration: Option<Duration>,
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn open_sink_at(
    mixer: &Mixer,
    path: &Path,
    start_at: Duration,
) -> Result<OpenedSink, PlaybackError> {
    let file = File::open(path).map_err(|source| PlaybackError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    // Many MP3s don't report a length through the decoder; the container does.
    let duration = decoder.total_duration().or_else(|| probe_duration(path));

    let sink = Sink::connect_new(mixer);
    // Rebuild-seeks start mid-file; a fresh load skips nothing.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();
    Ok(OpenedSink { sink, duration })
}

/// Read the track length from the file's properties.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}
