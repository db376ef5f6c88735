use std::path::{Path, PathBuf};

use lofty::file::TaggedFileExt;
use lofty::tag::Accessor;
use walkdir::WalkDir;

use crate::config::PlaylistSettings;

use super::model::Track;

static ARTWORK_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
static ARTWORK_STEMS: [&str; 3] = ["cover", "folder", "front"];

fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .any(|e| e == ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// "Artist - Title" from tags, or the file stem.
fn display_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let Ok(tagged) = lofty::read_from_path(path) else {
        return stem;
    };
    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return stem;
    };

    let title = tag
        .title()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or(stem);
    match tag.artist().map(|a| a.trim().to_string()) {
        Some(artist) if !artist.is_empty() => format!("{artist} - {title}"),
        _ => title,
    }
}

/// An image sharing the track's stem wins, then `cover`/`folder`/`front`.
fn find_artwork(path: &Path) -> Option<PathBuf> {
    let dir = path.parent()?;
    let stem = path.file_stem()?.to_str()?;

    std::iter::once(stem)
        .chain(ARTWORK_STEMS)
        .flat_map(|s| ARTWORK_EXTENSIONS.iter().map(move |ext| dir.join(format!("{s}.{ext}"))))
        .find(|candidate| candidate.is_file())
}

/// Build tracks from the audio files under `dir`, ordered by path.
pub fn scan(dir: &Path, settings: &PlaylistSettings) -> Vec<Track> {
    let mut walker = WalkDir::new(dir).follow_links(true).sort_by_file_name();
    if !settings.recursive {
        walker = walker.max_depth(1);
    }

    walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && has_extension(e.path(), &settings.extensions))
        .map(|e| {
            let path = e.path();
            Track {
                name: display_name(path),
                audio_source: path.to_path_buf(),
                artwork_source: find_artwork(path),
            }
        })
        .collect()
}
