use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::*;
use crate::config::{PlaylistSettings, TrackEntry};
use crate::error::ConfigurationError;

fn t(name: &str) -> Track {
    Track {
        name: name.to_string(),
        audio_source: PathBuf::from(format!("/music/{name}.mp3")),
        artwork_source: None,
    }
}

fn entry(name: &str, src: &str, art: Option<&str>) -> TrackEntry {
    TrackEntry {
        name: name.to_string(),
        src: PathBuf::from(src),
        art: art.map(PathBuf::from),
    }
}

#[test]
fn empty_playlist_is_a_configuration_error() {
    assert!(matches!(
        Playlist::new(Vec::new()),
        Err(ConfigurationError::EmptyPlaylist)
    ));
}

#[test]
fn next_and_previous_wrap_around() {
    let p = Playlist::new(vec![t("a"), t("b"), t("c")]).unwrap();
    assert_eq!(p.next(0), 1);
    assert_eq!(p.next(2), 0);
    assert_eq!(p.previous(0), 2);
    assert_eq!(p.previous(1), 0);
}

#[test]
fn next_and_previous_are_inverse_for_every_index() {
    for len in 1..=5 {
        let p = Playlist::new((0..len).map(|i| t(&i.to_string())).collect()).unwrap();
        for i in 0..len {
            assert_eq!(p.next(p.previous(i)), i);
            assert_eq!(p.previous(p.next(i)), i);
        }
    }
}

#[test]
fn single_track_playlist_wraps_onto_itself() {
    let p = Playlist::new(vec![t("only")]).unwrap();
    assert_eq!(p.next(0), 0);
    assert_eq!(p.previous(0), 0);
    assert_eq!(p.get(0).name, "only");
}

#[test]
fn inline_entries_resolve_relative_paths_against_base_dir() {
    let settings = PlaylistSettings {
        tracks: vec![
            entry("Fire", "fire.mp3", Some("edinaldo.jpg")),
            entry("Abs", "/abs/ameaca.mp3", None),
        ],
        ..PlaylistSettings::default()
    };

    let p = build_playlist(&settings, Some(Path::new("/srv/player"))).unwrap();
    assert_eq!(p.len(), 2);
    assert_eq!(p.get(0).audio_source, PathBuf::from("/srv/player/fire.mp3"));
    assert_eq!(
        p.get(0).artwork_source,
        Some(PathBuf::from("/srv/player/edinaldo.jpg"))
    );
    assert_eq!(p.get(1).audio_source, PathBuf::from("/abs/ameaca.mp3"));
    assert_eq!(p.get(1).artwork_source, None);
}

#[test]
fn playlist_file_entries_resolve_against_the_file_directory() {
    let dir = tempdir().unwrap();
    let lists = dir.path().join("lists");
    fs::create_dir_all(&lists).unwrap();
    fs::write(
        lists.join("mix.toml"),
        r#"
[[tracks]]
name = "Ponta Firme - Tiregrito"
src = "tiregrito.mp3"
img = "tiregrito.jpg"

[[tracks]]
name = "Des - Mantelo"
src = "ameaca.mp3"
"#,
    )
    .unwrap();

    let settings = PlaylistSettings {
        file: Some(PathBuf::from("lists/mix.toml")),
        ..PlaylistSettings::default()
    };
    let p = build_playlist(&settings, Some(dir.path())).unwrap();

    assert_eq!(p.len(), 2);
    assert_eq!(p.get(0).name, "Ponta Firme - Tiregrito");
    assert_eq!(p.get(0).audio_source, lists.join("tiregrito.mp3"));
    assert_eq!(p.get(0).artwork_source, Some(lists.join("tiregrito.jpg")));
    assert_eq!(p.get(1).audio_source, lists.join("ameaca.mp3"));
}

#[test]
fn inline_entries_win_over_playlist_file() {
    let settings = PlaylistSettings {
        tracks: vec![entry("Inline", "inline.mp3", None)],
        file: Some(PathBuf::from("/does/not/exist.toml")),
        ..PlaylistSettings::default()
    };
    let p = build_playlist(&settings, None).unwrap();
    assert_eq!(p.get(0).name, "Inline");
}

#[test]
fn missing_playlist_file_is_reported() {
    let dir = tempdir().unwrap();
    let settings = PlaylistSettings {
        file: Some(dir.path().join("missing.toml")),
        ..PlaylistSettings::default()
    };
    assert!(matches!(
        build_playlist(&settings, None),
        Err(ConfigurationError::PlaylistFile { .. })
    ));
}

#[test]
fn malformed_playlist_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[[tracks]]\nname = 3\n").unwrap();

    let settings = PlaylistSettings {
        file: Some(path),
        ..PlaylistSettings::default()
    };
    assert!(matches!(
        build_playlist(&settings, None),
        Err(ConfigurationError::PlaylistParse { .. })
    ));
}

#[test]
fn no_source_configured_yields_empty_playlist_error() {
    assert!(matches!(
        build_playlist(&PlaylistSettings::default(), None),
        Err(ConfigurationError::EmptyPlaylist)
    ));
}

#[test]
fn scan_orders_by_path_and_pairs_artwork() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("a.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("a.jpg"), b"not a real jpg").unwrap();
    fs::write(dir.path().join("cover.png"), b"not a real png").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();

    let settings = PlaylistSettings {
        dir: Some(dir.path().to_path_buf()),
        ..PlaylistSettings::default()
    };
    let p = build_playlist(&settings, None).unwrap();

    let names: Vec<&str> = p.tracks().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(p.get(0).artwork_source, Some(dir.path().join("a.jpg")));
    assert_eq!(p.get(1).artwork_source, Some(dir.path().join("cover.png")));
}

#[test]
fn scan_skips_hidden_entries_and_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let recursive = PlaylistSettings {
        dir: Some(dir.path().to_path_buf()),
        ..PlaylistSettings::default()
    };
    let names: Vec<String> = build_playlist(&recursive, None)
        .unwrap()
        .tracks()
        .iter()
        .map(|t| t.name.clone())
        .collect();
    assert_eq!(names, vec!["root".to_string(), "child".to_string()]);

    let flat = PlaylistSettings {
        recursive: false,
        ..recursive
    };
    let p = build_playlist(&flat, None).unwrap();
    assert_eq!(p.len(), 1);
    assert_eq!(p.get(0).name, "root");
}

#[test]
fn shipped_demo_playlist_loads_three_tracks_in_order() {
    let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let settings = PlaylistSettings {
        file: Some(PathBuf::from("playlist.toml")),
        ..PlaylistSettings::default()
    };

    let playlist = build_playlist(&settings, Some(&demos)).unwrap();
    let names: Vec<&str> = playlist.tracks().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Ponta Firme - Tiregrito",
            "Edinaldo (O Grande) Pereira",
            "Des - Mantelo"
        ]
    );
    assert_eq!(
        playlist.get(1).audio_source,
        demos.join("media").join("fire.mp3")
    );
    assert_eq!(
        playlist.get(2).artwork_source,
        Some(demos.join("media").join("picapau.jpg"))
    );
}
