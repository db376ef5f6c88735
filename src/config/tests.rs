use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::error::ConfigurationError;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_rondo_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("RONDO_CONFIG_PATH", "/tmp/rondo-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/rondo-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("rondo")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("rondo")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_uses_xdg_state_home_then_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
    assert_eq!(
        super::default_log_path().unwrap(),
        PathBuf::from("/tmp/xdg-state").join("rondo").join("rondo.log")
    );

    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        super::default_log_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".local")
            .join("state")
            .join("rondo")
            .join("rondo.log")
    );
}

#[test]
fn settings_load_reads_inline_playlist_and_sections() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
initial_volume = 0.8
mute_control = false
skip_control = true

[audio]
tick_ms = 100
quit_fade_out_ms = 0

[controls]
skip_seconds = 15
volume_step = 0.1

[ui]
header_text = "hello"
follow_playback = false

[log]
enabled = false
level = "debug"

[[playlist.tracks]]
name = "Ponta Firme - Tiregrito"
src = "tiregrito.mp3"
img = "tiregrito.jpg"

[[playlist.tracks]]
name = "No Art"
audio = "noart.mp3"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::remove("RONDO__PLAYER__INITIAL_VOLUME");

    let s = Settings::load(Some(cfg_path)).unwrap();
    assert_eq!(s.player.initial_volume, 0.8);
    assert!(!s.player.mute_control);
    assert!(s.player.skip_control);
    assert_eq!(s.audio.tick_ms, 100);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.controls.skip_seconds, 15);
    assert!((s.controls.volume_step - 0.1).abs() < f32::EPSILON);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.follow_playback);
    assert!(s.ui.show_artwork);
    assert!(!s.log.enabled);
    assert_eq!(s.log.level, "debug");
    assert_eq!(s.config_dir.as_deref(), Some(dir.path()));

    assert_eq!(
        s.playlist.tracks,
        vec![
            TrackEntry {
                name: "Ponta Firme - Tiregrito".to_string(),
                src: PathBuf::from("tiregrito.mp3"),
                art: Some(PathBuf::from("tiregrito.jpg")),
            },
            TrackEntry {
                name: "No Art".to_string(),
                src: PathBuf::from("noart.mp3"),
                art: None,
            },
        ]
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
initial_volume = 0.8
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RONDO__PLAYER__INITIAL_VOLUME", "0.25");

    let s = Settings::load(Some(cfg_path)).unwrap();
    assert_eq!(s.player.initial_volume, 0.25);
}

#[test]
fn settings_load_fails_when_explicit_path_is_missing() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();

    let err = Settings::load(Some(dir.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, ConfigurationError::Load(_)));
}

#[test]
fn defaults_validate() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.player.initial_volume, 0.5);
    assert_eq!(s.controls.skip_seconds, 10);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.player.initial_volume = 1.5;
    assert!(matches!(s.validate(), Err(ConfigurationError::Invalid(_))));

    let mut s = Settings::default();
    s.audio.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 0.0;
    assert!(s.validate().is_err());
}
