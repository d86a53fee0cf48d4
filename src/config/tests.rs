use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
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
fn resolve_config_path_prefers_remotune_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("REMOTUNE_CONFIG_PATH", "/tmp/remotune-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/remotune-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("remotune")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("remotune")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[server]
base_url = "https://music.example.com"
catalog_path = "/api/get_audio_list"
timeout_ms = 2500
connect_timeout_ms = 900

[ui]
header_text = "hello"

[playback]
advance_on_ended = false
autoplay = true
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("REMOTUNE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("REMOTUNE__SERVER__TIMEOUT_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.base_url, "https://music.example.com");
    assert_eq!(s.server.catalog_path, "/api/get_audio_list");
    assert_eq!(s.server.timeout_ms, 2500);
    assert_eq!(s.server.connect_timeout_ms, 900);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.playback.advance_on_ended);
    assert!(s.playback.autoplay);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[server]
timeout_ms = 9999
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("REMOTUNE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("REMOTUNE__SERVER__TIMEOUT_MS", "1234");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.timeout_ms, 1234);
}

#[test]
fn validate_rejects_bad_base_url_and_zero_timeouts() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.server.base_url = "example.com".to_string();
    assert!(s.validate().is_err());

    s.server.base_url = "http://example.com".to_string();
    s.server.timeout_ms = 0;
    assert!(s.validate().is_err());
}
