use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/remotune/config.toml` or `~/.config/remotune/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `REMOTUNE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub ui: UiSettings,
    pub playback: PlaybackSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            ui: UiSettings::default(),
            playback: PlaybackSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Base URL of the catalog/media server. Must be http or https.
    pub base_url: String,
    /// Path of the listing endpoint, relative to `base_url`.
    pub catalog_path: String,
    /// Overall request timeout for catalog fetches (milliseconds).
    pub timeout_ms: u64,
    /// Connect timeout for all server requests (milliseconds).
    pub connect_timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            catalog_path: "/api/audio".to_string(),
            timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top "remotune" header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ remotune: your catalog, anywhere ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether a track that ends naturally advances to the next one.
    pub advance_on_ended: bool,
    /// Whether to start the first track once the initial catalog arrives.
    pub autoplay: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            advance_on_ended: true,
            autoplay: false,
        }
    }
}
