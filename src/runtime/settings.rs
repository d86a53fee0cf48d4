use crate::config;

/// Load settings, falling back to defaults on any problem. Config is
/// optional; failures must not prevent the app from starting.
pub fn load_settings() -> config::Settings {
    let settings = match config::Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("remotune: failed to load config, using defaults: {e}");
            return config::Settings::default();
        }
    };

    if let Err(msg) = settings.validate() {
        eprintln!("remotune: invalid config, using defaults: {msg}");
        return config::Settings::default();
    }

    settings
}
