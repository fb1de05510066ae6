use crate::config;

/// Load settings, falling back to defaults when the config is unusable.
///
/// Logging is not set up yet when this runs, so the reason for a fallback is
/// handed back to the caller to log.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                (config::Settings::default(), Some(format!("invalid config, using defaults: {msg}")))
            } else {
                (s, None)
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            (config::Settings::default(), Some(format!("failed to load config, using defaults: {e}")))
        }
    }
}
