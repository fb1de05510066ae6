use std::{env, path::PathBuf};

use super::schema::Settings;

/// Environment overrides look like `ORGANIZER__AUDIO__VOLUME=0.5`.
const ENV_PREFIX: &str = "ORGANIZER";

impl Settings {
    /// Defaults, overlaid by the config file if present, overlaid by
    /// `ORGANIZER__SECTION__KEY` variables.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("library.extensions")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(format!(
                "audio.volume must be between 0.0 and 1.0, got {}",
                self.audio.volume
            ));
        }
        if self.library.extensions.iter().all(|e| e.trim().trim_start_matches('.').is_empty()) {
            return Err("library.extensions must name at least one extension".to_string());
        }
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Points at an explicit config file, bypassing the XDG lookup.
pub const CONFIG_PATH_VAR: &str = "ORGANIZER_CONFIG_PATH";

/// Directory name under the XDG config and state roots.
const APP_DIR: &str = "organizer";

/// `$ORGANIZER_CONFIG_PATH` if set, else [`default_config_path`].
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/organizer/config.toml`, or `~/.config/organizer/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    app_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("config.toml"))
}

/// `$XDG_STATE_HOME/organizer/organizer.log`, or `~/.local/state/organizer/organizer.log`.
pub fn default_log_path() -> Option<PathBuf> {
    app_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("organizer.log"))
}

fn app_dir(xdg_var: &str, home_relative: &str) -> Option<PathBuf> {
    let root = match env::var_os(xdg_var) {
        Some(xdg) => PathBuf::from(xdg),
        None => PathBuf::from(env::var_os("HOME")?).join(home_relative),
    };
    Some(root.join(APP_DIR))
}
