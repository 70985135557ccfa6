//! Config file loading for smellrev.
//!
//! Reads `~/.config/smellrev/config.toml` (honoring `$XDG_CONFIG_HOME`).
//! Config errors are soft failures: a missing file yields defaults, a parse
//! error is printed to stderr and defaults are used — startup is never
//! blocked by configuration.

use serde::Deserialize;

/// User configuration, all keys optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the review backend.
    pub backend_url: String,
    /// Theme name resolved via `Theme::from_name`.
    pub theme: String,
    /// Initial reviewer identity; editable at runtime with `a`.
    pub reviewer: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5500".to_owned(),
            theme: "dark".to_owned(),
            reviewer: String::new(),
        }
    }
}

/// Returns the path to the smellrev config file.
///
/// Prefers `$XDG_CONFIG_HOME/smellrev/config.toml`; falls back to
/// `~/.config/smellrev/config.toml` when the env var is absent.
fn config_path() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(std::path::PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| std::path::PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| std::path::PathBuf::from(".config"));
    base.join("smellrev").join("config.toml")
}

/// Loads the config, never panicking and never failing hard.
pub fn load() -> Config {
    let path = config_path();
    let raw = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("smellrev: config parse error in {:?}: {}", path, e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_backend() {
        let config = Config::default();
        assert_eq!(config.backend_url, "http://localhost:5500");
        assert_eq!(config.theme, "dark");
        assert!(config.reviewer.is_empty());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: Config = toml::from_str("reviewer = \"dana\"").unwrap();
        assert_eq!(config.reviewer, "dana");
        assert_eq!(config.backend_url, "http://localhost:5500");
    }
}
