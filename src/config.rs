//! Portal configuration
//!
//! Read from `~/.config/ir-portal/config.json` when present, then overridden
//! by `IR_PORTAL_*` environment variables. A missing or broken file never
//! stops the portal from starting; defaults are used instead.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_API_URL: &str = "IR_PORTAL_API_URL";
pub const ENV_DEMO: &str = "IR_PORTAL_DEMO";
pub const ENV_THEME: &str = "IR_PORTAL_THEME";
pub const ENV_DEMO_LATENCY: &str = "IR_PORTAL_DEMO_LATENCY_MS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String { "http://localhost:8000".to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub api: ApiSettings,
    /// Serve seeded data locally instead of calling the backend
    #[serde(default)]
    pub demo_mode: bool,
    /// Artificial delay per demo call, in milliseconds
    #[serde(default)]
    pub demo_latency_ms: u64,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String { "light".to_string() }

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            demo_mode: false,
            demo_latency_ms: 0,
            theme: default_theme(),
        }
    }
}

impl PortalConfig {
    /// Get the config file path (~/.config/ir-portal/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ir-portal").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load from the default location and apply environment overrides
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "using default config");
                Self::default()
            }),
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply `IR_PORTAL_*` overrides from any key/value lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(flag) = lookup(ENV_DEMO) {
            self.demo_mode = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(raw) = lookup(ENV_DEMO_LATENCY) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.demo_latency_ms = ms,
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring {}", ENV_DEMO_LATENCY),
            }
        }
        if let Some(theme) = lookup(ENV_THEME).filter(|v| !v.trim().is_empty()) {
            self.theme = theme.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ir-portal-{}-{}.json", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = PortalConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(!config.demo_mode);
        assert_eq!(config.demo_latency_ms, 0);
        assert_eq!(config.theme, "light");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_config("partial", r#"{"api": {"base_url": "https://ir.example.com"}}"#);
        let config = PortalConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.api.base_url, "https://ir.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.theme, "light");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = temp_config("broken", "{ not json");
        let result = PortalConfig::from_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = PortalConfig::from_file(Path::new("/nonexistent/ir-portal/config.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "http://10.0.0.5:9000"),
            (ENV_DEMO, "true"),
            (ENV_THEME, "dark"),
            (ENV_DEMO_LATENCY, "750"),
        ]
        .into_iter()
        .collect();

        let mut config = PortalConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.5:9000");
        assert!(config.demo_mode);
        assert_eq!(config.demo_latency_ms, 750);
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_invalid_latency_keeps_file_value() {
        let path = temp_config("latency", r#"{"demo_mode": true, "demo_latency_ms": 300}"#);
        let mut config = PortalConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.demo_latency_ms, 300);

        config.apply_overrides(|key| (key == ENV_DEMO_LATENCY).then(|| "soon".to_string()));
        assert_eq!(config.demo_latency_ms, 300);
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let mut config = PortalConfig::default();
        config.apply_overrides(|key| (key == ENV_API_URL).then(|| "  ".to_string()));
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }
}
