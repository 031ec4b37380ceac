use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variables checked for the provider credential, in priority order
pub const API_KEY_VARS: &[&str] = &["SITECRAFT_API_KEY", "GEMINI_API_KEY", "API_KEY"];

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TEMPERATURE: f32 = 0.85;
const DEFAULT_LANGUAGE: &str = "Arabic";
const DEFAULT_PORT: u16 = 8080;

/// Application settings
/// This matches the config.toml file structure exactly
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Model provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Biased high for varied output
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Natural language the generated copy is written in
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            language: default_language(),
            timeout_secs: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl ProviderConfig {
    /// The configured credential. Blank values count as missing.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)
    }
}

impl Settings {
    /// Load settings from `path`, or from the global config file when no path
    /// is given, then apply environment overrides.
    ///
    /// An explicit path must exist. A missing global file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => parse_settings(path)?,
            None => match global_config_path() {
                Some(global) if global.exists() => parse_settings(&global)?,
                _ => Settings::default(),
            },
        };
        settings.apply_env(|name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Override the credential from the first non-empty variable in [`API_KEY_VARS`]
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for name in API_KEY_VARS {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                debug!(variable = name, "using API key from environment");
                self.provider.api_key = Some(value);
                return;
            }
        }
    }
}

/// `~/.sitecraft/config.toml`, if a home directory can be determined
pub fn global_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()?;
    Some(PathBuf::from(home).join(".sitecraft").join("config.toml"))
}

/// Parse a config.toml from a file path
pub fn parse_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    parse_settings_str(&content)
}

/// Parse a config.toml from a string (useful for testing)
pub fn parse_settings_str(content: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(content)?;

    if !(0.0..=2.0).contains(&settings.provider.temperature) {
        return Err(Error::ConfigParse(format!(
            "provider.temperature must be between 0.0 and 2.0, got {}",
            settings.provider.temperature
        )));
    }

    if settings.provider.base_url.trim().is_empty() {
        return Err(Error::ConfigParse("provider.base_url is empty".to_string()));
    }

    Ok(settings)
}

/// Write settings to `path`, creating parent directories
pub fn save_settings<P: AsRef<Path>>(settings: &Settings, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(settings)
        .map_err(|e| Error::ConfigParse(format!("Failed to serialize settings: {}", e)))?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let settings = parse_settings_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.provider.model, "gemini-2.5-flash");
        assert_eq!(settings.provider.temperature, 0.85);
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r##"
[provider]
api_key = "abc123"
model = "gemini-2.5-pro"
base_url = "http://localhost:9000/v1beta"
temperature = 1.2
language = "English"
timeout_secs = 30

[server]
port = 3000
        "##;

        let settings = parse_settings_str(toml).unwrap();
        assert_eq!(settings.provider.api_key().unwrap(), "abc123");
        assert_eq!(settings.provider.model, "gemini-2.5-pro");
        assert_eq!(settings.provider.language, "English");
        assert_eq!(settings.provider.timeout_secs, Some(30));
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_parse_rejects_out_of_range_temperature() {
        let result = parse_settings_str("[provider]\ntemperature = 3.5\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("temperature"));
    }

    #[test]
    fn test_parse_rejects_invalid_toml() {
        let result = parse_settings_str("[provider\nmodel = ");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_missing_api_key_fails_fast() {
        let settings = Settings::default();
        assert!(matches!(
            settings.provider.api_key(),
            Err(Error::MissingApiKey)
        ));

        let mut blank = ProviderConfig::default();
        blank.api_key = Some("   ".into());
        assert!(matches!(blank.api_key(), Err(Error::MissingApiKey)));
    }

    #[test]
    fn test_env_override_priority() {
        let mut settings = Settings::default();
        settings.apply_env(env(&[("API_KEY", "generic"), ("GEMINI_API_KEY", "gemini")]));
        assert_eq!(settings.provider.api_key().unwrap(), "gemini");

        settings.apply_env(env(&[("SITECRAFT_API_KEY", "own"), ("API_KEY", "generic")]));
        assert_eq!(settings.provider.api_key().unwrap(), "own");
    }

    #[test]
    fn test_env_override_skips_blank_values() {
        let mut settings = parse_settings_str("[provider]\napi_key = \"from-file\"\n").unwrap();
        settings.apply_env(env(&[("SITECRAFT_API_KEY", "  ")]));
        assert_eq!(settings.provider.api_key().unwrap(), "from-file");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.provider.api_key = Some("saved-key".into());
        settings.provider.language = "French".into();
        save_settings(&settings, &path).unwrap();

        let loaded = parse_settings(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
