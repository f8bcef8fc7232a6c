//! User settings for MoneyTree
//!
//! Manages user preferences: display currency and the advisory endpoint.

use serde::{Deserialize, Serialize};

use super::paths::MoneyTreePaths;
use crate::error::MoneyTreeError;
use crate::models::money::DEFAULT_CURRENCY_SYMBOL;

/// Settings for the optional spending advisor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorSettings {
    /// Chat-completion endpoint the snapshot is posted to
    #[serde(default = "default_advisor_endpoint")]
    pub endpoint: String,

    /// Model name sent with each request
    #[serde(default = "default_advisor_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_advisor_key_env")]
    pub api_key_env: String,
}

fn default_advisor_endpoint() -> String {
    "https://api.deepseek.com/v1/chat/completions".to_string()
}

fn default_advisor_model() -> String {
    "deepseek-chat".to_string()
}

fn default_advisor_key_env() -> String {
    "DEEPSEEK_KEY".to_string()
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            endpoint: default_advisor_endpoint(),
            model: default_advisor_model(),
            api_key_env: default_advisor_key_env(),
        }
    }
}

/// User settings for MoneyTree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Advisor configuration
    #[serde(default)]
    pub advisor: AdvisorSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            advisor: AdvisorSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MoneyTreePaths) -> Result<Self, MoneyTreeError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                MoneyTreeError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MoneyTreeError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            let settings = Settings::default();
            settings.save(paths)?;
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MoneyTreePaths) -> Result<(), MoneyTreeError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            MoneyTreeError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| MoneyTreeError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "¥");
        assert_eq!(settings.advisor.model, "deepseek-chat");
        assert_eq!(settings.advisor.api_key_env, "DEEPSEEK_KEY");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyTreePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "$".into();
        settings.advisor.model = "other-model".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.advisor.model, "other-model");
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyTreePaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.currency_symbol, "¥");
        assert!(paths.settings_file().exists());

        let contents = std::fs::read_to_string(paths.settings_file()).unwrap();
        assert!(contents.contains("deepseek-chat"));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol":"$"}"#).unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.advisor, AdvisorSettings::default());
    }
}
