use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Importer configuration
///
/// Read once at startup and passed into the driver as a value; nothing
/// reads ambient process state after this point.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ImporterConfig {
    /// Base URL of the Mealie instance
    pub host: String,
    /// Long-lived API key from the Mealie user profile. Required;
    /// startup fails before any file is touched when absent.
    pub api_key: Option<String>,
    /// Directory holding the `.melarecipe` / `.json` exports
    pub recipes_dir: String,
    /// Upload contract: "create_fetch" or "create_patch"
    pub flow: String,
    /// Exchange the API key for a short-lived access token before
    /// importing, instead of sending the key as the bearer directly
    pub exchange_token: bool,
    /// Pause between files, to avoid overwhelming the server
    pub delay_ms: u64,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            api_key: None,
            recipes_dir: default_recipes_dir(),
            flow: default_flow(),
            exchange_token: false,
            delay_ms: default_delay_ms(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "http://127.0.0.1:9000".to_string()
}

fn default_recipes_dir() -> String {
    "./recipes".to_string()
}

fn default_flow() -> String {
    "create_fetch".to_string()
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout() -> u64 {
    30
}

impl ImporterConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MEALIE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MEALIE__API_KEY, MEALIE__RECIPES_DIR
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<ImporterConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Environment variables with MEALIE_ prefix
        // Use double underscore: MEALIE__API_KEY
        .add_source(
            Environment::with_prefix("MEALIE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_values() {
        assert_eq!(default_host(), "http://127.0.0.1:9000");
        assert_eq!(default_recipes_dir(), "./recipes");
        assert_eq!(default_flow(), "create_fetch");
        assert_eq!(default_delay_ms(), 1000);
        assert_eq!(default_timeout(), 30);
    }

    #[test]
    fn test_config_default() {
        let config = ImporterConfig::default();
        assert!(config.api_key.is_none());
        assert!(!config.exchange_token);
        assert_eq!(config.flow, "create_fetch");
        assert_eq!(config.delay_ms, 1000);
    }

    #[test]
    fn test_load_config_without_file() {
        // Clear any environment variables that might interfere
        let keys_to_clear: Vec<String> = env::vars()
            .filter(|(k, _)| k.starts_with("MEALIE__"))
            .map(|(k, _)| k)
            .collect();

        for key in keys_to_clear {
            env::remove_var(&key);
        }

        // Without a file or environment everything falls back to defaults
        let config = load_config().unwrap();
        assert_eq!(config.host, "http://127.0.0.1:9000");
        assert!(config.api_key.is_none());
    }
}
