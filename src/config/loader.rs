//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ResolverConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `store.api_key`.
pub const STORE_API_KEY_ENV: &str = "PLOT_RESOLVER_STORE_API_KEY";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load, apply environment overrides, and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ResolverConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&content, std::env::var(STORE_API_KEY_ENV).ok())?;
    Ok(config)
}

/// Parse and validate; `api_key_override` replaces the file's key when non-empty.
pub fn parse_config(content: &str, api_key_override: Option<String>) -> Result<ResolverConfig, ConfigError> {
    let mut config: ResolverConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    if let Some(key) = api_key_override.filter(|k| !k.is_empty()) {
        config.store.api_key = Some(key);
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
