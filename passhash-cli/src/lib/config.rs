use std::env;
use std::path::Path;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use passhash::Argon2Config;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub hasher: Argon2Config,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (HASHER__MEMORY_KB, HASHER__VARIANT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in Argon2 defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: HASHER__ITERATIONS=3 overrides hasher.iterations
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }

    /// Load configuration from a single file, without environment overrides.
    ///
    /// # Arguments
    /// * `path` - Configuration file; format is taken from the extension
    ///
    /// # Errors
    /// * `ConfigError` - File is missing, unreadable, or has invalid values
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }
}
