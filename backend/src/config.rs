//! Configuration management for the Meteorologia Mock API
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with WEATHER_MOCK_ prefix
//! 4. `WEATHER_MOCK_SEED` as a shortcut for `generator.seed`

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Log filter and output format
    pub logging: LoggingConfig,

    /// Random generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Station catalogue source
    #[serde(default)]
    pub catalogue: CatalogueConfig,

    /// Error body settings
    #[serde(default)]
    pub errors: ErrorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,

    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible output; OS entropy when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogueConfig {
    /// JSON file replacing the built-in stations
    pub stations_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ErrorsConfig {
    /// Add `exception_type` and `stack_trace` to structured error bodies
    pub expose_details: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("WEATHER_MOCK_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let seed = std::env::var("WEATHER_MOCK_SEED").ok();

        Self::build(&environment, env_overrides(), seed)
    }

    fn build(
        environment: &str,
        overrides: Environment,
        seed: Option<String>,
    ) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("server.port", 8080)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("logging.filter", "meteorologia_server=info,tower_http=info")?
            .set_default("logging.format", "pretty")?
            .set_default("errors.expose_details", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WEATHER_MOCK_ prefix)
            .add_source(overrides)
            .set_override_option("generator.seed", seed)?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail later at bind time
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message(
                "server.port must be between 1 and 65535".to_string(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Message("server.host must not be empty".to_string()));
        }
        Ok(())
    }
}

/// `WEATHER_MOCK_SERVER__PORT=9090` sets `server.port`
fn env_overrides() -> Environment {
    Environment::with_prefix("WEATHER_MOCK")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "meteorologia_server=info,tower_http=info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            generator: GeneratorConfig::default(),
            catalogue: CatalogueConfig::default(),
            errors: ErrorsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        config::Config::builder()
            .set_default("environment", "test")?
            .set_default("server.port", 8080)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("logging.filter", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.generator.seed.is_none());
        assert!(config.catalogue.stations_file.is_none());
        assert!(!config.errors.expose_details);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 9090

            [logging]
            format = "json"

            [generator]
            seed = 42

            [catalogue]
            stations_file = "config/stations.json"

            [errors]
            expose_details = true
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.generator.seed, Some(42));
        assert_eq!(
            config.catalogue.stations_file,
            Some(PathBuf::from("config/stations.json"))
        );
        assert!(config.errors.expose_details);
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let result = from_toml(
            r#"
            [logging]
            format = "xml"
            "#,
        );
        assert!(result.is_err());
    }

    fn env_vars(pairs: &[(&str, &str)]) -> Environment {
        let vars: config::Map<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        env_overrides().source(Some(vars))
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        let overrides = env_vars(&[
            ("WEATHER_MOCK_SERVER__PORT", "9090"),
            ("WEATHER_MOCK_LOGGING__FORMAT", "json"),
            ("WEATHER_MOCK_ERRORS__EXPOSE_DETAILS", "true"),
            ("OTHER_SERVER__PORT", "1234"),
        ]);
        let config = Config::build("test", overrides, None).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.errors.expose_details);
    }

    #[test]
    fn test_seed_shortcut_wins_over_env_layer() {
        let overrides = env_vars(&[("WEATHER_MOCK_GENERATOR__SEED", "1")]);
        let config = Config::build("test", overrides, Some("42".to_string())).unwrap();
        assert_eq!(config.generator.seed, Some(42));

        let config = Config::build("test", env_vars(&[]), None).unwrap();
        assert!(config.generator.seed.is_none());
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_env_zero_port_is_rejected() {
        let overrides = env_vars(&[("WEATHER_MOCK_SERVER__PORT", "0")]);
        assert!(Config::build("test", overrides, None).is_err());
    }

    #[test]
    fn test_zero_port_fails_validation() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }
}
