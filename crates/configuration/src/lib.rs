use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{DatabaseSettings, InventorySettings, LoggingSettings, ServerSettings, Settings};

/// Prefix for environment overrides, e.g. `NGO_HUB__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "NGO_HUB";

/// Loads the application configuration from `config.toml` in the working directory.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

/// Loads the application configuration from the given file.
///
/// The file is optional: every setting has a default, and `NGO_HUB__*`
/// environment variables are layered on top of whatever the file provides.
pub fn load_config_from(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;

    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }
    if settings.inventory.low_stock_threshold < 0 {
        return Err(ConfigError::ValidationError(format!(
            "inventory.low_stock_threshold must not be negative, got {}",
            settings.inventory.low_stock_threshold
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = load_config_from(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.database.acquire_timeout_secs, 5);
        assert_eq!(settings.server.address(), "0.0.0.0:3000");
        assert_eq!(settings.inventory.low_stock_threshold, 10);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.directory.is_none());
    }

    #[test]
    fn file_overrides_defaults_per_field() {
        let file = write_config(
            r#"
            [server]
            port = 8080

            [inventory]
            low_stock_threshold = 25
            "#,
        );
        let settings = load_config_from(file.path()).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.inventory.low_stock_threshold, 25);
        assert!(settings.database.run_migrations);
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let file = write_config("[database]\nmax_connections = 0\n");
        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let file = write_config("[inventory]\nlow_stock_threshold = -1\n");
        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
