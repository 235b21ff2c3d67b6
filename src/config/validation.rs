//! Configuration validation logic

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseBackend, DatabaseConfig, FileSettings, JwtConfig, LoggerSettings, ServerConfig,
    Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const MIN_JWT_SECRET_LEN: usize = 32;

/// Value shipped in `config/default.toml`
const PLACEHOLDER_JWT_SECRET: &str = "change-me-change-me-change-me-change-me";

impl ServerConfig {
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// # Validation Rules
    /// - The postgres backend needs a `postgres://` or `postgresql://` URL
    /// - Pool sizes must be positive with min <= max
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == DatabaseBackend::Postgres {
            if self.url.is_empty() {
                return Err(ConfigError::validation(
                    "database.url",
                    "Database URL is required for the postgres backend.",
                ));
            }

            if !self.is_valid_database_url() {
                return Err(ConfigError::validation(
                    "database.url",
                    "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
                ));
            }
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        Ok(())
    }

    fn is_valid_database_url(&self) -> bool {
        ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}

impl JwtConfig {
    /// # Validation Rules
    /// - Secret must hold at least 32 characters
    /// - Both lifetimes must be positive, refresh longer than access
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret cannot be empty",
            ));
        }

        if self.secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::validation(
                "jwt.secret",
                format!("JWT secret should be at least {MIN_JWT_SECRET_LEN} characters"),
            ));
        }

        if self.access_token_expiration <= 0 {
            return Err(ConfigError::validation(
                "jwt.access_token_expiration",
                "Access token expiration must be positive",
            ));
        }

        if self.refresh_token_expiration <= 0 {
            return Err(ConfigError::validation(
                "jwt.refresh_token_expiration",
                "Refresh token expiration must be positive",
            ));
        }

        if self.access_token_expiration >= self.refresh_token_expiration {
            return Err(ConfigError::validation(
                "jwt",
                "Refresh token expiration should be longer than access token expiration",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one of logger.console or logger.file must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate every section, returning the first error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.jwt.validate()?;
        if self.application.environment.is_production()
            && self.jwt.secret == PLACEHOLDER_JWT_SECRET
        {
            return Err(ConfigError::validation(
                "jwt.secret",
                "The default JWT secret cannot be used in production. Set BOOKMARKET_JWT__SECRET.",
            ));
        }
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/bookmarket".to_string();
        settings.jwt.secret = "a".repeat(32);
        settings
    }

    #[test]
    fn test_settings_valid() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_server_port_zero_rejected() {
        let mut settings = valid_settings();
        settings.server.port = 0;

        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "server.port"));
    }

    #[test]
    fn test_postgres_backend_requires_url() {
        let mut settings = valid_settings();
        settings.database.url.clear();

        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "database.url"));
    }

    #[test]
    fn test_memory_backend_needs_no_url() {
        let mut settings = valid_settings();
        settings.database.backend = DatabaseBackend::Memory;
        settings.database.url.clear();

        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_non_postgres_url_rejected() {
        let config = DatabaseConfig {
            url: "mysql://localhost/db".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_connections_exceeding_max_rejected() {
        let config = DatabaseConfig {
            url: "postgres://localhost/db".to_string(),
            max_connections: 2,
            min_connections: 5,
            ..Default::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let config = JwtConfig {
            secret: "short".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_refresh_must_outlive_access() {
        let config = JwtConfig {
            secret: "a".repeat(40),
            access_token_expiration: 10,
            refresh_token_expiration: 10,
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "jwt"));
    }

    #[test]
    fn test_placeholder_jwt_secret_rejected_in_production() {
        let mut settings = valid_settings();
        settings.jwt.secret = PLACEHOLDER_JWT_SECRET.to_string();
        assert!(settings.validate().is_ok());

        settings.application.environment = Environment::Production;
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "jwt.secret"));

        settings.jwt.secret = "b".repeat(48);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_shipped_default_secret_matches_placeholder() {
        let default: toml::Value =
            toml::from_str(include_str!("../../config/default.toml")).unwrap();
        assert_eq!(default["jwt"]["secret"].as_str(), Some(PLACEHOLDER_JWT_SECRET));
    }

    #[test]
    fn test_logger_invalid_level_rejected() {
        let mut settings = valid_settings();
        settings.logger.level = "verbose".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_logger_file_enabled_empty_path_rejected() {
        let mut settings = valid_settings();
        settings.logger.file.enabled = true;
        settings.logger.file.path = "  ".to_string();

        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "logger.file.path"));
    }

    #[test]
    fn test_logger_all_outputs_disabled_rejected() {
        let mut settings = valid_settings();
        settings.logger.console.enabled = false;
        settings.logger.file.enabled = false;
        assert!(settings.validate().is_err());
    }
}
