//! Applies CLI overrides on top of the loaded configuration.
//!
//! Precedence, lowest first: configuration files, environment variables,
//! global flags (`--verbose`, `--quiet`), subcommand flags.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load unvalidated settings from the source selected by `--config` and
    /// `--env`. Validation happens once the overrides are applied.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Return the base settings with the CLI overrides applied, validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn merger() -> ConfigurationMerger {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/bookmarket".to_string();
        config.jwt.secret = "0123456789abcdef0123456789abcdef".to_string();
        ConfigurationMerger::new(config)
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        merger().merge_cli_args(&cli)
    }

    #[test]
    fn test_no_flags_keeps_base() {
        let merged = merge(&["bookmarket"]).unwrap();
        assert_eq!(&merged, merger().config());
    }

    #[test]
    fn test_global_log_flags() {
        assert_eq!(merge(&["bookmarket", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["bookmarket", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_overrides() {
        let merged = merge(&["bookmarket", "serve", "--host", "0.0.0.0", "--port", "8080"]).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn test_subcommand_log_level_beats_global_flag() {
        let merged = merge(&["bookmarket", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_merged_settings_are_validated() {
        let cli = Cli::try_parse_from(["bookmarket"]).unwrap();
        let result = ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
