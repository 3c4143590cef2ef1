//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain spaces, got '{0}'")]
    InvalidServerName(String),
    #[error("server.password must not be blank")]
    BlankPassword,
    #[error("limits.max_line_len must be at least {min}, got {actual}")]
    LineLimitTooSmall { min: usize, actual: usize },
    #[error("limits.sendq must be at least 1")]
    ZeroSendq,
}

/// Shortest line limit that still fits a full registration line.
const MIN_LINE_LEN: usize = 64;

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = &config.server.name;
    if name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if name.contains(char::is_whitespace) {
        errors.push(ValidationError::InvalidServerName(name.clone()));
    }

    if config.server.password.trim().is_empty() {
        errors.push(ValidationError::BlankPassword);
    }

    if config.limits.max_line_len < MIN_LINE_LEN {
        errors.push(ValidationError::LineLimitTooSmall {
            min: MIN_LINE_LEN,
            actual: config.limits.max_line_len,
        });
    }
    if config.limits.sendq == 0 {
        errors.push(ValidationError::ZeroSendq);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LimitsConfig, ListenConfig, ServerConfig};

    fn config() -> Config {
        Config {
            server: ServerConfig {
                name: "irc.test".into(),
                network: "test".into(),
                password: "pw".into(),
                description: String::new(),
            },
            listen: ListenConfig {
                address: "127.0.0.1:0".parse().unwrap(),
            },
            limits: LimitsConfig::default(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(validate(&config()), Ok(()));
    }

    #[test]
    fn collects_every_error() {
        let mut config = config();
        config.server.name = "bad name".into();
        config.limits.max_line_len = 10;
        config.limits.sendq = 0;

        let errors = validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidServerName("bad name".into()),
                ValidationError::LineLimitTooSmall { min: 64, actual: 10 },
                ValidationError::ZeroSendq,
            ]
        );
    }

    #[test]
    fn empty_name_is_missing() {
        let mut config = config();
        config.server.name.clear();
        assert_eq!(
            validate(&config),
            Err(vec![ValidationError::MissingServerName])
        );
    }
}
