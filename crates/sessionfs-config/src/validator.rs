//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError::InvalidValue`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_session(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_session(config: &Config, result: &mut ValidationResult) {
        if config.session.save_path.as_os_str().is_empty() {
            result.add_error(ValidationError::new(
                "session.save_path",
                "save_path cannot be empty",
            ));
        }

        if config.session.lifetime == 0 {
            result.add_warning(ValidationWarning::new(
                "session.lifetime",
                "lifetime is 0, sessions are eligible for gc immediately",
            ));
        }

        if config.session.gc_max_lifetime < config.session.lifetime {
            result.add_warning(ValidationWarning::new(
                "session.gc_max_lifetime",
                format!(
                    "gc_max_lifetime ({}) is shorter than lifetime ({}), live sessions may be collected",
                    config.session.gc_max_lifetime, config.session.lifetime
                ),
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.trim();

        if level.is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "level cannot be empty",
            ));
            return;
        }

        // Per-target directives (`crate=debug,info`) are left to the filter parser.
        let is_directive = level.contains('=') || level.contains(',');
        if !is_directive && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!("Unknown log level '{}', valid values: {:?}", level, LOG_LEVELS),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
