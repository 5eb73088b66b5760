//! Configuration validation.

use url::Url;

use crate::error::ConfigError;
use crate::schema::Config;

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

    /// First error as a [`ConfigError`], if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(e) => Err(ConfigError::InvalidValue {
                field: e.path,
                message: e.message,
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

        Self::validate_target(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_check(config, &mut result);

        result
    }

    fn validate_target(config: &Config, result: &mut ValidationResult) {
        match Url::parse(&config.target.url) {
            Ok(url) if url.scheme() == "https" => {}
            Ok(url) if url.scheme() == "http" => {
                result.add_warning(ValidationWarning::new(
                    "target.url",
                    "target is served over plain http",
                ));
            }
            Ok(url) => {
                result.add_error(ValidationError::new(
                    "target.url",
                    format!("unsupported scheme '{}', expected http or https", url.scheme()),
                ));
            }
            Err(e) => {
                result.add_error(ValidationError::new(
                    "target.url",
                    format!("invalid URL: {}", e),
                ));
            }
        }

        if config.target.tab_selector.trim().is_empty() {
            result.add_error(ValidationError::new(
                "target.tab_selector",
                "tab_selector cannot be empty",
            ));
        }

        if config.target.tab_labels.iter().all(|l| l.is_empty()) {
            result.add_error(ValidationError::new(
                "target.tab_labels",
                "at least one non-empty tab label is required",
            ));
        }

        if config.target.panel_selector.trim().is_empty() {
            result.add_error(ValidationError::new(
                "target.panel_selector",
                "panel_selector cannot be empty",
            ));
        }

        if config.target.panel_marker.is_empty() {
            result.add_error(ValidationError::new(
                "target.panel_marker",
                "panel_marker cannot be empty",
            ));
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if let Some(ref path) = config.browser.chrome_path {
            if !path.exists() {
                result.add_error(ValidationError::new(
                    "browser.chrome_path",
                    format!("Browser executable does not exist: {:?}", path),
                ));
            }
        }

        if config.browser.viewport_width == 0 || config.browser.viewport_height == 0 {
            result.add_error(ValidationError::new(
                "browser.viewport",
                "viewport dimensions must be greater than 0",
            ));
        }
    }

    fn validate_check(config: &Config, result: &mut ValidationResult) {
        if config.check.render_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "check.render_timeout_secs",
                "render_timeout_secs must be greater than 0",
            ));
        }

        if config.check.settle_delay_ms > 60_000 {
            result.add_warning(ValidationWarning::new(
                "check.settle_delay_ms",
                "settle_delay_ms is over a minute, each pause will be slow",
            ));
        }

        let samples = [
            ("check.code_samples", config.check.code_samples),
            ("check.paragraph_samples", config.check.paragraph_samples),
        ];
        for (path, count) in samples {
            if count == 0 {
                result.add_warning(ValidationWarning::new(
                    path,
                    "sample size is 0, this check is skipped",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
