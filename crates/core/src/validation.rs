//! Configuration validation
//!
//! Collects every problem in a configuration before failing, so the user sees
//! them all at once instead of fixing one value per run.
//!
//! # Example
//!
//! ```
//! use laserlookup_core::validation::Validator;
//!
//! let report = Validator::new()
//!     .range("search.strict_threshold", 1.5, 0.0, 1.0)
//!     .positive("search.strict_limit", 8)
//!     .finish();
//!
//! assert!(!report.is_valid());
//! assert_eq!(report.errors().len(), 1);
//! ```

use crate::error::{Error, ErrorCode, Result};
use serde::{Deserialize, Serialize};

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted config key that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Stable machine-readable code
    pub code: String,
    /// Offending value, if any
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some(actual) = &self.actual {
            write!(f, " (got {actual})")?;
        }
        Ok(())
    }
}

/// Validation outcome
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationIssue] {
        &self.warnings
    }

    /// Convert to Result type
    ///
    /// # Errors
    ///
    /// Returns a [`ErrorCode::ConfigValidationError`] listing every issue.
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        Err(Error::new(
            ErrorCode::ConfigValidationError,
            format!("Invalid configuration: {}", messages.join("; ")),
        ))
    }
}

/// Fluent validator builder
#[derive(Debug, Default)]
pub struct Validator {
    report: ValidationReport,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate an inclusive numeric range
    #[must_use]
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        // Written as a negated conjunction so NaN fails too.
        if !(value >= min && value <= max) {
            self.report.errors.push(ValidationIssue {
                field: field.to_string(),
                message: format!("Must be between {min} and {max}"),
                code: "RANGE".to_string(),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate that a count is non-zero
    #[must_use]
    pub fn positive(mut self, field: &str, value: u64) -> Self {
        if value == 0 {
            self.report.errors.push(ValidationIssue {
                field: field.to_string(),
                message: "Must be greater than zero".to_string(),
                code: "POSITIVE".to_string(),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate that a weight is finite and strictly positive
    #[must_use]
    pub fn weight(mut self, field: &str, value: f64) -> Self {
        if !(value.is_finite() && value > 0.0) {
            self.report.errors.push(ValidationIssue {
                field: field.to_string(),
                message: "Must be a positive number".to_string(),
                code: "WEIGHT".to_string(),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Record a warning when `condition` holds
    #[must_use]
    pub fn warn_if(mut self, condition: bool, field: &str, message: &str) -> Self {
        if condition {
            self.report.warnings.push(ValidationIssue {
                field: field.to_string(),
                message: message.to_string(),
                code: "WARNING".to_string(),
                actual: None,
            });
        }
        self
    }

    /// Finish and return the report
    pub fn finish(self) -> ValidationReport {
        self.report
    }
}
