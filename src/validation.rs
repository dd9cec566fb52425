//! Validation Support
//!
//! Field definitions report decoding and validation failures as
//! [`ValidationErrors`]: a flat list of messages, each with the path of the
//! (possibly nested) value it applies to. Filters turn every message into one
//! `invalid_filter` entry of the response.
//!
//! # Example
//!
//! ```rust
//! use crudfilter::validation::{ValidationError, ValidationErrors};
//!
//! let mut inner = ValidationErrors::new();
//! inner.add(ValidationError::new("Not a valid integer."));
//!
//! let mut errors = ValidationErrors::new();
//! errors.nest("range", inner);
//!
//! let flattened: Vec<_> = errors.iter_messages().collect();
//! assert_eq!(flattened, vec![("Not a valid integer.", &["range".to_string()][..])]);
//! ```

use serde::Serialize;
use std::fmt;

/// Validation error with its path and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Keys leading from the validated value to the failing part; empty for the value itself
    pub path: Vec<String>,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn at(mut self, key: impl Into<String>) -> Self {
        self.path.insert(0, key.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Merge errors of a nested value, prefixing their paths with `key`
    pub fn nest(&mut self, key: &str, nested: ValidationErrors) {
        self.errors
            .extend(nested.errors.into_iter().map(|error| error.at(key)));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Every message together with its path, depth-first in insertion order
    pub fn iter_messages(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|error| (error.message.as_str(), error.path.as_slice()))
    }

    /// Convert to Result
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was collected.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Helper validators for common patterns, usable with [`Field::validate`](crate::fields::Field::validate)
pub mod validators {
    use super::ValidationError;
    use std::fmt;

    /// Validate string length is within range
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when the length is outside the bounds.
    pub fn validate_length(
        value: &str,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Result<(), ValidationError> {
        let len = value.chars().count();

        if let Some(min_len) = min
            && len < min_len
        {
            return Err(ValidationError::new(format!(
                "Must be at least {min_len} characters"
            )));
        }

        if let Some(max_len) = max
            && len > max_len
        {
            return Err(ValidationError::new(format!(
                "Must be at most {max_len} characters"
            )));
        }

        Ok(())
    }

    /// Validate number is within range
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when the value is outside the bounds.
    pub fn validate_range<T: PartialOrd + fmt::Display>(
        value: &T,
        min: Option<T>,
        max: Option<T>,
    ) -> Result<(), ValidationError> {
        if let Some(min_val) = min
            && *value < min_val
        {
            return Err(ValidationError::new(format!("Must be at least {min_val}")));
        }

        if let Some(max_val) = max
            && *value > max_val
        {
            return Err(ValidationError::new(format!("Must be at most {max_val}")));
        }

        Ok(())
    }

    /// Validate value is one of the given choices
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` listing the choices when nothing matches.
    pub fn validate_one_of<T: PartialEq + fmt::Display>(
        value: &T,
        choices: &[T],
    ) -> Result<(), ValidationError> {
        if choices.contains(value) {
            return Ok(());
        }
        let choices = choices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(ValidationError::new(format!("Must be one of: {choices}.")))
    }
}
