//! Field definitions: decoding and validating raw query-string values.
//!
//! A [`FieldDefinition`] turns one raw string (or the absence of one) into a
//! typed value, or into [`ValidationErrors`]. The built-in [`Field`] covers
//! the scalar types used by list filters and converts the decoded value into
//! whatever value type the backend works with (`sea_orm::Value` for the
//! Sea-ORM backend), so one [`Schema`] can hold fields of mixed types.
//!
//! ```rust
//! use crudfilter::fields::{Field, FieldDefinition, Schema};
//! use crudfilter::validation::validators::validate_range;
//!
//! let schema: Schema<sea_orm::Value> = Schema::new()
//!     .field("name", Field::string())
//!     .field("size", Field::integer().validate(|v| validate_range(v, Some(0), None)));
//!
//! let size = schema.get("size").unwrap();
//! assert_eq!(size.deserialize(Some("3")).unwrap(), sea_orm::Value::from(3_i64));
//! assert!(size.deserialize(Some("-1")).is_err());
//! ```

use crate::validation::{ValidationError, ValidationErrors};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

pub const MISSING_MESSAGE: &str = "Missing data for required field.";

/// Schema-level decoder from a raw string to a value of type `V`.
pub trait FieldDefinition<V>: Send + Sync {
    /// Whether an absent value is an error rather than "no constraint"
    fn is_required(&self) -> bool;

    /// Decode and validate `raw`; `None` means the parameter was absent.
    ///
    /// # Errors
    ///
    /// Returns every validation message that applies to `raw`.
    fn deserialize(&self, raw: Option<&str>) -> Result<V, ValidationErrors>;
}

/// Scalar types a [`Field`] can decode.
pub trait FieldType: Sized + Send + Sync + 'static {
    /// # Errors
    ///
    /// Returns a message describing why `raw` is not a valid value.
    fn parse(raw: &str) -> Result<Self, ValidationError>;
}

impl FieldType for String {
    fn parse(raw: &str) -> Result<Self, ValidationError> {
        Ok(raw.to_owned())
    }
}

impl FieldType for i32 {
    fn parse(raw: &str) -> Result<Self, ValidationError> {
        raw.trim()
            .parse()
            .map_err(|_| ValidationError::new("Not a valid integer."))
    }
}

impl FieldType for i64 {
    fn parse(raw: &str) -> Result<Self, ValidationError> {
        raw.trim()
            .parse()
            .map_err(|_| ValidationError::new("Not a valid integer."))
    }
}

impl FieldType for f64 {
    fn parse(raw: &str) -> Result<Self, ValidationError> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| ValidationError::new("Not a valid number."))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ValidationError::new(
                "Special numeric values (nan or infinity) are not permitted.",
            ))
        }
    }
}

const TRUTHY: &[&str] = &["t", "true", "on", "y", "yes", "1"];
const FALSY: &[&str] = &["f", "false", "off", "n", "no", "0"];

impl FieldType for bool {
    fn parse(raw: &str) -> Result<Self, ValidationError> {
        let lowered = raw.trim().to_ascii_lowercase();
        if TRUTHY.contains(&lowered.as_str()) {
            Ok(true)
        } else if FALSY.contains(&lowered.as_str()) {
            Ok(false)
        } else {
            Err(ValidationError::new("Not a valid boolean."))
        }
    }
}

impl FieldType for Uuid {
    fn parse(raw: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(raw.trim()).map_err(|_| ValidationError::new("Not a valid UUID."))
    }
}

type Validator<T> = Box<dyn Fn(&T) -> Result<(), ValidationError> + Send + Sync>;

/// Built-in scalar field with optional validators.
pub struct Field<T> {
    required: bool,
    validators: Vec<Validator<T>>,
}

impl<T: FieldType> Field<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            required: false,
            validators: Vec::new(),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Add a validator run on the decoded value. All validators run; every
    /// failure is reported.
    #[must_use]
    pub fn validate<F>(mut self, validator: F) -> Self
    where
        F: Fn(&T) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }
}

impl<T: FieldType> Default for Field<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl Field<String> {
    #[must_use]
    pub fn string() -> Self {
        Self::new()
    }
}

impl Field<i64> {
    #[must_use]
    pub fn integer() -> Self {
        Self::new()
    }
}

impl Field<f64> {
    #[must_use]
    pub fn float() -> Self {
        Self::new()
    }
}

impl Field<bool> {
    #[must_use]
    pub fn boolean() -> Self {
        Self::new()
    }
}

impl Field<Uuid> {
    #[must_use]
    pub fn uuid() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("type", &std::any::type_name::<T>())
            .field("required", &self.required)
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl<T, V> FieldDefinition<V> for Field<T>
where
    T: FieldType,
    V: From<T>,
{
    fn is_required(&self) -> bool {
        self.required
    }

    fn deserialize(&self, raw: Option<&str>) -> Result<V, ValidationErrors> {
        let raw = raw.ok_or_else(|| ValidationError::new(MISSING_MESSAGE))?;
        let value = T::parse(raw)?;

        let mut errors = ValidationErrors::new();
        for validator in &self.validators {
            if let Err(error) = validator(&value) {
                errors.add(error);
            }
        }
        errors.result()?;

        Ok(value.into())
    }
}

/// Named field definitions of one resource.
pub struct Schema<V> {
    fields: HashMap<String, Arc<dyn FieldDefinition<V>>>,
}

impl<V> Schema<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field: impl FieldDefinition<V> + 'static) -> Self {
        self.fields.insert(name.into(), Arc::new(field));
        self
    }

    /// Register a definition that is shared with other schemas or filters
    #[must_use]
    pub fn shared_field(mut self, name: impl Into<String>, field: Arc<dyn FieldDefinition<V>>) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn FieldDefinition<V>> {
        self.fields.get(name).map(AsRef::as_ref)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<V> Default for Schema<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Schema<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("Schema").field("fields", &names).finish()
    }
}
