use crate::errors::ApiError;
use crate::fields::FieldDefinition;
use crate::predicate::{FilterableQuery, Predicate};
use crate::view::ListView;
use serde::Deserialize;

pub const DEFAULT_SEPARATOR: &str = ",";

/// Splitting and emptiness options shared by field-based filters.
///
/// Deserializable so filter options can come from application config:
///
/// ```rust
/// let options: crudfilter::FieldOptions =
///     serde_json::from_str(r#"{"separator": "|", "allow_empty": true}"#).unwrap();
/// assert_eq!(options.separator.as_deref(), Some("|"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    /// Splits a raw value into OR-ed elements; `None` or `""` disables splitting
    pub separator: Option<String>,
    /// Treat an empty raw value as a regular element instead of "match nothing"
    pub allow_empty: bool,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            separator: Some(DEFAULT_SEPARATOR.to_owned()),
            allow_empty: false,
        }
    }
}

impl FieldOptions {
    fn active_separator(&self) -> Option<&str> {
        self.separator.as_deref().filter(|separator| !separator.is_empty())
    }
}

/// Decode, split and validate pipeline shared by field-based filters.
///
/// Implementors provide the field definition and how one decoded value turns
/// into a predicate; the provided methods do the rest:
///
/// - absent value: TRUE unless the field is required, in which case the
///   field's own "missing" validation error is reported
/// - empty value without `allow_empty`: FALSE
/// - value containing the separator: one predicate per element, OR-ed; the
///   first invalid element aborts and only its errors are reported
pub trait FieldFilter<V: ListView> {
    fn options(&self) -> &FieldOptions;

    /// # Errors
    ///
    /// Returns an internal `ApiError` when the view has no matching field.
    fn field<'a>(&'a self, view: &'a V) -> Result<&'a dyn FieldDefinition<V::Value>, ApiError>;

    /// Predicate for one successfully decoded value
    ///
    /// # Errors
    ///
    /// Returns an internal `ApiError` when the view cannot provide what the
    /// predicate needs.
    fn clause(&self, view: &V, value: V::Value) -> Result<V::Predicate, ApiError>;

    /// # Errors
    ///
    /// Returns `invalid_filter` entries for the first element that fails to decode.
    fn predicate(&self, view: &V, raw: Option<&str>) -> Result<V::Predicate, ApiError> {
        let Some(raw) = raw else {
            return self.element_predicate(view, None);
        };

        let options = self.options();
        if raw.is_empty() && !options.allow_empty {
            return Ok(V::Predicate::never());
        }

        match options.active_separator() {
            Some(separator) if raw.contains(separator) => {
                let predicates = raw
                    .split(separator)
                    .map(|element| self.element_predicate(view, Some(element)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(V::Predicate::any_of(predicates))
            }
            _ => self.element_predicate(view, Some(raw)),
        }
    }

    /// # Errors
    ///
    /// Returns one `invalid_filter` entry per validation message of `raw`.
    fn element_predicate(&self, view: &V, raw: Option<&str>) -> Result<V::Predicate, ApiError> {
        let field = self.field(view)?;
        if raw.is_none() && !field.is_required() {
            return Ok(V::Predicate::always());
        }

        let value = field.deserialize(raw).map_err(|errors| {
            ApiError::invalid_filter(errors.iter_messages().map(|(message, _path)| message))
        })?;

        self.clause(view, value)
    }

    /// # Errors
    ///
    /// Propagates the errors of [`predicate`](FieldFilter::predicate).
    fn filter_query(&self, query: V::Query, view: &V, raw: Option<&str>) -> Result<V::Query, ApiError> {
        Ok(query.narrow(self.predicate(view, raw)?))
    }
}
