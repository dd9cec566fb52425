use super::arg_filter::ArgFilter;
use super::field_filter::{FieldFilter, FieldOptions};
use crate::errors::{ApiError, ConfigurationError};
use crate::fields::FieldDefinition;
use crate::view::ListView;
use std::fmt;
use std::sync::Arc;

/// Builds the predicate for one column and one decoded value.
pub type Operator<V> = Arc<
    dyn Fn(<V as ListView>::Column, <V as ListView>::Value) -> <V as ListView>::Predicate
        + Send
        + Sync,
>;

/// Filter comparing one model column against the decoded parameter value.
///
/// The column is either given explicitly or inferred from the argument name
/// the filter is registered under. Values are decoded with the view's field
/// definition of the same name.
///
/// ```rust,ignore
/// let by_size = ColumnFilter::new("size", operators::gte);
/// let by_name = ColumnFilter::inferred(operators::eq).required();
/// ```
pub struct ColumnFilter<V: ListView> {
    column_name: Option<String>,
    explicit_column: bool,
    operator: Operator<V>,
    required: bool,
    options: FieldOptions,
}

impl<V: ListView> ColumnFilter<V> {
    /// Filter on an explicitly named column
    pub fn new<F>(column_name: impl Into<String>, operator: F) -> Self
    where
        F: Fn(V::Column, V::Value) -> V::Predicate + Send + Sync + 'static,
    {
        Self::from_parts(Some(column_name.into()), Arc::new(operator))
    }

    /// Filter whose column is the argument name it gets registered under
    pub fn inferred<F>(operator: F) -> Self
    where
        F: Fn(V::Column, V::Value) -> V::Predicate + Send + Sync + 'static,
    {
        Self::from_parts(None, Arc::new(operator))
    }

    #[must_use]
    pub fn builder() -> ColumnFilterBuilder<V> {
        ColumnFilterBuilder::new()
    }

    fn from_parts(column_name: Option<String>, operator: Operator<V>) -> Self {
        Self {
            explicit_column: column_name.is_some(),
            column_name,
            operator,
            required: false,
            options: FieldOptions::default(),
        }
    }

    pub(crate) fn from_operator(column_name: &str, operator: Operator<V>) -> Self {
        Self::from_parts(Some(column_name.to_owned()), operator)
    }

    /// Reject requests that omit the parameter with `invalid_filter.missing`
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.options.separator = Some(separator.into());
        self
    }

    /// Never split the raw value
    #[must_use]
    pub fn no_separator(mut self) -> Self {
        self.options.separator = None;
        self
    }

    #[must_use]
    pub fn allow_empty(mut self) -> Self {
        self.options.allow_empty = true;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// The target column, once known
    #[must_use]
    pub fn column_name(&self) -> Option<&str> {
        self.column_name.as_deref()
    }

    fn bound_column(&self) -> Result<&str, ApiError> {
        self.column_name.as_deref().ok_or_else(|| {
            ApiError::internal(
                "Filter misconfigured",
                Some("ColumnFilter applied before being bound to an argument name".to_owned()),
            )
        })
    }
}

impl<V: ListView> Clone for ColumnFilter<V> {
    fn clone(&self) -> Self {
        Self {
            column_name: self.column_name.clone(),
            explicit_column: self.explicit_column,
            operator: Arc::clone(&self.operator),
            required: self.required,
            options: self.options.clone(),
        }
    }
}

impl<V: ListView> fmt::Debug for ColumnFilter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnFilter")
            .field("column_name", &self.column_name)
            .field("explicit_column", &self.explicit_column)
            .field("required", &self.required)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<V: ListView> FieldFilter<V> for ColumnFilter<V> {
    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn field<'a>(&'a self, view: &'a V) -> Result<&'a dyn FieldDefinition<V::Value>, ApiError> {
        let name = self.bound_column()?;
        view.field(name).ok_or_else(|| {
            ApiError::internal(
                "Filter misconfigured",
                Some(format!("no field definition for column '{name}'")),
            )
        })
    }

    fn clause(&self, view: &V, value: V::Value) -> Result<V::Predicate, ApiError> {
        let name = self.bound_column()?;
        let column = view.column(name).ok_or_else(|| {
            ApiError::internal(
                "Filter misconfigured",
                Some(format!("model has no column '{name}'")),
            )
        })?;
        Ok((self.operator)(column, value))
    }
}

impl<V: ListView> ArgFilter<V> for ColumnFilter<V> {
    fn bind_name(&mut self, name: &str) -> Result<(), ConfigurationError> {
        if self.explicit_column {
            return Ok(());
        }

        match &self.column_name {
            Some(column) if column != name => Err(ConfigurationError::AmbiguousColumn {
                column: column.clone(),
                arg_name: name.to_owned(),
            }),
            _ => {
                self.column_name = Some(name.to_owned());
                Ok(())
            }
        }
    }

    fn apply(&self, query: V::Query, view: &V, raw: Option<&str>) -> Result<V::Query, ApiError> {
        // The schema field's own required flag does not apply to columns.
        if raw.is_none() {
            return if self.required {
                Err(ApiError::missing_filter())
            } else {
                Ok(query)
            };
        }

        self.filter_query(query, view, raw)
    }

    fn is_required(&self) -> bool {
        self.required
    }
}

/// Step-by-step construction of a [`ColumnFilter`] from configuration.
///
/// Unlike the direct constructors, the operator may be left out here, in
/// which case [`build`](ColumnFilterBuilder::build) fails before any request
/// is served.
pub struct ColumnFilterBuilder<V: ListView> {
    column_name: Option<String>,
    operator: Option<Operator<V>>,
    required: bool,
    options: FieldOptions,
}

impl<V: ListView> ColumnFilterBuilder<V> {
    fn new() -> Self {
        Self {
            column_name: None,
            operator: None,
            required: false,
            options: FieldOptions::default(),
        }
    }

    #[must_use]
    pub fn column(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    #[must_use]
    pub fn operator<F>(mut self, operator: F) -> Self
    where
        F: Fn(V::Column, V::Value) -> V::Predicate + Send + Sync + 'static,
    {
        self.operator = Some(Arc::new(operator));
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.options.separator = Some(separator.into());
        self
    }

    #[must_use]
    pub fn no_separator(mut self) -> Self {
        self.options.separator = None;
        self
    }

    #[must_use]
    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.options.allow_empty = allow_empty;
        self
    }

    #[must_use]
    pub fn options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingOperator` when no operator was set.
    pub fn build(self) -> Result<ColumnFilter<V>, ConfigurationError> {
        let operator = self.operator.ok_or(ConfigurationError::MissingOperator)?;
        let mut filter = ColumnFilter::from_parts(self.column_name, operator);
        filter.required = self.required;
        filter.options = self.options;
        Ok(filter)
    }
}
