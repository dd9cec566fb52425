use super::arg_filter::ArgFilter;
use super::field_filter::{FieldFilter, FieldOptions};
use crate::errors::{ApiError, ConfigurationError};
use crate::fields::FieldDefinition;
use crate::view::ListView;
use std::fmt;
use std::sync::Arc;

/// Builds the predicate for a decoded value against the whole model.
pub type FilterFn<V> = Arc<
    dyn Fn(&<V as ListView>::Model, <V as ListView>::Value) -> <V as ListView>::Predicate
        + Send
        + Sync,
>;

/// Filter on a virtual or derived attribute.
///
/// The value is decoded with a field definition owned by the filter rather
/// than the view's schema, and the predicate is built from the model by an
/// arbitrary function.
pub struct ModelFilter<V: ListView> {
    field: Arc<dyn FieldDefinition<V::Value>>,
    filter: FilterFn<V>,
    function_name: &'static str,
    options: FieldOptions,
}

impl<V: ListView> ModelFilter<V> {
    pub fn new<D, F>(field: D, filter: F) -> Self
    where
        D: FieldDefinition<V::Value> + 'static,
        F: Fn(&V::Model, V::Value) -> V::Predicate + Send + Sync + 'static,
    {
        Self::with_shared_field(Arc::new(field), filter)
    }

    /// Same as [`new`](ModelFilter::new) for a field definition shared with other filters
    pub fn with_shared_field<F>(field: Arc<dyn FieldDefinition<V::Value>>, filter: F) -> Self
    where
        F: Fn(&V::Model, V::Value) -> V::Predicate + Send + Sync + 'static,
    {
        Self {
            field,
            filter: Arc::new(filter),
            function_name: std::any::type_name::<F>(),
            options: FieldOptions::default(),
        }
    }

    /// Path of the wrapped filter function, e.g. `my_app::filters::by_size`
    #[must_use]
    pub fn function_name(&self) -> &'static str {
        self.function_name
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
    pub fn allow_empty(mut self) -> Self {
        self.options.allow_empty = true;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }
}

/// Wrap a plain `(model, value)` function into a [`ModelFilter`] decoding
/// its values with `field`.
///
/// ```rust,ignore
/// fn min_size(_: &widget::Entity, value: Value) -> Condition {
///     Condition::all().add(widget::Column::Size.gte(value))
/// }
///
/// let filter = model_filter(Field::integer(), min_size);
/// assert!(filter.function_name().ends_with("min_size"));
/// ```
pub fn model_filter<V, D, F>(field: D, filter: F) -> ModelFilter<V>
where
    V: ListView,
    D: FieldDefinition<V::Value> + 'static,
    F: Fn(&V::Model, V::Value) -> V::Predicate + Send + Sync + 'static,
{
    ModelFilter::new(field, filter)
}

impl<V: ListView> Clone for ModelFilter<V> {
    fn clone(&self) -> Self {
        Self {
            field: Arc::clone(&self.field),
            filter: Arc::clone(&self.filter),
            function_name: self.function_name,
            options: self.options.clone(),
        }
    }
}

impl<V: ListView> fmt::Debug for ModelFilter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelFilter")
            .field("function_name", &self.function_name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<V: ListView> FieldFilter<V> for ModelFilter<V> {
    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn field<'a>(&'a self, _view: &'a V) -> Result<&'a dyn FieldDefinition<V::Value>, ApiError> {
        Ok(self.field.as_ref())
    }

    fn clause(&self, view: &V, value: V::Value) -> Result<V::Predicate, ApiError> {
        Ok((self.filter)(view.model(), value))
    }
}

impl<V: ListView> ArgFilter<V> for ModelFilter<V> {
    fn bind_name(&mut self, _name: &str) -> Result<(), ConfigurationError> {
        Ok(())
    }

    fn apply(&self, query: V::Query, view: &V, raw: Option<&str>) -> Result<V::Query, ApiError> {
        self.filter_query(query, view, raw)
    }

    fn is_required(&self) -> bool {
        self.field.is_required()
    }
}
