use super::arg_filter::ArgFilter;
use super::column::{ColumnFilter, Operator};
use super::model::ModelFilter;
use crate::errors::{ApiError, ConfigurationError};
use crate::openapi::add_query_parameter;
use crate::view::ListView;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use utoipa::openapi::path::Operation;

/// What a [`FilterSet`] entry is registered with.
///
/// A bare operator is shorthand for a [`ColumnFilter`] whose column is the
/// argument name.
pub enum FilterSpec<V: ListView> {
    Operator(Operator<V>),
    Filter(Box<dyn ArgFilter<V>>),
}

impl<V: ListView + 'static> FilterSpec<V> {
    pub fn operator<F>(operator: F) -> Self
    where
        F: Fn(V::Column, V::Value) -> V::Predicate + Send + Sync + 'static,
    {
        Self::Operator(Arc::new(operator))
    }

    pub fn filter(filter: impl ArgFilter<V> + 'static) -> Self {
        Self::Filter(Box::new(filter))
    }

    fn into_arg_filter(self, name: &str) -> Box<dyn ArgFilter<V>> {
        match self {
            Self::Operator(operator) => Box::new(ColumnFilter::from_operator(name, operator)),
            Self::Filter(filter) => filter,
        }
    }
}

impl<V: ListView + 'static> From<ColumnFilter<V>> for FilterSpec<V> {
    fn from(filter: ColumnFilter<V>) -> Self {
        Self::filter(filter)
    }
}

impl<V: ListView + 'static> From<ModelFilter<V>> for FilterSpec<V> {
    fn from(filter: ModelFilter<V>) -> Self {
        Self::filter(filter)
    }
}

/// Ordered collection of argument filters applied to every list request.
///
/// Built once per route; construction binds every filter to its argument
/// name and fails on any misconfiguration. At request time the filters run
/// in registration order, each narrowing the query further, and the first
/// failure aborts with its errors attributed to the offending parameter.
///
/// ```rust,ignore
/// static FILTERING: LazyLock<FilterSet<WidgetView>> = LazyLock::new(|| {
///     FilterSet::builder()
///         .column("name", operators::eq)
///         .filter("size_min", ColumnFilter::new("size", operators::gte))
///         .filter("tag", model_filter(Field::string(), has_tag))
///         .build()
///         .expect("valid widget filters")
/// });
///
/// let query = FILTERING.filter_query(widget::Entity::find(), &view)?;
/// ```
pub struct FilterSet<V: ListView> {
    arg_filters: Vec<(String, Box<dyn ArgFilter<V>>)>,
}

impl<V: ListView + 'static> FilterSet<V> {
    /// # Errors
    ///
    /// Returns `ConfigurationError::DuplicateArgument` when a name appears
    /// twice, or the error of the first filter that refuses its name.
    pub fn new<I, S>(arg_filters: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (S, FilterSpec<V>)>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut bound = Vec::new();

        for (name, spec) in arg_filters {
            let name = name.into();
            if name.is_empty() {
                return Err(ConfigurationError::InvalidSpecification(
                    "argument names must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.clone()) {
                return Err(ConfigurationError::DuplicateArgument(name));
            }

            let mut filter = spec.into_arg_filter(&name);
            filter.bind_name(&name)?;
            bound.push((name, filter));
        }

        Ok(Self {
            arg_filters: bound,
        })
    }

    #[must_use]
    pub fn builder() -> FilterSetBuilder<V> {
        FilterSetBuilder {
            entries: Vec::new(),
        }
    }

    /// Narrow `query` by every registered filter, in registration order.
    ///
    /// # Errors
    ///
    /// Returns the first filter's `ApiError`, with every entry's
    /// `source.parameter` set to that filter's argument name.
    pub fn filter_query(&self, query: V::Query, view: &V) -> Result<V::Query, ApiError> {
        let args = view.args();
        self.arg_filters
            .iter()
            .try_fold(query, |query, (name, filter)| {
                filter.apply(query, view, args.get(name)).map_err(|err| {
                    tracing::debug!(parameter = %name, error = %err, "Rejected filter parameter");
                    err.with_source_parameter(name)
                })
            })
    }

    /// Declare every argument as a query parameter of `operation`.
    pub fn spec_declaration(&self, operation: &mut Operation) {
        for (name, filter) in &self.arg_filters {
            add_query_parameter(operation, name, filter.is_required(), None);
        }
    }

    /// Argument names in registration order
    pub fn arg_names(&self) -> impl Iterator<Item = &str> {
        self.arg_filters.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arg_filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arg_filters.is_empty()
    }
}

impl<V: ListView> fmt::Debug for FilterSet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.arg_filters.iter().map(|(name, _)| name))
            .finish()
    }
}

pub struct FilterSetBuilder<V: ListView> {
    entries: Vec<(String, FilterSpec<V>)>,
}

impl<V: ListView + 'static> FilterSetBuilder<V> {
    /// Filter the column named like the argument with `operator`
    #[must_use]
    pub fn column<F>(mut self, name: impl Into<String>, operator: F) -> Self
    where
        F: Fn(V::Column, V::Value) -> V::Predicate + Send + Sync + 'static,
    {
        self.entries.push((name.into(), FilterSpec::operator(operator)));
        self
    }

    #[must_use]
    pub fn filter(mut self, name: impl Into<String>, filter: impl ArgFilter<V> + 'static) -> Self {
        self.entries.push((name.into(), FilterSpec::filter(filter)));
        self
    }

    /// # Errors
    ///
    /// See [`FilterSet::new`].
    pub fn build(self) -> Result<FilterSet<V>, ConfigurationError> {
        FilterSet::new(self.entries)
    }
}
