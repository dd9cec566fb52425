//! # Sorting
//!
//! Orders list queries from the `sort` query parameter:
//!
//! ```text
//! GET /widgets?sort=size          -- by size ascending
//! GET /widgets?sort=name,-size    -- by name, then by size descending
//! ```
//!
//! Every named field must have been registered on the [`Sorting`]; anything
//! else (including an empty value) is rejected with `invalid_sort`.
//! [`FixedSorting`] and [`PrimaryKeySorting`] ignore the request and always
//! apply the same ordering.

use crate::errors::ApiError;
use crate::openapi::add_query_parameter;
use crate::predicate::{SortDirection, SortableQuery};
use crate::view::ListView;
use utoipa::openapi::path::Operation;

/// Name of the query parameter read by [`Sorting`]
pub const SORT_ARG: &str = "sort";

/// Orders a list query.
pub trait Sort<V: ListView>: Send + Sync {
    /// # Errors
    ///
    /// Returns `invalid_sort` for a rejected request, or an internal error
    /// when a configured field has no column.
    fn sort_query(&self, query: V::Query, view: &V) -> Result<V::Query, ApiError>;

    /// Declare the query parameters read by this sorting
    fn spec_declaration(&self, _operation: &mut Operation) {}
}

/// One field of a sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOrdering {
    pub field: String,
    pub direction: SortDirection,
}

impl FieldOrdering {
    /// Parse `"name,-size"` into its orderings; a leading `-` means descending.
    #[must_use]
    pub fn parse_list(spec: &str) -> Vec<Self> {
        spec.split(',')
            .map(|field| match field.strip_prefix('-') {
                Some(field) => Self {
                    field: field.to_owned(),
                    direction: SortDirection::Desc,
                },
                None => Self {
                    field: field.to_owned(),
                    direction: SortDirection::Asc,
                },
            })
            .collect()
    }
}

fn resolve_column<V: ListView>(view: &V, field: &str) -> Result<V::Column, ApiError> {
    view.column(field).ok_or_else(|| {
        ApiError::internal(
            "Sorting misconfigured",
            Some(format!("model has no column '{field}'")),
        )
    })
}

fn apply_orderings<V>(
    query: V::Query,
    view: &V,
    orderings: &[FieldOrdering],
) -> Result<V::Query, ApiError>
where
    V: ListView,
    V::Query: SortableQuery<V::Column>,
{
    orderings.iter().try_fold(query, |query, ordering| {
        let column = resolve_column(view, &ordering.field)?;
        Ok(query.order_by(column, ordering.direction))
    })
}

/// Client-controlled sorting over a fixed set of field names.
///
/// ```rust,ignore
/// let sorting = Sorting::new(["name", "size"]).with_default("-size");
/// let query = sorting.sort_query(query, &view)?;
/// ```
#[derive(Debug, Clone)]
pub struct Sorting {
    field_names: Vec<String>,
    default: Option<String>,
}

impl Sorting {
    pub fn new<I, S>(field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_names: field_names.into_iter().map(Into::into).collect(),
            default: None,
        }
    }

    /// Sort applied when the request has no `sort` parameter
    #[must_use]
    pub fn with_default(mut self, sort: impl Into<String>) -> Self {
        self.default = Some(sort.into());
        self
    }

    #[must_use]
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    fn requested_orderings(&self, raw: &str) -> Result<Vec<FieldOrdering>, ApiError> {
        let orderings = FieldOrdering::parse_list(raw);
        if let Some(unknown) = orderings
            .iter()
            .find(|ordering| !self.field_names.contains(&ordering.field))
        {
            tracing::debug!(field = %unknown.field, "Rejected sort field");
            return Err(ApiError::invalid_sort().with_source_parameter(SORT_ARG));
        }
        Ok(orderings)
    }
}

impl<V> Sort<V> for Sorting
where
    V: ListView,
    V::Query: SortableQuery<V::Column>,
{
    fn sort_query(&self, query: V::Query, view: &V) -> Result<V::Query, ApiError> {
        let Some(raw) = view.args().get(SORT_ARG).or(self.default.as_deref()) else {
            return Ok(query);
        };

        let orderings = self.requested_orderings(raw)?;
        apply_orderings(query, view, &orderings)
    }

    fn spec_declaration(&self, operation: &mut Operation) {
        let description = format!(
            "Comma-separated fields to sort by, prefix with '-' for descending: {}",
            self.field_names.join(", ")
        );
        add_query_parameter(operation, SORT_ARG, false, Some(&description));
    }
}

/// Always applies the same ordering, whatever the request says.
#[derive(Debug, Clone)]
pub struct FixedSorting {
    orderings: Vec<FieldOrdering>,
}

impl FixedSorting {
    /// `spec` uses the same syntax as the `sort` parameter, e.g. `"name,-size"`
    #[must_use]
    pub fn new(spec: &str) -> Self {
        Self {
            orderings: FieldOrdering::parse_list(spec),
        }
    }

    #[must_use]
    pub fn orderings(&self) -> &[FieldOrdering] {
        &self.orderings
    }
}

impl<V> Sort<V> for FixedSorting
where
    V: ListView,
    V::Query: SortableQuery<V::Column>,
{
    fn sort_query(&self, query: V::Query, view: &V) -> Result<V::Query, ApiError> {
        apply_orderings(query, view, &self.orderings)
    }
}

/// Orders by the view's primary-key columns, ascending.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryKeySorting;

impl<V> Sort<V> for PrimaryKeySorting
where
    V: ListView,
    V::Query: SortableQuery<V::Column>,
{
    fn sort_query(&self, query: V::Query, view: &V) -> Result<V::Query, ApiError> {
        Ok(view
            .primary_key()
            .into_iter()
            .fold(query, |query, column| query.order_by(column, SortDirection::Asc)))
    }
}
