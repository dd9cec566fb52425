//! # crudfilter
//!
//! Declarative query-parameter filtering and sorting for list endpoints built
//! on Axum and Sea-ORM.
//!
//! A route declares once which query parameters it accepts and how each one
//! maps to a predicate; every request then narrows the entity query with the
//! parameters it carries, or is rejected with structured, parameter-attributed
//! errors.
//!
//! ```rust,ignore
//! use crudfilter::{ColumnFilter, FilterSet, Sorting, operators};
//!
//! let filtering = FilterSet::builder()
//!     .column("name", operators::eq)
//!     .filter("size_min", ColumnFilter::new("size", operators::gte))
//!     .build()?;
//! let sorting = Sorting::new(["name", "size"]);
//!
//! // GET /widgets?name=Foo,Baz&size_min=3&sort=-size
//! let widgets = crudfilter::routes::list(&db, &view, &filtering, &sorting).await?;
//! ```

pub mod args;
pub mod entity;
pub mod errors;
pub mod fields;
pub mod filtering;
pub mod openapi;
pub mod predicate;
pub mod routes;
pub mod sorting;
pub mod validation;
pub mod view;

#[cfg(test)]
mod test_utils;

pub use args::RequestArgs;
pub use entity::{EntityView, entity_schema};
pub use errors::{ApiError, ConfigurationError, ErrorEntry, ErrorSource};
pub use fields::{Field, FieldDefinition, Schema};
pub use filtering::{
    ArgFilter, ColumnFilter, FieldFilter, FieldOptions, FilterSet, FilterSpec, ModelFilter,
    model_filter, operators,
};
pub use predicate::{FilterableQuery, Predicate, SortDirection, SortableQuery};
pub use sorting::{FixedSorting, PrimaryKeySorting, Sort, Sorting};
pub use view::ListView;
