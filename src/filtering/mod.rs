//! # Filtering
//!
//! Translates list-endpoint query parameters into query predicates.
//!
//! ## Key Features
//!
//! - **Declarative**: one [`FilterSet`] per route maps argument names to filters
//! - **Validated**: raw values are decoded by field definitions; failures become
//!   structured `invalid_filter` errors attributed to the parameter
//! - **Multi-value**: `?name=Foo,Baz` matches either value
//! - **Stateless**: filters are built once and shared by every request
//!
//! ## Main Components
//!
//! - [`ArgFilter`]: the capability every filter implements
//! - [`FieldFilter`]: shared decode / split / validate pipeline
//! - [`ColumnFilter`]: compares one column with the decoded value
//! - [`ModelFilter`]: arbitrary predicate over the model, see [`model_filter`]
//! - [`FilterSet`]: applies all filters of a route, in order
//! - [`operators`]: Sea-ORM column operators
//!
//! ## Query Parameter Semantics
//!
//! ```text
//! GET /widgets?name=Foo              -- name = 'Foo'
//! GET /widgets?name=Foo,Baz          -- name = 'Foo' OR name = 'Baz'
//! GET /widgets?name=Foo&size_min=3   -- name = 'Foo' AND size >= 3
//! GET /widgets?name=                 -- matches nothing
//! GET /widgets                       -- unfiltered, unless a filter is required
//! ```
//!
//! Errors are sent as a JSON list:
//!
//! ```json
//! [{"code": "invalid_filter.missing", "source": {"parameter": "name"}}]
//! ```

pub mod arg_filter;
pub mod column;
pub mod field_filter;
pub mod model;
pub mod operators;
pub mod set;

pub use arg_filter::ArgFilter;
pub use column::{ColumnFilter, ColumnFilterBuilder, Operator};
pub use field_filter::{DEFAULT_SEPARATOR, FieldFilter, FieldOptions};
pub use model::{FilterFn, ModelFilter, model_filter};
pub use set::{FilterSet, FilterSetBuilder, FilterSpec};
