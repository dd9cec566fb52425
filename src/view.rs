//! The per-request view a filter or sorting runs against.

use crate::args::RequestArgs;
use crate::fields::FieldDefinition;
use crate::predicate::{FilterableQuery, Predicate};

/// Context of one list request: its arguments plus the resource's model,
/// columns and field definitions.
///
/// A view value is created per request and passed by reference through
/// filtering and sorting; shared filter objects never store request data.
pub trait ListView {
    /// Handed to model filter functions
    type Model;
    /// Column reference handed to column operators
    type Column;
    /// Decoded field value
    type Value: 'static;
    type Predicate: Predicate;
    type Query: FilterableQuery<Predicate = Self::Predicate>;

    fn args(&self) -> &RequestArgs;

    fn model(&self) -> &Self::Model;

    /// Column reference for `name`, if the model has such a column
    fn column(&self, name: &str) -> Option<Self::Column>;

    /// Field definition used to decode values for `name`
    fn field(&self, name: &str) -> Option<&dyn FieldDefinition<Self::Value>>;

    /// Primary-key columns in declaration order
    fn primary_key(&self) -> Vec<Self::Column> {
        Vec::new()
    }
}
