//! Minimal predicate algebra and query-builder capabilities.
//!
//! Filters never depend on a storage technology directly: they build values
//! of some [`Predicate`] type and hand them to a [`FilterableQuery`]. The
//! Sea-ORM implementations live in [`crate::entity`].

/// Boolean expression narrowing a query's result set.
pub trait Predicate: Sized {
    /// Matches every row (no constraint)
    fn always() -> Self;

    /// Matches no row
    fn never() -> Self;

    #[must_use]
    fn and(self, other: Self) -> Self;

    #[must_use]
    fn or(self, other: Self) -> Self;

    /// OR of all `predicates`; [`never`](Predicate::never) when empty
    fn any_of<I>(predicates: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut predicates = predicates.into_iter();
        match predicates.next() {
            Some(first) => predicates.fold(first, Self::or),
            None => Self::never(),
        }
    }
}

/// A query that can be narrowed by a predicate.
pub trait FilterableQuery: Sized {
    type Predicate: Predicate;

    #[must_use]
    fn narrow(self, predicate: Self::Predicate) -> Self;
}

/// Direction of one sort criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A query that can be ordered by columns of type `C`.
pub trait SortableQuery<C>: Sized {
    /// Append an ordering criterion after any existing ones.
    #[must_use]
    fn order_by(self, column: C, direction: SortDirection) -> Self;
}
