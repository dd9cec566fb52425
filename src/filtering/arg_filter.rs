use crate::errors::{ApiError, ConfigurationError};
use crate::view::ListView;

/// Maps one request parameter to a query predicate.
///
/// Implementations are built once, bound to their argument name while the
/// owning [`FilterSet`](super::FilterSet) is constructed, and shared by every
/// request afterwards. `apply` must not keep request data on `self`.
pub trait ArgFilter<V: ListView>: Send + Sync {
    /// Called exactly once when the filter is registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the filter is already tied to a
    /// different argument name.
    fn bind_name(&mut self, name: &str) -> Result<(), ConfigurationError>;

    /// Narrow `query` by the raw parameter value; `None` when the parameter
    /// is absent from the request.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` (normally 400) when the value is missing or invalid.
    fn apply(&self, query: V::Query, view: &V, raw: Option<&str>) -> Result<V::Query, ApiError>;

    /// Whether API documentation should mark the parameter as required
    fn is_required(&self) -> bool {
        false
    }
}
