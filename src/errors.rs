//! # Error Handling for list endpoints
//!
//! Two families of errors exist:
//!
//! - [`ConfigurationError`] is raised while filters and filter sets are being
//!   built. It is fatal: a route whose filters fail to build must never serve
//!   traffic.
//! - [`ApiError`] is raised while a request is being processed. It carries an
//!   HTTP status and a list of structured [`ErrorEntry`] values, which are
//!   sent to the client as a JSON list:
//!
//! ```json
//! [{"code": "invalid_filter", "detail": "Not a valid integer.", "source": {"parameter": "size"}}]
//! ```
//!
//! Internal details (database errors, misconfigured views) are logged with
//! `tracing` but never sent to clients.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crudfilter::ApiError;
//!
//! async fn list_widgets(view: WidgetView) -> Result<Json<Vec<widget::Model>>, ApiError> {
//!     let query = FILTERING.filter_query(widget::Entity::find(), &view)?;
//!     let items = query.all(&db).await.map_err(ApiError::database)?;
//!     Ok(Json(items))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const INVALID_FILTER: &str = "invalid_filter";
pub const INVALID_FILTER_MISSING: &str = "invalid_filter.missing";
pub const INVALID_SORT: &str = "invalid_sort";
pub const NOT_FOUND: &str = "not_found";
pub const INTERNAL_SERVER_ERROR: &str = "internal_server_error";

/// Errors detected while building filters and filter sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("must specify operator")]
    MissingOperator,

    #[error(
        "cannot use ColumnFilter without explicit column name for multiple arg names \
         (bound to '{column}', got '{arg_name}')"
    )]
    AmbiguousColumn { column: String, arg_name: String },

    #[error("argument '{0}' is registered more than once")]
    DuplicateArgument(String),

    #[error("invalid specification: {0}")]
    InvalidSpecification(String),
}

/// Where in the request an error originated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// Name of the query-string parameter
    pub parameter: String,
}

/// One structured error object of a response body.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub code: String,
    pub detail: Option<String>,
    pub source: Option<ErrorSource>,
}

impl ErrorEntry {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            detail: None,
            source: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.source = Some(ErrorSource {
            parameter: parameter.into(),
        });
        self
    }
}

/// Request-time error: an HTTP status plus the entries sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    errors: Vec<ErrorEntry>,
    /// Internal details (logged, never sent to the client)
    internal: Option<String>,
}

impl ApiError {
    // ============================================================================
    // Constructors
    // ============================================================================

    pub fn new(status: StatusCode, errors: impl IntoIterator<Item = ErrorEntry>) -> Self {
        Self {
            status,
            errors: errors.into_iter().collect(),
            internal: None,
        }
    }

    /// Create a 400 Bad Request error with a single entry
    #[must_use]
    pub fn bad_request(entry: ErrorEntry) -> Self {
        Self::new(StatusCode::BAD_REQUEST, [entry])
    }

    /// A required filter parameter was absent from the request
    #[must_use]
    pub fn missing_filter() -> Self {
        Self::bad_request(ErrorEntry::new(INVALID_FILTER_MISSING))
    }

    /// One entry per validation message, all with code `invalid_filter`
    pub fn invalid_filter<I, S>(details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            StatusCode::BAD_REQUEST,
            details
                .into_iter()
                .map(|detail| ErrorEntry::new(INVALID_FILTER).with_detail(detail)),
        )
    }

    #[must_use]
    pub fn invalid_sort() -> Self {
        Self::bad_request(ErrorEntry::new(INVALID_SORT))
    }

    /// Create a 500 Internal Server Error
    ///
    /// `internal` is logged but not sent to the user.
    pub fn internal(message: impl Into<String>, internal: Option<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            errors: vec![ErrorEntry::new(INTERNAL_SERVER_ERROR).with_detail(message)],
            internal,
        }
    }

    /// Create a 500 Internal Server Error from a database error
    ///
    /// # Example
    /// ```rust,ignore
    /// let widgets = query.all(db).await.map_err(ApiError::database)?;
    /// ```
    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::internal("A database error occurred", Some(err.to_string()))
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn errors(&self) -> &[ErrorEntry] {
        &self.errors
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<ErrorEntry> {
        self.errors
    }

    /// Attribute every entry to the given query-string parameter.
    #[must_use]
    pub fn with_source_parameter(mut self, parameter: &str) -> Self {
        for entry in &mut self.errors {
            entry.source = Some(ErrorSource {
                parameter: parameter.to_owned(),
            });
        }
        self
    }

    /// Log internal error details (not sent to user)
    fn log_internal(&self) {
        if let Some(details) = &self.internal {
            tracing::error!(
                status = %self.status,
                details = %details,
                "Internal error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                status = %self.status,
                "API error"
            );
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();
        (self.status, Json(self.errors)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)?;
        for (i, entry) in self.errors.iter().enumerate() {
            f.write_str(if i == 0 { ": " } else { ", " })?;
            f.write_str(&entry.code)?;
            if let Some(detail) = &entry.detail {
                write!(f, " ({detail})")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// `DbErr::RecordNotFound` becomes 404, everything else 500 (logged, sanitized).
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(msg) => Self {
                status: StatusCode::NOT_FOUND,
                errors: vec![ErrorEntry::new(NOT_FOUND)],
                internal: Some(msg),
            },
            other => Self::database(other),
        }
    }
}
