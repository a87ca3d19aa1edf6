//! Request and response types for the HTTP API

pub mod error;
pub mod json;
pub mod query;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use query::{LogsQuery, MAX_LOGS_LIMIT};
