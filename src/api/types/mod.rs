//! Request and response types shared by the handlers

pub mod error;
pub mod json;

pub use error::{ApiError, ApiErrorResponse, ErrorCode};
pub use json::Json;
