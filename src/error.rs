//! Strip configuration errors
//!
//! Only setup can fail. Once a strip is scrolling, every optional step
//! degrades to a skip instead of an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StripError {
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSettings { field: &'static str, reason: String },
    #[error("obstacle catalog is empty")]
    EmptyObstacleCatalog,
    #[error("failed to read or write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

impl StripError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        StripError::InvalidSettings {
            field,
            reason: reason.into(),
        }
    }
}
