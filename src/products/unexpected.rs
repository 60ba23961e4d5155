use serde::{Deserialize, Serialize};
use thiserror::Error;


#[derive(Debug, Clone, Serialize, Deserialize, Error, PartialEq, Eq, Hash)]
/// Unexpected check result. Display renders the reason put in the failure report
pub enum Unexpected {
    /// URL couldn't be parsed (url, details)
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, String),

    /// Every connection attempt failed
    #[error("Failed to contact website")]
    ContactFailed,

    /// Request failed for a reason other than connectivity (details)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// HTTP status other than 200, ex. "404 Not Found"
    #[error("{0}")]
    HttpCodeInvalid(String),

    /// Content - expected content not found where expected
    #[error("Failed to find '{0}' in page")]
    ContentInvalid(String),
}
