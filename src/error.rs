//! Error types for the collaborators around the layout core.
//!
//! Layout itself never fails; these cover input validation, upstream
//! fetches and configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CardError {
    /// The handle is missing or not a valid GitHub login.
    #[error("invalid GitHub handle: {0:?}")]
    InvalidHandle(String),
    #[error("account not found: {0}")]
    NotFound(String),
    /// GitHub answered, but not with usable data.
    #[error("upstream API error: {0}")]
    Upstream(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

impl CardError {
    /// True when the caller, not the upstream service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CardError::InvalidHandle(_))
    }

    /// True when the failure came from fetching account data.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            CardError::NotFound(_) | CardError::Upstream(_) | CardError::Http(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CardError>;
