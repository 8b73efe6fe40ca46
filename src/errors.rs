//! Unified application error type.
//! Gateway, services, export and cli all return AppError so the binary can
//! map every failure to a single user-facing message.

use crate::api::ApiError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Remote API
    // ---------------------------
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The backend answered 2xx but flagged the operation as failed
    /// (`isSuccess: false`).
    #[error("Request rejected by server: {0}")]
    Rejected(String),

    #[error("Not authenticated: run `campusctl login` first")]
    NotAuthenticated,

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // ---------------------------
    // Local validation
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export / upload
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("Image upload failed: {0}")]
    Upload(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
