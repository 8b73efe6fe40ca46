use std::fmt::{self, Formatter, Write};

/// Outcome class of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    /// The server answered with a non-2xx status code.
    Http(u16),
    /// The request did not complete within the configured timeout.
    Timeout,
    /// The server could not be reached at all.
    Network,
}

impl ApiStatus {
    /// Numeric status: the HTTP code, 408 for timeouts, 0 for network failures.
    pub fn code(&self) -> u16 {
        match self {
            ApiStatus::Http(code) => *code,
            ApiStatus::Timeout => 408,
            ApiStatus::Network => 0,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiStatus::Timeout)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiStatus::Network)
    }
}

/// Typed error raised by the gateway for every failed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: ApiStatus,
    pub status_text: String,
    /// Message supplied by the server body (`message` or `error` field).
    pub message: Option<String>,
}

impl ApiError {
    pub fn http(code: u16, status_text: impl Into<String>, message: Option<String>) -> Self {
        Self {
            status: ApiStatus::Http(code),
            status_text: status_text.into(),
            message,
        }
    }

    pub fn timeout() -> Self {
        Self {
            status: ApiStatus::Timeout,
            status_text: "timeout".to_string(),
            message: None,
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::Network,
            status_text: "network error".to_string(),
            message: Some(detail.into()),
        }
    }

    pub fn code(&self) -> u16 {
        self.status.code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.status {
            ApiStatus::Http(code) => write!(f, "{code}")?,
            ApiStatus::Timeout => f.write_str("request timed out")?,
            ApiStatus::Network => f.write_str("network failure")?,
        }

        if matches!(self.status, ApiStatus::Http(_)) && !self.status_text.is_empty() {
            f.write_char(' ')?;
            f.write_str(&self.status_text)?;
        }

        if let Some(ref msg) = self.message {
            f.write_str(": ")?;
            f.write_str(msg)?;
        }

        Ok(())
    }
}

impl std::error::Error for ApiError {}
