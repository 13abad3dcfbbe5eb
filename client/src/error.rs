//! Error type for the data layer.
//!
//! # Design
//! The variants keep the failure taxonomy visible at the boundary: transport
//! (no response at all), HTTP (non-2xx status), rejected (2xx body carrying
//! `success: false`), and decode (a 2xx body the client could not make sense
//! of). The UI never matches on the variant; it displays `to_string()`, so
//! `Display` is where all four collapse into one human-readable message.

use std::fmt;

/// Fallback shown when a failure carries no usable message of its own.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Errors returned by `TodoApi` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response was received. Carries the underlying transport message.
    Transport(String),

    /// The server answered with a non-2xx status. `message` is the server's
    /// `error` string when present, otherwise a status-derived fallback.
    Http { status: u16, message: String },

    /// The server answered 2xx but the body signalled `success: false`.
    Rejected(String),

    /// The 2xx response body was missing or malformed.
    Decode(String),
}

impl ApiError {
    /// Wrap a transport failure, substituting the generic fallback when the
    /// underlying error has no message.
    pub(crate) fn transport(message: String) -> Self {
        if message.trim().is_empty() {
            ApiError::Transport(GENERIC_ERROR.to_string())
        } else {
            ApiError::Transport(message)
        }
    }

    /// Derive the message for a non-2xx response: the server's `error` field
    /// wins, else a message embedding the numeric status code.
    pub(crate) fn http(status: u16, server_error: Option<String>) -> Self {
        let message = server_error
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        ApiError::Http { status, message }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(message)
            | ApiError::Rejected(message)
            | ApiError::Decode(message) => write!(f, "{message}"),
            ApiError::Http { message, .. } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {}
