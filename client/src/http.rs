//! HTTP plumbing for the data layer.
//!
//! # Design
//! Requests and responses are plain data. `TodoApi` builds `HttpRequest`
//! values and interprets `HttpResponse` values without touching the network;
//! the `Transport` trait is the single I/O seam, so tests can substitute a
//! canned or failing transport and the parsing logic stays deterministic.
//!
//! All fields use owned types (`String`, `Vec`) so values can be moved
//! freely between the controller, the runtime, and the transport.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `TodoApi::build_*` methods and handed to a `Transport` for
/// execution.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` after executing an `HttpRequest`, then passed
/// to `TodoApi::parse_*` methods for interpretation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A failure to complete the round-trip at all: refused connection, DNS
/// failure, closed socket. Status-code failures are not transport errors;
/// those come back as an `HttpResponse`.
#[derive(Debug, Clone)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

/// Executes one HTTP round-trip.
///
/// Implementations must return `Ok` with the response for any status code,
/// including 4xx/5xx; `Err` is reserved for failures where no response was
/// received.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
