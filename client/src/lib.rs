//! Client for the todo service: data layer, UI state controller, runtime.
//!
//! # Overview
//! Three layers, each testable on its own:
//! - the data layer (`TodoApi`) builds `HttpRequest` values and interprets
//!   `HttpResponse` envelopes, executing round-trips through the `Transport`
//!   seam and normalizing every failure into `ApiError`;
//! - the controller (`AppState`) owns all UI state and exposes pure
//!   transitions from events to effects;
//! - the runtime wires the two together, feeding effect completions back
//!   into the controller until the queue drains.
//!
//! The binary in `src/main.rs` is a thin terminal front end over the
//! runtime; nothing in the library knows how state gets rendered.

pub mod api;
pub mod controller;
pub mod error;
pub mod http;
pub mod runtime;
pub mod toast;
pub mod transport;
pub mod types;

pub use api::TodoApi;
pub use controller::{AppState, Effect, Event};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use runtime::Runtime;
pub use toast::{Severity, Toast, ToastId, ToastQueue};
pub use transport::UreqTransport;
pub use types::Todo;
