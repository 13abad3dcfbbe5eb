//! Request builder and response interpreter for the todo API.
//!
//! # Design
//! `TodoApi` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`,
//! with an executing wrapper on top that runs the round-trip through a
//! `Transport`. The wrappers return the uniform result the controller
//! consumes: `Ok` with the payload, or an `ApiError` whose `Display` is the
//! exact message to show. They never panic, whatever the transport or the
//! server does.
//!
//! Every response body is expected to be a JSON envelope. A 2xx response
//! without an explicit `success` field counts as success; a 2xx response
//! with `success: false` is a failure carrying the body's `error` string;
//! non-2xx responses prefer the body's `error` string and otherwise fall
//! back to a message embedding the status code.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiError, GENERIC_ERROR};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::Todo;

/// Response envelope shared by every endpoint. Fields the client does not
/// consume (`message`, `count`) are ignored by serde.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: Option<bool>,
    data: Option<T>,
    error: Option<String>,
}

/// Stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoApi {
    base_url: String,
}

impl TodoApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // --- request builders ---

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/todos/", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The description is trimmed here, before transmission; rejecting text
    /// that is empty after trimming is the caller's responsibility.
    pub fn build_create(&self, description: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/todos/", self.base_url),
            headers: json_headers(),
            body: Some(payload(description)),
        }
    }

    pub fn build_update(&self, id: &str, description: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}/todos/{id}/", self.base_url),
            headers: json_headers(),
            body: Some(payload(description)),
        }
    }

    pub fn build_delete(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/todos/{id}/", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    // --- response parsers ---

    /// A missing `data` field on a successful list response is an empty
    /// collection, not an error.
    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        let envelope = decode::<Vec<Todo>>(response)?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        let envelope = decode::<Todo>(response)?;
        envelope.data.ok_or_else(missing_item)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        let envelope = decode::<Todo>(response)?;
        envelope.data.ok_or_else(missing_item)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        decode::<serde_json::Value>(response)?;
        Ok(())
    }

    // --- executing wrappers ---

    /// Fetch the full collection.
    pub fn list<T: Transport>(&self, transport: &T) -> Result<Vec<Todo>, ApiError> {
        let response = execute(transport, self.build_list())?;
        self.parse_list(response)
    }

    /// Create an item from free-form text; trimming happens in the builder.
    pub fn create<T: Transport>(
        &self,
        transport: &T,
        description: &str,
    ) -> Result<Todo, ApiError> {
        let response = execute(transport, self.build_create(description))?;
        self.parse_create(response)
    }

    /// Replace an existing item's description wholesale. An unknown id comes
    /// back as the server's not-found error through the uniform channel.
    pub fn update<T: Transport>(
        &self,
        transport: &T,
        id: &str,
        description: &str,
    ) -> Result<Todo, ApiError> {
        let response = execute(transport, self.build_update(id, description))?;
        self.parse_update(response)
    }

    /// Hard-delete an existing item.
    pub fn delete<T: Transport>(&self, transport: &T, id: &str) -> Result<(), ApiError> {
        let response = execute(transport, self.build_delete(id))?;
        self.parse_delete(response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn payload(description: &str) -> String {
    serde_json::json!({ "description": description.trim() }).to_string()
}

fn missing_item() -> ApiError {
    ApiError::Decode("The server response was missing the todo item.".to_string())
}

fn execute<T: Transport>(transport: &T, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    transport
        .execute(request)
        .map_err(|e| ApiError::transport(e.message().to_string()))
}

/// Interpret the envelope common to every endpoint.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<Envelope<T>, ApiError> {
    if !response.is_success() {
        // Non-2xx bodies are not guaranteed to be JSON at all; fish out the
        // error string if one is there, else fall back on the status code.
        let server_error = serde_json::from_str::<Envelope<serde_json::Value>>(&response.body)
            .ok()
            .and_then(|envelope| envelope.error);
        return Err(ApiError::http(response.status, server_error));
    }

    let envelope: Envelope<T> =
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;

    if envelope.success == Some(false) {
        let message = envelope
            .error
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_ERROR.to_string());
        return Err(ApiError::Rejected(message));
    }

    Ok(envelope)
}
