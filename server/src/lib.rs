//! REST service for the todo collection.
//!
//! Four endpoints, each a near 1:1 translation to a store operation, all
//! answering with the `{success, data, error, message, count}` envelope.
//! Trailing slashes are part of the route contract. Validation lives here,
//! not in the store: descriptions are trimmed server-side and rejected when
//! empty or over the length limit, whatever the client already did.

pub mod config;
pub mod store;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use store::{Todo, TodoStore};

const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Success envelope. `data`, `count` and `message` appear only when the
/// endpoint has them; failure bodies come from `ApiError` instead.
#[derive(Debug, Serialize)]
struct Envelope<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl<T: Serialize> Envelope<T> {
    fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            message: None,
        }
    }

    fn message(self, message: &'static str) -> Self {
        Self {
            message: Some(message),
            ..self
        }
    }
}

/// Request failures, rendered as `{success: false, error}` bodies.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    Validation(String),
    InvalidId,
    NotFound,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::Validation(message) => message,
            ApiError::InvalidId => "Invalid todo ID format.",
            ApiError::NotFound => "Todo not found.",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status_code(), "request failed: {self}");
        let body = serde_json::json!({
            "success": false,
            "error": self.message(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    /// A missing field is treated as an empty description and rejected by
    /// validation, not by deserialization.
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub description: String,
}

/// Build the router over a fresh, empty store.
pub fn app() -> Router {
    app_with_store(TodoStore::new())
}

/// Build the router over an existing store; tests use this to seed state.
pub fn app_with_store(store: TodoStore) -> Router {
    // The browser UI is served from another origin, so CORS stays wide open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/todos/", get(list_todos).post(create_todo))
        .route("/todos/{id}/", put(update_todo).delete(delete_todo))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health_check() -> &'static str {
    "OK"
}

async fn list_todos(State(store): State<TodoStore>) -> Json<Envelope<Vec<Todo>>> {
    let todos = store.all().await;
    tracing::info!(count = todos.len(), "retrieved todos");
    Json(Envelope {
        success: true,
        count: Some(todos.len()),
        data: Some(todos),
        message: None,
    })
}

async fn create_todo(
    State(store): State<TodoStore>,
    Json(request): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Envelope<Todo>>), ApiError> {
    let description = validate_description(&request.description)?;
    let todo = store.insert(description).await;
    tracing::info!(id = %todo.id, "created todo");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(todo).message("Todo created successfully")),
    ))
}

async fn update_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTodoRequest>,
) -> Result<Json<Envelope<Todo>>, ApiError> {
    let id = parse_id(&id)?;
    let description = validate_description(&request.description)?;
    let todo = store.update(id, description).await.ok_or(ApiError::NotFound)?;
    tracing::info!(id = %todo.id, "updated todo");
    Ok(Json(Envelope::data(todo).message("Todo updated successfully")))
}

async fn delete_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let id = parse_id(&id)?;
    store.remove(id).await.ok_or(ApiError::NotFound)?;
    tracing::info!(%id, "deleted todo");
    Ok(Json(Envelope {
        success: true,
        data: None,
        count: None,
        message: Some("Todo deleted successfully"),
    }))
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId)
}

/// Trim, then reject empty or over-length text. The trimmed form is what
/// gets stored.
fn validate_description(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(
            "Description is required and cannot be empty.".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ApiError::Validation(format!(
            "Description cannot exceed {MAX_DESCRIPTION_LENGTH} characters."
        )));
    }
    Ok(trimmed.to_string())
}
