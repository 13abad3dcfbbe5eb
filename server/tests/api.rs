use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use todo_server::{app, app_with_store, TodoStore};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = app().oneshot(get_request("/todos/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], serde_json::json!([]));
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn list_todos_newest_first_with_count() {
    let store = TodoStore::new();
    store.insert("first".to_string()).await;
    store.insert("second".to_string()).await;

    let resp = app_with_store(store)
        .oneshot(get_request("/todos/"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["description"], "second");
    assert_eq!(body["data"][1]["description"], "first");
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_envelope() {
    let resp = app()
        .oneshot(json_request("POST", "/todos/", r#"{"description":"Buy milk"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Todo created successfully");
    assert_eq!(body["data"]["description"], "Buy milk");
    assert!(body["data"]["_id"].is_string());
    assert!(body["data"]["created_at"].is_string());
}

#[tokio::test]
async fn create_todo_trims_description() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/todos/",
            r#"{"description":"  buy milk  "}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["description"], "buy milk");
}

#[tokio::test]
async fn create_todo_blank_description_is_400() {
    let resp = app()
        .oneshot(json_request("POST", "/todos/", r#"{"description":"   "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Description is required and cannot be empty.");
}

#[tokio::test]
async fn create_todo_missing_description_is_400() {
    let resp = app()
        .oneshot(json_request("POST", "/todos/", "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Description is required and cannot be empty.");
}

#[tokio::test]
async fn create_todo_over_length_limit_is_400() {
    let description = "x".repeat(501);
    let payload = serde_json::json!({ "description": description }).to_string();
    let resp = app()
        .oneshot(json_request("POST", "/todos/", &payload))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Description cannot exceed 500 characters.");
}

// --- update ---

#[tokio::test]
async fn update_todo_replaces_description() {
    let store = TodoStore::new();
    let todo = store.insert("before".to_string()).await;

    let resp = app_with_store(store)
        .oneshot(json_request(
            "PUT",
            &format!("/todos/{}/", todo.id),
            r#"{"description":"  after  "}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Todo updated successfully");
    assert_eq!(body["data"]["description"], "after");
    assert_eq!(body["data"]["_id"], todo.id.to_string());
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/todos/00000000-0000-0000-0000-000000000001/",
            r#"{"description":"x"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Todo not found.");
}

#[tokio::test]
async fn update_malformed_id_is_400() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/todos/not-an-id/",
            r#"{"description":"x"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Invalid todo ID format.");
}

#[tokio::test]
async fn update_blank_description_is_400() {
    let store = TodoStore::new();
    let todo = store.insert("keep me".to_string()).await;

    let resp = app_with_store(store.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/todos/{}/", todo.id),
            r#"{"description":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.all().await[0].description, "keep me");
}

// --- delete ---

#[tokio::test]
async fn delete_todo_removes_the_document() {
    let store = TodoStore::new();
    let todo = store.insert("gone".to_string()).await;

    let resp = app_with_store(store.clone())
        .oneshot(json_request("DELETE", &format!("/todos/{}/", todo.id), ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Todo deleted successfully");
    assert!(body.get("data").is_none());
    assert!(store.all().await.is_empty());
}

#[tokio::test]
async fn delete_twice_is_404() {
    let store = TodoStore::new();
    let todo = store.insert("once".to_string()).await;
    let app = app_with_store(store);
    let uri = format!("/todos/{}/", todo.id);

    let resp = app.clone().oneshot(json_request("DELETE", &uri, "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(json_request("DELETE", &uri, "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Todo not found.");
}

#[tokio::test]
async fn delete_malformed_id_is_400() {
    let resp = app()
        .oneshot(json_request("DELETE", "/todos/123/", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Invalid todo ID format.");
}

// --- routing and health ---

#[tokio::test]
async fn collection_route_requires_trailing_slash() {
    let resp = app().oneshot(get_request("/todos")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_check_is_plain_ok() {
    let resp = app().oneshot(get_request("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await.as_ref(), b"OK");
}
