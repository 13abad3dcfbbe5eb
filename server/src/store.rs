//! In-memory document store for todo items.
//!
//! # Design
//! A `HashMap` behind one `RwLock`; every operation is a single lock
//! acquisition, which gives the per-document atomicity the REST layer
//! relies on. Cloning `TodoStore` shares the same underlying map, so the
//! router's state clones all see one collection.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored todo document, also the wire shape of one item. The identifier
/// serializes under `_id`, the field name clients expect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    docs: Arc<RwLock<HashMap<Uuid, Todo>>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new document with a fresh id and creation timestamp. The
    /// description must already be validated and trimmed.
    pub async fn insert(&self, description: String) -> Todo {
        let todo = Todo {
            id: Uuid::new_v4(),
            description,
            created_at: Utc::now(),
        };
        self.docs.write().await.insert(todo.id, todo.clone());
        todo
    }

    /// All documents, newest first.
    pub async fn all(&self) -> Vec<Todo> {
        let docs = self.docs.read().await;
        let mut todos: Vec<Todo> = docs.values().cloned().collect();
        todos.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        todos
    }

    /// Replace a document's description wholesale. `None` if the id is
    /// unknown.
    pub async fn update(&self, id: Uuid, description: String) -> Option<Todo> {
        let mut docs = self.docs.write().await;
        let todo = docs.get_mut(&id)?;
        todo.description = description;
        Some(todo.clone())
    }

    /// Hard-delete a document. `None` if the id is unknown.
    pub async fn remove(&self, id: Uuid) -> Option<Todo> {
        self.docs.write().await.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_id_and_timestamp() {
        let store = TodoStore::new();
        let todo = store.insert("Buy milk".to_string()).await;
        assert_eq!(todo.description, "Buy milk");
        assert_eq!(store.all().await, vec![todo]);
    }

    #[tokio::test]
    async fn all_returns_newest_first() {
        let store = TodoStore::new();
        let first = store.insert("first".to_string()).await;
        let second = store.insert("second".to_string()).await;
        let todos = store.all().await;
        assert_eq!(todos, vec![second, first]);
    }

    #[tokio::test]
    async fn update_replaces_description_and_keeps_the_rest() {
        let store = TodoStore::new();
        let todo = store.insert("before".to_string()).await;
        let updated = store.update(todo.id, "after".to_string()).await.unwrap();
        assert_eq!(updated.id, todo.id);
        assert_eq!(updated.created_at, todo.created_at);
        assert_eq!(updated.description, "after");
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() {
        let store = TodoStore::new();
        assert!(store.update(Uuid::new_v4(), "x".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn remove_deletes_the_document() {
        let store = TodoStore::new();
        let todo = store.insert("gone".to_string()).await;
        assert!(store.remove(todo.id).await.is_some());
        assert!(store.remove(todo.id).await.is_none());
        assert!(store.all().await.is_empty());
    }

    #[test]
    fn todo_serializes_id_under_underscore_id() {
        let todo = Todo {
            id: Uuid::nil(),
            description: "Test".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["description"], "Test");
        assert!(json["created_at"].is_string());
    }
}
