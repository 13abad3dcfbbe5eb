//! UI state controller.
//!
//! # Design
//! `AppState` owns everything the UI renders and nothing else owns any of
//! it. Transitions are pure: `apply` takes the current instant and one
//! `Event`, mutates the state, and returns the `Effect`s the host must run.
//! No I/O happens here, which is what makes every flow testable without a
//! server.
//!
//! The reconciliation protocol is deliberately simple: every successful
//! mutation triggers a full reload of the collection instead of patching it
//! locally, so the server stays the sole source of truth. Failures are
//! surfaced textually and never retried automatically; the only retry
//! affordance is manual (re-dispatching `LoadRequested` for a failed list).

use std::collections::HashSet;
use std::time::Instant;

use crate::toast::{Severity, ToastId, ToastQueue};
use crate::types::Todo;

/// Inline message for a draft that is empty after trimming.
pub const EMPTY_DESCRIPTION_MESSAGE: &str = "Please enter a todo description";

const CREATED_MESSAGE: &str = "Todo created";
const UPDATED_MESSAGE: &str = "Todo updated";
const DELETED_MESSAGE: &str = "Todo deleted";

/// Everything that can happen to the UI, either from the user or as the
/// completion of an effect. Completion events carry the uniform result
/// already collapsed to its display string.
#[derive(Debug, Clone)]
pub enum Event {
    /// Initial activation, or the manual retry after a failed load.
    LoadRequested,
    ListLoaded(Result<Vec<Todo>, String>),

    DraftChanged(String),
    CreateSubmitted,
    CreateFinished(Result<Todo, String>),

    EditStarted(String),
    EditDraftChanged(String),
    EditCancelled,
    EditSubmitted,
    UpdateFinished { id: String, result: Result<Todo, String> },

    DeleteRequested(String),
    DeleteCancelled,
    DeleteConfirmed,
    DeleteFinished { id: String, result: Result<(), String> },

    ToastDismissed(ToastId),
    /// Periodic tick; expires due notifications.
    Ticked,
}

/// Remote operations the host must perform. Each one completes by feeding
/// the matching `*Finished`/`ListLoaded` event back into `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchList,
    Create { description: String },
    Update { id: String, description: String },
    Delete { id: String },
}

/// The single in-flight inline edit. Only one item may be in edit mode at a
/// time; starting another edit replaces this slot wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: String,
    pub draft: String,
    pub saving: bool,
}

/// A destructive action awaiting confirmation: the target id plus the
/// description shown in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub todos: Vec<Todo>,
    pub loading: bool,
    pub load_error: Option<String>,

    pub draft: String,
    pub draft_error: Option<String>,
    pub creating: bool,

    pub edit: Option<EditState>,
    pub pending_delete: Option<PendingDelete>,
    pub deleting: HashSet<String>,

    pub toasts: ToastQueue,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event and return the effects to run. The host supplies the
    /// current instant so notification deadlines stay out of this module.
    pub fn apply(&mut self, now: Instant, event: Event) -> Vec<Effect> {
        match event {
            Event::LoadRequested => self.load_requested(),
            Event::ListLoaded(result) => self.list_loaded(result),
            Event::DraftChanged(text) => self.draft_changed(text),
            Event::CreateSubmitted => self.create_submitted(),
            Event::CreateFinished(result) => self.create_finished(now, result),
            Event::EditStarted(id) => self.edit_started(id),
            Event::EditDraftChanged(text) => self.edit_draft_changed(text),
            Event::EditCancelled => self.edit_cancelled(),
            Event::EditSubmitted => self.edit_submitted(now),
            Event::UpdateFinished { id, result } => self.update_finished(now, id, result),
            Event::DeleteRequested(id) => self.delete_requested(id),
            Event::DeleteCancelled => self.delete_cancelled(),
            Event::DeleteConfirmed => self.delete_confirmed(),
            Event::DeleteFinished { id, result } => self.delete_finished(now, id, result),
            Event::ToastDismissed(id) => {
                self.toasts.dismiss(id);
                Vec::new()
            }
            Event::Ticked => {
                self.toasts.sweep(now);
                Vec::new()
            }
        }
    }

    /// Fetch-and-replace step shared by the initial load and every
    /// post-mutation reload.
    fn reload(&mut self) -> Vec<Effect> {
        self.loading = true;
        vec![Effect::FetchList]
    }

    fn load_requested(&mut self) -> Vec<Effect> {
        self.reload()
    }

    fn list_loaded(&mut self, result: Result<Vec<Todo>, String>) -> Vec<Effect> {
        self.loading = false;
        match result {
            Ok(todos) => {
                self.todos = todos;
                self.load_error = None;
            }
            // The collection stays untouched on failure; whatever was last
            // fetched keeps rendering behind the error.
            Err(message) => self.load_error = Some(message),
        }
        Vec::new()
    }

    fn draft_changed(&mut self, text: String) -> Vec<Effect> {
        self.draft = text;
        Vec::new()
    }

    fn create_submitted(&mut self) -> Vec<Effect> {
        if self.creating {
            return Vec::new();
        }
        let trimmed = self.draft.trim();
        if trimmed.is_empty() {
            self.draft_error = Some(EMPTY_DESCRIPTION_MESSAGE.to_string());
            return Vec::new();
        }
        self.draft_error = None;
        self.creating = true;
        vec![Effect::Create {
            description: trimmed.to_string(),
        }]
    }

    fn create_finished(&mut self, now: Instant, result: Result<Todo, String>) -> Vec<Effect> {
        self.creating = false;
        match result {
            Ok(_) => {
                self.draft.clear();
                self.toasts.push(now, Severity::Success, CREATED_MESSAGE);
                self.reload()
            }
            Err(message) => {
                // Both channels fire: the inline error and the notification.
                self.draft_error = Some(message.clone());
                self.toasts.push(now, Severity::Error, message);
                Vec::new()
            }
        }
    }

    fn edit_started(&mut self, id: String) -> Vec<Effect> {
        if self.deleting.contains(&id) {
            return Vec::new();
        }
        if let Some(todo) = self.todos.iter().find(|todo| todo.id == id) {
            self.edit = Some(EditState {
                id,
                draft: todo.description.clone(),
                saving: false,
            });
        }
        Vec::new()
    }

    fn edit_draft_changed(&mut self, text: String) -> Vec<Effect> {
        if let Some(edit) = &mut self.edit {
            edit.draft = text;
        }
        Vec::new()
    }

    fn edit_cancelled(&mut self) -> Vec<Effect> {
        self.edit = None;
        Vec::new()
    }

    fn edit_submitted(&mut self, now: Instant) -> Vec<Effect> {
        let Some(edit) = &mut self.edit else {
            return Vec::new();
        };
        if edit.saving {
            return Vec::new();
        }
        let trimmed = edit.draft.trim();
        if trimmed.is_empty() {
            self.toasts
                .push(now, Severity::Error, EMPTY_DESCRIPTION_MESSAGE);
            return Vec::new();
        }
        edit.saving = true;
        vec![Effect::Update {
            id: edit.id.clone(),
            description: trimmed.to_string(),
        }]
    }

    fn update_finished(
        &mut self,
        now: Instant,
        id: String,
        result: Result<Todo, String>,
    ) -> Vec<Effect> {
        let slot_matches = self.edit.as_ref().is_some_and(|edit| edit.id == id);
        match result {
            Ok(_) => {
                if slot_matches {
                    self.edit = None;
                }
                self.toasts.push(now, Severity::Success, UPDATED_MESSAGE);
                self.reload()
            }
            Err(message) => {
                // Stay in edit mode so the user can fix the draft and retry.
                if slot_matches {
                    if let Some(edit) = &mut self.edit {
                        edit.saving = false;
                    }
                }
                self.toasts.push(now, Severity::Error, message);
                Vec::new()
            }
        }
    }

    fn delete_requested(&mut self, id: String) -> Vec<Effect> {
        if self.deleting.contains(&id) {
            return Vec::new();
        }
        if let Some(todo) = self.todos.iter().find(|todo| todo.id == id) {
            self.pending_delete = Some(PendingDelete {
                id,
                description: todo.description.clone(),
            });
        }
        Vec::new()
    }

    fn delete_cancelled(&mut self) -> Vec<Effect> {
        self.pending_delete = None;
        Vec::new()
    }

    fn delete_confirmed(&mut self) -> Vec<Effect> {
        let Some(pending) = self.pending_delete.take() else {
            return Vec::new();
        };
        self.deleting.insert(pending.id.clone());
        vec![Effect::Delete { id: pending.id }]
    }

    fn delete_finished(
        &mut self,
        now: Instant,
        id: String,
        result: Result<(), String>,
    ) -> Vec<Effect> {
        self.deleting.remove(&id);
        match result {
            Ok(()) => {
                self.toasts.push(now, Severity::Success, DELETED_MESSAGE);
                self.reload()
            }
            Err(message) => {
                self.toasts.push(now, Severity::Error, message);
                Vec::new()
            }
        }
    }
}
