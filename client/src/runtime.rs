//! Connects the controller to the data layer.
//!
//! # Design
//! `dispatch` applies an event, then drains the resulting effects in FIFO
//! order: each effect runs against `TodoApi`, and its completion event is
//! queued behind whatever is already pending. Errors are collapsed to their
//! display string here, so the controller only ever sees the uniform
//! `Result<_, String>` shape. Effects run one at a time on the calling
//! thread; a reload queued by one mutation completes before the next user
//! event is dispatched.

use std::collections::VecDeque;
use std::time::Instant;

use crate::api::TodoApi;
use crate::controller::{AppState, Effect, Event};
use crate::http::Transport;

pub struct Runtime<T: Transport> {
    api: TodoApi,
    transport: T,
    state: AppState,
}

impl<T: Transport> Runtime<T> {
    pub fn new(api: TodoApi, transport: T) -> Self {
        Self {
            api,
            transport,
            state: AppState::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply one event and run every effect it (transitively) produces.
    pub fn dispatch(&mut self, event: Event) {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            let effects = self.state.apply(Instant::now(), event);
            for effect in effects {
                pending.push_back(self.run(effect));
            }
        }
    }

    fn run(&mut self, effect: Effect) -> Event {
        tracing::debug!(?effect, "running effect");
        match effect {
            Effect::FetchList => {
                let result = self.api.list(&self.transport).map_err(|e| e.to_string());
                if let Err(message) = &result {
                    tracing::warn!(%message, "list failed");
                }
                Event::ListLoaded(result)
            }
            Effect::Create { description } => {
                let result = self
                    .api
                    .create(&self.transport, &description)
                    .map_err(|e| e.to_string());
                if let Err(message) = &result {
                    tracing::warn!(%message, "create failed");
                }
                Event::CreateFinished(result)
            }
            Effect::Update { id, description } => {
                let result = self
                    .api
                    .update(&self.transport, &id, &description)
                    .map_err(|e| e.to_string());
                if let Err(message) = &result {
                    tracing::warn!(%message, "update failed");
                }
                Event::UpdateFinished { id, result }
            }
            Effect::Delete { id } => {
                let result = self
                    .api
                    .delete(&self.transport, &id)
                    .map_err(|e| e.to_string());
                if let Err(message) = &result {
                    tracing::warn!(%message, "delete failed");
                }
                Event::DeleteFinished { id, result }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpRequest, HttpResponse, TransportError};

    /// Transport that always fails, for exercising the failure paths without
    /// a server.
    struct DownTransport;

    impl Transport for DownTransport {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::new("connection refused"))
        }
    }

    #[test]
    fn failed_load_surfaces_the_transport_message() {
        let mut runtime = Runtime::new(TodoApi::new("http://localhost:1"), DownTransport);
        runtime.dispatch(Event::LoadRequested);
        assert_eq!(
            runtime.state().load_error.as_deref(),
            Some("connection refused")
        );
        assert!(!runtime.state().loading);
    }

    #[test]
    fn failed_create_leaves_draft_and_raises_toast() {
        let mut runtime = Runtime::new(TodoApi::new("http://localhost:1"), DownTransport);
        runtime.dispatch(Event::DraftChanged("buy milk".to_string()));
        runtime.dispatch(Event::CreateSubmitted);
        assert_eq!(runtime.state().draft, "buy milk");
        assert_eq!(runtime.state().toasts.len(), 1);
        assert!(!runtime.state().creating);
    }
}
