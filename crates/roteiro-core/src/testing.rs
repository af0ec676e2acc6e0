//! In-memory fakes for the core's ports. Test builds only.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use roteiro_types::error::{GatewayError, RepositoryError};
use roteiro_types::gateway::{AskResponse, HealthStatus};
use roteiro_types::persona::{Persona, PersonaId};
use tokio::sync::Notify;

use crate::chat::view::{ChatView, ErrorBanner};
use crate::gateway::ResponseGateway;
use crate::render::RenderedMessage;
use crate::storage::kv_store::KvStore;

/// Key/value store with switchable read and write failures.
#[derive(Default)]
pub struct FakeKv {
    entries: Mutex<BTreeMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeKv {
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<(), RepositoryError> {
        if flag.load(Ordering::SeqCst) {
            Err(RepositoryError::Connection)
        } else {
            Ok(())
        }
    }
}

impl KvStore for FakeKv {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Self::check(&self.fail_reads)?;
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        Self::check(&self.fail_writes)?;
        self.insert(key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        Self::check(&self.fail_writes)?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Gateway that replays queued results in order and records every call.
///
/// With a gate set, each call waits for one `notify_one` before resolving.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<AskResponse, GatewayError>>>,
    calls: Mutex<Vec<(String, PersonaId)>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, result: Result<AskResponse, GatewayError>) -> Self {
        self.replies.lock().unwrap().push_back(result);
        self
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<(String, PersonaId)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ResponseGateway for ScriptedGateway {
    async fn ask(&self, question: &str, persona: PersonaId) -> Result<AskResponse, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((question.to_string(), persona));
        let next = self.replies.lock().unwrap().pop_front();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        next.unwrap_or_else(|| Err(GatewayError::Unexpected("no scripted reply".to_string())))
    }

    async fn health(&self) -> Result<HealthStatus, GatewayError> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            timestamp: None,
            service: None,
        })
    }
}

#[derive(Debug, Clone)]
pub enum ViewEvent {
    Redraw {
        persona: PersonaId,
        messages: Vec<RenderedMessage>,
    },
    Append(RenderedMessage),
    Banner(ErrorBanner),
    Busy(bool),
}

/// View that records every call.
#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    /// `(persona, message count)` per redraw.
    pub fn redraws(&self) -> Vec<(PersonaId, usize)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Redraw { persona, messages } => Some((persona, messages.len())),
                _ => None,
            })
            .collect()
    }

    pub fn appended_texts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Append(m) => Some(m.text),
                _ => None,
            })
            .collect()
    }

    pub fn banners(&self) -> Vec<ErrorBanner> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Banner(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    pub fn busy_transitions(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Busy(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ChatView for RecordingView {
    fn redraw(&self, persona: &Persona, messages: &[RenderedMessage]) {
        self.record(ViewEvent::Redraw {
            persona: persona.id,
            messages: messages.to_vec(),
        });
    }

    fn append(&self, message: &RenderedMessage) {
        self.record(ViewEvent::Append(message.clone()));
    }

    fn show_banner(&self, banner: &ErrorBanner) {
        self.record(ViewEvent::Banner(banner.clone()));
    }

    fn set_busy(&self, busy: bool) {
        self.record(ViewEvent::Busy(busy));
    }
}
