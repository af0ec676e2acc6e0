//! Session manager for the persona-scoped chat.
//!
//! `ChatSession` owns the current persona, that persona's message log and
//! the in-flight flag. It is constructed once per run and handed to whatever
//! wires user input (the terminal loop in roteiro-api).
//!
//! Submissions follow `Idle -> Submitting -> Idle` on every path. The flag
//! is held by an RAII guard, so it is released on success, on a handled
//! failure, on a panic unwinding through `submit`, and when the `submit`
//! future is dropped mid-flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use roteiro_types::chat::{ChatMessage, NO_ANSWER_TEXT, ResponseMeta};
use roteiro_types::config::ClientConfig;
use roteiro_types::error::FailureKind;
use roteiro_types::persona::PersonaId;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::gateway::ResponseGateway;
use crate::persona::PersonaRegistry;
use crate::render::present;
use crate::storage::kv_store::KvStore;

use super::history::HistoryStore;
use super::log::MessageLog;
use super::view::{ChatView, ErrorBanner};

/// What to draw after a persona becomes current.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan {
    /// The persona has no history: show its greeting. Never persisted.
    Greeting(ChatMessage),
    /// Restored history, already filtered to the persona's own messages.
    History(Vec<ChatMessage>),
}

impl RenderPlan {
    pub fn messages(&self) -> &[ChatMessage] {
        match self {
            RenderPlan::Greeting(greeting) => std::slice::from_ref(greeting),
            RenderPlan::History(messages) => messages,
        }
    }

    pub fn is_greeting(&self) -> bool {
        matches!(self, RenderPlan::Greeting(_))
    }
}

/// Turn a freshly loaded history into the live log and a render plan.
///
/// Messages owned by another persona are filtered out. That cannot happen
/// with logs written by this client, but a hand-edited store can contain them.
pub fn restore_or_greet(
    persona: PersonaId,
    stored: Vec<ChatMessage>,
    registry: &PersonaRegistry,
) -> (MessageLog, RenderPlan) {
    let before = stored.len();
    let log = MessageLog::from_entries(persona, stored);
    if log.len() < before {
        warn!(
            persona = %persona,
            dropped = before - log.len(),
            "Dropped history entries not owned by the persona"
        );
    }

    let plan = if log.is_empty() {
        RenderPlan::Greeting(ChatMessage::bot(registry.greeting(persona), persona, None))
    } else {
        RenderPlan::History(log.entries().to_vec())
    };
    (log, plan)
}

/// Why a submission was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Empty or whitespace-only input.
    Blank,
    /// Another submission is in flight.
    Busy,
}

/// Result of [`ChatSession::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored(IgnoreReason),
    /// The service answered; the reply was appended.
    Answered,
    /// The service had no answer; the fixed no-answer text was appended.
    NoAnswer,
    /// The exchange failed; a banner was shown and the failure placeholder appended.
    Failed(FailureKind),
}

/// Tunables taken from the client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub banner_dismiss: Duration,
    pub support_hint: String,
}

impl SessionSettings {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            banner_dismiss: Duration::from_millis(config.banner_dismiss_ms),
            support_hint: config.support_hint.clone(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

struct SessionState {
    persona: PersonaId,
    log: MessageLog,
}

/// Holds the in-flight flag for the duration of one submission.
struct Submitting<'a, V: ChatView> {
    flag: &'a AtomicBool,
    view: &'a V,
}

impl<'a, V: ChatView> Submitting<'a, V> {
    fn begin(flag: &'a AtomicBool, view: &'a V) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        view.set_busy(true);
        Some(Self { flag, view })
    }
}

impl<V: ChatView> Drop for Submitting<'_, V> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.view.set_busy(false);
    }
}

/// The persona-scoped chat session.
///
/// Generic over the storage, gateway and view ports so the core never
/// depends on roteiro-infra or a concrete front end.
pub struct ChatSession<S: KvStore, G: ResponseGateway, V: ChatView> {
    store: HistoryStore<S>,
    gateway: G,
    view: V,
    registry: PersonaRegistry,
    settings: SessionSettings,
    state: Mutex<SessionState>,
    in_flight: AtomicBool,
}

impl<S: KvStore, G: ResponseGateway, V: ChatView> ChatSession<S, G, V> {
    /// Create a session. Call [`initialize`](Self::initialize) before use.
    pub fn new(store: HistoryStore<S>, gateway: G, view: V, settings: SessionSettings) -> Self {
        let persona = PersonaId::default();
        Self {
            store,
            gateway,
            view,
            registry: PersonaRegistry::builtin(),
            settings,
            state: Mutex::new(SessionState {
                persona,
                log: MessageLog::new(persona),
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &HistoryStore<S> {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    pub async fn current_persona(&self) -> PersonaId {
        self.state.lock().await.persona
    }

    /// Snapshot of the current persona's log.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().await.log.entries().to_vec()
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Restore the stored persona and its history, then draw it.
    pub async fn initialize(&self) -> RenderPlan {
        let mut state = self.state.lock().await;
        let persona = self.store.load_persona().await;
        let stored = self.store.load_log(persona).await;
        let (log, plan) = restore_or_greet(persona, stored, &self.registry);

        info!(persona = %persona, messages = log.len(), "Chat session initialized");
        state.persona = persona;
        state.log = log;
        self.redraw(persona, &plan);
        plan
    }

    /// Make `persona` current. Returns `None` when it already was.
    pub async fn switch_persona(&self, persona: PersonaId) -> Option<RenderPlan> {
        let mut state = self.state.lock().await;
        if state.persona == persona {
            return None;
        }

        if let Err(e) = self.store.save_persona(persona).await {
            warn!(persona = %persona, error = %e, "Failed to persist persona selection");
        }
        let stored = self.store.load_log(persona).await;
        let (log, plan) = restore_or_greet(persona, stored, &self.registry);

        debug!(from = %state.persona, to = %persona, "Persona switched");
        state.persona = persona;
        state.log = log;
        self.redraw(persona, &plan);
        Some(plan)
    }

    /// Switch to the other persona. Returns the new current persona.
    pub async fn toggle_persona(&self) -> PersonaId {
        let next = self.current_persona().await.toggled();
        self.switch_persona(next).await;
        next
    }

    /// Send `raw` to the answer service and record the exchange.
    ///
    /// Blank input and input arriving while another submission is in flight
    /// are dropped without touching the log or the gateway. Otherwise the
    /// user turn is appended at once, and the reply (or the failure
    /// placeholder) is appended when the gateway call resolves. The reply
    /// belongs to the persona the question was addressed to, even if the
    /// user switched personas in the meantime.
    pub async fn submit(&self, raw: &str) -> SubmitOutcome {
        let question = raw.trim();
        if question.is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::Blank);
        }

        let Some(_submitting) = Submitting::begin(&self.in_flight, &self.view) else {
            debug!("Submission dropped: another request is in flight");
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        };

        let persona = self.current_persona().await;
        self.append(ChatMessage::user(question, persona)).await;

        match self.gateway.ask(question, persona).await {
            Ok(reply) if reply.is_no_answer() => {
                let meta = ResponseMeta {
                    confidence: Some(0.0),
                    source: Some(reply.source).filter(|s| !s.is_empty()),
                    personality: None,
                };
                self.append(ChatMessage::bot(NO_ANSWER_TEXT, persona, Some(meta)))
                    .await;
                SubmitOutcome::NoAnswer
            }
            Ok(reply) => {
                let meta = reply.meta();
                self.append(ChatMessage::bot(reply.answer, persona, Some(meta)))
                    .await;
                SubmitOutcome::Answered
            }
            Err(e) => {
                let kind = FailureKind::from(&e);
                warn!(persona = %persona, kind = ?kind, error = %e, "Answer request failed");
                self.view.show_banner(&self.banner(kind));
                self.append(ChatMessage::technical_failure(persona)).await;
                SubmitOutcome::Failed(kind)
            }
        }
    }

    /// Push, persist, and draw one message.
    ///
    /// A message for a persona that is no longer current goes to that
    /// persona's stored log and is not drawn.
    async fn append(&self, message: ChatMessage) {
        let mut state = self.state.lock().await;
        let persona = message.persona;

        if persona == state.persona {
            let rendered = present(&message, &self.registry);
            if let Err(e) = state.log.push(message) {
                warn!(error = %e, "Refusing to append message");
                return;
            }
            if let Err(e) = self.store.save_log(persona, state.log.entries()).await {
                warn!(persona = %persona, error = %e, "Failed to persist history");
            }
            self.view.append(&rendered);
        } else {
            info!(persona = %persona, current = %state.persona, "Recording reply for inactive persona");
            let mut log = MessageLog::from_entries(persona, self.store.load_log(persona).await);
            if let Err(e) = log.push(message) {
                warn!(error = %e, "Refusing to append message");
                return;
            }
            if let Err(e) = self.store.save_log(persona, log.entries()).await {
                warn!(persona = %persona, error = %e, "Failed to persist history");
            }
        }
    }

    fn redraw(&self, persona: PersonaId, plan: &RenderPlan) {
        let rendered: Vec<_> = plan
            .messages()
            .iter()
            .map(|m| present(m, &self.registry))
            .collect();
        self.view.redraw(self.registry.get(persona), &rendered);
    }

    fn banner(&self, kind: FailureKind) -> ErrorBanner {
        let message = if self.settings.support_hint.is_empty() {
            kind.guidance().to_string()
        } else {
            format!("{} {}", kind.guidance(), self.settings.support_hint)
        };
        ErrorBanner {
            kind,
            message,
            dismiss_after: self.settings.banner_dismiss,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use roteiro_types::chat::{HISTORY_CAP, Sender, TECHNICAL_FAILURE_TEXT};
    use roteiro_types::error::GatewayError;
    use roteiro_types::gateway::AskResponse;
    use tokio::sync::Notify;

    use super::*;
    use crate::chat::history::{PERSONA_KEY, history_key};
    use crate::testing::{FakeKv, RecordingView, ScriptedGateway, ViewEvent};

    type TestSession = ChatSession<FakeKv, ScriptedGateway, RecordingView>;

    fn session(gateway: ScriptedGateway) -> TestSession {
        ChatSession::new(
            HistoryStore::new(FakeKv::default()),
            gateway,
            RecordingView::default(),
            SessionSettings {
                banner_dismiss: Duration::from_millis(5_000),
                support_hint: "Contate o suporte.".to_string(),
            },
        )
    }

    fn answer(text: &str, confidence: f64, source: &str) -> Result<AskResponse, GatewayError> {
        Ok(AskResponse {
            answer: text.to_string(),
            confidence,
            source: source.to_string(),
            personality: "dr_gasnelio".to_string(),
        })
    }

    #[tokio::test]
    async fn test_fresh_initialize_greets_without_persisting() {
        let session = session(ScriptedGateway::new());
        let plan = session.initialize().await;

        assert!(plan.is_greeting());
        let greeting = &plan.messages()[0];
        assert_eq!(greeting.sender, Sender::Bot);
        assert_eq!(greeting.persona, PersonaId::Professor);
        assert!(greeting.meta.is_none());
        assert_eq!(
            greeting.text,
            PersonaRegistry::builtin().greeting(PersonaId::Professor)
        );

        assert!(session.messages().await.is_empty());
        assert!(session.store().kv().value(&history_key(PersonaId::Professor)).is_none());
        assert_eq!(
            session.view().redraws(),
            vec![(PersonaId::Professor, 1)]
        );
    }

    #[tokio::test]
    async fn test_initialize_restores_persona_and_history() {
        let session = session(ScriptedGateway::new());
        session
            .store()
            .save_log(
                PersonaId::Amigo,
                &[ChatMessage::user("e aí", PersonaId::Amigo)],
            )
            .await
            .unwrap();
        session.store().save_persona(PersonaId::Amigo).await.unwrap();

        let plan = session.initialize().await;
        assert_eq!(session.current_persona().await, PersonaId::Amigo);
        assert!(!plan.is_greeting());
        assert_eq!(session.messages().await.len(), 1);
    }

    #[tokio::test]
    async fn test_initialize_filters_foreign_messages() {
        let session = session(ScriptedGateway::new());
        let tampered = vec![
            ChatMessage::user("minha", PersonaId::Professor),
            ChatMessage::bot("alheia", PersonaId::Amigo, None),
        ];
        session
            .store()
            .kv()
            .insert(
                &history_key(PersonaId::Professor),
                &serde_json::to_string(&tampered).unwrap(),
            );

        let plan = session.initialize().await;
        assert_eq!(plan.messages().len(), 1);
        assert_eq!(plan.messages()[0].text, "minha");
        assert!(session
            .messages()
            .await
            .iter()
            .all(|m| m.persona == PersonaId::Professor));
    }

    #[tokio::test]
    async fn test_submit_appends_user_and_bot_turns() {
        let session = session(ScriptedGateway::new().reply(answer("**PQT-U** mensal", 0.75, "pdf")));
        session.initialize().await;

        let outcome = session.submit("  Qual o esquema?  ").await;
        assert_eq!(outcome, SubmitOutcome::Answered);
        assert!(!session.is_submitting());

        let messages = session.messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "Qual o esquema?");
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[1].text, "**PQT-U** mensal");
        let meta = messages[1].meta.clone().unwrap();
        assert_eq!(meta.confidence, Some(0.75));
        assert_eq!(meta.source.as_deref(), Some("pdf"));
        assert_eq!(meta.personality.as_deref(), Some("dr_gasnelio"));

        assert_eq!(
            session.gateway().calls(),
            vec![("Qual o esquema?".to_string(), PersonaId::Professor)]
        );
        let stored = session.store().load_log(PersonaId::Professor).await;
        assert_eq!(stored, messages);
        // Only the two new messages were drawn incrementally.
        assert_eq!(session.view().appended_texts().len(), 2);
        assert_eq!(session.view().busy_transitions(), vec![true, false]);
    }

    #[tokio::test]
    async fn test_blank_submissions_are_noops() {
        let session = session(ScriptedGateway::new());
        session.initialize().await;

        assert_eq!(
            session.submit("").await,
            SubmitOutcome::Ignored(IgnoreReason::Blank)
        );
        assert_eq!(
            session.submit("   ").await,
            SubmitOutcome::Ignored(IgnoreReason::Blank)
        );
        assert!(session.messages().await.is_empty());
        assert!(session.gateway().calls().is_empty());
        assert!(session.view().busy_transitions().is_empty());
    }

    #[tokio::test]
    async fn test_no_answer_reply_uses_fixed_text() {
        let session = session(ScriptedGateway::new().reply(answer("", 0.9, "no_answer")));
        session.initialize().await;

        assert_eq!(session.submit("Olá").await, SubmitOutcome::NoAnswer);
        let messages = session.messages().await;
        let bot = &messages[1];
        assert_eq!(bot.text, NO_ANSWER_TEXT);
        assert_eq!(bot.confidence(), Some(0.0));
        assert_eq!(bot.meta.as_ref().unwrap().source.as_deref(), Some("no_answer"));
    }

    #[tokio::test]
    async fn test_blank_answer_counts_as_no_answer() {
        let session = session(ScriptedGateway::new().reply(answer("   ", 0.6, "llm")));
        session.initialize().await;

        assert_eq!(session.submit("Olá").await, SubmitOutcome::NoAnswer);
        assert_eq!(session.messages().await[1].confidence(), Some(0.0));
    }

    #[tokio::test]
    async fn test_connectivity_failure_shows_banner_and_placeholder() {
        let session = session(
            ScriptedGateway::new().reply(Err(GatewayError::Transport("connection refused".into()))),
        );
        session.initialize().await;

        let outcome = session.submit("Olá").await;
        assert_eq!(outcome, SubmitOutcome::Failed(FailureKind::Connectivity));
        assert!(!session.is_submitting());

        let banners = session.view().banners();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].kind, FailureKind::Connectivity);
        assert!(banners[0].message.starts_with(FailureKind::Connectivity.guidance()));
        assert!(banners[0].message.ends_with("Contate o suporte."));
        assert_eq!(banners[0].dismiss_after, Duration::from_millis(5_000));

        let messages = session.messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "Olá");
        assert_eq!(messages[1].text, TECHNICAL_FAILURE_TEXT);
        assert_eq!(messages[1].confidence(), Some(0.0));
        assert_eq!(messages[1].meta.as_ref().unwrap().source.as_deref(), Some("erro"));
    }

    #[tokio::test]
    async fn test_service_and_protocol_failures_are_classified() {
        let session = session(
            ScriptedGateway::new()
                .reply(Err(GatewayError::Service {
                    status: 502,
                    body: "bad gateway".into(),
                }))
                .reply(Err(GatewayError::Protocol("expected value".into()))),
        );
        session.initialize().await;

        assert_eq!(
            session.submit("um").await,
            SubmitOutcome::Failed(FailureKind::Server)
        );
        assert_eq!(
            session.submit("dois").await,
            SubmitOutcome::Failed(FailureKind::Unexpected)
        );
        assert_eq!(session.messages().await.len(), 4);
        assert!(!session.is_submitting());
    }

    #[tokio::test]
    async fn test_flag_resets_after_every_submission() {
        let session = session(
            ScriptedGateway::new()
                .reply(answer("a", 0.5, "llm"))
                .reply(Err(GatewayError::Transport("down".into())))
                .reply(answer("", 0.0, "no_answer"))
                .reply(Err(GatewayError::Unexpected("boom".into()))),
        );
        session.initialize().await;

        for question in ["1", "2", "3", "4"] {
            let outcome = session.submit(question).await;
            assert!(!matches!(outcome, SubmitOutcome::Ignored(_)));
            assert!(!session.is_submitting());
        }
    }

    #[tokio::test]
    async fn test_submission_while_in_flight_is_dropped() {
        let gate = Arc::new(Notify::new());
        let session = session(
            ScriptedGateway::new()
                .reply(answer("primeira", 0.5, "llm"))
                .gated(gate.clone()),
        );
        session.initialize().await;

        let (first, second) = tokio::join!(session.submit("primeira pergunta"), async {
            while !session.is_submitting() {
                tokio::task::yield_now().await;
            }
            let outcome = session.submit("segunda pergunta").await;
            gate.notify_one();
            outcome
        });

        assert_eq!(first, SubmitOutcome::Answered);
        assert_eq!(second, SubmitOutcome::Ignored(IgnoreReason::Busy));
        assert_eq!(session.gateway().calls().len(), 1);
        assert_eq!(session.messages().await.len(), 2);
        assert!(!session.is_submitting());
    }

    #[tokio::test]
    async fn test_dropped_submission_releases_flag() {
        let gate = Arc::new(Notify::new());
        let session = session(
            ScriptedGateway::new()
                .reply(answer("nunca", 0.5, "llm"))
                .gated(gate),
        );
        session.initialize().await;

        let result =
            tokio::time::timeout(Duration::from_millis(20), session.submit("pendurada")).await;
        assert!(result.is_err());
        assert!(!session.is_submitting());
        assert_eq!(session.view().busy_transitions(), vec![true, false]);
        // The optimistic user turn stays.
        assert_eq!(session.messages().await.len(), 1);
    }

    #[tokio::test]
    async fn test_switch_persona_to_same_is_noop() {
        let session = session(ScriptedGateway::new());
        session.initialize().await;

        assert!(session.switch_persona(PersonaId::Professor).await.is_none());
        assert_eq!(session.view().redraws().len(), 1);
        assert!(session.store().kv().value(PERSONA_KEY).is_none());
    }

    #[tokio::test]
    async fn test_switch_persona_persists_selection_and_greets() {
        let session = session(ScriptedGateway::new());
        session.initialize().await;

        let plan = session.switch_persona(PersonaId::Amigo).await.unwrap();
        assert!(plan.is_greeting());
        assert_eq!(plan.messages()[0].persona, PersonaId::Amigo);
        assert_eq!(session.current_persona().await, PersonaId::Amigo);
        assert_eq!(session.store().kv().value(PERSONA_KEY).as_deref(), Some("amigo"));
        assert!(session.store().kv().value(&history_key(PersonaId::Amigo)).is_none());
    }

    #[tokio::test]
    async fn test_switch_roundtrip_restores_log_byte_for_byte() {
        let session = session(
            ScriptedGateway::new()
                .reply(answer("resposta técnica", 0.75, "pdf"))
                .reply(answer("resposta amiga", 0.5, "llm")),
        );
        session.initialize().await;
        session.submit("pergunta A").await;

        let before_raw = session
            .store()
            .raw_log(PersonaId::Professor)
            .await
            .unwrap()
            .unwrap();
        let before = session.messages().await;

        session.switch_persona(PersonaId::Amigo).await.unwrap();
        session.submit("pergunta B").await;
        let plan = session.switch_persona(PersonaId::Professor).await.unwrap();

        let after_raw = session
            .store()
            .raw_log(PersonaId::Professor)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(before_raw, after_raw);
        assert_eq!(session.messages().await, before);
        assert_eq!(plan, RenderPlan::History(before));
    }

    #[tokio::test]
    async fn test_logs_stay_disjoint_across_personas() {
        let session = session(
            ScriptedGateway::new()
                .reply(answer("a", 0.5, "llm"))
                .reply(answer("b", 0.5, "llm")),
        );
        session.initialize().await;
        session.submit("para o professor").await;
        session.toggle_persona().await;
        session.submit("para o amigo").await;

        for persona in PersonaId::ALL {
            let log = session.store().load_log(persona).await;
            assert_eq!(log.len(), 2);
            assert!(log.iter().all(|m| m.persona == persona));
        }
    }

    #[tokio::test]
    async fn test_reply_after_switch_lands_in_original_persona() {
        let gate = Arc::new(Notify::new());
        let session = session(
            ScriptedGateway::new()
                .reply(answer("resposta tardia", 0.5, "pdf"))
                .gated(gate.clone()),
        );
        session.initialize().await;

        let (outcome, _) = tokio::join!(session.submit("demorada"), async {
            while !session.is_submitting() {
                tokio::task::yield_now().await;
            }
            // Switching is allowed while a request is in flight.
            session.switch_persona(PersonaId::Amigo).await;
            gate.notify_one();
        });

        assert_eq!(outcome, SubmitOutcome::Answered);
        assert_eq!(session.current_persona().await, PersonaId::Amigo);
        assert!(session.messages().await.is_empty());

        let professor = session.store().load_log(PersonaId::Professor).await;
        assert_eq!(professor.len(), 2);
        assert_eq!(professor[1].text, "resposta tardia");
        assert!(session.store().load_log(PersonaId::Amigo).await.is_empty());
        // The late reply was not drawn over the other persona's screen.
        assert!(!session
            .view()
            .appended_texts()
            .contains(&"resposta tardia".to_string()));
    }

    #[tokio::test]
    async fn test_history_is_capped_through_the_session() {
        let mut gateway = ScriptedGateway::new();
        for i in 0..20 {
            gateway = gateway.reply(answer(&format!("r{i}"), 0.5, "llm"));
        }
        let session = session(gateway);
        session.initialize().await;

        for i in 0..20 {
            session.submit(&format!("q{i}")).await;
        }

        let messages = session.messages().await;
        assert_eq!(messages.len(), HISTORY_CAP);
        assert_eq!(messages[0].text, "q5");
        assert_eq!(messages[HISTORY_CAP - 1].text, "r19");
        assert_eq!(
            session.store().load_log(PersonaId::Professor).await.len(),
            HISTORY_CAP
        );
    }

    #[tokio::test]
    async fn test_storage_write_failure_does_not_break_session() {
        let session = session(ScriptedGateway::new().reply(answer("ok", 0.5, "llm")));
        session.initialize().await;
        session.store().kv().fail_writes(true);

        assert_eq!(session.submit("Olá").await, SubmitOutcome::Answered);
        assert_eq!(session.messages().await.len(), 2);
        assert!(!session.is_submitting());
    }

    #[test]
    fn test_restore_or_greet_is_pure() {
        let registry = PersonaRegistry::builtin();
        let (log, plan) = restore_or_greet(PersonaId::Amigo, Vec::new(), &registry);
        assert!(log.is_empty());
        assert_eq!(plan.messages()[0].text, registry.greeting(PersonaId::Amigo));

        let stored = vec![ChatMessage::user("oi", PersonaId::Amigo)];
        let (log, plan) = restore_or_greet(PersonaId::Amigo, stored.clone(), &registry);
        assert_eq!(log.entries(), stored.as_slice());
        assert_eq!(plan, RenderPlan::History(stored));
    }

    #[test]
    fn test_view_events_record_order() {
        let view = RecordingView::default();
        view.set_busy(true);
        view.set_busy(false);
        assert!(matches!(view.events()[0], ViewEvent::Busy(true)));
    }
}
