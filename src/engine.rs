//! The turn driver: loads the session, routes intents, assembles context,
//! calls the generative backend, reconciles its output, and persists the
//! exchange.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Local;
use thiserror::Error;
use tracing::{debug, error};

use crate::context::ContextAssembler;
use crate::detect::TurnInput;
use crate::detectors::implied_city;
use crate::geo::GeoProvider;
use crate::knowledge::KnowledgeStore;
use crate::llm::LLMClient;
use crate::reconcile::reconcile;
use crate::router::IntentRouter;
use crate::session::{SessionStore, TurnMessage};
use crate::transit::RouteProvider;
use crate::turn::{TurnRequest, TurnResponse, TurnState};
use crate::weather::WeatherProvider;

/// The one in-character apology a user ever sees for a backend fault.
pub const FALLBACK_REPLY: &str =
    "Sorry, I had a small issue connecting to my brain. Can you try saying that again?";

/// Messages sent to the generative backend per turn.
const HISTORY_TAIL: usize = 20;

/// Faults that reject the request before any processing. Runtime faults
/// never surface here; they degrade inside the turn.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("missing message or sessionId")]
    InvalidInput,
}

/// External collaborators the engine orchestrates.
pub struct Collaborators {
    pub llm: Arc<dyn LLMClient>,
    pub weather: Arc<dyn WeatherProvider>,
    pub routes: Arc<dyn RouteProvider>,
    pub geo: Arc<dyn GeoProvider>,
    pub knowledge: Arc<dyn KnowledgeStore>,
}

/// The conversational orchestration engine. One instance serves every
/// session; per-turn state lives on the stack and in the session store.
pub struct Engine {
    store: SessionStore,
    router: IntentRouter,
    assembler: ContextAssembler,
    llm: Arc<dyn LLMClient>,
    trusted: HashMap<String, String>,
}

impl Engine {
    pub fn new(collab: Collaborators) -> Self {
        let router = IntentRouter::with_default_priority(
            Arc::clone(&collab.knowledge),
            Arc::clone(&collab.routes),
            Arc::clone(&collab.weather),
            Arc::clone(&collab.geo),
        );
        Self {
            store: SessionStore::new(),
            router,
            assembler: ContextAssembler::new(collab.weather),
            llm: collab.llm,
            trusted: HashMap::new(),
        }
    }

    /// Replace the session store (e.g. to change the idle TTL).
    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = store;
        self
    }

    /// Register trusted facts for a city, injected as static context when
    /// the utterance names it.
    pub fn trust_city(mut self, city: impl Into<String>, facts: impl Into<String>) -> Self {
        self.trusted.insert(city.into(), facts.into());
        self
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.store
    }

    fn trusted_for(&self, lower: &str) -> Option<(&str, &str)> {
        for (city, facts) in &self.trusted {
            if lower.contains(&city.to_lowercase()) {
                return Some((city.as_str(), facts.as_str()));
            }
        }
        let city = implied_city(lower)?;
        self.trusted
            .get_key_value(city)
            .map(|(c, f)| (c.as_str(), f.as_str()))
    }

    /// Drive one turn to completion.
    ///
    /// The per-session lock is held for the whole turn, so concurrent
    /// turns on one session serialize. Only a generative-backend fault
    /// aborts the turn, and it degrades to the fallback reply rather than
    /// surfacing.
    pub async fn process(&self, req: TurnRequest) -> Result<TurnResponse, EngineError> {
        if req.message.trim().is_empty() || req.session_id.trim().is_empty() {
            return Err(EngineError::InvalidInput);
        }
        let input = TurnInput::new(req.message, req.user_location, req.trip_context);

        let handle = self.store.get_or_create(&req.session_id).await;
        let mut session = handle.lock().await;

        let routed = self.router.route(&input).await;
        debug!(
            fragments = routed.fragments.len(),
            ui = routed.ui.as_ref().map(|u| u.kind()),
            "turn routed"
        );

        let trusted = self.trusted_for(&input.utterance.lower);
        let assembled = self
            .assembler
            .assemble(
                &input,
                session.proactive(),
                session.history(),
                &routed,
                trusted,
                Local::now(),
            )
            .await;

        // Planning intent persists its findings even if generation fails,
        // so a retry still benefits from them.
        if let Some(proactive) = &assembled.new_proactive {
            session.set_proactive(proactive.clone());
        }

        let mut messages: Vec<TurnMessage> = session.tail(HISTORY_TAIL).to_vec();
        messages.push(TurnMessage::user(&input.utterance.raw));
        let raw = match self
            .llm
            .generate_reply(&messages, &assembled.static_context, &assembled.system_context)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                error!(error = ?e, "generation failed");
                return Ok(TurnResponse {
                    replies: vec![FALLBACK_REPLY.to_string()],
                    state: TurnState::Error,
                    ui_action: None,
                });
            }
        };

        let reconciled = reconcile(&raw, assembled.force_structured, routed.ui);

        session.push_user(&input.utterance.raw);
        session.push_assistant(&reconciled.stored_reply);
        session.set_last_utterance(&input.utterance.raw);

        Ok(TurnResponse {
            replies: reconciled.replies,
            state: TurnState::Active,
            ui_action: reconciled.ui,
        })
    }
}
