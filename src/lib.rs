//! Core types for the `marga-rs` crate.
//!
//! Marga is a conversational travel-assistant backend. This crate is its
//! orchestration engine: intent routing over seven informational domains,
//! per-session memory, situational context assembly, and reconciliation of
//! generated text into display-ready reply segments plus at most one
//! structured UI card. Concrete collaborator gateways (the generative
//! backend, weather, routing, geocoding, knowledge data) live in the
//! `margad` daemon; here they are traits so the whole turn pipeline runs
//! against mocks.

mod context;
mod detect;
pub mod detectors;
mod emotion;
mod engine;
pub mod extract;
mod geo;
mod knowledge;
mod llm;
mod observer;
mod plan;
mod reconcile;
mod router;
mod session;
#[cfg(test)]
pub mod test_helpers;
mod transit;
mod turn;
mod ui;
mod weather;

pub use context::{AssembledContext, ContextAssembler, PLAN_CONTRACT};
pub use detect::{Detector, DomainResult, TripSignals, TurnInput, Utterance};
pub use emotion::detect as detect_emotion;
pub use engine::{Collaborators, Engine, EngineError, FALLBACK_REPLY};
pub use geo::{GeoAction, GeoCenter, GeoProvider, Place};
pub use knowledge::{
    format_benchmarks, EmotionalScript, FareBenchmark, InMemoryKnowledgeStore, KnowledgeSeed,
    KnowledgeStore, SafetyZone,
};
pub use llm::LLMClient;
pub use observer::{is_future_plan, time_of_day, Observer};
pub use plan::{
    parse_plan, strip_artifacts, strip_code_fences, ActivityKind, CurrentCondition, ParsedPlan,
    PlanEntry, StructuredPlan,
};
pub use reconcile::{
    reconcile, split_replies, Reconciled, PAUSE_MARKER, PLAN_PLACEHOLDER_REPLY,
};
pub use router::{IntentRouter, RoutedTurn};
pub use session::{Role, Session, SessionStore, TurnMessage, DEFAULT_SESSION_TTL};
pub use transit::{RouteProvider, TransitPlan, TransitRoute};
pub use turn::{GeoPoint, TripContext, TurnRequest, TurnResponse, TurnState};
pub use ui::{
    BreathStep, FareCard, SafetyCard, TherapyCard, TripPlannerCard, TripResultCard, UiAction,
    WeatherCard, FARE_WARNING,
};
pub use weather::{WeatherProvider, WeatherReport};
