//! Detector infrastructure: the per-turn input view, the domain result
//! union, and the trait every domain classifier implements.

use async_trait::async_trait;

use crate::geo::GeoAction;
use crate::transit::TransitRoute;
use crate::turn::{GeoPoint, TripContext};
use crate::ui::{FareCard, SafetyCard, TherapyCard, UiAction, WeatherCard};

/// An utterance with its normalized form computed once.
#[derive(Debug, Clone)]
pub struct Utterance {
    pub raw: String,
    pub lower: String,
}

impl Utterance {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let lower = raw.to_lowercase();
        Self { raw, lower }
    }

    /// Case-insensitive containment test against a fixed vocabulary.
    pub fn mentions_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.lower.contains(k))
    }
}

/// Read-only view of one turn handed to every detector.
#[derive(Debug, Clone)]
pub struct TurnInput {
    pub utterance: Utterance,
    pub user_location: Option<GeoPoint>,
    pub trip_context: Option<TripContext>,
}

impl TurnInput {
    pub fn new(
        message: impl Into<String>,
        user_location: Option<GeoPoint>,
        trip_context: Option<TripContext>,
    ) -> Self {
        Self {
            utterance: Utterance::new(message),
            user_location,
            trip_context,
        }
    }

    /// Trip-context city, if the caller supplied one.
    pub fn context_city(&self) -> Option<&str> {
        self.trip_context.as_ref()?.city.as_deref()
    }
}

/// What the trip-planning detector learned about this turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripSignals {
    /// Destination and day count are both known; plan can be generated
    /// directly.
    pub sufficient: bool,
    /// The extracted budget fell below the implausibility floor; planning
    /// is suppressed no matter what else the turn says.
    pub implausible_budget: bool,
    /// The turn established planning intent, so the context accumulated so
    /// far should be persisted for follow-up turns.
    pub persist_proactive: bool,
    pub destination: Option<String>,
    pub origin: Option<String>,
    pub days: Option<u32>,
}

/// Output of a triggered detector: a typed payload plus the context
/// fragment used verbatim when composing the backend prompt.
#[derive(Debug, Clone)]
pub enum DomainResult {
    Transit { fragment: String, route: TransitRoute },
    Weather { fragment: String, card: WeatherCard },
    Geo { fragment: String, action: GeoAction },
    Emotion { fragment: String, card: TherapyCard },
    Fare { fragment: String, card: FareCard },
    SafetyZone { fragment: String, card: SafetyCard },
    TripPlan { fragment: String, signals: TripSignals },
}

impl DomainResult {
    pub fn fragment(&self) -> &str {
        match self {
            DomainResult::Transit { fragment, .. }
            | DomainResult::Weather { fragment, .. }
            | DomainResult::Geo { fragment, .. }
            | DomainResult::Emotion { fragment, .. }
            | DomainResult::Fare { fragment, .. }
            | DomainResult::SafetyZone { fragment, .. }
            | DomainResult::TripPlan { fragment, .. } => fragment,
        }
    }

    /// The card this result would place in the turn's single UI slot.
    /// Trip-plan triggers never claim the slot; the generated plan itself
    /// becomes the card once the backend responds.
    pub fn ui_action(&self) -> Option<UiAction> {
        match self {
            DomainResult::Transit { route, .. } => Some(UiAction::TransitCard(route.clone())),
            DomainResult::Weather { card, .. } => Some(UiAction::WeatherCard(card.clone())),
            DomainResult::Geo { action, .. } => {
                if action.has_places() {
                    Some(UiAction::PlaceCarousel(
                        action.places.clone().unwrap_or_default(),
                    ))
                } else {
                    Some(UiAction::MapView(action.clone()))
                }
            }
            DomainResult::Emotion { card, .. } => Some(UiAction::TherapyCard(card.clone())),
            DomainResult::Fare { card, .. } => Some(UiAction::FareCard(card.clone())),
            DomainResult::SafetyZone { card, .. } => Some(UiAction::SafetyCard(card.clone())),
            DomainResult::TripPlan { .. } => None,
        }
    }
}

/// One rule of the intent table: a cheap trigger predicate plus an async
/// handler that consults the domain's collaborator.
///
/// Detectors are total: an untriggered or failed detection is `Ok(None)`
/// with no side effect. Collaborator faults are swallowed at this scope.
#[async_trait]
pub trait Detector: Send + Sync {
    fn name(&self) -> &'static str;

    /// Keyword predicate; must be side-effect free.
    fn triggers(&self, input: &TurnInput) -> bool;

    /// Consult the collaborator and build the domain result.
    async fn detect(&self, input: &TurnInput) -> anyhow::Result<Option<DomainResult>>;
}
