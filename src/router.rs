//! Fixed-priority intent routing.
//!
//! Detectors form an ordered rule table. Priority governs who owns the
//! turn's single UI slot, not execution: every triggered detector runs and
//! its context fragment is accumulated regardless of slot suppression.
//!
//! Slot rules: first-match-wins for transit/weather/geo/fare; emotional
//! support overwrites whatever is there (wellbeing outranks every other
//! card); the trip trigger never claims the slot; area safety claims it
//! only when still empty.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::detect::{Detector, DomainResult, TripSignals, TurnInput};
use crate::geo::GeoProvider;
use crate::knowledge::KnowledgeStore;
use crate::transit::RouteProvider;
use crate::ui::UiAction;
use crate::weather::WeatherProvider;

/// Everything the router learned about one turn.
#[derive(Debug, Default)]
pub struct RoutedTurn {
    /// Context fragments in priority order.
    pub fragments: Vec<String>,
    /// Occupant of the single UI slot, if any.
    pub ui: Option<UiAction>,
    /// Trip-planning signals, when that detector triggered.
    pub trip: Option<TripSignals>,
    /// When the trip detector asked for persistence: how many leading
    /// fragments (everything through its own) belong in proactive memory.
    pub proactive_cutoff: Option<usize>,
}

/// Runs the detector rule table in fixed priority order.
pub struct IntentRouter {
    detectors: Vec<Arc<dyn Detector>>,
}

impl IntentRouter {
    /// Build a router from an already-ordered rule table.
    pub fn new(detectors: Vec<Arc<dyn Detector>>) -> Self {
        Self { detectors }
    }

    /// The standard seven-domain priority order.
    pub fn with_default_priority(
        knowledge: Arc<dyn KnowledgeStore>,
        routes: Arc<dyn RouteProvider>,
        weather: Arc<dyn WeatherProvider>,
        geo: Arc<dyn GeoProvider>,
    ) -> Self {
        use crate::detectors::{
            EmotionIntent, FareIntent, GeoIntent, SafetyZoneIntent, TransitIntent, TripPlanIntent,
            WeatherIntent,
        };
        Self::new(vec![
            Arc::new(TransitIntent::new(Arc::clone(&routes))),
            Arc::new(WeatherIntent::new(Arc::clone(&weather))),
            Arc::new(GeoIntent::new(geo)),
            Arc::new(EmotionIntent::new(Arc::clone(&knowledge))),
            Arc::new(FareIntent::new(Arc::clone(&knowledge))),
            Arc::new(TripPlanIntent::new(
                Arc::clone(&knowledge),
                routes,
                weather,
            )),
            Arc::new(SafetyZoneIntent::new(knowledge)),
        ])
    }

    /// Run the table over one turn and merge the results.
    pub async fn route(&self, input: &TurnInput) -> RoutedTurn {
        let mut out = RoutedTurn::default();
        for detector in &self.detectors {
            if !detector.triggers(input) {
                continue;
            }
            let result = match detector.detect(input).await {
                Ok(Some(result)) => result,
                Ok(None) => continue,
                Err(e) => {
                    warn!(detector = detector.name(), error = ?e, "detector failed; skipping");
                    continue;
                }
            };
            debug!(detector = detector.name(), "detector triggered");
            match &result {
                DomainResult::Emotion { .. } => {
                    out.ui = result.ui_action();
                }
                DomainResult::TripPlan { signals, .. } => {
                    out.trip = Some(signals.clone());
                }
                _ => {
                    if out.ui.is_none() {
                        out.ui = result.ui_action();
                    }
                }
            }
            out.fragments.push(result.fragment().to_string());
            if matches!(&result, DomainResult::TripPlan { signals, .. } if signals.persist_proactive)
            {
                out.proactive_cutoff = Some(out.fragments.len());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{
        geo_with, goa_knowledge, routes_with, sample_geo_action, sample_places, sample_plan,
        weather_with,
    };

    fn full_router() -> IntentRouter {
        IntentRouter::with_default_priority(
            goa_knowledge(),
            routes_with(sample_plan()),
            weather_with(32, "Rain"),
            geo_with(sample_geo_action(Some(sample_places(2)))),
        )
    }

    #[tokio::test]
    async fn emotional_support_preempts_other_cards() {
        let router = full_router();
        // Fare and emotion both trigger; the therapy card must win the slot.
        let routed = router
            .route(&TurnInput::new(
                "I'm scared the taxi fare is a scam",
                None,
                None,
            ))
            .await;
        assert_eq!(routed.ui.as_ref().map(UiAction::kind), Some("therapy_card"));
        // Both fragments still reach the context.
        assert!(routed.fragments.iter().any(|f| f.contains("[FINANCIAL GUARD]")));
        assert!(routed
            .fragments
            .iter()
            .any(|f| f.contains("[EMOTIONAL INTERVENTION REQUIRED]")));
    }

    #[tokio::test]
    async fn first_ui_bearing_detector_wins() {
        let router = full_router();
        // Weather (priority 2) and fare (priority 5) both trigger.
        let routed = router
            .route(&TurnInput::new("what's the weather, and taxi cost?", None, None))
            .await;
        assert_eq!(routed.ui.as_ref().map(UiAction::kind), Some("weather_card"));
        assert!(routed.fragments.iter().any(|f| f.contains("[FINANCIAL GUARD]")));
    }

    #[tokio::test]
    async fn safety_claims_only_an_empty_slot() {
        let router = full_router();
        let routed = router
            .route(&TurnInput::new("how much is a taxi in Baga", None, None))
            .await;
        // Fare got there first; safety still contributes its alert.
        assert_eq!(routed.ui.as_ref().map(UiAction::kind), Some("fare_card"));
        assert!(routed.fragments.iter().any(|f| f.contains("[SAFETY ALERT]")));

        let routed = router
            .route(&TurnInput::new("tell me about Baga", None, None))
            .await;
        assert_eq!(routed.ui.as_ref().map(UiAction::kind), Some("safety_card"));
    }

    #[tokio::test]
    async fn trip_trigger_never_claims_the_slot() {
        let router = IntentRouter::with_default_priority(
            goa_knowledge(),
            routes_with(sample_plan()),
            weather_with(29, "Clear"),
            geo_with(sample_geo_action(None)),
        );
        let routed = router
            .route(&TurnInput::new("Plan a vacation for 3 days", None, None))
            .await;
        assert!(routed.ui.is_none());
        let trip = routed.trip.expect("trip signals");
        assert!(trip.sufficient);
        assert_eq!(routed.proactive_cutoff, Some(routed.fragments.len()));
    }

    #[tokio::test]
    async fn untriggered_turn_routes_to_nothing() {
        let router = full_router();
        let routed = router.route(&TurnInput::new("thanks, you too!", None, None)).await;
        assert!(routed.fragments.is_empty());
        assert!(routed.ui.is_none());
        assert!(routed.trip.is_none());
    }
}
