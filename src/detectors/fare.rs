use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::detect::{Detector, DomainResult, TurnInput};
use crate::knowledge::{format_benchmarks, KnowledgeStore};
use crate::ui::{FareCard, FARE_WARNING};

/// Fare/pricing intent: surfaces official benchmarks so the backend can
/// push back on overcharging, and shows the primary benchmark as a card.
pub struct FareIntent {
    knowledge: Arc<dyn KnowledgeStore>,
}

const DEFAULT_CITY: &str = "Goa";

impl FareIntent {
    pub fn new(knowledge: Arc<dyn KnowledgeStore>) -> Self {
        Self { knowledge }
    }
}

#[async_trait]
impl Detector for FareIntent {
    fn name(&self) -> &'static str {
        "fare"
    }

    fn triggers(&self, input: &TurnInput) -> bool {
        input
            .utterance
            .mentions_any(&["price", "cost", "fare", "how much", "taxi", "auto"])
    }

    async fn detect(&self, input: &TurnInput) -> anyhow::Result<Option<DomainResult>> {
        let city = input.context_city().unwrap_or(DEFAULT_CITY);
        let benchmarks = match self.knowledge.fare_benchmarks(city) {
            Ok(benchmarks) => benchmarks,
            Err(e) => {
                warn!(error = ?e, %city, "fare benchmark lookup failed");
                return Ok(None);
            }
        };
        let Some(primary) = benchmarks.first() else {
            return Ok(None);
        };
        let fragment = format!("[FINANCIAL GUARD]\n{}", format_benchmarks(&benchmarks));
        let card = FareCard {
            transport: primary.transport_type.clone(),
            location: primary.city_name.clone(),
            base_fare: primary.base_fare,
            per_km: primary.per_km_rate,
            currency: primary.currency.clone(),
            warning: FARE_WARNING.into(),
        };
        Ok(Some(DomainResult::Fare { fragment, card }))
    }
}
