use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::detect::{Detector, DomainResult, TurnInput};
use crate::knowledge::KnowledgeStore;
use crate::ui::SafetyCard;

/// Area vocabulary: mention of any keyword implies the (city, area) pair.
const AREA_VOCAB: &[(&[&str], &str, &str)] = &[
    (&["north goa", "baga", "calangute"], "Goa", "North Goa"),
    (&["south goa", "palolem", "colva"], "Goa", "South Goa"),
];

fn detected_area(lower: &str) -> Option<(&'static str, &'static str)> {
    AREA_VOCAB
        .iter()
        .find(|(keys, _, _)| keys.iter().any(|k| lower.contains(k)))
        .map(|(_, city, area)| (*city, *area))
}

/// City implied by the utterance, either named directly or through one of
/// its known areas. Drives the trusted-data static context.
pub fn implied_city(lower: &str) -> Option<&'static str> {
    if lower.contains("goa") {
        return Some("Goa");
    }
    detected_area(lower).map(|(city, _)| city)
}

/// Location-safety intent: keys on known area names and surfaces the
/// stored safety profile. Lowest priority; claims the UI slot only when
/// nothing else did.
pub struct SafetyZoneIntent {
    knowledge: Arc<dyn KnowledgeStore>,
}

impl SafetyZoneIntent {
    pub fn new(knowledge: Arc<dyn KnowledgeStore>) -> Self {
        Self { knowledge }
    }
}

#[async_trait]
impl Detector for SafetyZoneIntent {
    fn name(&self) -> &'static str {
        "safety_zone"
    }

    fn triggers(&self, input: &TurnInput) -> bool {
        detected_area(&input.utterance.lower).is_some()
    }

    async fn detect(&self, input: &TurnInput) -> anyhow::Result<Option<DomainResult>> {
        let Some((city, area)) = detected_area(&input.utterance.lower) else {
            return Ok(None);
        };
        let zone = match self.knowledge.safety_zone(city, area) {
            Ok(Some(zone)) => zone,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = ?e, city, area, "safety zone lookup failed");
                return Ok(None);
            }
        };
        let fragment = format!(
            "[SAFETY ALERT]\nLocation: {area}. Score: {}/10. Risks: {}. Safe Havens: {}.",
            zone.safety_score,
            zone.risk_factors.join(", "),
            zone.safe_havens.join(", ")
        );
        let card = SafetyCard {
            location: area.to_string(),
            score: zone.safety_score,
            risks: zone.risk_factors,
            safe_havens: zone.safe_havens,
        };
        Ok(Some(DomainResult::SafetyZone { fragment, card }))
    }
}
