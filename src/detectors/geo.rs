use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::detect::{Detector, DomainResult, TurnInput};
use crate::geo::GeoProvider;

/// Place/map intent: hands the raw query to the geo collaborator, which
/// resolves a center, OSM tag filters, and (when it can) concrete places.
pub struct GeoIntent {
    geo: Arc<dyn GeoProvider>,
}

impl GeoIntent {
    pub fn new(geo: Arc<dyn GeoProvider>) -> Self {
        Self { geo }
    }
}

#[async_trait]
impl Detector for GeoIntent {
    fn name(&self) -> &'static str {
        "geo"
    }

    fn triggers(&self, input: &TurnInput) -> bool {
        let u = &input.utterance;
        u.mentions_any(&["show", "find", "near", "map", "where is", "best", "visit"])
            || (u.lower.contains("in")
                && u.mentions_any(&["cafe", "food", "hotel", "rest"]))
    }

    async fn detect(&self, input: &TurnInput) -> anyhow::Result<Option<DomainResult>> {
        let action = match self
            .geo
            .resolve(
                &input.utterance.raw,
                input.user_location,
                input.trip_context.as_ref(),
            )
            .await
        {
            Ok(Some(action)) => action,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = ?e, "geo collaborator failed");
                return Ok(None);
            }
        };
        let fragment = if action.has_places() {
            let count = action.places.as_ref().map(Vec::len).unwrap_or(0);
            format!(
                "[GEO INTELLIGENCE]\nI found {count} real places near {} matching the criteria. \
                 I have displayed them in the Places Carousel.",
                action.center.label
            )
        } else {
            format!(
                "[GEO INTELLIGENCE]\nUser asked for location info. I have generated a map action \
                 for: {}. Center: {}.",
                serde_json::to_string(&action.osm_tags).unwrap_or_default(),
                action.center.label
            )
        };
        Ok(Some(DomainResult::Geo { fragment, action }))
    }
}
