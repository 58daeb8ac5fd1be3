use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::detect::{Detector, DomainResult, TurnInput};
use crate::transit::RouteProvider;

/// Public-transport intent: keys on transport modes and "how to reach"
/// phrasings, then asks the route collaborator for the best option.
pub struct TransitIntent {
    routes: Arc<dyn RouteProvider>,
}

impl TransitIntent {
    pub fn new(routes: Arc<dyn RouteProvider>) -> Self {
        Self { routes }
    }
}

#[async_trait]
impl Detector for TransitIntent {
    fn name(&self) -> &'static str {
        "transit"
    }

    fn triggers(&self, input: &TurnInput) -> bool {
        let u = &input.utterance;
        u.mentions_any(&["bus", "metro", "train", "ferry", "tram"])
            || (u.lower.contains("route")
                && (u.lower.contains("to") || u.lower.contains("from")))
            || u.lower.contains("how to reach")
            || u.lower.contains("how do i get to")
    }

    async fn detect(&self, input: &TurnInput) -> anyhow::Result<Option<DomainResult>> {
        let city = input.context_city().unwrap_or("Current City").to_string();
        let plan = match self
            .routes
            .plan("User Location", &input.utterance.raw, &city)
            .await
        {
            Ok(Some(plan)) => plan,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = ?e, "route collaborator failed");
                return Ok(None);
            }
        };
        let Some(route) = plan.routes.first().cloned() else {
            return Ok(None);
        };
        let fragment = format!(
            "[Transit Agent]: Found route: {}. Shown TransitCard.",
            plan.summary
        );
        Ok(Some(DomainResult::Transit { fragment, route }))
    }
}
