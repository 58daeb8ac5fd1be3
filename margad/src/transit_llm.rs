//! Transit planning gateway: the LLM recommends the best route as JSON and
//! every option gets a Google Maps transit deep link attached.

use std::sync::Arc;

use async_trait::async_trait;
use marga_rs::{strip_code_fences, RouteProvider, TransitPlan, TransitRoute};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::ollama_chat::JsonLlm;
use crate::prompts::TRANSIT_PROMPT;

pub struct LlmTransitPlanner {
    llm: Arc<dyn JsonLlm>,
}

#[derive(Deserialize)]
struct PlanDraft {
    summary: String,
    #[serde(default)]
    routes: Vec<TransitRoute>,
}

fn maps_deep_link(origin: &str, destination: &str) -> String {
    Url::parse_with_params(
        "https://www.google.com/maps/dir/",
        &[
            ("api", "1"),
            ("origin", origin),
            ("destination", destination),
            ("travelmode", "transit"),
        ],
    )
    .expect("valid base url")
    .to_string()
}

impl LlmTransitPlanner {
    pub fn new(llm: Arc<dyn JsonLlm>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl RouteProvider for LlmTransitPlanner {
    async fn plan(
        &self,
        origin: &str,
        destination: &str,
        city: &str,
    ) -> anyhow::Result<Option<TransitPlan>> {
        debug!(%origin, %destination, %city, "routing");
        let prompt = TRANSIT_PROMPT
            .replace("{origin}", origin)
            .replace("{destination}", destination)
            .replace("{city}", city);
        let raw = self.llm.complete(&prompt).await?;
        let clean = strip_code_fences(&raw);
        let Ok(draft) = serde_json::from_str::<PlanDraft>(&clean) else {
            debug!(%raw, "transit agent returned unparseable JSON");
            return Ok(None);
        };
        let deep_link = maps_deep_link(
            &format!("{origin}, {city}"),
            &format!("{destination}, {city}"),
        );
        let routes = draft
            .routes
            .into_iter()
            .map(|route| TransitRoute {
                deep_link: Some(deep_link.clone()),
                ..route
            })
            .collect();
        Ok(Some(TransitPlan {
            summary: draft.summary,
            routes,
        }))
    }
}
