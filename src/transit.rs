use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One recommended public-transport leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitRoute {
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    pub from: String,
    pub to: String,
    pub duration: String,
    pub cost: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deep_link: Option<String>,
}

/// A route recommendation: a one-line summary plus the candidate routes,
/// best first.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitPlan {
    pub summary: String,
    pub routes: Vec<TransitRoute>,
}

/// Route-planning collaborator.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn plan(
        &self,
        origin: &str,
        destination: &str,
        city: &str,
    ) -> anyhow::Result<Option<TransitPlan>>;
}
