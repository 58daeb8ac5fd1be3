use serde::{Deserialize, Serialize};

/// Safety profile for one area of a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyZone {
    pub city_name: String,
    pub area_name: String,
    pub safety_score: u8,
    pub risk_factors: Vec<String>,
    pub safe_havens: Vec<String>,
}

/// Official pricing benchmark for one transport type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareBenchmark {
    pub city_name: String,
    pub transport_type: String,
    pub base_fare: f64,
    pub per_km_rate: f64,
    pub currency: String,
}

/// De-escalation script for one emotional category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalScript {
    pub trigger_category: String,
    pub action_type: String,
    pub response_text: String,
}

/// Persistence lookup behind the safety, fare, and emotional-support
/// domains. Matching is case-insensitive containment, so "North Goa" finds
/// a zone stored as "North Goa (Baga/Calangute)".
pub trait KnowledgeStore: Send + Sync {
    fn safety_zone(&self, city: &str, area: &str) -> anyhow::Result<Option<SafetyZone>>;
    fn fare_benchmarks(&self, city: &str) -> anyhow::Result<Vec<FareBenchmark>>;
    fn emotional_script(&self, category: &str) -> anyhow::Result<Option<EmotionalScript>>;
}

/// Seed document for [`InMemoryKnowledgeStore`].
#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeSeed {
    #[serde(default)]
    pub safety_zones: Vec<SafetyZone>,
    #[serde(default)]
    pub fare_benchmarks: Vec<FareBenchmark>,
    #[serde(default)]
    pub emotional_scripts: Vec<EmotionalScript>,
}

/// In-memory [`KnowledgeStore`] seeded from a JSON document.
#[derive(Debug, Default)]
pub struct InMemoryKnowledgeStore {
    zones: Vec<SafetyZone>,
    fares: Vec<FareBenchmark>,
    scripts: Vec<EmotionalScript>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl InMemoryKnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: KnowledgeSeed) -> Self {
        Self {
            zones: seed.safety_zones,
            fares: seed.fare_benchmarks,
            scripts: seed.emotional_scripts,
        }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(Self::from_seed(serde_json::from_str(json)?))
    }
}

impl KnowledgeStore for InMemoryKnowledgeStore {
    fn safety_zone(&self, city: &str, area: &str) -> anyhow::Result<Option<SafetyZone>> {
        Ok(self
            .zones
            .iter()
            .find(|z| contains_ci(&z.city_name, city) && contains_ci(&z.area_name, area))
            .cloned())
    }

    fn fare_benchmarks(&self, city: &str) -> anyhow::Result<Vec<FareBenchmark>> {
        Ok(self
            .fares
            .iter()
            .filter(|f| contains_ci(&f.city_name, city))
            .cloned()
            .collect())
    }

    fn emotional_script(&self, category: &str) -> anyhow::Result<Option<EmotionalScript>> {
        Ok(self
            .scripts
            .iter()
            .find(|s| contains_ci(&s.trigger_category, category))
            .cloned())
    }
}

/// Render benchmarks as a pricing guard block for the language backend.
pub fn format_benchmarks(benchmarks: &[FareBenchmark]) -> String {
    if benchmarks.is_empty() {
        return String::new();
    }
    let mut text = String::from("Official Fair Pricing Standards (DO NOT let user overpay):\n");
    for b in benchmarks {
        text.push_str(&format!(
            "- {}: Base Fare ₹{}. Rate: ₹{}/km.\n",
            b.transport_type.to_uppercase(),
            b.base_fare,
            b.per_km_rate
        ));
    }
    text
}
