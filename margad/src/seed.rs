//! Seed data for the knowledge store and the trusted-facts static context.

use std::collections::HashMap;

use marga_rs::{InMemoryKnowledgeStore, KnowledgeSeed};
use serde::Deserialize;
use serde_json::Value;

const GOA_SEED: &str = include_str!("data/goa.json");

#[derive(Deserialize)]
struct SeedFile {
    city: String,
    knowledge: KnowledgeSeed,
    trusted_facts: Value,
}

/// A city's seeded knowledge plus its trusted-facts blob.
pub struct CitySeed {
    pub store: InMemoryKnowledgeStore,
    /// City name -> compact JSON facts, injected as static context.
    pub trusted: HashMap<String, String>,
}

/// Load the bundled Goa dataset.
pub fn load_goa() -> anyhow::Result<CitySeed> {
    let file: SeedFile = serde_json::from_str(GOA_SEED)?;
    let mut trusted = HashMap::new();
    trusted.insert(file.city, serde_json::to_string(&file.trusted_facts)?);
    Ok(CitySeed {
        store: InMemoryKnowledgeStore::from_seed(file.knowledge),
        trusted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use marga_rs::KnowledgeStore;

    #[test]
    fn bundled_seed_loads() {
        let seed = load_goa().unwrap();
        assert!(seed.trusted.contains_key("Goa"));
        let zone = seed.store.safety_zone("Goa", "North Goa").unwrap().unwrap();
        assert_eq!(zone.safety_score, 6);
        assert!(seed
            .store
            .emotional_script("loneliness")
            .unwrap()
            .is_some());
        assert_eq!(seed.store.fare_benchmarks("Goa").unwrap().len(), 2);
    }
}
