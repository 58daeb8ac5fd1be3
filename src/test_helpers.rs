//! Canned collaborators for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::engine::{Collaborators, Engine};
use crate::geo::{GeoAction, GeoCenter, GeoProvider, Place};
use crate::knowledge::{InMemoryKnowledgeStore, KnowledgeStore};
use crate::llm::LLMClient;
use crate::session::TurnMessage;
use crate::transit::{RouteProvider, TransitPlan, TransitRoute};
use crate::turn::{GeoPoint, TripContext};
use crate::weather::{WeatherProvider, WeatherReport};

/// LLM that always answers with the same text.
pub struct StaticLLM {
    reply: String,
}

#[async_trait]
impl LLMClient for StaticLLM {
    async fn generate_reply(
        &self,
        _history: &[TurnMessage],
        _static_context: &str,
        _system_context: &str,
    ) -> anyhow::Result<String> {
        Ok(self.reply.clone())
    }
}

pub fn static_llm(reply: &str) -> Arc<dyn LLMClient> {
    Arc::new(StaticLLM {
        reply: reply.into(),
    })
}

/// LLM that records the contexts it was handed.
pub struct RecordingLLM {
    reply: String,
    pub seen: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl LLMClient for RecordingLLM {
    async fn generate_reply(
        &self,
        _history: &[TurnMessage],
        static_context: &str,
        system_context: &str,
    ) -> anyhow::Result<String> {
        self.seen
            .lock()
            .unwrap()
            .push((static_context.to_string(), system_context.to_string()));
        Ok(self.reply.clone())
    }
}

/// Returns the client plus a handle on the `(static, system)` pairs it saw.
pub fn recording_llm(reply: &str) -> (Arc<dyn LLMClient>, Arc<Mutex<Vec<(String, String)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let llm = Arc::new(RecordingLLM {
        reply: reply.into(),
        seen: Arc::clone(&seen),
    });
    (llm, seen)
}

/// LLM whose every call fails.
pub struct FailingLLM;

#[async_trait]
impl LLMClient for FailingLLM {
    async fn generate_reply(
        &self,
        _history: &[TurnMessage],
        _static_context: &str,
        _system_context: &str,
    ) -> anyhow::Result<String> {
        anyhow::bail!("backend unavailable")
    }
}

pub fn failing_llm() -> Arc<dyn LLMClient> {
    Arc::new(FailingLLM)
}

/// Weather collaborator with nothing to say.
pub struct NoWeather;

#[async_trait]
impl WeatherProvider for NoWeather {
    async fn current(&self, _city: &str) -> anyhow::Result<Option<WeatherReport>> {
        Ok(None)
    }
}

/// Weather collaborator returning fixed conditions for any city.
pub struct FixedWeather(pub WeatherReport);

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn current(&self, _city: &str) -> anyhow::Result<Option<WeatherReport>> {
        Ok(Some(self.0.clone()))
    }
}

pub fn weather_with(temp: i32, condition: &str) -> Arc<dyn WeatherProvider> {
    Arc::new(FixedWeather(WeatherReport {
        temp,
        condition: condition.into(),
        description: condition.to_lowercase(),
        humidity: 70,
        wind_speed: 3.0,
    }))
}

/// Route collaborator with nothing to say.
pub struct NoRoutes;

#[async_trait]
impl RouteProvider for NoRoutes {
    async fn plan(
        &self,
        _origin: &str,
        _destination: &str,
        _city: &str,
    ) -> anyhow::Result<Option<TransitPlan>> {
        Ok(None)
    }
}

/// Route collaborator returning a fixed plan.
pub struct FixedRoutes(pub TransitPlan);

#[async_trait]
impl RouteProvider for FixedRoutes {
    async fn plan(
        &self,
        _origin: &str,
        _destination: &str,
        _city: &str,
    ) -> anyhow::Result<Option<TransitPlan>> {
        Ok(Some(self.0.clone()))
    }
}

pub fn routes_with(plan: TransitPlan) -> Arc<dyn RouteProvider> {
    Arc::new(FixedRoutes(plan))
}

pub fn sample_plan() -> TransitPlan {
    TransitPlan {
        summary: "Take the express bus.".into(),
        routes: vec![TransitRoute {
            mode: "Bus".into(),
            line: Some("KTC Express".into()),
            from: "Panjim".into(),
            to: "Calangute".into(),
            duration: "40 min".into(),
            cost: "₹50".into(),
            frequency: Some("Every 20 mins".into()),
            operating_hours: Some("6 AM - 10 PM".into()),
            safety_tip: Some("Crowded at peak hours".into()),
            deep_link: None,
        }],
    }
}

/// Geo collaborator with nothing to say.
pub struct NoGeo;

#[async_trait]
impl GeoProvider for NoGeo {
    async fn resolve(
        &self,
        _query: &str,
        _location: Option<GeoPoint>,
        _trip: Option<&TripContext>,
    ) -> anyhow::Result<Option<GeoAction>> {
        Ok(None)
    }
}

/// Geo collaborator returning a fixed action.
pub struct FixedGeo(pub GeoAction);

#[async_trait]
impl GeoProvider for FixedGeo {
    async fn resolve(
        &self,
        _query: &str,
        _location: Option<GeoPoint>,
        _trip: Option<&TripContext>,
    ) -> anyhow::Result<Option<GeoAction>> {
        Ok(Some(self.0.clone()))
    }
}

pub fn geo_with(action: GeoAction) -> Arc<dyn GeoProvider> {
    Arc::new(FixedGeo(action))
}

pub fn sample_geo_action(places: Option<Vec<Place>>) -> GeoAction {
    GeoAction {
        center: GeoCenter {
            lat: 15.5525,
            lon: 73.7517,
            label: "Baga Beach".into(),
        },
        radius_meters: 1500,
        osm_tags: [("amenity".to_string(), "cafe".to_string())]
            .into_iter()
            .collect(),
        places,
    }
}

pub fn sample_places(count: usize) -> Vec<Place> {
    (0..count)
        .map(|i| Place {
            id: format!("p{i}"),
            title: format!("Cafe {i}"),
            description: "1.2 km away".into(),
            rating: 4.4,
            review_count: 120,
            price: "₹₹".into(),
            tags: vec!["Veg".into()],
            photo_url: None,
        })
        .collect()
}

/// Knowledge store seeded with the Goa fixtures used across tests.
pub fn goa_knowledge() -> Arc<dyn KnowledgeStore> {
    Arc::new(
        InMemoryKnowledgeStore::from_json(
            r#"{
            "safety_zones": [
                {
                    "city_name": "Goa",
                    "area_name": "North Goa (Baga/Calangute)",
                    "safety_score": 6,
                    "risk_factors": ["Crowded", "Petty Theft", "Touts"],
                    "safe_havens": ["Titos Lane Police Outpost", "Crowded Beach Shacks"]
                },
                {
                    "city_name": "Goa",
                    "area_name": "South Goa (Palolem/Agonda)",
                    "safety_score": 8,
                    "risk_factors": ["Isolated Roads at Night"],
                    "safe_havens": ["Resort Lobbies"]
                }
            ],
            "fare_benchmarks": [
                {
                    "city_name": "Goa",
                    "transport_type": "taxi",
                    "base_fare": 300.0,
                    "per_km_rate": 25.0,
                    "currency": "INR"
                }
            ],
            "emotional_scripts": [
                {
                    "trigger_category": "anxiety",
                    "action_type": "breathing_exercise",
                    "response_text": "Let's pause for 10 seconds. Breathe in... and breathe out."
                },
                {
                    "trigger_category": "loneliness",
                    "action_type": "validation",
                    "response_text": "It's completely normal to feel lonely in a new city."
                }
            ]
        }"#,
        )
        .expect("valid fixture"),
    )
}

/// Engine wired with the standard fixtures and the given LLM.
pub fn engine_with(llm: Arc<dyn LLMClient>) -> Engine {
    Engine::new(Collaborators {
        llm,
        weather: Arc::new(NoWeather),
        routes: Arc::new(NoRoutes),
        geo: Arc::new(NoGeo),
        knowledge: goa_knowledge(),
    })
}
