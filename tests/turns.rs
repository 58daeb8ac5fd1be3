//! End-to-end turns through the public engine API, with scripted
//! collaborators standing in for every external system.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use marga_rs::{
    Collaborators, Engine, EngineError, GeoAction, GeoCenter, GeoPoint, GeoProvider,
    InMemoryKnowledgeStore, LLMClient, Place, RouteProvider, StructuredPlan, TransitPlan,
    TripContext, TurnMessage, TurnRequest, TurnState, UiAction, WeatherProvider, WeatherReport,
};

struct ScriptedLLM {
    reply: String,
    system_contexts: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl LLMClient for ScriptedLLM {
    async fn generate_reply(
        &self,
        _history: &[TurnMessage],
        _static_context: &str,
        system_context: &str,
    ) -> anyhow::Result<String> {
        self.system_contexts
            .lock()
            .unwrap()
            .push(system_context.to_string());
        Ok(self.reply.clone())
    }
}

struct NoWeather;

#[async_trait]
impl WeatherProvider for NoWeather {
    async fn current(&self, _city: &str) -> anyhow::Result<Option<WeatherReport>> {
        Ok(None)
    }
}

struct NoRoutes;

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

struct BagaGeo;

#[async_trait]
impl GeoProvider for BagaGeo {
    async fn resolve(
        &self,
        _query: &str,
        _location: Option<GeoPoint>,
        _trip: Option<&TripContext>,
    ) -> anyhow::Result<Option<GeoAction>> {
        Ok(Some(GeoAction {
            center: GeoCenter {
                lat: 15.5525,
                lon: 73.7517,
                label: "Baga Beach".into(),
            },
            radius_meters: 1500,
            osm_tags: [("amenity".to_string(), "cafe".to_string())]
                .into_iter()
                .collect(),
            places: Some(vec![Place {
                id: "1".into(),
                title: "Green Leaf Cafe".into(),
                description: "Baga Beach".into(),
                rating: 4.6,
                review_count: 210,
                price: "₹₹".into(),
                tags: vec!["Veg".into()],
                photo_url: None,
            }]),
        }))
    }
}

const SEED: &str = r#"{
    "safety_zones": [{
        "city_name": "Goa",
        "area_name": "North Goa (Baga/Calangute)",
        "safety_score": 6,
        "risk_factors": ["Crowded"],
        "safe_havens": ["Titos Lane Police Outpost"]
    }],
    "fare_benchmarks": [{
        "city_name": "Goa",
        "transport_type": "taxi",
        "base_fare": 300.0,
        "per_km_rate": 25.0,
        "currency": "INR"
    }],
    "emotional_scripts": [{
        "trigger_category": "loneliness",
        "action_type": "validation",
        "response_text": "It's completely normal to feel lonely in a new city."
    }]
}"#;

fn engine(reply: &str) -> (Engine, Arc<Mutex<Vec<String>>>) {
    let system_contexts = Arc::new(Mutex::new(Vec::new()));
    let engine = Engine::new(Collaborators {
        llm: Arc::new(ScriptedLLM {
            reply: reply.into(),
            system_contexts: Arc::clone(&system_contexts),
        }),
        weather: Arc::new(NoWeather),
        routes: Arc::new(NoRoutes),
        geo: Arc::new(BagaGeo),
        knowledge: Arc::new(InMemoryKnowledgeStore::from_json(SEED).unwrap()),
    });
    (engine, system_contexts)
}

fn request(message: &str) -> TurnRequest {
    TurnRequest {
        message: message.into(),
        session_id: "test-session".into(),
        user_location: None,
        trip_context: None,
    }
}

#[tokio::test]
async fn missing_identity_is_an_input_error() {
    let (engine, contexts) = engine("hi");
    let mut req = request("hello");
    req.session_id = String::new();
    assert_eq!(
        engine.process(req).await.unwrap_err(),
        EngineError::InvalidInput
    );
    // Rejected before any collaborator ran.
    assert!(contexts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn veg_cafes_near_baga_surface_a_carousel() {
    let (engine, contexts) = engine("Check these out!");
    let resp = engine
        .process(request("Show veg cafes near Baga Beach"))
        .await
        .unwrap();
    assert_eq!(resp.state, TurnState::Active);
    let ui = serde_json::to_value(resp.ui_action.unwrap()).unwrap();
    assert_eq!(ui["type"], "place_carousel");
    assert_eq!(ui["data"][0]["title"], "Green Leaf Cafe");
    assert!(contexts.lock().unwrap()[0].contains("[GEO INTELLIGENCE]"));
}

#[tokio::test]
async fn loneliness_always_wins_the_ui_slot() {
    let (engine, _) = engine("You're not alone out here.");
    // Fare vocabulary is present too; the therapy card must still win.
    let resp = engine
        .process(request("I feel so lonely here, even taxi fares scare me"))
        .await
        .unwrap();
    let ui = serde_json::to_value(resp.ui_action.unwrap()).unwrap();
    assert_eq!(ui["type"], "therapy_card");
    assert_eq!(ui["data"]["mood"], "Loneliness");
}

#[tokio::test]
async fn taxi_fares_come_with_the_official_warning() {
    let (engine, _) = engine("Around 300 base, don't pay more!");
    let resp = engine.process(request("How much is a taxi?")).await.unwrap();
    let ui = serde_json::to_value(resp.ui_action.unwrap()).unwrap();
    assert_eq!(ui["type"], "fare_card");
    assert_eq!(ui["data"]["warning"], "Official Base Rate. Negotiate if higher.");
}

#[tokio::test]
async fn full_trip_details_trigger_a_direct_plan() {
    let (engine, contexts) = engine(
        r#"{"currentCondition":{"temp":"30°C","condition":"Sunny","icon":"☀️","advice":"Sunscreen"},
            "timeline":[{"time":"Now","title":"Beach","type":"outdoor","reason":"Fresh morning"}]}"#,
    );
    let resp = engine
        .process(request("Plan a trip to Goa for 3 days"))
        .await
        .unwrap();
    // No intermediate planner form: the plan itself is the card.
    let ui = resp.ui_action.unwrap();
    assert_eq!(ui.kind(), "adaptive_plan_card");
    let system = contexts.lock().unwrap()[0].clone();
    assert!(system.contains("[UI TRIGGER]"));
    assert!(system.contains("[STRICT OUTPUT RULE]"));
}

#[tokio::test]
async fn generated_plan_round_trips_into_the_card() {
    let plan: StructuredPlan = serde_json::from_str(
        r#"{"currentCondition":{"temp":"30°C","condition":"Sunny","icon":"☀️","advice":"Sunscreen"},
            "timeline":[{"time":"Now","title":"Beach","type":"outdoor"}]}"#,
    )
    .unwrap();
    let (engine, _) = engine(&serde_json::to_string(&plan).unwrap());
    let resp = engine
        .process(request("Plan a trip to Goa for 3 days"))
        .await
        .unwrap();
    match resp.ui_action.unwrap() {
        UiAction::AdaptivePlanCard(recovered) => assert_eq!(recovered, plan),
        other => panic!("expected adaptive plan card, got {other:?}"),
    }
}

#[tokio::test]
async fn implausible_budget_deflects_instead_of_planning() {
    let (engine, contexts) = engine("Bro, that won't even buy a vada pav.");
    let resp = engine
        .process(request("Plan a trip to Goa for 3 days under 800"))
        .await
        .unwrap();
    assert!(resp.ui_action.is_none());
    assert_eq!(resp.state, TurnState::Active);
    let system = contexts.lock().unwrap()[0].clone();
    assert!(system.contains("[REALITY CHECK FAIL]"));
    assert!(!system.contains("[STRICT OUTPUT RULE]"));
}
