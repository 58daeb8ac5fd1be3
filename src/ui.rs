use serde::{Deserialize, Serialize};

use crate::geo::{GeoAction, Place};
use crate::plan::{PlanEntry, StructuredPlan};
use crate::transit::TransitRoute;

/// Fixed warning attached to every fare card.
pub const FARE_WARNING: &str = "Official Base Rate. Negotiate if higher.";

/// One step of a guided breathing/grounding exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathStep {
    pub label: String,
    pub duration: u32,
}

/// Payload for the emotional-support card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapyCard {
    pub mood: String,
    pub technique: String,
    pub steps: Vec<BreathStep>,
    pub script: String,
}

impl TherapyCard {
    /// The standard four-count box pattern shown alongside every script.
    pub fn box_breathing_steps() -> Vec<BreathStep> {
        ["Inhale", "Hold", "Exhale", "Hold"]
            .into_iter()
            .map(|label| BreathStep {
                label: label.into(),
                duration: 4000,
            })
            .collect()
    }
}

/// Payload for the area-safety card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyCard {
    pub location: String,
    pub score: u8,
    pub risks: Vec<String>,
    pub safe_havens: Vec<String>,
}

/// Payload for the fare-benchmark card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareCard {
    pub transport: String,
    pub location: String,
    pub base_fare: f64,
    pub per_km: f64,
    pub currency: String,
    pub warning: String,
}

/// Payload for the weather card: the report plus the city it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherCard {
    pub city: String,
    pub temp: i32,
    pub condition: String,
    pub description: String,
    pub humidity: u32,
    pub wind_speed: f64,
}

/// Prefill payload for the trip-planner form card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlannerCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

/// Payload for the itinerary card built from a pseudo-XML tool tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResultCard {
    pub destination: String,
    pub duration: String,
    pub total_cost: String,
    pub itinerary: Vec<PlanEntry>,
}

/// The single structured, renderable payload attached to a turn's final
/// reply segment. Closed union: one variant per card kind, exhaustively
/// matched at the serialization boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum UiAction {
    SafetyCard(SafetyCard),
    TherapyCard(TherapyCard),
    FareCard(FareCard),
    TransitCard(TransitRoute),
    WeatherCard(WeatherCard),
    PlaceCarousel(Vec<Place>),
    MapView(GeoAction),
    TripPlannerCard(TripPlannerCard),
    TripResultCard(TripResultCard),
    AdaptivePlanCard(StructuredPlan),
}

impl UiAction {
    /// The wire tag for this card kind.
    pub fn kind(&self) -> &'static str {
        match self {
            UiAction::SafetyCard(_) => "safety_card",
            UiAction::TherapyCard(_) => "therapy_card",
            UiAction::FareCard(_) => "fare_card",
            UiAction::TransitCard(_) => "transit_card",
            UiAction::WeatherCard(_) => "weather_card",
            UiAction::PlaceCarousel(_) => "place_carousel",
            UiAction::MapView(_) => "map_view",
            UiAction::TripPlannerCard(_) => "trip_planner_card",
            UiAction::TripResultCard(_) => "trip_result_card",
            UiAction::AdaptivePlanCard(_) => "adaptive_plan_card",
        }
    }
}
