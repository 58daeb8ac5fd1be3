use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::turn::{GeoPoint, TripContext};

/// Resolved map center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCenter {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
}

/// A concrete place suggestion for the carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub title: String,
    pub description: String,
    pub rating: f64,
    pub review_count: u32,
    pub price: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Structured geographic action resolved from an utterance: a center, a
/// search radius, the OSM tag filters, and (when the collaborator found
/// real matches) a list of places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoAction {
    pub center: GeoCenter,
    pub radius_meters: u32,
    pub osm_tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub places: Option<Vec<Place>>,
}

impl GeoAction {
    /// True when the collaborator surfaced concrete places.
    pub fn has_places(&self) -> bool {
        self.places.as_ref().is_some_and(|p| !p.is_empty())
    }
}

/// Geo/place resolution collaborator.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    async fn resolve(
        &self,
        query: &str,
        location: Option<GeoPoint>,
        trip: Option<&TripContext>,
    ) -> anyhow::Result<Option<GeoAction>>;
}
