//! Geo intelligence gateway: an LLM turns the utterance into a structured
//! map action, Nominatim pins the center to real coordinates, and Overpass
//! supplies concrete places for the carousel.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use marga_rs::{strip_code_fences, GeoAction, GeoCenter, GeoPoint, GeoProvider, Place, TripContext};
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::ollama_chat::JsonLlm;
use crate::prompts::GEO_SYSTEM_PROMPT;

const DEFAULT_RADIUS_METERS: u32 = 1000;

/// Labels the LLM uses when no concrete location was named.
const UNRESOLVED_LABELS: [&str; 2] = ["Current Location", "User Location"];

pub struct OsmGeoGateway {
    llm: Arc<dyn JsonLlm>,
    http: reqwest::Client,
    nominatim_base: String,
    overpass_base: String,
}

#[derive(Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
    display_name: String,
}

fn json_num(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
}

impl OsmGeoGateway {
    pub fn new(
        llm: Arc<dyn JsonLlm>,
        nominatim_base: impl Into<String>,
        overpass_base: impl Into<String>,
    ) -> anyhow::Result<Self> {
        // Nominatim's usage policy requires an identifying User-Agent.
        let http = reqwest::Client::builder()
            .user_agent("MargaTravelCompanion/0.1")
            .build()?;
        Ok(Self {
            llm,
            http,
            nominatim_base: nominatim_base.into(),
            overpass_base: overpass_base.into(),
        })
    }

    /// Resolve a location name to coordinates via Nominatim.
    async fn geocode(&self, query: &str) -> anyhow::Result<Option<(f64, f64, String)>> {
        let url = format!("{}/search", self.nominatim_base);
        let resp = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;
        if !resp.status().is_success() {
            warn!(status = %resp.status(), %query, "nominatim error");
            return Ok(None);
        }
        let hits: Vec<NominatimHit> = resp.json().await?;
        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };
        let (Ok(lat), Ok(lon)) = (hit.lat.parse(), hit.lon.parse()) else {
            return Ok(None);
        };
        Ok(Some((lat, lon, hit.display_name)))
    }

    /// Search Overpass for places matching the OSM tag filters.
    async fn search_places(
        &self,
        lat: f64,
        lon: f64,
        radius_meters: u32,
        filters: &BTreeMap<String, String>,
    ) -> anyhow::Result<Vec<Place>> {
        let tags_ql: String = filters
            .iter()
            .map(|(k, v)| format!("[\"{k}\"=\"{v}\"]"))
            .collect();
        let query = format!(
            "[out:json][timeout:25];(\
             node{tags_ql}(around:{radius_meters},{lat},{lon});\
             way{tags_ql}(around:{radius_meters},{lat},{lon});\
             relation{tags_ql}(around:{radius_meters},{lat},{lon}););\
             out center 5;"
        );
        debug!(%query, "overpass query");
        let url = format!("{}/api/interpreter", self.overpass_base);
        let resp = self.http.get(&url).query(&[("data", &query)]).send().await?;
        if !resp.status().is_success() {
            warn!(status = %resp.status(), "overpass error");
            return Ok(Vec::new());
        }
        let body: Value = resp.json().await?;
        let Some(elements) = body["elements"].as_array() else {
            return Ok(Vec::new());
        };
        Ok(elements.iter().map(map_element).collect())
    }
}

/// Map one Overpass element to a carousel place. OSM carries no ratings or
/// review counts, so a plausible spread is synthesized.
fn map_element(el: &Value) -> Place {
    let tags = &el["tags"];
    let name = tags["name"].as_str().unwrap_or("Unknown Place");
    let cuisine = tags["cuisine"].as_str().unwrap_or("");

    let mut vibe: Vec<String> = Vec::new();
    if !cuisine.is_empty() {
        let mut chars = cuisine.chars();
        if let Some(first) = chars.next() {
            vibe.push(first.to_uppercase().chain(chars).collect());
        }
    }
    if tags["internet_access"].as_str() == Some("wlan") {
        vibe.push("Wifi".into());
    }
    if tags["outdoor_seating"].as_str() == Some("yes") {
        vibe.push("Outdoor".into());
    }
    if tags["diet:vegetarian"].as_str() == Some("yes") {
        vibe.push("Veg".into());
    }
    if vibe.is_empty() {
        vibe.push("Local".into());
    }

    let price = match tags["amenity"].as_str() {
        Some("fast_food") => "₹",
        Some("restaurant") => "₹₹₹",
        _ => "₹₹",
    };

    let mut rng = rand::thread_rng();
    Place {
        id: el["id"]
            .as_u64()
            .map(|id| id.to_string())
            .unwrap_or_default(),
        title: name.to_string(),
        description: format!("{:.1} km away", rng.gen_range(1.0..5.0)),
        rating: 4.0 + rng.gen_range(0.0..1.0),
        review_count: rng.gen_range(10..510),
        price: price.to_string(),
        tags: vibe,
        photo_url: None,
    }
}

#[async_trait]
impl GeoProvider for OsmGeoGateway {
    async fn resolve(
        &self,
        query: &str,
        location: Option<GeoPoint>,
        trip: Option<&TripContext>,
    ) -> anyhow::Result<Option<GeoAction>> {
        let payload = json!({
            "user_query": query,
            "user_location": location,
            "trip_context": trip,
        });
        let prompt = format!(
            "{GEO_SYSTEM_PROMPT}\n\nINPUT:\n{}",
            serde_json::to_string_pretty(&payload)?
        );
        let raw = self.llm.complete(&prompt).await?;
        let clean = strip_code_fences(&raw);
        let Ok(draft) = serde_json::from_str::<Value>(&clean) else {
            debug!(%raw, "geo agent returned unparseable JSON");
            return Ok(None);
        };
        if draft["action"].as_str() != Some("show_places_on_map") {
            return Ok(None);
        }
        let Some(tag_obj) = draft["filters"]["osm_tags"].as_object() else {
            return Ok(None);
        };
        let osm_tags: BTreeMap<String, String> = tag_obj
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
            .collect();

        let mut label = draft["center"]["label"]
            .as_str()
            .unwrap_or("Current Location")
            .to_string();
        let mut lat = json_num(&draft["center"]["lat"]);
        let mut lon = json_num(&draft["center"]["lon"]);

        // The LLM's coordinates are a guess; pin named locations to real
        // geocoder output when possible.
        if !UNRESOLVED_LABELS.contains(&label.as_str()) {
            match self.geocode(&label).await {
                Ok(Some((real_lat, real_lon, resolved_display))) => {
                    debug!(%label, display = %resolved_display, "geocoder refined center");
                    lat = Some(real_lat);
                    lon = Some(real_lon);
                }
                Ok(None) => debug!(%label, "geocoder had no match; keeping LLM coordinates"),
                Err(e) => warn!(error = ?e, %label, "geocoder failed"),
            }
        } else if let Some(point) = location {
            lat = Some(point.lat);
            lon = Some(point.lon);
            label = "Current Location".to_string();
        }

        let radius_meters = draft["radius_meters"]
            .as_u64()
            .map(|r| r as u32)
            .unwrap_or(DEFAULT_RADIUS_METERS);

        let places = match (lat, lon) {
            (Some(lat), Some(lon)) => {
                match self.search_places(lat, lon, radius_meters, &osm_tags).await {
                    Ok(places) if !places.is_empty() => Some(places),
                    Ok(_) => None,
                    Err(e) => {
                        warn!(error = ?e, "place search failed");
                        None
                    }
                }
            }
            _ => None,
        };

        Ok(Some(GeoAction {
            center: GeoCenter {
                lat: lat.unwrap_or(0.0),
                lon: lon.unwrap_or(0.0),
                label,
            },
            radius_meters,
            osm_tags,
            places,
        }))
    }
}
