use serde::{Deserialize, Serialize};

use crate::ui::UiAction;

/// Latitude/longitude pair supplied by the client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Caller-supplied trip defaults. Only consulted when a detector cannot
/// extract the value from the utterance itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripContext {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub travel_type: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub days: Option<String>,
}

/// One inbound request: free text plus session identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    pub message: String,
    pub session_id: String,
    #[serde(default)]
    pub user_location: Option<GeoPoint>,
    #[serde(default)]
    pub trip_context: Option<TripContext>,
}

/// Terminal state of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnState {
    Active,
    Error,
}

/// Display-ready reply segments plus at most one structured UI payload.
#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub replies: Vec<String>,
    pub state: TurnState,
    #[serde(rename = "uiAction", skip_serializing_if = "Option::is_none")]
    pub ui_action: Option<UiAction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_wire_shape() {
        let req: TurnRequest = serde_json::from_str(
            r#"{
                "message": "Plan a trip to Goa",
                "sessionId": "abc",
                "userLocation": { "lat": 15.49, "lon": 73.82 },
                "tripContext": { "city": "Goa", "travel_type": "leisure" }
            }"#,
        )
        .unwrap();
        assert_eq!(req.session_id, "abc");
        assert_eq!(req.trip_context.unwrap().city.as_deref(), Some("Goa"));
    }

    #[test]
    fn request_tolerates_missing_optionals() {
        let req: TurnRequest =
            serde_json::from_str(r#"{ "message": "hi", "sessionId": "s" }"#).unwrap();
        assert!(req.user_location.is_none());
        assert!(req.trip_context.is_none());
    }

    #[test]
    fn response_omits_absent_ui_action() {
        let resp = TurnResponse {
            replies: vec!["hello".into()],
            state: TurnState::Active,
            ui_action: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["state"], "active");
        assert!(json.get("uiAction").is_none());
    }
}
