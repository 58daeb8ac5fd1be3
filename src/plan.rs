//! Structured-plan schema and the tolerant parsers that recover it from
//! generated text.
//!
//! The generative backend is asked for raw JSON, but real responses arrive
//! in several encodings: clean JSON, markdown-fenced JSON, or a pseudo-XML
//! "tool call" tag. Recovery is an ordered chain of fallible parsers that
//! short-circuits on the first success; a miss never surfaces an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ui::TripResultCard;

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<travel_itinerary([^>]*)>").expect("valid regex"));

static ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([A-Za-z0-9_]+)="([^"]*)""#).expect("valid regex"));

static TOOL_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)'''tool_code.*?'''").expect("valid regex"));

static FENCE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));

/// Activity category for one timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Indoor,
    Outdoor,
    Food,
    Rest,
}

/// One activity in the generated timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub time: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Current-condition summary heading the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentCondition {
    pub temp: String,
    pub condition: String,
    pub icon: String,
    pub advice: String,
}

/// The shape demanded from the generative backend on forced-output turns.
/// Exists only within one turn's processing; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredPlan {
    pub current_condition: CurrentCondition,
    pub timeline: Vec<PlanEntry>,
}

/// Outcome of a successful parse attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedPlan {
    /// Full schema recovered from (possibly fenced) JSON.
    Adaptive(StructuredPlan),
    /// Partial plan scraped from a `<travel_itinerary .../>` tool tag.
    Itinerary(TripResultCard),
}

/// Remove markdown code-fence markers, keeping their contents.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Remove tool-call and code-fence artifacts, contents included.
pub fn strip_artifacts(text: &str) -> String {
    let cleaned = TOOL_BLOCK_RE.replace_all(text, "");
    let cleaned = FENCE_BLOCK_RE.replace_all(&cleaned, "");
    cleaned.trim().to_string()
}

fn parse_json_plan(text: &str) -> Option<ParsedPlan> {
    let clean = strip_code_fences(text);
    serde_json::from_str::<StructuredPlan>(&clean)
        .ok()
        .map(ParsedPlan::Adaptive)
}

fn parse_tag_plan(text: &str) -> Option<ParsedPlan> {
    let caps = TAG_RE.captures(text)?;
    let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    let mut destination = String::new();
    let mut duration = String::new();
    let mut budget = String::new();
    for attr in ATTR_RE.captures_iter(attrs) {
        match &attr[1] {
            "destination" => destination = attr[2].to_string(),
            "duration" => duration = attr[2].to_string(),
            "budget" => budget = attr[2].to_string(),
            _ => {}
        }
    }
    Some(ParsedPlan::Itinerary(TripResultCard {
        destination,
        duration: format!("{duration} Days"),
        total_cost: format!("₹{budget}"),
        itinerary: Vec::new(),
    }))
}

/// Run the parser chain over `text`, first success wins.
pub fn parse_plan(text: &str) -> Option<ParsedPlan> {
    const PARSERS: [fn(&str) -> Option<ParsedPlan>; 2] = [parse_json_plan, parse_tag_plan];
    PARSERS.iter().find_map(|parse| parse(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN_JSON: &str = r#"{
        "currentCondition": { "temp": "31°C", "condition": "Sunny", "icon": "☀️", "advice": "Carry water" },
        "timeline": [
            { "time": "Now", "title": "Beach walk", "type": "outdoor", "reason": "Golden hour" },
            { "time": "Late", "title": "Dinner at a shack", "type": "food" }
        ]
    }"#;

    #[test]
    fn parses_raw_json_plan() {
        match parse_plan(PLAN_JSON) {
            Some(ParsedPlan::Adaptive(plan)) => {
                assert_eq!(plan.timeline.len(), 2);
                assert_eq!(plan.timeline[0].kind, ActivityKind::Outdoor);
                assert!(plan.timeline[1].reason.is_none());
            }
            other => panic!("expected adaptive plan, got {other:?}"),
        }
    }

    #[test]
    fn parses_fenced_json_plan() {
        let fenced = format!("```json\n{PLAN_JSON}\n```");
        assert!(matches!(
            parse_plan(&fenced),
            Some(ParsedPlan::Adaptive(_))
        ));
    }

    #[test]
    fn json_round_trips_losslessly() {
        let plan: StructuredPlan = serde_json::from_str(PLAN_JSON).unwrap();
        let encoded = serde_json::to_string(&plan).unwrap();
        let decoded: StructuredPlan = serde_json::from_str(&encoded).unwrap();
        assert_eq!(plan, decoded);
    }

    #[test]
    fn parses_tool_tag_attributes() {
        let text = r#"'''tool_code
<travel_itinerary destination="Goa" duration="3" budget="15000">
'''"#;
        match parse_plan(text) {
            Some(ParsedPlan::Itinerary(card)) => {
                assert_eq!(card.destination, "Goa");
                assert_eq!(card.duration, "3 Days");
                assert_eq!(card.total_cost, "₹15000");
                assert!(card.itinerary.is_empty());
            }
            other => panic!("expected itinerary card, got {other:?}"),
        }
    }

    #[test]
    fn unknown_activity_kind_fails_the_json_parse() {
        let text = PLAN_JSON.replace("outdoor", "shopping");
        assert!(parse_plan(&text).is_none());
    }

    #[test]
    fn garbage_parses_to_none() {
        assert!(parse_plan("Sure! Let me plan that for you.").is_none());
    }

    #[test]
    fn strip_artifacts_removes_blocks() {
        let text = "Here you go! '''tool_code\nxyz\n''' Enjoy ```json\n{}\n``` your trip.";
        assert_eq!(strip_artifacts(text), "Here you go!  Enjoy  your trip.");
    }
}
