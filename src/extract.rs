//! Regex extraction over raw utterances.
//!
//! Intent detection is substring-based; these helpers pull out the handful
//! of values (destination, origin, budget, day count, city hint) that the
//! detectors need beyond a keyword hit.

use once_cell::sync::Lazy;
use regex::Regex;

static DESTINATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:to|in)\s+([a-zA-Z]+)").expect("valid regex"));

static ORIGIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bfrom\s+([a-zA-Z]+)").expect("valid regex"));

// The suffix capture disambiguates "for 5k" (budget) from "for 3 days"
// (duration) without lookahead.
static BUDGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:under|budget(?:\s+of)?|cost|for)\s*[₹$]?\s*(\d+)\s*(k\b|days?\b|rupees?\b)?")
        .expect("valid regex")
});

static BUDGET_K_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)k\b").expect("valid regex"));

static BUDGET_RUPEES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)\s*rupees?\b").expect("valid regex"));

static DAYS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)\s*days?\b").expect("valid regex"));

static BARE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*$").expect("valid regex"));

static CITY_HINT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:in|for|at)\s+([a-zA-Z]+)").expect("valid regex"));

/// Destination named after "to" or "in".
pub fn destination(message: &str) -> Option<String> {
    DESTINATION_RE
        .captures(message)
        .map(|c| c[1].to_string())
}

/// Origin named after "from".
pub fn origin(message: &str) -> Option<String> {
    ORIGIN_RE.captures(message).map(|c| c[1].to_string())
}

/// Budget normalized to base currency units ("5k" => 5000).
pub fn budget(message: &str) -> Option<u64> {
    for caps in BUDGET_RE.captures_iter(message) {
        let suffix = caps.get(2).map(|m| m.as_str().to_lowercase());
        if suffix.as_deref().is_some_and(|s| s.starts_with("day")) {
            continue; // "for 3 days" is a duration, not a budget
        }
        let amount: u64 = caps[1].parse().ok()?;
        let scaled = if suffix.as_deref() == Some("k") {
            amount * 1000
        } else {
            amount
        };
        return Some(scaled);
    }
    if let Some(caps) = BUDGET_K_RE.captures(message) {
        return caps[1].parse::<u64>().ok().map(|n| n * 1000);
    }
    BUDGET_RUPEES_RE
        .captures(message)
        .and_then(|caps| caps[1].parse().ok())
}

/// Day count from "N days", or a bare-number utterance answering an
/// outstanding duration question.
pub fn days(message: &str) -> Option<u32> {
    if let Some(caps) = DAYS_RE.captures(message) {
        return caps[1].parse().ok();
    }
    BARE_NUMBER_RE
        .captures(message)
        .and_then(|caps| caps[1].parse().ok())
}

/// City named after "in", "for", or "at" (weather-style queries).
pub fn city_hint(message: &str) -> Option<String> {
    CITY_HINT_RE.captures(message).map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_and_origin() {
        assert_eq!(
            destination("Plan a trip to Goa from Hyderabad").as_deref(),
            Some("Goa")
        );
        assert_eq!(
            origin("Plan a trip to Goa from Hyderabad").as_deref(),
            Some("Hyderabad")
        );
        assert_eq!(destination("hello there"), None);
    }

    #[test]
    fn budget_normalizes_k_suffix() {
        assert_eq!(budget("a trip under 5k"), Some(5000));
        assert_eq!(budget("budget of 500"), Some(500));
        assert_eq!(budget("for ₹15000"), Some(15000));
        assert_eq!(budget("3000 rupees total"), Some(3000));
    }

    #[test]
    fn day_counts_are_not_budgets() {
        assert_eq!(budget("Plan a trip to Goa for 3 days"), None);
        assert_eq!(days("Plan a trip to Goa for 3 days"), Some(3));
    }

    #[test]
    fn bare_number_reads_as_days() {
        assert_eq!(days("5"), Some(5));
        assert_eq!(days("  12  "), Some(12));
        assert_eq!(days("see you in 5 minutes"), None);
    }

    #[test]
    fn city_hint_from_prepositions() {
        assert_eq!(city_hint("weather in London please").as_deref(), Some("London"));
        assert_eq!(city_hint("forecast for Paris").as_deref(), Some("Paris"));
    }
}
