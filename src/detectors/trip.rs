use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::detect::{Detector, DomainResult, TripSignals, TurnInput};
use crate::extract;
use crate::knowledge::KnowledgeStore;
use crate::transit::RouteProvider;
use crate::weather::WeatherProvider;

/// Budgets below this (in base currency units) cannot buy a trip; planning
/// is refused outright rather than attempted.
pub const IMPLAUSIBLE_BUDGET_FLOOR: u64 = 1000;

const DEFAULT_DESTINATION: &str = "Goa";
const DEFAULT_ORIGIN: &str = "Hyderabad";

/// Trip-planning trigger.
///
/// Sets a conversational instruction only; it never claims the UI slot.
/// once the backend responds, the generated plan itself becomes the card.
/// On a planning turn it also gathers proactive safety/transit/weather
/// findings for the destination, which the assembler persists so terse
/// follow-ups ("5 days") keep benefiting from them.
pub struct TripPlanIntent {
    knowledge: Arc<dyn KnowledgeStore>,
    routes: Arc<dyn RouteProvider>,
    weather: Arc<dyn WeatherProvider>,
}

impl TripPlanIntent {
    pub fn new(
        knowledge: Arc<dyn KnowledgeStore>,
        routes: Arc<dyn RouteProvider>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            knowledge,
            routes,
            weather,
        }
    }
}

#[async_trait]
impl Detector for TripPlanIntent {
    fn name(&self) -> &'static str {
        "trip_plan"
    }

    fn triggers(&self, input: &TurnInput) -> bool {
        input.utterance.mentions_any(&["plan", "trip", "vacation"])
    }

    async fn detect(&self, input: &TurnInput) -> anyhow::Result<Option<DomainResult>> {
        let u = &input.utterance;

        // Hard policy gate: an impossibly low budget kills the plan no
        // matter how the rest of the turn reads.
        if let Some(budget) = extract::budget(&u.raw) {
            if budget > 0 && budget < IMPLAUSIBLE_BUDGET_FLOOR {
                let fragment = format!(
                    "[REALITY CHECK FAIL] User budget is {budget} INR. This is impossibly low. \
                     DO NOT PLAN. Instead, roast them gently (e.g. \"Bro, that won't even buy a vada pav\")."
                );
                return Ok(Some(DomainResult::TripPlan {
                    fragment,
                    signals: TripSignals {
                        implausible_budget: true,
                        ..Default::default()
                    },
                }));
            }
        }

        // Confirmation turns ("already have...", "budget of...") skip the
        // planning flow; the assembler recognizes them for forced output.
        if u.lower.contains("already have") || u.lower.contains("budget of") {
            return Ok(None);
        }

        let trip = input.trip_context.as_ref();
        let destination = extract::destination(&u.raw)
            .or_else(|| trip.and_then(|t| t.city.clone()))
            .unwrap_or_else(|| DEFAULT_DESTINATION.to_string());
        let origin = extract::origin(&u.raw)
            .or_else(|| trip.and_then(|t| t.origin.clone()))
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let days = extract::days(&u.raw)
            .or_else(|| trip.and_then(|t| t.days.as_ref()).and_then(|d| d.parse().ok()));
        let sufficient = destination != "Current City" && days.is_some();

        let mut blocks = Vec::new();
        if sufficient {
            blocks.push(format!(
                "[UI TRIGGER] User provided full details (Dest: {destination}, Days: {}). \
                 Generating PLAN directly.",
                days.map(|d| d.to_string()).unwrap_or_default()
            ));
        } else {
            let mut missing = Vec::new();
            if destination == DEFAULT_DESTINATION {
                missing.push("Destination");
            }
            if days.is_none() {
                missing.push("Duration (how many days)");
            }
            blocks.push(format!(
                "[PLANNING INSTRUCTION] User wants to plan a trip but details are missing. \
                 Missing: {}. Ask for these details naturally. Do NOT show a form.",
                missing.join(", ")
            ));
        }

        match self.knowledge.safety_zone(&destination, "City Center") {
            Ok(Some(zone)) => blocks.push(format!(
                "[PROACTIVE SAFETY] For {destination}: Score {}/10. Risks: {}. Safe Havens: {}. \
                 Include this safety advice in your plan.",
                zone.safety_score,
                zone.risk_factors.join(", "),
                zone.safe_havens.join(", ")
            )),
            Ok(None) => {}
            Err(e) => warn!(error = ?e, %destination, "proactive safety lookup failed"),
        }

        match self.routes.plan("Airport", "City Center", &destination).await {
            Ok(Some(advice)) => {
                let first = advice.routes.first();
                blocks.push(format!(
                    "[PROACTIVE TRANSIT] Best mode in {destination}: {}. Frequency: {}. Cost: {}. \
                     Include this transport advice in your plan.",
                    advice.summary,
                    first
                        .and_then(|r| r.frequency.clone())
                        .unwrap_or_else(|| "N/A".into()),
                    first
                        .map(|r| r.cost.clone())
                        .unwrap_or_else(|| "N/A".into())
                ));
            }
            Ok(None) => {}
            Err(e) => warn!(error = ?e, %destination, "proactive transit lookup failed"),
        }

        if u.mentions_any(&["airport", "flight"]) {
            blocks.push(
                "[TRAFFIC GUARD ALERT] Detected \"Airport Run\". Traffic is unusually high on \
                 the main highway (+45 mins delay). ADVISE USER TO LEAVE 1 HOUR EARLY. \
                 Do not ignore this."
                    .into(),
            );
        }

        if u.mentions_any(&["woman", "girl", "female", "safe for women", "solo"]) {
            blocks.push(
                "[SAFETY CONTEXT: WOMEN]\nUser is a woman/solo traveler. ACTIVATE \"GUARDIAN MODE\".\n\
                 1. Be specific: Name specific safe streets/areas, not just \"crowded places\".\n\
                 2. Transport: Suggest Uber/BluSmart (trackable) over random autos.\n\
                 3. Tone: Protective, big sister vibe. Validating."
                    .into(),
            );
        }

        match self.weather.current(&destination).await {
            Ok(Some(report)) => blocks.push(format!(
                "[PROACTIVE WEATHER] Monitoring {destination}: {} Alert user if it's raining \
                 or too hot for outdoor activities.",
                report.brief()
            )),
            Ok(None) => {}
            Err(e) => warn!(error = ?e, %destination, "proactive weather lookup failed"),
        }

        Ok(Some(DomainResult::TripPlan {
            fragment: blocks.join("\n"),
            signals: TripSignals {
                sufficient,
                implausible_budget: false,
                persist_proactive: true,
                destination: Some(destination),
                origin: Some(origin),
                days,
            },
        }))
    }
}
