//! Context assembly: one bounded text block describing the current
//! real-world and conversational situation, plus the decision whether this
//! turn demands structured output from the generative backend.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::detect::TurnInput;
use crate::observer::Observer;
use crate::router::RoutedTurn;
use crate::session::TurnMessage;
use crate::weather::WeatherProvider;

/// Output contract appended when the turn demands a structured plan. Not
/// negotiated with the user.
pub const PLAN_CONTRACT: &str = r#"[STRICT OUTPUT RULE]
User is asking for a concrete trip plan. You MUST output the result in RAW JSON format only. Do NOT use Markdown. Do NOT add intro text.
Structure:
{
  "currentCondition": { "temp": "XX°C", "condition": "Sunny/Rainy", "icon": "Emoji", "advice": "Short advice" },
  "timeline": [
    { "time": "Now/Late", "title": "Activity Name", "type": "indoor|outdoor|food|rest", "reason": "Why? (e.g. Too Hot)" }
  ]
}"#;

/// The assembled situation for one turn.
#[derive(Debug, Clone, Default)]
pub struct AssembledContext {
    /// The full situational block handed to the generative backend.
    pub system_context: String,
    /// Trusted city facts, when the utterance names a known city.
    pub static_context: String,
    /// The backend is contractually required to emit the plan schema.
    pub force_structured: bool,
    /// Replacement proactive memory to persist on the session, when the
    /// trip detector established planning intent this turn.
    pub new_proactive: Option<String>,
}

pub struct ContextAssembler {
    observer: Observer,
}

impl ContextAssembler {
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self {
            observer: Observer::new(weather),
        }
    }

    /// Compose, in order: persisted proactive memory, this turn's
    /// fragments, the observer layer, and (when forced) the output
    /// contract.
    pub async fn assemble(
        &self,
        input: &TurnInput,
        prior_proactive: Option<&str>,
        history: &[TurnMessage],
        routed: &RoutedTurn,
        trusted: Option<(&str, &str)>,
        now: DateTime<Local>,
    ) -> AssembledContext {
        let mut blocks: Vec<String> = Vec::new();
        if let Some(proactive) = prior_proactive {
            blocks.push(proactive.to_string());
        }
        blocks.extend(routed.fragments.iter().cloned());

        // Proactive memory snapshots the context through the trip
        // detector's own fragment; the observer block stays live-only.
        let new_proactive = routed.proactive_cutoff.map(|cutoff| {
            let mut kept: Vec<&str> = Vec::new();
            if let Some(proactive) = prior_proactive {
                kept.push(proactive);
            }
            kept.extend(routed.fragments[..cutoff].iter().map(String::as_str));
            kept.join("\n")
        });

        let weather_city = input
            .context_city()
            .map(str::to_string)
            .or_else(|| trusted.map(|(city, _)| city.to_string()));
        blocks.push(
            self.observer
                .describe(input, history.len(), weather_city.as_deref(), now)
                .await,
        );

        let force_structured = self.wants_structured_output(input, history, routed);
        if force_structured {
            blocks.push(PLAN_CONTRACT.to_string());
        }

        AssembledContext {
            system_context: blocks.join("\n"),
            static_context: trusted
                .map(|(city, facts)| format!("Trusted Data about {city}: {facts}"))
                .unwrap_or_default(),
            force_structured,
            new_proactive,
        }
    }

    /// True when (a budget confirmation is present or trip details are
    /// already sufficient) and a planning keyword appears in the utterance
    /// or the last three history entries; the history check catches a
    /// bare "yes" confirming an outstanding plan. An implausible budget
    /// verdict always wins.
    fn wants_structured_output(
        &self,
        input: &TurnInput,
        history: &[TurnMessage],
        routed: &RoutedTurn,
    ) -> bool {
        let lower = &input.utterance.lower;
        if routed
            .trip
            .as_ref()
            .is_some_and(|t| t.implausible_budget)
        {
            return false;
        }
        // The reality-check verdict normally arrives via the trip detector,
        // but a confirmation turn ("budget of 500") bypasses it; re-check
        // the floor here so an implausible budget can never force a plan.
        if crate::extract::budget(&input.utterance.raw)
            .is_some_and(|b| b > 0 && b < crate::detectors::IMPLAUSIBLE_BUDGET_FLOOR)
        {
            return false;
        }
        let sufficient = routed.trip.as_ref().is_some_and(|t| t.sufficient);
        if !(lower.contains("budget of") || sufficient) {
            return false;
        }
        let history_tail = history
            .iter()
            .rev()
            .take(3)
            .map(|m| m.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        ["plan", "trip", "vacation", "itinerary"]
            .iter()
            .any(|k| lower.contains(k))
            || history_tail.contains("itinerary")
    }
}
