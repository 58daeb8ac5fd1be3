//! Output reconciliation: generated text in, display segments plus at most
//! one structured card out.

use crate::plan::{parse_plan, strip_artifacts, ParsedPlan};
use crate::ui::UiAction;

/// Marker the persona uses to split one response into chat bubbles.
pub const PAUSE_MARKER: &str = "<PAUSE>";

/// Fixed reply shown alongside a successfully parsed adaptive plan.
pub const PLAN_PLACEHOLDER_REPLY: &str = "Here is your custom itinerary! ✨";

/// Result of reconciling one generated response.
#[derive(Debug, Clone)]
pub struct Reconciled {
    /// Ordered display segments.
    pub replies: Vec<String>,
    /// Occupant of the UI slot after reconciliation. Attached to the last
    /// reply segment only, never to intermediate ones.
    pub ui: Option<UiAction>,
    /// The reply text as persisted to session history (unsplit).
    pub stored_reply: String,
}

/// Split on the pause marker into trimmed, non-empty segments.
pub fn split_replies(text: &str) -> Vec<String> {
    text.split(PAUSE_MARKER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reconcile raw generated text.
///
/// Non-forced turns pass through as segments. Forced turns run the plan
/// parser chain: a full JSON plan becomes the adaptive card with a fixed
/// placeholder reply; a tool-tag plan becomes the itinerary card with the
/// artifacts stripped from the text; a double miss degrades to plain
/// conversation, the detector-set card (if any) survives, and no parse
/// error reaches the user.
pub fn reconcile(raw: &str, force_structured: bool, detector_ui: Option<UiAction>) -> Reconciled {
    if !force_structured {
        return Reconciled {
            replies: split_replies(raw),
            ui: detector_ui,
            stored_reply: raw.to_string(),
        };
    }
    match parse_plan(raw) {
        Some(ParsedPlan::Adaptive(plan)) => Reconciled {
            replies: vec![PLAN_PLACEHOLDER_REPLY.to_string()],
            ui: Some(UiAction::AdaptivePlanCard(plan)),
            stored_reply: PLAN_PLACEHOLDER_REPLY.to_string(),
        },
        Some(ParsedPlan::Itinerary(card)) => {
            let stored = strip_artifacts(raw);
            Reconciled {
                replies: split_replies(&stored),
                ui: Some(UiAction::TripResultCard(card)),
                stored_reply: stored,
            }
        }
        None => {
            tracing::debug!("structured output parse missed; degrading to conversation");
            let stored = strip_artifacts(raw);
            Reconciled {
                replies: split_replies(&stored),
                ui: detector_ui,
                stored_reply: stored,
            }
        }
    }
}
