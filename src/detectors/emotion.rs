use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::detect::{Detector, DomainResult, TurnInput};
use crate::emotion;
use crate::knowledge::KnowledgeStore;
use crate::ui::TherapyCard;

/// Emotional-support intent. Always allowed to run; the router lets its
/// card pre-empt whatever else the turn surfaced, because user wellbeing
/// outranks every other card.
pub struct EmotionIntent {
    knowledge: Arc<dyn KnowledgeStore>,
}

impl EmotionIntent {
    pub fn new(knowledge: Arc<dyn KnowledgeStore>) -> Self {
        Self { knowledge }
    }
}

#[async_trait]
impl Detector for EmotionIntent {
    fn name(&self) -> &'static str {
        "emotion"
    }

    fn triggers(&self, input: &TurnInput) -> bool {
        emotion::detect(&input.utterance.lower).is_some()
    }

    async fn detect(&self, input: &TurnInput) -> anyhow::Result<Option<DomainResult>> {
        let Some(category) = emotion::detect(&input.utterance.lower) else {
            return Ok(None);
        };
        let script = match self.knowledge.emotional_script(category) {
            Ok(Some(script)) => script,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = ?e, category, "emotional script lookup failed");
                return Ok(None);
            }
        };
        let fragment = format!(
            "[EMOTIONAL INTERVENTION REQUIRED]\nUser is feeling: {category}.\n\
             IMMEDIATE ACTION: Use this de-escalation script guide: \"{}\".\nType: {}.",
            script.response_text, script.action_type
        );
        let technique = if script.action_type == "breathing_exercise" {
            "Box Breathing"
        } else {
            "Grounding"
        };
        let card = TherapyCard {
            mood: emotion::title_case(category),
            technique: technique.into(),
            steps: TherapyCard::box_breathing_steps(),
            script: script.response_text,
        };
        Ok(Some(DomainResult::Emotion { fragment, card }))
    }
}
