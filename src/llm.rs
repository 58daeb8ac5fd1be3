use async_trait::async_trait;

use crate::session::TurnMessage;

/// The generative backend.
///
/// `static_context` carries trusted city facts; `system_context` carries the
/// assembled situational block. Implementations decide how both are folded
/// into the provider's prompt format.
#[async_trait]
pub trait LLMClient: Send + Sync {
    async fn generate_reply(
        &self,
        history: &[TurnMessage],
        static_context: &str,
        system_context: &str,
    ) -> anyhow::Result<String>;
}
