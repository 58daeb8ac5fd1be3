use async_trait::async_trait;
use marga_rs::{LLMClient, Role, TurnMessage};
use ollama_rs::generation::chat::request::ChatMessageRequest;
use ollama_rs::generation::chat::ChatMessage;
use ollama_rs::Ollama;
use reqwest::Client;
use url::Url;

use crate::prompts::TARA_SYSTEM_PROMPT;

/// A single-prompt JSON completion, used by the geo and transit agents.
#[async_trait]
pub trait JsonLlm: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Chat backend over a local or remote Ollama instance.
pub struct OllamaChat {
    client: Ollama,
    model: String,
}

fn build_ollama(http: &Client, base: &str) -> anyhow::Result<Ollama> {
    let url = Url::parse(base)?;
    let host = format!(
        "{}://{}",
        url.scheme(),
        url.host_str().ok_or_else(|| anyhow::anyhow!("no host in {base}"))?
    );
    let port = url
        .port_or_known_default()
        .ok_or_else(|| anyhow::anyhow!("no port in {base}"))?;
    Ok(Ollama::new_with_client(host, port, http.clone()))
}

impl OllamaChat {
    pub fn try_new(base_url: &str, model: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder().pool_max_idle_per_host(10).build()?;
        Ok(Self {
            client: build_ollama(&http, base_url)?,
            model: model.into(),
        })
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        let req = ChatMessageRequest::new(self.model.clone(), messages);
        let resp = self.client.send_chat_messages(req).await?;
        tracing::trace!(content = %resp.message.content, "ollama response");
        Ok(resp.message.content)
    }
}

#[async_trait]
impl LLMClient for OllamaChat {
    async fn generate_reply(
        &self,
        history: &[TurnMessage],
        static_context: &str,
        system_context: &str,
    ) -> anyhow::Result<String> {
        let or_none = |s: &str| {
            if s.is_empty() {
                "None".to_string()
            } else {
                s.to_string()
            }
        };
        let mut messages = vec![ChatMessage::system(format!(
            "{TARA_SYSTEM_PROMPT}\n\nReal-time Safety Data: {}\n\nStatic Context: {}",
            or_none(system_context),
            or_none(static_context)
        ))];
        for msg in history {
            messages.push(match msg.role {
                Role::User => ChatMessage::user(msg.text.clone()),
                Role::Assistant => ChatMessage::assistant(msg.text.clone()),
            });
        }
        self.send(messages).await
    }
}

#[async_trait]
impl JsonLlm for OllamaChat {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        self.send(vec![ChatMessage::user(prompt.to_string())]).await
    }
}
