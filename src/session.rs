use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single utterance in a session's history. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnMessage {
    pub role: Role,
    pub text: String,
}

impl TurnMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Conversational state for one session key.
///
/// History is append-only and unbounded; callers that talk to the language
/// backend use [`tail`](Session::tail) to bound what goes on the wire.
#[derive(Debug, Default)]
pub struct Session {
    history: Vec<TurnMessage>,
    proactive: Option<String>,
    last_utterance: Option<String>,
}

impl Session {
    /// Append a user message.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.history.push(TurnMessage::user(text));
    }

    /// Append an assistant message.
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.history.push(TurnMessage::assistant(text));
    }

    /// Full history, oldest first.
    pub fn history(&self) -> &[TurnMessage] {
        &self.history
    }

    /// The most recent messages, up to `max_len`.
    pub fn tail(&self, max_len: usize) -> &[TurnMessage] {
        let start = self.history.len().saturating_sub(max_len);
        &self.history[start..]
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Proactive context carried over from an earlier trip-planning turn.
    pub fn proactive(&self) -> Option<&str> {
        self.proactive.as_deref()
    }

    pub fn set_proactive(&mut self, text: impl Into<String>) {
        self.proactive = Some(text.into());
    }

    /// Last user utterance, kept for diagnostics only.
    pub fn last_utterance(&self) -> Option<&str> {
        self.last_utterance.as_deref()
    }

    pub fn set_last_utterance(&mut self, text: impl Into<String>) {
        self.last_utterance = Some(text.into());
    }
}

struct Entry {
    session: Arc<Mutex<Session>>,
    touched: Instant,
}

/// Keyed arena of sessions.
///
/// Each key maps to an `Arc<Mutex<Session>>`; the turn driver holds the lock
/// for the whole turn, so concurrent turns on one session serialize instead
/// of racing on the history append. Sessions idle longer than the configured
/// TTL are pruned the next time the store is touched.
pub struct SessionStore {
    ttl: Option<Duration>,
    inner: Mutex<HashMap<String, Entry>>,
}

/// Default idle lifetime before a session is dropped.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_ttl(Some(DEFAULT_SESSION_TTL))
    }

    /// `None` disables eviction entirely.
    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch the session for `id`, creating it on first reference.
    pub async fn get_or_create(&self, id: &str) -> Arc<Mutex<Session>> {
        let mut map = self.inner.lock().await;
        if let Some(ttl) = self.ttl {
            map.retain(|_, entry| entry.touched.elapsed() < ttl);
        }
        let entry = map.entry(id.to_string()).or_insert_with(|| {
            tracing::debug!(session = id, "creating session");
            Entry {
                session: Arc::new(Mutex::new(Session::default())),
                touched: Instant::now(),
            }
        });
        entry.touched = Instant::now();
        Arc::clone(&entry.session)
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_or_create_reuses_sessions() {
        let store = SessionStore::new();
        let a = store.get_or_create("s1").await;
        a.lock().await.push_user("hello");
        let b = store.get_or_create("s1").await;
        assert_eq!(b.lock().await.len(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn tail_bounds_history() {
        let mut session = Session::default();
        for i in 0..30 {
            session.push_user(format!("m{i}"));
        }
        let tail = session.tail(20);
        assert_eq!(tail.len(), 20);
        assert_eq!(tail[0].text, "m10");
        assert_eq!(session.history().len(), 30);
    }

    #[tokio::test]
    async fn idle_sessions_are_pruned() {
        let store = SessionStore::with_ttl(Some(Duration::from_millis(0)));
        store.get_or_create("old").await;
        // A zero TTL evicts on the next touch.
        store.get_or_create("fresh").await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn zero_ttl_none_keeps_everything() {
        let store = SessionStore::with_ttl(None);
        store.get_or_create("a").await;
        store.get_or_create("b").await;
        assert_eq!(store.len().await, 2);
    }
}
