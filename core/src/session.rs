use crate::backend::ChatBackend;
use crate::conversation::{Conversation, Turn};
use crate::error::ConversationError;
use std::sync::Arc;

/// Shown in place of a reply when the backend cannot be reached.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm experiencing technical difficulties. Please try again in a moment.";

/// Ask `backend`, turning any failure into [`FALLBACK_REPLY`].
pub async fn fetch_reply(backend: &dyn ChatBackend, question: &str) -> String {
    match backend.ask(question).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("chat request failed: {e:#}");
            FALLBACK_REPLY.to_string()
        }
    }
}

/// A conversation bound to a backend, one request at a time.
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    conversation: Conversation,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            conversation: Conversation::new(),
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Send a message and wait for its reply. Returns `None` for blank input.
    pub async fn send(&mut self, text: &str) -> Result<Option<&Turn>, ConversationError> {
        let Some(index) = self.conversation.begin_turn(text) else {
            return Ok(None);
        };
        tracing::info!("sending question ({} chars)", text.len());
        let reply = fetch_reply(self.backend.as_ref(), text).await;
        self.conversation.complete_turn(index, reply)?;
        Ok(self.conversation.get(index))
    }
}
