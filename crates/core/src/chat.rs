//! ChatClient trait — the abstraction over the chat platform.
//!
//! The router only needs four operations from the platform: add a
//! reaction, post a message, fetch one message by timestamp, and know its
//! own identity. Everything else (connection handling, retries, rate
//! limits) is the implementation's concern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// A message fetched from channel history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    /// Message timestamp.
    pub ts: String,

    /// Message text (may be empty for attachment-only messages).
    #[serde(default)]
    pub text: String,

    /// Author, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// An outbound chat message. Text only — attachments are never sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Target channel.
    pub channel: String,

    /// Thread to post in.
    pub thread_ts: String,

    /// Message body.
    pub text: String,
}

/// The chat platform capability required by the event router.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Add a reaction to the message at `ts` in `channel`.
    async fn react_add(
        &self,
        channel: &str,
        ts: &str,
        reaction: &str,
    ) -> std::result::Result<(), ChatError>;

    /// Post a message into a thread.
    async fn post_message(&self, message: &OutboundMessage)
        -> std::result::Result<(), ChatError>;

    /// Fetch exactly the message at `ts` (inclusive lookup, limit 1).
    /// An empty vec means the message no longer exists.
    async fn fetch_history_at(
        &self,
        channel: &str,
        ts: &str,
    ) -> std::result::Result<Vec<RawMessage>, ChatError>;

    /// The bot's own user ID on the platform.
    async fn self_identity(&self) -> std::result::Result<String, ChatError>;
}
