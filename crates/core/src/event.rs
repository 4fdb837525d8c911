//! Inbound chat events — the router's input domain.
//!
//! Every event is transient: constructed when the transport delivers a
//! payload, dropped once the response (if any) is posted. Nothing here
//! holds cross-event state.

use serde::{Deserialize, Serialize};

/// An event delivered by the chat transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InboundEvent {
    /// A plain channel message, not addressed to the bot.
    PlainMessage(MessageEvent),

    /// A message that explicitly mentions the bot.
    Mention(MessageEvent),

    /// A reaction added to an existing message.
    ReactionAdded(ReactionEvent),
}

/// A message-shaped event (plain message or mention).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Channel the message was posted in.
    pub channel: String,

    /// The message's own timestamp (also its platform identity).
    pub ts: String,

    /// Thread the message belongs to, if it is already a threaded reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,

    /// Raw message text as delivered by the platform.
    pub text: String,

    /// Originating user ID.
    pub user: String,

    /// Set when the message was posted by a bot (including ourselves).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
}

impl MessageEvent {
    /// The thread to reply in: the existing thread, or a new one rooted
    /// at this message.
    pub fn reply_thread(&self) -> &str {
        self.thread_ts.as_deref().unwrap_or(&self.ts)
    }

    /// Whether this message is a bot echo (ours or any other bot's).
    pub fn is_bot_message(&self) -> bool {
        self.bot_id.is_some()
    }
}

/// A reaction-added event. Carries a reference to the reacted-to message,
/// not its text — the router must fetch that separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionEvent {
    /// User who added the reaction.
    pub user: String,

    /// Reaction name without colons (e.g. "question").
    pub reaction: String,

    /// Channel of the reacted-to message.
    pub item_channel: String,

    /// Timestamp of the reacted-to message.
    pub item_ts: String,
}
