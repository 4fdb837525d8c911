//! Event routing: inbound chat events to agent invocations to replies.
//!
//! The router owns the conversational contract of the bot:
//! - plain channel messages answer only when they pass the math keyword
//!   gate, and get an acknowledgement reaction before the agent runs;
//! - mentions always answer, with the mention token stripped;
//!   no acknowledgement reaction is added;
//! - a `question`/`grey_question` reaction on any message re-reads that
//!   message and answers it in its thread.
//!
//! Replies always land in the thread of the message that triggered them.
//! Agent failures on the message paths produce a templated error reply in
//! the same thread; failures on the reaction path are logged and dropped.

pub mod keywords;
pub mod response;

use std::sync::Arc;

use mathtutor_core::chat::{ChatClient, OutboundMessage};
use mathtutor_core::error::{Error, Result};
use mathtutor_core::event::{InboundEvent, MessageEvent, ReactionEvent};
use mathtutor_core::Agent;
use mathtutor_tools::format::PLOT_PLACEHOLDER;
use tracing::{debug, error, info, warn};

pub use keywords::is_math_query;
pub use response::{extract_text, strip_mentions};

/// Reactions that mean "answer this message".
const QUESTION_REACTIONS: &[&str] = &["question", "grey_question"];

pub struct EventRouter {
    chat: Arc<dyn ChatClient>,
    agent: Arc<dyn Agent>,
    ack_reaction: String,
}

impl EventRouter {
    pub fn new(chat: Arc<dyn ChatClient>, agent: Arc<dyn Agent>, ack_reaction: String) -> Self {
        Self {
            chat,
            agent,
            ack_reaction,
        }
    }

    /// Dispatch one inbound event.
    pub async fn handle(&self, event: &InboundEvent) -> Result<()> {
        match event {
            InboundEvent::PlainMessage(msg) => self.on_plain_message(msg).await,
            InboundEvent::Mention(msg) => self.on_mention(msg).await,
            InboundEvent::ReactionAdded(reaction) => {
                self.on_reaction_added(reaction).await;
                Ok(())
            }
        }
    }

    async fn on_plain_message(&self, msg: &MessageEvent) -> Result<()> {
        if msg.is_bot_message() {
            debug!(channel = %msg.channel, ts = %msg.ts, "Skipping bot message");
            return Ok(());
        }
        if !is_math_query(&msg.text) {
            debug!(channel = %msg.channel, ts = %msg.ts, "No math keywords, staying silent");
            return Ok(());
        }

        info!(channel = %msg.channel, ts = %msg.ts, "Handling math query");

        // Acknowledge before the agent runs. A failed reaction never
        // suppresses the answer.
        if let Err(e) = self
            .chat
            .react_add(&msg.channel, &msg.ts, &self.ack_reaction)
            .await
        {
            warn!(error = %e, "Failed to add acknowledgement reaction");
        }

        self.answer(&msg.channel, msg.reply_thread(), &msg.text)
            .await
    }

    async fn on_mention(&self, msg: &MessageEvent) -> Result<()> {
        if msg.is_bot_message() {
            return Ok(());
        }

        let text = strip_mentions(&msg.text);
        info!(channel = %msg.channel, ts = %msg.ts, "Handling mention");
        self.answer(&msg.channel, msg.reply_thread(), &text).await
    }

    /// The reaction path is best-effort end to end: every failure is
    /// logged and dropped, never surfaced into the channel.
    async fn on_reaction_added(&self, reaction: &ReactionEvent) {
        if !QUESTION_REACTIONS.contains(&reaction.reaction.as_str()) {
            return;
        }

        match self.chat.self_identity().await {
            Ok(own_id) if own_id == reaction.user => {
                debug!("Ignoring own reaction");
                return;
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "Could not resolve own identity, dropping reaction");
                return;
            }
        }

        let messages = match self
            .chat
            .fetch_history_at(&reaction.item_channel, &reaction.item_ts)
            .await
        {
            Ok(messages) => messages,
            Err(e) => {
                error!(error = %e, "Failed to fetch reacted message");
                return;
            }
        };
        let Some(target) = messages.first() else {
            debug!(ts = %reaction.item_ts, "Reacted message no longer exists");
            return;
        };

        info!(channel = %reaction.item_channel, ts = %reaction.item_ts, "Handling question reaction");
        if let Err(e) = self
            .answer(&reaction.item_channel, &reaction.item_ts, &target.text)
            .await
        {
            error!(error = %e, "Failed to answer reacted message");
        }
    }

    /// Invoke the agent and post its answer into `thread_ts`. Agent
    /// failures become a templated error reply in the same thread.
    async fn answer(&self, channel: &str, thread_ts: &str, text: &str) -> Result<()> {
        let reply = match self.agent.invoke(text).await {
            Ok(result) => sanitize(extract_text(&result)),
            Err(e) => {
                error!(error = %e, "Agent invocation failed");
                format!(
                    "I encountered an error while processing your request: {}",
                    e
                )
            }
        };

        self.chat
            .post_message(&OutboundMessage {
                channel: channel.to_string(),
                thread_ts: thread_ts.to_string(),
                text: reply,
            })
            .await
            .map_err(Error::Chat)
    }
}

/// Raw image payloads never reach the channel. An answer that leaked one
/// is replaced wholesale with the plot placeholder.
fn sanitize(text: String) -> String {
    if text.contains("image_base64") {
        PLOT_PLACEHOLDER.to_string()
    } else {
        text
    }
}
