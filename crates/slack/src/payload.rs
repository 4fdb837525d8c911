//! Slack event payload parsing.
//!
//! Destructures the documented payload field names (`channel`, `ts`,
//! `thread_ts`, `text`, `bot_id`, `user`, `reaction`, `item.channel`,
//! `item.ts`) into `InboundEvent`s. Unknown or malformed payloads are
//! dropped with a debug log — the transport delivers plenty of event
//! types the bot has no interest in.

use mathtutor_core::event::{InboundEvent, MessageEvent, ReactionEvent};
use serde_json::Value;
use tracing::debug;

/// Parse a Slack event object. Returns None for event types the router
/// does not handle, or for payloads missing required fields.
pub fn parse_event(payload: &Value) -> Option<InboundEvent> {
    // Accept either the bare event or the full callback envelope.
    let event = payload.get("event").unwrap_or(payload);

    match event["type"].as_str()? {
        "message" => parse_message(event).map(InboundEvent::PlainMessage),
        "app_mention" => parse_message(event).map(InboundEvent::Mention),
        "reaction_added" => parse_reaction(event).map(InboundEvent::ReactionAdded),
        other => {
            debug!(event_type = %other, "Ignoring unhandled event type");
            None
        }
    }
}

fn parse_message(event: &Value) -> Option<MessageEvent> {
    Some(MessageEvent {
        channel: required_str(event, "channel")?,
        ts: required_str(event, "ts")?,
        thread_ts: event["thread_ts"].as_str().map(String::from),
        text: event["text"].as_str().unwrap_or_default().to_string(),
        user: event["user"].as_str().unwrap_or_default().to_string(),
        bot_id: event["bot_id"].as_str().map(String::from),
    })
}

fn parse_reaction(event: &Value) -> Option<ReactionEvent> {
    Some(ReactionEvent {
        user: required_str(event, "user")?,
        reaction: required_str(event, "reaction")?,
        item_channel: event["item"]["channel"].as_str()?.to_string(),
        item_ts: event["item"]["ts"].as_str()?.to_string(),
    })
}

fn required_str(event: &Value, field: &str) -> Option<String> {
    match event[field].as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            debug!(field, "Dropping event with missing field");
            None
        }
    }
}
