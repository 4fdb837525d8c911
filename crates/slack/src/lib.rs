//! Slack adapter for mathtutor.
//!
//! Two halves:
//! - `payload` — destructures Slack event payloads into `InboundEvent`s.
//! - `client` — a `ChatClient` implementation over the Slack Web API.
//!
//! Plus `SlackEventSource`, the inbound stream. The Socket Mode websocket
//! transport itself is out of scope; events enter through an in-process
//! injection path (the same seam a websocket loop would feed).

pub mod client;
pub mod payload;

pub use client::SlackApiClient;
pub use payload::parse_event;

use mathtutor_core::error::ChatError;
use mathtutor_core::event::InboundEvent;
use tokio::sync::mpsc;
use tracing::info;

/// The inbound event stream.
pub struct SlackEventSource {
    inject_tx: tokio::sync::Mutex<Option<mpsc::Sender<InboundEvent>>>,
}

impl SlackEventSource {
    pub fn new() -> Self {
        Self {
            inject_tx: tokio::sync::Mutex::new(None),
        }
    }

    /// Start the stream, returning the receiver the run loop consumes.
    pub async fn start(&self) -> mpsc::Receiver<InboundEvent> {
        info!("Slack event source starting");
        let (tx, rx) = mpsc::channel(64);
        *self.inject_tx.lock().await = Some(tx);
        rx
    }

    /// Feed an event into the stream (transport seam; also used by tests).
    pub async fn inject(&self, event: InboundEvent) -> Result<(), ChatError> {
        let guard = self.inject_tx.lock().await;
        match guard.as_ref() {
            Some(tx) => tx
                .send(event)
                .await
                .map_err(|_| ChatError::NotConfigured("Event stream closed".into())),
            None => Err(ChatError::NotConfigured("Event source not started".into())),
        }
    }

    /// Parse a raw Slack payload and feed it in, ignoring unrecognized
    /// event types.
    pub async fn inject_payload(&self, payload: &serde_json::Value) -> Result<(), ChatError> {
        if let Some(event) = parse_event(payload) {
            self.inject(event).await?;
        }
        Ok(())
    }

    /// Stop the stream.
    pub async fn stop(&self) {
        info!("Slack event source stopping");
        *self.inject_tx.lock().await = None;
    }
}

impl Default for SlackEventSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathtutor_core::event::{InboundEvent, MessageEvent};

    fn message() -> InboundEvent {
        InboundEvent::PlainMessage(MessageEvent {
            channel: "C123".into(),
            ts: "1700000000.000100".into(),
            thread_ts: None,
            text: "solve x**2 - 4".into(),
            user: "U123".into(),
            bot_id: None,
        })
    }

    #[tokio::test]
    async fn start_inject_receive() {
        let source = SlackEventSource::new();
        let mut rx = source.start().await;

        source.inject(message()).await.unwrap();
        let received = rx.recv().await.unwrap();
        assert!(matches!(received, InboundEvent::PlainMessage(_)));
    }

    #[tokio::test]
    async fn inject_before_start_fails() {
        let source = SlackEventSource::new();
        assert!(source.inject(message()).await.is_err());
    }

    #[tokio::test]
    async fn unrecognized_payload_is_skipped() {
        let source = SlackEventSource::new();
        let mut rx = source.start().await;

        source
            .inject_payload(&serde_json::json!({"type": "channel_created"}))
            .await
            .unwrap();
        source.inject(message()).await.unwrap();

        // Only the real message arrives.
        let received = rx.recv().await.unwrap();
        assert!(matches!(received, InboundEvent::PlainMessage(_)));
    }

    #[tokio::test]
    async fn stop_closes_stream() {
        let source = SlackEventSource::new();
        let _rx = source.start().await;
        source.stop().await;
        assert!(source.inject(message()).await.is_err());
    }
}
