//! Slack Web API client.
//!
//! Implements the `ChatClient` capability over four endpoints:
//! `reactions.add`, `chat.postMessage`, `conversations.history`, and
//! `auth.test`. The bot's own identity is fetched once and cached.

use async_trait::async_trait;
use mathtutor_core::chat::{ChatClient, OutboundMessage, RawMessage};
use mathtutor_core::error::ChatError;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::debug;

const SLACK_API_URL: &str = "https://slack.com/api";

pub struct SlackApiClient {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
    identity: OnceCell<String>,
}

/// Every Web API response carries this envelope.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    messages: Vec<RawMessage>,
}

#[derive(Debug, Deserialize)]
struct AuthTestResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

impl SlackApiClient {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self::with_base_url(bot_token, SLACK_API_URL)
    }

    /// Point the client at a different API root (tests).
    pub fn with_base_url(bot_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            bot_token: bot_token.into(),
            identity: OnceCell::new(),
        }
    }

    async fn post_api(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, ChatError> {
        self.http
            .post(format!("{}/{}", self.base_url, method))
            .bearer_auth(&self.bot_token)
            .json(body)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))
    }

    fn check_envelope(method: &str, envelope: &ApiEnvelope) -> Result<(), ChatError> {
        if envelope.ok {
            Ok(())
        } else {
            Err(ChatError::Api {
                method: method.to_string(),
                reason: envelope
                    .error
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            })
        }
    }
}

#[async_trait]
impl ChatClient for SlackApiClient {
    async fn react_add(&self, channel: &str, ts: &str, reaction: &str) -> Result<(), ChatError> {
        debug!(channel, ts, reaction, "reactions.add");
        let response = self
            .post_api(
                "reactions.add",
                &serde_json::json!({
                    "channel": channel,
                    "timestamp": ts,
                    "name": reaction,
                }),
            )
            .await?;
        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        Self::check_envelope("reactions.add", &envelope)
    }

    async fn post_message(&self, message: &OutboundMessage) -> Result<(), ChatError> {
        debug!(
            channel = %message.channel,
            thread_ts = %message.thread_ts,
            text_len = message.text.len(),
            "chat.postMessage"
        );
        let response = self
            .post_api(
                "chat.postMessage",
                &serde_json::json!({
                    "channel": message.channel,
                    "thread_ts": message.thread_ts,
                    "text": message.text,
                }),
            )
            .await?;
        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        Self::check_envelope("chat.postMessage", &envelope)
    }

    async fn fetch_history_at(
        &self,
        channel: &str,
        ts: &str,
    ) -> Result<Vec<RawMessage>, ChatError> {
        debug!(channel, ts, "conversations.history");
        let response = self
            .post_api(
                "conversations.history",
                &serde_json::json!({
                    "channel": channel,
                    "latest": ts,
                    "inclusive": true,
                    "limit": 1,
                }),
            )
            .await?;
        let history: HistoryResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        if !history.ok {
            return Err(ChatError::Api {
                method: "conversations.history".into(),
                reason: history.error.unwrap_or_else(|| "unknown".into()),
            });
        }
        Ok(history.messages)
    }

    async fn self_identity(&self) -> Result<String, ChatError> {
        self.identity
            .get_or_try_init(|| async {
                let response = self.post_api("auth.test", &serde_json::json!({})).await?;
                let auth: AuthTestResponse = response
                    .json()
                    .await
                    .map_err(|e| ChatError::Network(e.to_string()))?;
                if !auth.ok {
                    return Err(ChatError::Api {
                        method: "auth.test".into(),
                        reason: auth.error.unwrap_or_else(|| "unknown".into()),
                    });
                }
                auth.user_id.ok_or_else(|| ChatError::Api {
                    method: "auth.test".into(),
                    reason: "missing user_id".into(),
                })
            })
            .await
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &mockito::ServerGuard) -> SlackApiClient {
        SlackApiClient::with_base_url("xoxb-test", server.url())
    }

    #[tokio::test]
    async fn post_message_ok() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat.postMessage")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let result = client(&server)
            .post_message(&OutboundMessage {
                channel: "C123".into(),
                thread_ts: "1700000000.000100".into(),
                text: "hello".into(),
            })
            .await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn api_error_envelope_maps_to_chat_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/reactions.add")
            .with_body(r#"{"ok": false, "error": "already_reacted"}"#)
            .create_async()
            .await;

        let err = client(&server)
            .react_add("C123", "1700000000.000100", "brain")
            .await
            .unwrap_err();

        match err {
            ChatError::Api { method, reason } => {
                assert_eq!(method, "reactions.add");
                assert_eq!(reason, "already_reacted");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn history_fetch_parses_messages() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/conversations.history")
            .with_body(
                r#"{"ok": true, "messages": [{"ts": "1700000000.000100", "text": "solve x**2 - 4", "user": "U123"}]}"#,
            )
            .create_async()
            .await;

        let messages = client(&server)
            .fetch_history_at("C123", "1700000000.000100")
            .await
            .unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "solve x**2 - 4");
    }

    #[tokio::test]
    async fn self_identity_is_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/auth.test")
            .with_body(r#"{"ok": true, "user_id": "U999BOT"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client(&server);
        assert_eq!(client.self_identity().await.unwrap(), "U999BOT");
        assert_eq!(client.self_identity().await.unwrap(), "U999BOT");
        mock.assert_async().await;
    }
}
