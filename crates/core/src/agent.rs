//! Agent trait — the conversational capability behind the bot.
//!
//! The agent is opaque to the router: text in, structured result out.
//! Whatever conversation history or tool loop it runs internally is its
//! own business.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// The result of one agent invocation.
///
/// Content is either a single string or an ordered sequence of content
/// blocks, each optionally carrying text. No other shape is assumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    pub content: AgentContent,
}

impl AgentResult {
    /// A plain-text result.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: AgentContent::Text(content.into()),
        }
    }

    /// A result made of ordered content blocks.
    pub fn blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            content: AgentContent::Blocks(blocks),
        }
    }
}

/// Agent result content: a string or an ordered block sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// One content block. Blocks without a `text` field are legal and are
/// skipped during text extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Non-text payload (tool traces, structured data). Preserved but
    /// never rendered into chat.
    #[serde(flatten, default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            extra: serde_json::Map::new(),
        }
    }
}

/// The conversational agent capability.
///
/// Synchronous single-shot contract: one input text, one result. No
/// streaming is used by the router.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn invoke(&self, text: &str) -> std::result::Result<AgentResult, AgentError>;
}
