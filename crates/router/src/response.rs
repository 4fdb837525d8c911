//! Agent result to chat text.

use mathtutor_core::agent::{AgentContent, AgentResult};
use regex::Regex;
use std::sync::OnceLock;

/// Flatten an agent result into the text that gets posted.
///
/// String content passes through verbatim. Block content joins the text
/// of every text-bearing block with newlines, skipping blocks without
/// text. A result with no extractable text falls back to its debug form
/// rather than posting an empty message.
pub fn extract_text(result: &AgentResult) -> String {
    let text = match &result.content {
        AgentContent::Text(text) => text.clone(),
        AgentContent::Blocks(blocks) => blocks
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n"),
    };

    if text.is_empty() {
        format!("{:?}", result)
    } else {
        text
    }
}

/// Remove `<@USERID>` mention tokens and trim the remainder.
pub fn strip_mentions(text: &str) -> String {
    static MENTION: OnceLock<Regex> = OnceLock::new();
    let re = MENTION.get_or_init(|| Regex::new(r"<@[A-Z0-9]+>").expect("valid mention pattern"));
    re.replace_all(text, "").trim().to_string()
}
