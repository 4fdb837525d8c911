//! The built-in tool-routing agent.
//!
//! Implements the `Agent` capability without an external LLM: the query
//! is classified against the registered math tools, arguments are pulled
//! out of the text, the tool runs, and its formatted output comes back as
//! content blocks. An LLM-backed agent can be swapped in behind the same
//! trait.

use async_trait::async_trait;
use mathtutor_core::agent::{Agent, AgentResult, ContentBlock};
use mathtutor_core::error::AgentError;
use mathtutor_core::tool::ToolRegistry;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

mod intent;

use intent::Intent;

/// Shown when no tool claims the query.
const FALLBACK_REPLY: &str = "I can help with math questions! Try asking me to solve an \
equation (e.g. `solve x**2 - 4`), compute statistics over numbers, look up an algorithm's \
complexity (e.g. `quick_sort`), or plot a function.";

pub struct ToolRouterAgent {
    tools: ToolRegistry,
}

impl ToolRouterAgent {
    pub fn new(tools: ToolRegistry) -> Self {
        Self { tools }
    }

    /// An agent over the default math tool set.
    pub fn with_default_tools() -> Self {
        Self::new(mathtutor_tools::default_registry())
    }
}

#[async_trait]
impl Agent for ToolRouterAgent {
    async fn invoke(&self, text: &str) -> Result<AgentResult, AgentError> {
        let intent = Intent::classify(text);
        debug!(?intent, "Classified query");

        let (tool, arguments) = match intent {
            Intent::Solve { equation } => (
                "solve_equation",
                serde_json::json!({ "equation": equation }),
            ),
            Intent::Statistics { numbers } => (
                "calculate_statistics",
                serde_json::json!({ "numbers": numbers }),
            ),
            Intent::Complexity { algorithm } => (
                "calculate_complexity",
                serde_json::json!({ "algorithm": algorithm }),
            ),
            Intent::Plot { function } => (
                "plot_function",
                serde_json::json!({ "function": function }),
            ),
            Intent::Unknown => {
                return Ok(AgentResult::blocks(vec![ContentBlock::text(
                    FALLBACK_REPLY,
                )]))
            }
        };

        let response = self.tools.execute(tool, arguments).await?;
        let formatted = mathtutor_tools::format::format_tool_response(&response);
        Ok(AgentResult::blocks(vec![ContentBlock::text(formatted)]))
    }
}

/// Pull all numeric literals out of a text.
pub(crate) fn extract_numbers(text: &str) -> Vec<f64> {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    let re = NUMBER.get_or_init(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("valid regex"));
    re.find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathtutor_core::agent::AgentContent;

    fn agent() -> ToolRouterAgent {
        ToolRouterAgent::with_default_tools()
    }

    async fn reply(text: &str) -> String {
        let result = agent().invoke(text).await.unwrap();
        match result.content {
            AgentContent::Blocks(blocks) => blocks
                .into_iter()
                .filter_map(|b| b.text)
                .collect::<Vec<_>>()
                .join("\n"),
            AgentContent::Text(t) => t,
        }
    }

    #[tokio::test]
    async fn solve_query_routes_to_equation_tool() {
        let text = reply("please solve x**2 - 4").await;
        assert!(text.contains("*Solution:* 2, -2"), "got: {text}");
    }

    #[tokio::test]
    async fn complexity_query_routes_to_lookup() {
        let text = reply("what's the time complexity of quick_sort?").await;
        assert!(text.contains("*Algorithm:* quick_sort"), "got: {text}");
    }

    #[tokio::test]
    async fn spaced_algorithm_name_is_normalized() {
        let text = reply("complexity of merge sort").await;
        assert!(text.contains("*Algorithm:* merge_sort"), "got: {text}");
    }

    #[tokio::test]
    async fn statistics_query_routes_to_statistics_tool() {
        let text = reply("give me statistics for 1, 2, 3, 4").await;
        assert!(text.contains("• Mean: 2.5000"), "got: {text}");
    }

    #[tokio::test]
    async fn plot_query_returns_placeholder_not_image() {
        let text = reply("plot x**2 + 2*x - 3").await;
        assert!(text.contains("I've generated a plot"), "got: {text}");
        assert!(!text.contains("image_base64"));
    }

    #[tokio::test]
    async fn unknown_query_gets_fallback() {
        let text = reply("what is calculus about?").await;
        assert!(text.contains("I can help with math questions"), "got: {text}");
    }

    #[tokio::test]
    async fn unsolvable_equation_surfaces_as_error_text() {
        let text = reply("solve x**3 - 1").await;
        assert!(text.starts_with("Error:"), "got: {text}");
    }

    #[test]
    fn number_extraction() {
        assert_eq!(
            extract_numbers("stats of 1, 2.5, -3"),
            vec![1.0, 2.5, -3.0]
        );
        assert!(extract_numbers("no digits here").is_empty());
    }
}
