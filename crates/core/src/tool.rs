//! Tool trait and structured tool results.
//!
//! Tool outcomes are an explicit tagged union decided by the tool itself
//! at construction time. Domain failures (unsolvable equation, unknown
//! algorithm) are `ToolResponse::Failure` values, not raised errors.
//!
//! The variant order matters to the formatter: a caller presenting a
//! response renders it by its tag, in the fixed priority
//! Failure > Solution > Statistics > Complexity > Plot > Generic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ToolError;

/// The outcome of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolResponse {
    /// The tool ran but could not produce a result.
    Failure { error: String },

    /// An equation solution with optional worked steps.
    Solution(SolutionResult),

    /// Descriptive statistics over a number list.
    Statistics(StatisticsResult),

    /// Time/space complexity of a known algorithm.
    Complexity(ComplexityResult),

    /// A rendered plot. Never embedded into chat text.
    Plot(PlotResult),

    /// Anything else — rendered generically.
    Generic(serde_json::Value),
}

impl ToolResponse {
    /// Shorthand for a domain failure.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failure { .. })
    }
}

/// Result of solving an equation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionResult {
    /// Human-readable root list, e.g. "2, -2".
    pub solution: String,

    /// Ordered worked steps. May be empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,

    /// One-line summary, e.g. "The solution to x**2 - 4 = 0 is x = 2, -2".
    pub explanation: String,
}

/// Descriptive statistics for a list of numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
}

/// Complexity record for a known algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityResult {
    pub algorithm: String,
    pub time: TimeComplexity,
    pub space: String,

    /// Present only for algorithms where stability is meaningful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Time complexity: a single bound, or best/average/worst cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeComplexity {
    Single(String),
    Cases {
        best: String,
        average: String,
        worst: String,
    },
}

/// A rendered function plot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotResult {
    /// Base64-encoded image data.
    pub image_base64: String,

    /// The plotted expression.
    pub function: String,

    /// [x_min, x_max] of the sampled domain.
    pub x_range: [f64; 2],
}

/// The core Tool trait.
///
/// Each tool (solve_equation, calculate_statistics, calculate_complexity,
/// plot_function) implements this trait and is registered in the
/// ToolRegistry.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "solve_equation").
    fn name(&self) -> &str;

    /// A description of what this tool does.
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments.
    ///
    /// Err is reserved for infrastructure problems (bad argument shape);
    /// domain failures come back as `ToolResponse::Failure`.
    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolResponse, ToolError>;
}

/// A registry of available tools.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Execute a tool by name.
    pub async fn execute(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolResponse, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.execute(arguments).await
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes back the input"
        }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })
        }
        async fn execute(
            &self,
            arguments: serde_json::Value,
        ) -> std::result::Result<ToolResponse, ToolError> {
            Ok(ToolResponse::Generic(arguments["text"].clone()))
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[tokio::test]
    async fn registry_execute_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let result = registry
            .execute("echo", serde_json::json!({"text": "hello"}))
            .await
            .unwrap();
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn registry_execute_missing_tool() {
        let registry = ToolRegistry::new();
        let err = registry
            .execute("nonexistent", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[test]
    fn failure_is_not_success() {
        let response = ToolResponse::failure("no real roots");
        assert!(!response.is_success());
    }

    #[test]
    fn time_complexity_untagged_roundtrip() {
        let single: TimeComplexity = serde_json::from_str(r#""O(V + E)""#).unwrap();
        assert!(matches!(single, TimeComplexity::Single(_)));

        let cases: TimeComplexity = serde_json::from_str(
            r#"{"best": "O(n)", "average": "O(n²)", "worst": "O(n²)"}"#,
        )
        .unwrap();
        assert!(matches!(cases, TimeComplexity::Cases { .. }));
    }
}
