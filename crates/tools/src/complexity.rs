//! Algorithm complexity lookup tool.
//!
//! A static table of common algorithms with their time/space complexity,
//! stability (where meaningful) and a one-paragraph description.

use async_trait::async_trait;
use mathtutor_core::error::ToolError;
use mathtutor_core::tool::{ComplexityResult, TimeComplexity, Tool, ToolResponse};
use tracing::debug;

pub struct ComplexityTool;

#[async_trait]
impl Tool for ComplexityTool {
    fn name(&self) -> &str {
        "calculate_complexity"
    }

    fn description(&self) -> &str {
        "Look up the time and space complexity of a common algorithm, e.g. 'quick_sort' or 'binary_search'."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "algorithm": {
                    "type": "string",
                    "description": "Algorithm name in snake_case"
                }
            },
            "required": ["algorithm"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolResponse, ToolError> {
        let algorithm = arguments["algorithm"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'algorithm' argument".into()))?;

        debug!(algorithm = %algorithm, "Looking up algorithm complexity");
        Ok(lookup(algorithm))
    }
}

/// Look up an algorithm by snake_case name.
pub fn lookup(algorithm: &str) -> ToolResponse {
    match record(algorithm) {
        Some(result) => ToolResponse::Complexity(result),
        None => ToolResponse::failure(format!(
            "Algorithm '{}' not found in database",
            algorithm
        )),
    }
}

/// All known algorithm names.
pub fn known_algorithms() -> &'static [&'static str] {
    &[
        "bubble_sort",
        "quick_sort",
        "merge_sort",
        "binary_search",
        "depth_first_search",
        "breadth_first_search",
        "dijkstra",
    ]
}

fn record(algorithm: &str) -> Option<ComplexityResult> {
    let result = match algorithm {
        "bubble_sort" => entry(
            algorithm,
            cases("O(n)", "O(n²)", "O(n²)"),
            "O(1)",
            Some(true),
            "Simple comparison-based sorting algorithm that repeatedly steps through the list, \
             compares adjacent elements, and swaps them if they are in the wrong order.",
        ),
        "quick_sort" => entry(
            algorithm,
            cases("O(n log n)", "O(n log n)", "O(n²)"),
            "O(log n)",
            Some(false),
            "Divide-and-conquer algorithm that selects a pivot element and partitions the array \
             around the pivot.",
        ),
        "merge_sort" => entry(
            algorithm,
            cases("O(n log n)", "O(n log n)", "O(n log n)"),
            "O(n)",
            Some(true),
            "Divide-and-conquer algorithm that divides the input array into two halves, \
             recursively sorts them, and then merges the sorted halves.",
        ),
        "binary_search" => entry(
            algorithm,
            cases("O(1)", "O(log n)", "O(log n)"),
            "O(1)",
            None,
            "Search algorithm that finds the position of a target value within a sorted array by \
             repeatedly dividing the search interval in half.",
        ),
        "depth_first_search" => entry(
            algorithm,
            TimeComplexity::Single("O(V + E)".into()),
            "O(V)",
            None,
            "Algorithm for traversing or searching tree or graph data structures that explores \
             as far as possible along each branch before backtracking.",
        ),
        "breadth_first_search" => entry(
            algorithm,
            TimeComplexity::Single("O(V + E)".into()),
            "O(V)",
            None,
            "Algorithm for traversing or searching tree or graph data structures that explores \
             all neighbors at the present depth before moving on to nodes at the next depth level.",
        ),
        "dijkstra" => entry(
            algorithm,
            TimeComplexity::Single("O((V + E) log V)".into()),
            "O(V)",
            None,
            "Algorithm for finding the shortest paths between nodes in a graph with non-negative \
             edge weights.",
        ),
        _ => return None,
    };
    Some(result)
}

fn cases(best: &str, average: &str, worst: &str) -> TimeComplexity {
    TimeComplexity::Cases {
        best: best.into(),
        average: average.into(),
        worst: worst.into(),
    }
}

fn entry(
    algorithm: &str,
    time: TimeComplexity,
    space: &str,
    stable: Option<bool>,
    description: &str,
) -> ComplexityResult {
    ComplexityResult {
        algorithm: algorithm.into(),
        time,
        space: space.into(),
        stable,
        description: Some(description.into()),
    }
}
