//! Tool result formatting for chat display.
//!
//! Turns a `ToolResponse` into a single Slack-markdown string. The render
//! priority is fixed: Failure, then Solution, Statistics, Complexity,
//! Plot, Generic — matching the historical first-matching-key dispatch so
//! formatted output stays byte-compatible.
//!
//! `classify` bridges legacy untyped result maps (`success` +
//! shape-specific keys) into the tagged `ToolResponse`, checking keys in
//! that same priority order.

use mathtutor_core::tool::{
    ComplexityResult, PlotResult, SolutionResult, StatisticsResult, TimeComplexity, ToolResponse,
};
use serde_json::Value;

/// Shown instead of raw image data when a tool produced a plot.
pub const PLOT_PLACEHOLDER: &str = "I've generated a plot for you, but I can't display it \
directly in Slack. Here's the textual explanation instead.";

/// Format a tool response into a single display string.
pub fn format_tool_response(response: &ToolResponse) -> String {
    match response {
        ToolResponse::Failure { error } => {
            if error.is_empty() {
                "Error: Unknown error".to_string()
            } else {
                format!("Error: {}", error)
            }
        }
        ToolResponse::Solution(solution) => format_solution(solution),
        ToolResponse::Statistics(stats) => format_statistics(stats),
        ToolResponse::Complexity(complexity) => format_complexity(complexity),
        // Image payloads are never embedded into chat text.
        ToolResponse::Plot(_) => PLOT_PLACEHOLDER.to_string(),
        ToolResponse::Generic(value) => value.to_string(),
    }
}

fn format_solution(solution: &SolutionResult) -> String {
    let mut out = format!("*Solution:* {}\n\n", solution.solution);

    if !solution.steps.is_empty() {
        out.push_str("*Step-by-step solution:*\n");
        for (i, step) in solution.steps.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, step));
        }
    }

    out
}

fn format_statistics(stats: &StatisticsResult) -> String {
    format!(
        "*Statistical Analysis:*\n\
         • Count: {}\n\
         • Mean: {:.4}\n\
         • Median: {:.4}\n\
         • Standard Deviation: {:.4}\n\
         • Range: {:.4} to {:.4}\n\
         • Interquartile Range: {:.4}",
        stats.count, stats.mean, stats.median, stats.std_dev, stats.min, stats.max, stats.iqr
    )
}

fn format_complexity(complexity: &ComplexityResult) -> String {
    let mut out = format!("*Algorithm:* {}\n\n", complexity.algorithm);

    match &complexity.time {
        TimeComplexity::Cases {
            best,
            average,
            worst,
        } => {
            out.push_str("*Time Complexity:*\n");
            out.push_str(&format!("• Best case: {}\n", best));
            out.push_str(&format!("• Average case: {}\n", average));
            out.push_str(&format!("• Worst case: {}\n", worst));
        }
        TimeComplexity::Single(time) => {
            out.push_str(&format!("*Time Complexity:* {}\n", time));
        }
    }

    out.push_str(&format!("*Space Complexity:* {}\n", complexity.space));

    if let Some(stable) = complexity.stable {
        out.push_str(&format!(
            "*Stable:* {}\n",
            if stable { "Yes" } else { "No" }
        ));
    }

    if let Some(description) = &complexity.description {
        out.push_str(&format!("\n*Description:*\n{}", description));
    }

    out
}

/// Classify a legacy untyped tool result map into a `ToolResponse`.
///
/// Key checks happen in the documented priority order, so a map carrying
/// several shape keys resolves to the earliest branch.
pub fn classify(value: &Value) -> ToolResponse {
    if !value["success"].as_bool().unwrap_or(false) {
        let error = value["error"].as_str().unwrap_or("Unknown error");
        return ToolResponse::failure(error);
    }

    if let Some(solution) = value["solution"].as_str() {
        let steps = value["steps"]
            .as_array()
            .map(|steps| {
                steps
                    .iter()
                    .filter_map(|s| s.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();
        return ToolResponse::Solution(SolutionResult {
            solution: solution.to_string(),
            steps,
            explanation: value["explanation"].as_str().unwrap_or_default().to_string(),
        });
    }

    if let Some(mean) = value["mean"].as_f64() {
        let num = |key: &str| value[key].as_f64().unwrap_or(0.0);
        let min = num("min");
        let max = num("max");
        let std_dev = num("std_dev");
        return ToolResponse::Statistics(StatisticsResult {
            count: value["count"].as_u64().unwrap_or(0) as usize,
            mean,
            median: num("median"),
            std_dev,
            variance: value["variance"].as_f64().unwrap_or(std_dev * std_dev),
            min,
            max,
            range: value["range"].as_f64().unwrap_or(max - min),
            q1: num("q1"),
            q3: num("q3"),
            iqr: num("iqr"),
        });
    }

    if value.get("complexity").is_some() {
        let complexity = &value["complexity"];
        let time = match &complexity["time"] {
            Value::Object(cases) => TimeComplexity::Cases {
                best: cases["best"].as_str().unwrap_or("Unknown").to_string(),
                average: cases["average"].as_str().unwrap_or("Unknown").to_string(),
                worst: cases["worst"].as_str().unwrap_or("Unknown").to_string(),
            },
            other => TimeComplexity::Single(other.as_str().unwrap_or("Unknown").to_string()),
        };
        return ToolResponse::Complexity(ComplexityResult {
            algorithm: value["algorithm"].as_str().unwrap_or_default().to_string(),
            time,
            space: complexity["space"].as_str().unwrap_or("Unknown").to_string(),
            stable: complexity["stable"].as_bool(),
            description: complexity["description"].as_str().map(String::from),
        });
    }

    if let Some(image_base64) = value["image_base64"].as_str() {
        return ToolResponse::Plot(PlotResult {
            image_base64: image_base64.to_string(),
            function: value["function"].as_str().unwrap_or_default().to_string(),
            x_range: value["x_range"]
                .as_array()
                .and_then(|r| Some([r.first()?.as_f64()?, r.get(1)?.as_f64()?]))
                .unwrap_or([0.0, 0.0]),
        });
    }

    ToolResponse::Generic(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_formats_exactly() {
        let response = ToolResponse::failure("bad input");
        assert_eq!(format_tool_response(&response), "Error: bad input");
    }

    #[test]
    fn empty_failure_is_unknown() {
        let response = ToolResponse::failure("");
        assert_eq!(format_tool_response(&response), "Error: Unknown error");
    }

    #[test]
    fn solution_with_steps() {
        let response = ToolResponse::Solution(SolutionResult {
            solution: "2, -2".into(),
            steps: vec!["first".into(), "second".into()],
            explanation: String::new(),
        });
        let text = format_tool_response(&response);
        assert!(text.starts_with("*Solution:* 2, -2\n\n"));
        assert!(text.contains("*Step-by-step solution:*\n1. first\n2. second\n"));
    }

    #[test]
    fn solution_without_steps_has_no_step_header() {
        let response = ToolResponse::Solution(SolutionResult {
            solution: "3".into(),
            steps: vec![],
            explanation: String::new(),
        });
        assert!(!format_tool_response(&response).contains("Step-by-step"));
    }

    #[test]
    fn statistics_uses_four_decimal_places() {
        let response = crate::statistics::describe(&[1.0, 2.0, 3.0, 4.0]);
        let text = format_tool_response(&response);
        assert!(text.contains("• Count: 4"));
        assert!(text.contains("• Mean: 2.5000"));
        assert!(text.contains("• Median: 2.5000"));
        assert!(text.contains("• Range: 1.0000 to 4.0000"));
        assert!(text.contains("• Interquartile Range: 1.5000"));
    }

    #[test]
    fn complexity_with_cases_and_stability() {
        let response = crate::complexity::lookup("quick_sort");
        let text = format_tool_response(&response);
        assert!(text.starts_with("*Algorithm:* quick_sort\n\n"));
        assert!(text.contains("• Best case: O(n log n)"));
        assert!(text.contains("• Worst case: O(n²)"));
        assert!(text.contains("*Space Complexity:* O(log n)"));
        assert!(text.contains("*Stable:* No"));
        assert!(text.contains("*Description:*\n"));
    }

    #[test]
    fn complexity_single_time_bound() {
        let response = crate::complexity::lookup("dijkstra");
        let text = format_tool_response(&response);
        assert!(text.contains("*Time Complexity:* O((V + E) log V)\n"));
        assert!(!text.contains("Best case"));
        assert!(!text.contains("*Stable:*"));
    }

    #[test]
    fn plot_is_replaced_with_placeholder() {
        let response = crate::plot::render("x**2", -10.0, 10.0, 50);
        let text = format_tool_response(&response);
        assert_eq!(text, PLOT_PLACEHOLDER);
        assert!(!text.contains("image_base64"));
    }

    #[test]
    fn generic_renders_as_json() {
        let response = ToolResponse::Generic(json!({"answer": 42}));
        assert_eq!(format_tool_response(&response), r#"{"answer":42}"#);
    }

    // ── Legacy map classification ─────────────────────────────────────

    #[test]
    fn classify_failure() {
        let response = classify(&json!({"success": false, "error": "bad input"}));
        assert_eq!(format_tool_response(&response), "Error: bad input");
    }

    #[test]
    fn classify_failure_without_error_message() {
        let response = classify(&json!({"success": false}));
        assert_eq!(format_tool_response(&response), "Error: Unknown error");
    }

    #[test]
    fn classify_missing_success_is_failure() {
        let response = classify(&json!({"solution": "2"}));
        assert!(!response.is_success());
    }

    #[test]
    fn solution_wins_over_statistics() {
        // A map carrying both shapes resolves to the earliest branch.
        let response = classify(&json!({
            "success": true,
            "solution": "2, -2",
            "mean": 2.5
        }));
        assert!(matches!(response, ToolResponse::Solution(_)));
    }

    #[test]
    fn classify_statistics() {
        let response = classify(&json!({
            "success": true,
            "count": 4,
            "mean": 2.5,
            "median": 2.5,
            "std_dev": 1.118,
            "min": 1.0,
            "max": 4.0,
            "iqr": 1.5
        }));
        match response {
            ToolResponse::Statistics(stats) => {
                assert_eq!(stats.count, 4);
                assert_eq!(stats.range, 3.0);
            }
            other => panic!("Expected Statistics, got {:?}", other),
        }
    }

    #[test]
    fn classify_complexity_with_string_time() {
        let response = classify(&json!({
            "success": true,
            "algorithm": "depth_first_search",
            "complexity": {"time": "O(V + E)", "space": "O(V)"}
        }));
        match response {
            ToolResponse::Complexity(c) => {
                assert!(matches!(c.time, TimeComplexity::Single(_)));
                assert!(c.stable.is_none());
            }
            other => panic!("Expected Complexity, got {:?}", other),
        }
    }

    #[test]
    fn classify_plot() {
        let response = classify(&json!({
            "success": true,
            "image_base64": "aGVsbG8=",
            "function": "x**2",
            "x_range": [-10.0, 10.0]
        }));
        assert!(matches!(response, ToolResponse::Plot(_)));
    }

    #[test]
    fn classify_unrecognized_shape_is_generic() {
        let response = classify(&json!({"success": true, "something": "else"}));
        assert!(matches!(response, ToolResponse::Generic(_)));
    }
}
