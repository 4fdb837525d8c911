//! Descriptive statistics tool.
//!
//! Population standard deviation and linearly-interpolated quartiles,
//! matching numpy's defaults so formatted output lines up with the
//! historical behavior.

use async_trait::async_trait;
use mathtutor_core::error::ToolError;
use mathtutor_core::tool::{StatisticsResult, Tool, ToolResponse};
use tracing::debug;

pub struct StatisticsTool;

#[async_trait]
impl Tool for StatisticsTool {
    fn name(&self) -> &str {
        "calculate_statistics"
    }

    fn description(&self) -> &str {
        "Calculate count, mean, median, standard deviation, range and quartiles for a list of numbers."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "numbers": {
                    "type": "array",
                    "items": { "type": "number" },
                    "description": "The numbers to analyze"
                }
            },
            "required": ["numbers"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolResponse, ToolError> {
        let numbers: Vec<f64> = arguments["numbers"]
            .as_array()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'numbers' argument".into()))?
            .iter()
            .map(|v| {
                v.as_f64()
                    .ok_or_else(|| ToolError::InvalidArguments("'numbers' must be numeric".into()))
            })
            .collect::<Result<_, _>>()?;

        debug!(count = numbers.len(), "Computing statistics");
        Ok(describe(&numbers))
    }
}

/// Compute descriptive statistics, or a Failure for empty input.
pub fn describe(numbers: &[f64]) -> ToolResponse {
    if numbers.is_empty() {
        return ToolResponse::failure("Cannot compute statistics of an empty list");
    }

    let count = numbers.len();
    let mean = numbers.iter().sum::<f64>() / count as f64;
    let variance = numbers.iter().map(|n| (n - mean).powi(2)).sum::<f64>() / count as f64;
    let std_dev = variance.sqrt();

    let mut sorted = numbers.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let min = sorted[0];
    let max = sorted[count - 1];

    let q1 = percentile(&sorted, 25.0);
    let median = percentile(&sorted, 50.0);
    let q3 = percentile(&sorted, 75.0);

    ToolResponse::Statistics(StatisticsResult {
        count,
        mean,
        median,
        std_dev,
        variance,
        min,
        max,
        range: max - min,
        q1,
        q3,
        iqr: q3 - q1,
    })
}

/// Linearly interpolated percentile over pre-sorted data (numpy's
/// default "linear" method).
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}
