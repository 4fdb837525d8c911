//! Equation solving tool.
//!
//! Solves `expr = 0` for univariate polynomials of degree ≤ 2. Quadratic
//! equations come with a worked step-by-step derivation via the quadratic
//! formula, mirroring what a tutor would write out.

use async_trait::async_trait;
use mathtutor_core::error::ToolError;
use mathtutor_core::tool::{SolutionResult, Tool, ToolResponse};
use tracing::debug;

use crate::expr;

pub struct EquationTool;

#[async_trait]
impl Tool for EquationTool {
    fn name(&self) -> &str {
        "solve_equation"
    }

    fn description(&self) -> &str {
        "Solve a polynomial equation in x (degree up to 2). The expression is assumed to be equal to 0."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "equation": {
                    "type": "string",
                    "description": "The expression to solve, e.g. 'x**2 + 2*x - 3'"
                }
            },
            "required": ["equation"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolResponse, ToolError> {
        let equation = arguments["equation"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'equation' argument".into()))?;

        debug!(equation = %equation, "Solving equation");
        Ok(solve(equation))
    }
}

/// Solve `equation = 0`, returning a Solution or a Failure.
pub fn solve(equation: &str) -> ToolResponse {
    let ast = match expr::parse(equation) {
        Ok(ast) => ast,
        Err(e) => return ToolResponse::failure(e),
    };

    let poly = match ast.to_poly() {
        Some(poly) => poly,
        None => {
            return ToolResponse::failure(format!(
                "'{}' is not a polynomial in x",
                equation
            ))
        }
    };

    match poly.len() {
        // Constant: either every x or no x satisfies it.
        1 => {
            if poly[0] == 0.0 {
                solution(equation, "any x".into(), vec![])
            } else {
                ToolResponse::failure(format!("{} = 0 has no solution", equation))
            }
        }
        // Linear: bx + c = 0.
        2 => {
            let root = fmt_num(-poly[0] / poly[1]);
            let steps = vec![
                format!("Isolate x: {}*x = {}", fmt_num(poly[1]), fmt_num(-poly[0])),
                format!(
                    "Divide both sides by {}: x = {}",
                    fmt_num(poly[1]),
                    root
                ),
            ];
            solution(equation, root, steps)
        }
        // Quadratic: ax² + bx + c = 0.
        3 => solve_quadratic(equation, poly[2], poly[1], poly[0]),
        _ => ToolResponse::failure(format!(
            "Polynomials of degree {} are not supported (maximum is 2)",
            poly.len() - 1
        )),
    }
}

fn solve_quadratic(equation: &str, a: f64, b: f64, c: f64) -> ToolResponse {
    let discriminant = b * b - 4.0 * a * c;

    let roots = if discriminant > 0.0 {
        let sqrt_d = discriminant.sqrt();
        vec![
            fmt_num((-b + sqrt_d) / (2.0 * a)),
            fmt_num((-b - sqrt_d) / (2.0 * a)),
        ]
    } else if discriminant == 0.0 {
        vec![fmt_num(-b / (2.0 * a))]
    } else {
        // Complex conjugate pair.
        let re = -b / (2.0 * a);
        let im = (-discriminant).sqrt() / (2.0 * a).abs();
        vec![
            format!("{} + {}*i", fmt_num(re), fmt_num(im)),
            format!("{} - {}*i", fmt_num(re), fmt_num(im)),
        ]
    };

    let steps = vec![
        format!(
            "Identify the coefficients: a={}, b={}, c={}",
            fmt_num(a),
            fmt_num(b),
            fmt_num(c)
        ),
        "Apply the quadratic formula: x = (-b ± √(b² - 4ac)) / 2a".to_string(),
        format!(
            "Substitute the values: x = (-{} ± √({}² - 4×{}×{})) / 2×{}",
            fmt_num(b),
            fmt_num(b),
            fmt_num(a),
            fmt_num(c),
            fmt_num(a)
        ),
        format!(
            "Calculate the discriminant: b² - 4ac = {}",
            fmt_num(discriminant)
        ),
        format!(
            "Calculate the solutions: x = ({} ± √{}) / {}",
            fmt_num(-b),
            fmt_num(discriminant),
            fmt_num(2.0 * a)
        ),
    ];

    solution(equation, roots.join(", "), steps)
}

fn solution(equation: &str, roots: String, steps: Vec<String>) -> ToolResponse {
    ToolResponse::Solution(SolutionResult {
        explanation: format!("The solution to {} = 0 is x = {}", equation, roots),
        solution: roots,
        steps,
    })
}

/// Format a float without a trailing `.0` for integral values.
fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_solution(response: ToolResponse) -> SolutionResult {
        match response {
            ToolResponse::Solution(s) => s,
            other => panic!("Expected Solution, got {:?}", other),
        }
    }

    #[test]
    fn quadratic_two_roots() {
        let result = expect_solution(solve("x**2 - 4"));
        assert_eq!(result.solution, "2, -2");
        assert_eq!(result.steps.len(), 5);
        assert!(result.steps[0].contains("a=1, b=0, c=-4"));
        assert!(result.steps[3].contains("b² - 4ac = 16"));
    }

    #[test]
    fn quadratic_repeated_root() {
        let result = expect_solution(solve("x**2 - 2*x + 1"));
        assert_eq!(result.solution, "1");
    }

    #[test]
    fn quadratic_complex_roots() {
        let result = expect_solution(solve("x**2 + 1"));
        assert_eq!(result.solution, "0 + 1*i, 0 - 1*i");
    }

    #[test]
    fn linear_equation() {
        let result = expect_solution(solve("2*x - 6"));
        assert_eq!(result.solution, "3");
        assert_eq!(result.steps.len(), 2);
    }

    #[test]
    fn factored_form() {
        let result = expect_solution(solve("(x - 1) * (x + 3)"));
        assert_eq!(result.solution, "1, -3");
    }

    #[test]
    fn explanation_mentions_input() {
        let result = expect_solution(solve("x**2 - 4"));
        assert_eq!(result.explanation, "The solution to x**2 - 4 = 0 is x = 2, -2");
    }

    #[test]
    fn cubic_rejected() {
        let response = solve("x**3 - 1");
        assert!(!response.is_success());
    }

    #[test]
    fn non_polynomial_rejected() {
        let response = solve("1 / x");
        assert!(!response.is_success());
    }

    #[test]
    fn garbage_input_fails() {
        assert!(!solve("not math").is_success());
    }

    #[test]
    fn contradiction_has_no_solution() {
        assert!(!solve("5").is_success());
    }

    #[tokio::test]
    async fn tool_execute() {
        let tool = EquationTool;
        let response = tool
            .execute(serde_json::json!({"equation": "x**2 - 4"}))
            .await
            .unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn tool_missing_argument() {
        let tool = EquationTool;
        assert!(tool.execute(serde_json::json!({})).await.is_err());
    }
}
