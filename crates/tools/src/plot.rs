//! Function plotting tool.
//!
//! Samples a univariate expression over a range and renders an SVG line
//! plot, returned base64-encoded. The image is never pushed into chat
//! text; the formatter substitutes a placeholder (see `format`).

use async_trait::async_trait;
use base64::Engine as _;
use mathtutor_core::error::ToolError;
use mathtutor_core::tool::{PlotResult, Tool, ToolResponse};
use tracing::debug;

use crate::expr;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const MARGIN: f64 = 40.0;

pub struct PlotTool {
    pub x_min: f64,
    pub x_max: f64,
    pub points: usize,
}

impl Default for PlotTool {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            points: 1000,
        }
    }
}

#[async_trait]
impl Tool for PlotTool {
    fn name(&self) -> &str {
        "plot_function"
    }

    fn description(&self) -> &str {
        "Plot a function of x over a range and return the image as a base64-encoded SVG."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "function": {
                    "type": "string",
                    "description": "The function of x to plot, e.g. 'x**2 + 2*x - 3'"
                },
                "x_min": { "type": "number" },
                "x_max": { "type": "number" },
                "points": { "type": "integer" }
            },
            "required": ["function"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolResponse, ToolError> {
        let function = arguments["function"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'function' argument".into()))?;
        let x_min = arguments["x_min"].as_f64().unwrap_or(self.x_min);
        let x_max = arguments["x_max"].as_f64().unwrap_or(self.x_max);
        let points = arguments["points"].as_u64().unwrap_or(self.points as u64) as usize;

        debug!(function = %function, x_min, x_max, points, "Rendering plot");
        Ok(render(function, x_min, x_max, points))
    }
}

/// Sample and render `function` over `[x_min, x_max]`.
pub fn render(function: &str, x_min: f64, x_max: f64, points: usize) -> ToolResponse {
    if x_min >= x_max {
        return ToolResponse::failure("x_min must be less than x_max");
    }
    if points < 2 {
        return ToolResponse::failure("At least 2 sample points are required");
    }

    let ast = match expr::parse(function) {
        Ok(ast) => ast,
        Err(e) => return ToolResponse::failure(e),
    };

    let step = (x_max - x_min) / (points - 1) as f64;
    let samples: Vec<(f64, f64)> = (0..points)
        .map(|i| {
            let x = x_min + step * i as f64;
            (x, ast.eval(x))
        })
        .filter(|(_, y)| y.is_finite())
        .collect();

    if samples.is_empty() {
        return ToolResponse::failure(format!(
            "'{}' has no finite values on [{}, {}]",
            function, x_min, x_max
        ));
    }

    let svg = render_svg(function, &samples, x_min, x_max);
    ToolResponse::Plot(PlotResult {
        image_base64: base64::engine::general_purpose::STANDARD.encode(svg.as_bytes()),
        function: function.to_string(),
        x_range: [x_min, x_max],
    })
}

fn render_svg(function: &str, samples: &[(f64, f64)], x_min: f64, x_max: f64) -> String {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(_, y) in samples {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    // Degenerate (constant function): pad so the line is visible.
    if y_max - y_min < f64::EPSILON {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let to_px = |x: f64, y: f64| -> (f64, f64) {
        let px = MARGIN + (x - x_min) / (x_max - x_min) * (WIDTH - 2.0 * MARGIN);
        let py = HEIGHT - MARGIN - (y - y_min) / (y_max - y_min) * (HEIGHT - 2.0 * MARGIN);
        (px, py)
    };

    let path: String = samples
        .iter()
        .map(|&(x, y)| {
            let (px, py) = to_px(x, y);
            format!("{:.1},{:.1}", px, py)
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    ));
    svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);

    // Axes, only when the origin lies inside the plotted window.
    if x_min <= 0.0 && 0.0 <= x_max {
        let (px, _) = to_px(0.0, y_min);
        svg.push_str(&format!(
            r##"<line x1="{px:.1}" y1="{MARGIN}" x2="{px:.1}" y2="{:.1}" stroke="#999" stroke-width="1"/>"##,
            HEIGHT - MARGIN
        ));
    }
    if y_min <= 0.0 && 0.0 <= y_max {
        let (_, py) = to_px(x_min, 0.0);
        svg.push_str(&format!(
            r##"<line x1="{MARGIN}" y1="{py:.1}" x2="{:.1}" y2="{py:.1}" stroke="#999" stroke-width="1"/>"##,
            WIDTH - MARGIN
        ));
    }

    svg.push_str(&format!(
        r##"<polyline points="{path}" fill="none" stroke="#1f77b4" stroke-width="2"/>"##
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="20" text-anchor="middle" font-family="sans-serif" font-size="14">f(x) = {}</text>"#,
        WIDTH / 2.0,
        xml_escape(function)
    ));
    svg.push_str("</svg>");
    svg
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
