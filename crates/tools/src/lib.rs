//! Built-in math tools for mathtutor.
//!
//! Four domain tools, each implementing the core `Tool` trait:
//! - `solve_equation` — univariate polynomial equations (degree ≤ 2)
//! - `calculate_statistics` — descriptive statistics over a number list
//! - `calculate_complexity` — time/space complexity of known algorithms
//! - `plot_function` — SVG function plots, base64-encoded
//!
//! Plus `format`: the presentation layer turning a `ToolResponse` into a
//! single chat-ready string.

pub mod complexity;
pub mod equation;
pub mod expr;
pub mod format;
pub mod plot;
pub mod statistics;

pub use complexity::ComplexityTool;
pub use equation::EquationTool;
pub use plot::PlotTool;
pub use statistics::StatisticsTool;

use mathtutor_core::tool::ToolRegistry;

/// Build a registry with all built-in math tools registered.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(EquationTool));
    registry.register(Box::new(StatisticsTool));
    registry.register(Box::new(ComplexityTool));
    registry.register(Box::new(PlotTool::default()));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_all_tools() {
        let registry = default_registry();
        assert_eq!(registry.len(), 4);
        for name in [
            "solve_equation",
            "calculate_statistics",
            "calculate_complexity",
            "plot_function",
        ] {
            assert!(registry.get(name).is_some(), "missing tool {name}");
        }
    }
}
