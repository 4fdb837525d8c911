pub mod ask;
pub mod doctor;
pub mod onboard;
pub mod run;
pub mod tool;

use mathtutor_config::AppConfig;
use mathtutor_core::tool::ToolRegistry;
use mathtutor_tools::{ComplexityTool, EquationTool, PlotTool, StatisticsTool};

/// Build the tool set from config (plot range and sampling come from
/// `[plot]`).
pub fn registry_from_config(config: &AppConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(EquationTool));
    registry.register(Box::new(StatisticsTool));
    registry.register(Box::new(ComplexityTool));
    registry.register(Box::new(PlotTool {
        x_min: config.plot.x_min,
        x_max: config.plot.x_max,
        points: config.plot.points,
    }));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_carries_all_tools() {
        let registry = registry_from_config(&AppConfig::default());
        assert_eq!(registry.len(), 4);
        assert!(registry.get("plot_function").is_some());
    }
}
