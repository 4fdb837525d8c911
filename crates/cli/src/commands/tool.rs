//! `mathtutor tool` — Run one math tool directly with JSON arguments.

use mathtutor_config::AppConfig;
use mathtutor_tools::format::format_tool_response;

pub async fn run(name: &str, args: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let registry = super::registry_from_config(&config);

    let arguments: serde_json::Value = serde_json::from_str(args)?;
    let response = registry.execute(name, arguments).await?;
    println!("{}", format_tool_response(&response));

    Ok(())
}
