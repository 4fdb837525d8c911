//! `mathtutor ask` — One-shot agent query from the terminal.

use mathtutor_agent::ToolRouterAgent;
use mathtutor_config::AppConfig;
use mathtutor_core::Agent;
use mathtutor_router::extract_text;

pub async fn run(message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let agent = ToolRouterAgent::new(super::registry_from_config(&config));

    let result = agent.invoke(message).await?;
    println!("{}", extract_text(&result));

    Ok(())
}
