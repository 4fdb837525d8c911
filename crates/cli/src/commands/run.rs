//! `mathtutor run` — Start the Slack bot.
//!
//! Wires the Slack client, the tool-routing agent, and the event router
//! together, then consumes the inbound event stream until Ctrl-C. Each
//! event is handled in isolation: a failed event is logged and the loop
//! moves on.

use std::sync::Arc;

use mathtutor_agent::ToolRouterAgent;
use mathtutor_config::AppConfig;
use mathtutor_router::EventRouter;
use mathtutor_slack::{SlackApiClient, SlackEventSource};
use tracing::{error, info};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    if !config.has_slack_credentials() {
        return Err("Slack tokens missing — run `mathtutor doctor` for details".into());
    }
    // has_slack_credentials checked both tokens
    let bot_token = config.slack.bot_token.clone().unwrap_or_default();

    let chat = Arc::new(SlackApiClient::new(bot_token));
    let agent = Arc::new(ToolRouterAgent::new(super::registry_from_config(&config)));
    let router = EventRouter::new(chat, agent, config.slack.ack_reaction.clone());

    let source = SlackEventSource::new();
    let mut events = source.start().await;

    info!("mathtutor is running — press Ctrl-C to stop");

    loop {
        tokio::select! {
            maybe_event = events.recv() => {
                let Some(event) = maybe_event else {
                    info!("Event stream closed");
                    break;
                };
                if let Err(e) = router.handle(&event).await {
                    error!(error = %e, "Failed to handle event");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    source.stop().await;
    Ok(())
}
