//! `mathtutor doctor` — Diagnose configuration.

use mathtutor_config::AppConfig;
use mathtutor_core::ChatClient;
use mathtutor_slack::SlackApiClient;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 mathtutor Doctor — Diagnostics");
    println!("=================================\n");

    let mut issues = 0;

    println!("  ✅ Rust binary running");

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        match AppConfig::load() {
            Ok(config) => {
                println!("  ✅ Config file valid");

                if config.slack.bot_token.is_some() {
                    println!("  ✅ Slack bot token configured");
                } else {
                    println!("  ⚠️  No bot token — set slack.bot_token or SLACK_BOT_TOKEN");
                    issues += 1;
                }
                if config.slack.app_token.is_some() {
                    println!("  ✅ Slack app token configured");
                } else {
                    println!("  ⚠️  No app token — set slack.app_token or SLACK_APP_TOKEN");
                    issues += 1;
                }

                // Reachability is reported but never counted as an issue;
                // doctor must stay useful offline.
                if let Some(token) = &config.slack.bot_token {
                    match SlackApiClient::new(token.clone()).self_identity().await {
                        Ok(id) => println!("  ✅ Slack auth OK (bot user {id})"),
                        Err(e) => println!("  ⚠️  Slack auth check failed: {e}"),
                    }
                }

                let registry = super::registry_from_config(&config);
                let mut names = registry.names();
                names.sort_unstable();
                println!("  ✅ {} tools registered: {}", names.len(), names.join(", "));
            }
            Err(e) => {
                println!("  ❌ Config file invalid: {e}");
                issues += 1;
            }
        }
    } else {
        println!("  ❌ No config file — run `mathtutor onboard`");
        issues += 1;
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
