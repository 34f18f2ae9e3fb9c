use anyhow::Result;
use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use chrono::Local;
use reqwest::Client;
use tracing::info;

use hermes::environment::Config;
use hermes::logging::configure_logging;
use hermes::recipients;
use hermes::report::build_report;
use hermes::rss::fetch_news;
use hermes::telegram;
use hermes::LLMParams;

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();

    let config = Config::from_env();
    let client = Client::new();

    let openai_config = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());
    let params = LLMParams {
        client: OpenAIClient::with_config(openai_config),
        model: config.model.clone(),
        temperature: config.temperature,
    };

    // Register any chats that messaged the bot since the last run.
    recipients::discover_chat_ids(&client, &config.telegram_api, &config.chat_ids_path).await?;

    let news = fetch_news(&config.rss_feeds).await;
    info!("Fetched {} news items from {} feeds", news.len(), config.rss_feeds.len());

    let report = build_report(&news, &params, Local::now().date_naive()).await?;
    telegram::send_report(&client, &config.telegram_api, &config.chat_ids_path, &report).await?;

    info!("Run complete");
    Ok(())
}
