use std::env;
use std::path::PathBuf;

/// The feeds polled on every run, in delivery order.
pub const RSS_FEEDS: [&str; 3] = [
    "https://cointelegraph.com/rss",
    "https://cryptonews.com/news/feed/",
    "https://bitcoinmagazine.com/.rss/full/",
];

pub const CHAT_IDS_FILE: &str = "chat_ids.txt";

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Process-wide configuration, built once at startup and handed to each
/// component. Credentials are not validated here: an empty token or API key
/// fails at the first call that depends on it.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_api: String,
    pub openai_api_key: String,
    pub model: String,
    pub temperature: f32,
    pub rss_feeds: Vec<String>,
    pub chat_ids_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let bot_token = env::var("BOT_TOKEN").unwrap_or_default();
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let temperature: f32 = env::var("LLM_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        Config {
            telegram_api: format!("https://api.telegram.org/bot{}", bot_token),
            openai_api_key,
            model,
            temperature,
            rss_feeds: RSS_FEEDS.iter().map(|s| s.to_string()).collect(),
            chat_ids_path: PathBuf::from(CHAT_IDS_FILE),
        }
    }
}
