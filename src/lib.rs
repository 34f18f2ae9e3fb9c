pub mod analysis;
pub mod environment;
pub mod llm;
pub mod logging;
pub mod prompts;
pub mod recipients;
pub mod report;
pub mod rss;
pub mod telegram;

use async_openai::{config::OpenAIConfig, Client as OpenAIClient};

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_LLM_REQUEST: &str = "llm_request";

#[derive(Clone)]
pub struct LLMParams {
    pub client: OpenAIClient<OpenAIConfig>,
    pub model: String,
    pub temperature: f32,
}
