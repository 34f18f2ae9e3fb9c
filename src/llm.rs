use anyhow::{Context, Result};
use async_openai::types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use tracing::debug;

use crate::{LLMParams, TARGET_LLM_REQUEST};

/// One chat-completion round trip, no retries. Errors propagate and end
/// the run; the scheduler starts the next one.
pub async fn generate_llm_response(prompt: &str, params: &LLMParams) -> Result<String> {
    debug!(target: TARGET_LLM_REQUEST, "Sending LLM request with prompt: {}", prompt);

    let request = CreateChatCompletionRequestArgs::default()
        .model(params.model.as_str())
        .temperature(params.temperature)
        .messages([ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?
            .into()])
        .build()?;

    let response = params
        .client
        .chat()
        .create(request)
        .await
        .context("chat completion request failed")?;

    let response_text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();

    debug!(target: TARGET_LLM_REQUEST, "LLM response received: {}", response_text);
    Ok(response_text)
}
