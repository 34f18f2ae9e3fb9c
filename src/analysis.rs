//! Turns the model's free-text rating response into structured digest entries.

use anyhow::Result;
use tracing::debug;

use crate::llm::generate_llm_response;
use crate::prompts;
use crate::rss::NewsItem;
use crate::{LLMParams, TARGET_LLM_REQUEST};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedItem {
    pub level: String,
    pub title: String,
    pub summary: String,
    pub link: String,
}

/// Rates every fetched headline in one model round trip. An empty result
/// means the model produced no parseable lines, which is a valid outcome.
pub async fn analyze_news(items: &[NewsItem], params: &LLMParams) -> Result<Vec<AnalyzedItem>> {
    let prompt = prompts::digest_prompt(items);
    let response = generate_llm_response(&prompt, params).await?;

    let analyzed = parse_response(&response, items);
    debug!(target: TARGET_LLM_REQUEST, "Parsed {} analyzed items from model response", analyzed.len());
    Ok(analyzed)
}

/// Parses one `LEVEL | title | summary` record per response line. Lines
/// without a pipe (blanks, preamble) are ignored. Only the first two pipes
/// split fields, so pipes inside the summary survive intact. The model keeps
/// the input order, so the n-th record takes the n-th headline's link; any
/// surplus record gets an empty link.
pub fn parse_response(response: &str, items: &[NewsItem]) -> Vec<AnalyzedItem> {
    let mut analyzed = Vec::new();

    for line in response.lines() {
        if !line.contains('|') {
            continue;
        }

        let mut fields = line.splitn(3, '|').map(str::trim);
        let level = fields.next().unwrap_or_default().to_string();
        let title = fields.next().unwrap_or_default().to_string();
        let summary = fields.next().unwrap_or_default().to_string();

        let link = items
            .get(analyzed.len())
            .map(|item| item.link.clone())
            .unwrap_or_default();

        analyzed.push(AnalyzedItem {
            level,
            title,
            summary,
            link,
        });
    }

    analyzed
}
