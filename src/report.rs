//! Digest assembly: ordering, rendering and truncation.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::analysis::{analyze_news, AnalyzedItem};
use crate::rss::NewsItem;
use crate::LLMParams;

/// Telegram rejects messages over 4096 characters; 3900 leaves headroom.
pub const MAX_MSG_LEN: usize = 3900;

pub const NO_NEWS_PLACEHOLDER: &str = "⚠️ Brak newsów dziś";

const LEVEL_PRIORITY: [&str; 3] = ["HIGH", "MEDIUM", "LOW"];

/// Builds the digest for one run. With nothing fetched the fixed placeholder
/// is returned straight away and the model is never consulted.
pub async fn build_report(
    news: &[NewsItem],
    params: &LLMParams,
    today: NaiveDate,
) -> Result<String> {
    if news.is_empty() {
        return Ok(NO_NEWS_PLACEHOLDER.to_string());
    }

    let analyzed = analyze_news(news, params).await?;
    let ordered = order_by_level(analyzed)?;
    Ok(truncate(render(&ordered, today)))
}

fn level_priority(level: &str) -> Result<usize> {
    LEVEL_PRIORITY
        .iter()
        .position(|known| *known == level)
        .ok_or_else(|| anyhow!("model returned unknown importance level: {:?}", level))
}

/// Stable sort, HIGH first. An importance level outside the known three is
/// a malformed model response and fails the run rather than being coerced.
pub fn order_by_level(items: Vec<AnalyzedItem>) -> Result<Vec<AnalyzedItem>> {
    let mut keyed = Vec::with_capacity(items.len());
    for item in items {
        keyed.push((level_priority(&item.level)?, item));
    }

    keyed.sort_by_key(|(priority, _)| *priority);
    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}

fn level_emoji(level: &str) -> &'static str {
    match level {
        "HIGH" => "🚨",
        "MEDIUM" => "📌",
        _ => "ℹ️",
    }
}

pub fn render(items: &[AnalyzedItem], today: NaiveDate) -> String {
    let mut msg = format!("📅 {}\n🧠 *CRYPTO NEWS DIGEST GPT*\n\n", today);

    for item in items {
        msg.push_str(&format!(
            "{} {}\n{}\n{}\n{}\n\n",
            level_emoji(&item.level),
            item.level,
            item.title,
            item.summary,
            item.link
        ));
    }

    msg
}

/// Plain character cutoff, not word-boundary aware.
pub fn truncate(msg: String) -> String {
    match msg.char_indices().nth(MAX_MSG_LEN) {
        Some((idx, _)) => msg[..idx].to_string(),
        None => msg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::{config::OpenAIConfig, Client as OpenAIClient};

    fn item(level: &str, title: &str) -> AnalyzedItem {
        AnalyzedItem {
            level: level.to_string(),
            title: title.to_string(),
            summary: format!("summary of {}", title),
            link: format!("https://example.com/{}", title),
        }
    }

    fn test_params() -> LLMParams {
        // Any attempted completion with this key would fail, which is the
        // point: the placeholder path must never reach the model.
        LLMParams {
            client: OpenAIClient::with_config(OpenAIConfig::new().with_api_key("test-key")),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.2,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn empty_news_returns_placeholder_without_model_call() {
        let report = build_report(&[], &test_params(), today()).await.unwrap();
        assert_eq!(report, NO_NEWS_PLACEHOLDER);
    }

    #[test]
    fn orders_high_before_medium_before_low() {
        let ordered = order_by_level(vec![
            item("LOW", "a"),
            item("MEDIUM", "b"),
            item("HIGH", "c"),
            item("MEDIUM", "d"),
        ])
        .unwrap();

        let levels: Vec<&str> = ordered.iter().map(|i| i.level.as_str()).collect();
        assert_eq!(levels, ["HIGH", "MEDIUM", "MEDIUM", "LOW"]);
    }

    #[test]
    fn ties_keep_their_original_order() {
        let ordered = order_by_level(vec![
            item("MEDIUM", "first"),
            item("HIGH", "x"),
            item("MEDIUM", "second"),
            item("MEDIUM", "third"),
        ])
        .unwrap();

        let mediums: Vec<&str> = ordered
            .iter()
            .filter(|i| i.level == "MEDIUM")
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(mediums, ["first", "second", "third"]);
    }

    #[test]
    fn unknown_level_is_an_error() {
        let err = order_by_level(vec![item("CRITICAL", "a")]).unwrap_err();
        assert!(err.to_string().contains("CRITICAL"));
    }

    #[test]
    fn high_block_renders_before_low_block() {
        let ordered = order_by_level(vec![item("LOW", "B"), item("HIGH", "A")]).unwrap();
        let msg = render(&ordered, today());

        let high_pos = msg.find("🚨 HIGH\nA").unwrap();
        let low_pos = msg.find("ℹ️ LOW\nB").unwrap();
        assert!(high_pos < low_pos);
        assert!(msg.starts_with("📅 2025-06-01\n🧠 *CRYPTO NEWS DIGEST GPT*\n\n"));
    }

    #[test]
    fn report_never_exceeds_max_length() {
        let items: Vec<AnalyzedItem> = (0..200)
            .map(|n| item("MEDIUM", &format!("story number {} with a longish title", n)))
            .collect();

        let msg = truncate(render(&items, today()));
        assert!(msg.chars().count() <= MAX_MSG_LEN);
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let msg: String = "🚨".repeat(MAX_MSG_LEN + 10);
        let cut = truncate(msg);
        assert_eq!(cut.chars().count(), MAX_MSG_LEN);
    }

    #[test]
    fn short_report_is_untouched() {
        let msg = render(&[item("HIGH", "A")], today());
        assert_eq!(truncate(msg.clone()), msg);
    }
}
