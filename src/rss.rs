//! Feed fetching for the digest pipeline.

use anyhow::{anyhow, Result};
use feed_rs::model::Feed;
use feed_rs::parser;
use std::io;
use tracing::{debug, error, warn};

use crate::TARGET_WEB_REQUEST;

/// How many entries to keep from each feed, in feed-provided order.
pub const MAX_ENTRIES_PER_FEED: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
}

/// Helper function to validate a URL
pub fn is_valid_url(url: &str) -> bool {
    if let Ok(parsed) = url::Url::parse(url) {
        parsed.scheme() == "http" || parsed.scheme() == "https"
    } else {
        false
    }
}

/// Fetches every configured feed in order and concatenates the results.
/// A feed that fails to download or parse contributes nothing; an empty
/// overall result is a valid outcome, not an error.
pub async fn fetch_news(rss_urls: &[String]) -> Vec<NewsItem> {
    let mut items = Vec::new();

    for rss_url in rss_urls {
        if rss_url.trim().is_empty() {
            debug!(target: TARGET_WEB_REQUEST, "Skipping empty RSS URL");
            continue;
        }

        if !is_valid_url(rss_url) {
            debug!(target: TARGET_WEB_REQUEST, "Skipping invalid URL: {}", rss_url);
            continue;
        }

        debug!(target: TARGET_WEB_REQUEST, "Loading RSS feed from {}", rss_url);
        match fetch_feed(rss_url).await {
            Ok(feed) => {
                let entries = take_entries(feed);
                debug!(target: TARGET_WEB_REQUEST, "Keeping {} entries from {}", entries.len(), rss_url);
                items.extend(entries);
            }
            Err(err) => {
                error!(target: TARGET_WEB_REQUEST, "Failed to process feed {}: {}", rss_url, err);
            }
        }
    }

    items
}

async fn fetch_feed(rss_url: &str) -> Result<Feed> {
    let response = reqwest::get(rss_url).await?;
    if !response.status().is_success() {
        return Err(anyhow!("non-success status {} from {}", response.status(), rss_url));
    }

    let body = response.text().await?;
    let reader = io::Cursor::new(body);
    Ok(parser::parse(reader)?)
}

/// Takes at most the first `MAX_ENTRIES_PER_FEED` entries, in feed order.
/// Entries without a title or link are skipped.
fn take_entries(feed: Feed) -> Vec<NewsItem> {
    let mut items = Vec::new();

    for entry in feed.entries.into_iter().take(MAX_ENTRIES_PER_FEED) {
        let link = match entry.links.first() {
            Some(link) => link.href.clone(),
            None => {
                warn!(target: TARGET_WEB_REQUEST, "Feed entry missing link, skipping");
                continue;
            }
        };
        let title = match entry.title {
            Some(title) => title.content,
            None => {
                warn!(target: TARGET_WEB_REQUEST, "Feed entry missing title, skipping: {}", link);
                continue;
            }
        };
        items.push(NewsItem { title, link });
    }

    items
}
