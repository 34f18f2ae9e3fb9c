//! Recipient bookkeeping: a flat, newline-delimited list of chat ids.
//!
//! The list is read once and written at most once per run. Two overlapping
//! runs could race on the file; the bot is driven by a scheduler that runs
//! it once at a time, so no lock is taken.

use anyhow::{Context, Result};
use reqwest::Client;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

use crate::telegram;
use crate::TARGET_WEB_REQUEST;

/// Reads the persisted chat ids. A missing file is an empty set, not an
/// error: the bot may simply never have been messaged yet.
pub fn load_chat_ids(path: &Path) -> Result<BTreeSet<String>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()))
        }
    };

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

pub fn save_chat_ids(path: &Path, chat_ids: &BTreeSet<String>) -> Result<()> {
    let mut contents = String::new();
    for chat_id in chat_ids {
        contents.push_str(chat_id);
        contents.push('\n');
    }

    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// Unions the persisted set with the chat id of every message in the bot's
/// recent inbound updates. Nothing is written when the union is empty, so an
/// existing list is never clobbered by an empty inbox.
pub async fn discover_chat_ids(
    client: &Client,
    telegram_api: &str,
    path: &Path,
) -> Result<BTreeSet<String>> {
    let mut chat_ids = load_chat_ids(path)?;
    let known = chat_ids.len();

    let updates = telegram::get_updates(client, telegram_api).await?;
    for update in updates.result {
        if let Some(message) = update.message {
            chat_ids.insert(message.chat.id.to_string());
        }
    }

    if chat_ids.len() > known {
        info!(target: TARGET_WEB_REQUEST, "Discovered {} new chat id(s)", chat_ids.len() - known);
    }

    if !chat_ids.is_empty() {
        save_chat_ids(path, &chat_ids)?;
    }

    Ok(chat_ids)
}
