//! Thin wrapper around the Telegram Bot API plus the digest dispatcher.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use tracing::{error, info, warn};

use crate::recipients;
use crate::TARGET_WEB_REQUEST;

#[derive(Debug, Deserialize)]
pub struct UpdatesResponse {
    #[serde(default)]
    pub result: Vec<Update>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Fetches the bot's recent inbound updates. A non-success status (notably
/// 401 from a missing or bad token) is an error and aborts the run.
pub async fn get_updates(client: &Client, telegram_api: &str) -> Result<UpdatesResponse> {
    let url = format!("{}/getUpdates", telegram_api);
    let response = client
        .get(&url)
        .send()
        .await
        .context("getUpdates request failed")?;

    if !response.status().is_success() {
        return Err(anyhow!("getUpdates returned status {}", response.status()));
    }

    response
        .json::<UpdatesResponse>()
        .await
        .context("failed to decode getUpdates response")
}

/// Delivers one message to one chat. Transport failures are errors; an
/// API-level rejection is logged with Telegram's error body.
pub async fn send_message(
    client: &Client,
    telegram_api: &str,
    chat_id: &str,
    text: &str,
) -> Result<()> {
    let url = format!("{}/sendMessage", telegram_api);
    let response = client
        .post(&url)
        .form(&[("chat_id", chat_id), ("text", text)])
        .send()
        .await
        .with_context(|| format!("sendMessage request failed for chat {}", chat_id))?;

    if response.status().is_success() {
        info!(target: TARGET_WEB_REQUEST, "Digest sent to chat {}", chat_id);
    } else {
        let error_text = response.text().await.unwrap_or_default();
        error!(target: TARGET_WEB_REQUEST, "Error sending to chat {}: {}", chat_id, error_text);
    }

    Ok(())
}

/// Sends the digest to every known chat. With no recipients on file the
/// inbox is checked once for new chats; if there are still none the digest
/// is skipped, which is a soft outcome and not a failure of the run. One
/// failed delivery does not stop the remaining ones.
pub async fn send_report(
    client: &Client,
    telegram_api: &str,
    chat_ids_path: &Path,
    text: &str,
) -> Result<()> {
    let mut chat_ids = recipients::load_chat_ids(chat_ids_path)?;
    if chat_ids.is_empty() {
        chat_ids = recipients::discover_chat_ids(client, telegram_api, chat_ids_path).await?;
    }

    if chat_ids.is_empty() {
        warn!(target: TARGET_WEB_REQUEST, "No chat ids on file; message the bot on Telegram to subscribe");
        return Ok(());
    }

    for chat_id in &chat_ids {
        if let Err(err) = send_message(client, telegram_api, chat_id, text).await {
            error!(target: TARGET_WEB_REQUEST, "Delivery to chat {} failed: {}", chat_id, err);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_get_updates_response() {
        let body = r#"{
            "ok": true,
            "result": [
                {"update_id": 1, "message": {"message_id": 10, "chat": {"id": 42, "type": "private"}}},
                {"update_id": 2},
                {"update_id": 3, "message": {"message_id": 11, "chat": {"id": -100123, "type": "group"}}}
            ]
        }"#;

        let updates: UpdatesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(updates.result.len(), 3);
        assert_eq!(updates.result[0].message.as_ref().unwrap().chat.id, 42);
        assert!(updates.result[1].message.is_none());
        assert_eq!(updates.result[2].message.as_ref().unwrap().chat.id, -100123);
    }

    #[test]
    fn decodes_response_without_result_field() {
        let updates: UpdatesResponse = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(updates.result.is_empty());
    }
}
