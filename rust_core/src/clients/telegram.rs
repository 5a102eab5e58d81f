use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::errors::PollError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Plain-text message delivery to a single Telegram chat.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    base_url: String,
    token: String,
    chat_id: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramClient {
    pub fn new(token: String, chat_id: String) -> Self {
        Self::with_base_url(TELEGRAM_API_BASE.to_string(), token, chat_id)
    }

    pub fn with_base_url(base_url: String, token: String, chat_id: String) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            token,
            chat_id,
        }
    }

    /// Send a plain-text message to the configured chat.
    ///
    /// Any failure maps to `PollError::Delivery`; callers log and swallow it
    /// so a flaky provider can never take the poll loop down.
    pub async fn send_message(&self, text: &str) -> Result<(), PollError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.base_url.trim_end_matches('/'),
            self.token
        );
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PollError::Delivery(format!("telegram request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PollError::Delivery(format!(
                "telegram API non-2xx: {status} body={body}"
            )));
        }

        debug!("message {:?} delivered to chat {}", text, self.chat_id);
        Ok(())
    }
}
