use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use super::Notifier;
use crate::api::error::error_chain;
use crate::core::config::{TelegramConfig, TelegramCredentials};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Telegram credentials not configured")]
    NotConfigured,

    #[error("invalid Telegram endpoint: {0}")]
    Endpoint(String),

    #[error("Telegram API returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Telegram request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the bot token.
        NotifyError::Transport(error_chain(&err.without_url()))
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

pub struct TelegramNotifier {
    client: Client,
    api_url: Url,
    credentials: Option<TelegramCredentials>,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            credentials: config.credentials.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Delivers `text` once, reporting why it did not go through.
    pub async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(NotifyError::NotConfigured)?;

        let url = self.send_message_url(&credentials.bot_token)?;
        let body = SendMessage {
            chat_id: &credentials.chat_id,
            text,
            parse_mode: "HTML",
        };

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    fn send_message_url(&self, bot_token: &str) -> Result<Url, NotifyError> {
        let base = self.api_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/bot{bot_token}/sendMessage"))
            .map_err(|e| NotifyError::Endpoint(e.to_string()))
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) {
        match self.send(text).await {
            Ok(()) => tracing::info!("✅ Telegram notification sent"),
            Err(NotifyError::NotConfigured) => {
                tracing::warn!("Telegram credentials not configured, dropping notification")
            }
            Err(e) => tracing::error!(error = %e, "❌ Failed to send Telegram notification"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier(credentials: Option<TelegramCredentials>) -> TelegramNotifier {
        let config = TelegramConfig {
            api_url: Url::parse("https://api.telegram.org/").unwrap(),
            credentials,
        };
        TelegramNotifier::new(&config, Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn test_configured_only_with_credentials() {
        let n = notifier(Some(TelegramCredentials {
            bot_token: "123:abc".to_string(),
            chat_id: "42".to_string(),
        }));
        assert!(n.is_configured());
        assert!(!notifier(None).is_configured());
    }

    #[test]
    fn test_send_message_url() {
        let n = notifier(None);
        let url = n.send_message_url("123:abc").unwrap();
        assert_eq!(url.as_str(), "https://api.telegram.org/bot123:abc/sendMessage");
    }

    #[test]
    fn test_payload_shape() {
        let body = SendMessage {
            chat_id: "-10042",
            text: "<b>hi</b>",
            parse_mode: "HTML",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"chat_id": "-10042", "text": "<b>hi</b>", "parse_mode": "HTML"})
        );
    }

    #[tokio::test]
    async fn test_missing_credentials_is_a_no_op() {
        let n = notifier(None);
        assert!(!n.is_configured());
        assert!(matches!(n.send("hello").await, Err(NotifyError::NotConfigured)));

        // Must return quietly.
        n.notify("hello").await;
    }
}
