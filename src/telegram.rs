use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Delivery seam for the loop driver: it only ever sees this trait.
#[async_trait]
pub trait Notify: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), Error>;
}

/// Sends plain-text messages to one fixed chat via the Bot API.
pub struct TelegramNotifier {
    client: reqwest::Client,
    base_url: String,
    token: String,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramNotifier {
    pub fn new(token: String, chat_id: String) -> Self {
        Self::with_base_url(TELEGRAM_API_BASE.to_string(), token, chat_id)
    }

    pub fn with_base_url(base_url: String, token: String, chat_id: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build reqwest client"),
            base_url,
            token,
            chat_id,
        }
    }

    /// getMe probe, run once at startup; an unusable bot token aborts
    /// the process before the loop starts.
    pub async fn get_me(&self) -> Result<(), Error> {
        let url = format!("{}/bot{}/getMe", self.base_url, self.token);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Delivery(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Error::Delivery(format!(
                "getMe: код ответа {}",
                resp.status().as_u16()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Notify for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), Error> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let resp = self
            .client
            .post(&url)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            .map_err(|e| Error::Delivery(e.to_string()))?;

        if !resp.status().is_success() {
            let code = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(256)
                .collect::<String>();
            return Err(Error::Delivery(format!("код ответа {code}: {body}")));
        }

        // The Bot API can return 200 with ok=false.
        let body: Value = resp
            .json()
            .await
            .map_err(|e| Error::Delivery(format!("не удалось разобрать ответ: {e}")))?;
        if body.get("ok").and_then(|v| v.as_bool()) != Some(true) {
            return Err(Error::Delivery(format!("Bot API отклонил сообщение: {body}")));
        }

        tracing::info!("Sent telegram message: {text}");
        Ok(())
    }
}
