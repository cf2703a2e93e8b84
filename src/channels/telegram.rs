//! Telegram Bot API notifier.
//!
//! Only `sendMessage` is used; the bot never reads updates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::channels::Notifier;
use crate::error::ChannelError;

const CHANNEL: &str = "telegram";

const API_BASE: &str = "https://api.telegram.org";

/// Telegram API response wrapper.
/// https://core.telegram.org/bots/api#making-requests
#[derive(Debug, Deserialize)]
struct TelegramApiResponse<T> {
    /// True if the request was successful.
    ok: bool,

    /// Error description if not ok.
    description: Option<String>,

    /// Result on success.
    result: Option<T>,
}

/// Response from sendMessage.
#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends notifications to a single Telegram chat.
pub struct TelegramNotifier {
    client: Client,
    token: SecretString,
    chat_id: String,
    api_base: String,
}

impl TelegramNotifier {
    pub fn new(token: SecretString, chat_id: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            chat_id: chat_id.into(),
            api_base: API_BASE.to_string(),
        }
    }

    /// Point the notifier at a different Bot API server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base.trim_end_matches('/'),
            self.token.expose_secret(),
            method
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        CHANNEL
    }

    async fn notify(&self, message: &str) -> Result<(), ChannelError> {
        let payload = SendMessageRequest {
            chat_id: &self.chat_id,
            text: message,
        };

        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&payload)
            .send()
            .await
            .map_err(send_failed)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(send_failed)?;
        let message_id = parse_send_response(status, &body)?;

        tracing::debug!(chat_id = %self.chat_id, message_id, "Sent Telegram message");
        Ok(())
    }
}

fn send_failed(e: reqwest::Error) -> ChannelError {
    ChannelError::SendFailed {
        channel: CHANNEL.to_string(),
        // reqwest errors embed the URL, which carries the bot token.
        reason: e.without_url().to_string(),
    }
}

/// Interpret a sendMessage answer, returning the new message id.
fn parse_send_response(status: u16, body: &str) -> Result<i64, ChannelError> {
    let parsed: Result<TelegramApiResponse<SentMessage>, _> = serde_json::from_str(body);

    match parsed {
        Ok(resp) if resp.ok => Ok(resp.result.map(|r| r.message_id).unwrap_or(0)),
        Ok(resp) => Err(ChannelError::Rejected {
            channel: CHANNEL.to_string(),
            description: resp
                .description
                .unwrap_or_else(|| format!("status {status}")),
        }),
        Err(_) if status != 200 => Err(ChannelError::HttpStatus {
            channel: CHANNEL.to_string(),
            status,
            body: body.to_string(),
        }),
        Err(e) => Err(ChannelError::InvalidResponse {
            channel: CHANNEL.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url() {
        let notifier = TelegramNotifier::new(SecretString::from("123:abc".to_string()), "42");
        assert_eq!(
            notifier.method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );

        let local = notifier.with_api_base("http://localhost:8081/");
        assert_eq!(
            local.method_url("sendMessage"),
            "http://localhost:8081/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_payload_shape() {
        let payload = SendMessageRequest {
            chat_id: "42",
            text: "hello",
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"chat_id": "42", "text": "hello"})
        );
    }

    #[test]
    fn test_transport_error_maps_to_send_failed() {
        let err = Client::new()
            .get("https://api.telegram.org/bot123:secret-token/sendMessage")
            .header("bad header\n", "x")
            .build()
            .unwrap_err();
        match send_failed(err) {
            ChannelError::SendFailed { channel, reason } => {
                assert_eq!(channel, "telegram");
                assert!(!reason.contains("secret-token"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{"ok": true, "result": {"message_id": 99, "chat": {"id": 42}}}"#;
        assert_eq!(parse_send_response(200, body).unwrap(), 99);
    }

    #[test]
    fn test_parse_api_rejection() {
        let body = r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#;
        match parse_send_response(400, body).unwrap_err() {
            ChannelError::Rejected { description, .. } => {
                assert_eq!(description, "Bad Request: chat not found")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_non_json_error_page() {
        let err = parse_send_response(502, "Bad Gateway").unwrap_err();
        assert!(matches!(err, ChannelError::HttpStatus { status: 502, .. }));
    }

    #[test]
    fn test_parse_garbage_with_ok_status() {
        let err = parse_send_response(200, "not json").unwrap_err();
        assert!(matches!(err, ChannelError::InvalidResponse { .. }));
    }
}
