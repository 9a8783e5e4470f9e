//! Notifier
//!
//! Formats vocabulary entries as a single Discord embed and posts it to the
//! configured webhook. Delivery is attempted once per run; a non-success
//! status is reported to the caller and never retried.

use crate::error::ApiError;
use crate::generation::VocabularyEntry;
use crate::provider::build_http_client;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Discord embed limits
pub const MAX_EMBED_FIELDS: usize = 25;
pub const MAX_FIELD_NAME_CHARS: usize = 256;
pub const MAX_FIELD_VALUE_CHARS: usize = 1024;
/// Title, description, footer, and every field name and value combined
pub const MAX_EMBED_TOTAL_CHARS: usize = 6000;

const FIELD_MARKER: &str = "📌";
const MEANING_PREFIX: &str = "💡";
const DESCRIPTION_PREFIX: &str = "📖";
const FOREIGN_EXAMPLE_PREFIX: &str = "🇺🇸";
const LOCAL_EXAMPLE_PREFIX: &str = "🇰🇷";

/// Webhook message envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Static presentation of the embed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedStyle {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub footer: String,
}

impl Default for EmbedStyle {
    fn default() -> Self {
        Self {
            title: "📚 오늘의 영단어".to_string(),
            description: "축구 산업과 AI 기술에서 쓰이는 오늘의 단어입니다.".to_string(),
            color: 0x5865F2,
            footer: "wordcast · Gemini".to_string(),
        }
    }
}

/// Status and body returned by the webhook endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

/// Outbound transport for webhook messages
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post(&self, url: &str, message: &WebhookMessage) -> Result<WebhookResponse, ApiError>;
}

/// reqwest-backed webhook transport
pub struct HttpWebhookTransport {
    client: Client,
}

impl HttpWebhookTransport {
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_http_client(connect_timeout, request_timeout)?,
        })
    }
}

#[async_trait]
impl WebhookTransport for HttpWebhookTransport {
    async fn post(&self, url: &str, message: &WebhookMessage) -> Result<WebhookResponse, ApiError> {
        let response = self
            .client
            .post(url)
            .json(message)
            .send()
            .await
            .map_err(|e| ApiError::DeliveryRequestFailed(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(WebhookResponse { status, body })
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn format_field(entry: &VocabularyEntry) -> EmbedField {
    let value = format!(
        "{} {}\n{} {}\n{} {}\n{} {}",
        MEANING_PREFIX,
        entry.meaning,
        DESCRIPTION_PREFIX,
        entry.description,
        FOREIGN_EXAMPLE_PREFIX,
        entry.example_foreign,
        LOCAL_EXAMPLE_PREFIX,
        entry.example_local,
    );
    EmbedField {
        name: truncate_chars(&format!("{} {}", FIELD_MARKER, entry.word), MAX_FIELD_NAME_CHARS),
        value: truncate_chars(&value, MAX_FIELD_VALUE_CHARS),
        inline: false,
    }
}

/// Build the webhook message for `entries`.
///
/// Returns the message and the words it actually carries. Entries are taken
/// in order until the field count or the total embed size would be exceeded;
/// the rest are left out of both.
pub fn build_message(
    entries: &[VocabularyEntry],
    style: &EmbedStyle,
    now: DateTime<Utc>,
) -> (WebhookMessage, Vec<String>) {
    let mut total = style.title.chars().count()
        + style.description.chars().count()
        + style.footer.chars().count();
    let mut fields = Vec::new();
    let mut words = Vec::new();
    for entry in entries.iter().take(MAX_EMBED_FIELDS) {
        let field = format_field(entry);
        let size = field.name.chars().count() + field.value.chars().count();
        if total + size > MAX_EMBED_TOTAL_CHARS {
            break;
        }
        total += size;
        words.push(entry.word.clone());
        fields.push(field);
    }

    let message = WebhookMessage {
        content: None,
        embeds: vec![Embed {
            title: style.title.clone(),
            description: style.description.clone(),
            color: style.color,
            fields,
            footer: EmbedFooter {
                text: style.footer.clone(),
            },
            timestamp: now.to_rfc3339(),
        }],
    };
    (message, words)
}

/// Delivers vocabulary to a single webhook endpoint
pub struct Notifier {
    transport: Box<dyn WebhookTransport>,
    webhook_url: String,
    style: EmbedStyle,
}

impl Notifier {
    pub fn new(transport: Box<dyn WebhookTransport>, webhook_url: String, style: EmbedStyle) -> Self {
        Self {
            transport,
            webhook_url,
            style,
        }
    }

    /// Post `entries` and return the words that were delivered.
    ///
    /// HTTP 200 and 204 count as delivered; anything else is
    /// [`ApiError::DeliveryFailed`].
    pub async fn deliver(&self, entries: &[VocabularyEntry]) -> Result<Vec<String>, ApiError> {
        let (message, words) = build_message(entries, &self.style, Utc::now());
        if words.len() < entries.len() {
            warn!(
                dropped = entries.len() - words.len(),
                "Embed limits reached, some entries were not sent"
            );
        }

        let response = self.transport.post(&self.webhook_url, &message).await?;
        match response.status {
            200 | 204 => {
                info!(status = response.status, count = words.len(), "Webhook delivery succeeded");
                Ok(words)
            }
            status => {
                warn!(status, body = %response.body, "Webhook delivery failed");
                Err(ApiError::DeliveryFailed {
                    status,
                    body: response.body,
                })
            }
        }
    }
}
