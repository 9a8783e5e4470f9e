//! Model Provider
//!
//! HTTP client for the generation provider (Gemini REST API). The pipeline
//! only sees the [`GenerationClient`] trait, so resolver and generator logic
//! can be driven by scripted clients in tests.

use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Generation method a model must support to be usable.
pub const GENERATE_CONTENT_METHOD: &str = "generateContent";

/// Upper bound on model-list pages followed in one query.
const MAX_MODEL_PAGES: usize = 10;

/// A model advertised by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCandidate {
    /// Identifier with any `models/` prefix removed
    pub id: String,
    /// Whether the model supports text generation
    pub supports_generation: bool,
}

impl ModelCandidate {
    pub fn new(id: impl Into<String>, supports_generation: bool) -> Self {
        Self {
            id: id.into(),
            supports_generation,
        }
    }
}

/// Generation provider client trait
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// List the models available to the configured credential
    async fn list_models(&self) -> Result<Vec<ModelCandidate>, ApiError>;

    /// Send a single text prompt to `model` and return the response text
    ///
    /// A 429 from the provider maps to [`ApiError::ProviderRateLimit`]; the
    /// caller owns the retry policy.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ApiError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}

/// Connection settings for [`GeminiClient`]
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

// Gemini REST request/response structures
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelsPage {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

impl From<ModelInfo> for ModelCandidate {
    fn from(info: ModelInfo) -> Self {
        let supports_generation = info
            .supported_generation_methods
            .iter()
            .any(|m| m == GENERATE_CONTENT_METHOD);
        let id = info
            .name
            .strip_prefix("models/")
            .unwrap_or(&info.name)
            .to_string();
        ModelCandidate {
            id,
            supports_generation,
        }
    }
}

/// Map transport-level reqwest errors to ApiError
pub(crate) fn map_http_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::ProviderRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        ApiError::ProviderError(format!("HTTP error: {}", error))
    }
}

/// Map a non-success provider status to ApiError
fn map_status_error(status: u16, error_text: String) -> ApiError {
    match status {
        401 | 403 => ApiError::ProviderAuthFailed(format!("Authentication failed: {}", error_text)),
        429 => ApiError::ProviderRateLimit(format!("Rate limit exceeded: {}", error_text)),
        404 => ApiError::ProviderModelNotFound(format!("Model not found: {}", error_text)),
        _ => ApiError::ProviderRequestFailed(format!(
            "Request failed with status {}: {}",
            status, error_text
        )),
    }
}

pub(crate) fn build_http_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

/// Gemini REST client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, ApiError> {
        let client = build_http_client(settings.connect_timeout, settings.request_timeout)?;
        Ok(Self {
            client,
            api_key: settings.api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_models_page(&self, page_token: Option<&str>) -> Result<ModelsPage, ApiError> {
        let url = format!("{}/v1beta/models", self.base_url);
        let mut request = self.client.get(&url).header("x-goog-api-key", &self.api_key);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await.map_err(map_http_error)?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status_error(status, error_text));
        }

        response.json().await.map_err(|e| {
            ApiError::ProviderError(format!("Failed to parse models response: {}", e))
        })
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn list_models(&self) -> Result<Vec<ModelCandidate>, ApiError> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_MODEL_PAGES {
            let page = self.fetch_models_page(page_token.as_deref()).await?;
            models.extend(page.models.into_iter().map(ModelCandidate::from));
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(count = models.len(), "Fetched model list");
        Ok(models)
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ApiError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status_error(status, error_text));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ProviderError(format!("Failed to parse response: {}", e)))?;

        let text = completion
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}
