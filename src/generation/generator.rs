//! Generation call with a single rate-limit retry, followed by extraction and
//! history filtering.

use crate::error::ApiError;
use crate::generation::parse::{extract_entries, VocabularyEntry, DEFAULT_DESCRIPTION_PLACEHOLDER};
use crate::generation::prompt::{build_prompt, default_topics, TopicQuota};
use crate::provider::GenerationClient;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(5);

/// Result of a generation stage that did not fail outright
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// At least one usable entry
    Entries(Vec<VocabularyEntry>),
    /// The provider answered but nothing usable came out of it
    Empty,
}

impl GenerationOutcome {
    pub fn entries(&self) -> &[VocabularyEntry] {
        match self {
            GenerationOutcome::Entries(entries) => entries,
            GenerationOutcome::Empty => &[],
        }
    }
}

/// Builds the prompt, calls the provider, and extracts entries
#[derive(Debug, Clone)]
pub struct ContentGenerator {
    topics: Vec<TopicQuota>,
    rate_limit_backoff: Duration,
    description_placeholder: String,
}

impl Default for ContentGenerator {
    fn default() -> Self {
        Self {
            topics: default_topics(),
            rate_limit_backoff: DEFAULT_RATE_LIMIT_BACKOFF,
            description_placeholder: DEFAULT_DESCRIPTION_PLACEHOLDER.to_string(),
        }
    }
}

impl ContentGenerator {
    pub fn new(
        topics: Vec<TopicQuota>,
        rate_limit_backoff: Duration,
        description_placeholder: String,
    ) -> Self {
        Self {
            topics,
            rate_limit_backoff,
            description_placeholder,
        }
    }

    /// Generate vocabulary entries with `model`, steering away from `history`.
    pub async fn generate(
        &self,
        client: &dyn GenerationClient,
        model: &str,
        history: &[String],
    ) -> Result<GenerationOutcome, ApiError> {
        let prompt = build_prompt(&self.topics, history);
        debug!(model, history_len = history.len(), "Requesting vocabulary");

        let raw = self.call_with_retry(client, model, &prompt).await?;
        let parsed = extract_entries(&raw, &self.description_placeholder);
        let entries = filter_against_history(parsed, history);

        if entries.is_empty() {
            info!(model, "No usable vocabulary in generation response");
            Ok(GenerationOutcome::Empty)
        } else {
            info!(model, count = entries.len(), "Generated vocabulary");
            Ok(GenerationOutcome::Entries(entries))
        }
    }

    async fn call_with_retry(
        &self,
        client: &dyn GenerationClient,
        model: &str,
        prompt: &str,
    ) -> Result<String, ApiError> {
        match client.generate(model, prompt).await {
            Err(ApiError::ProviderRateLimit(first)) => {
                warn!(
                    model,
                    backoff_secs = self.rate_limit_backoff.as_secs_f64(),
                    error = %first,
                    "Rate limited, retrying once"
                );
                tokio::time::sleep(self.rate_limit_backoff).await;
                match client.generate(model, prompt).await {
                    Err(ApiError::ProviderRateLimit(second)) => Err(ApiError::GenerationFailed(
                        format!("still rate limited after one retry: {}", second),
                    )),
                    other => other,
                }
            }
            other => other,
        }
    }
}

/// Drop entries whose word is already in `history` or repeated earlier in the
/// same response. Comparison ignores case and surrounding whitespace.
fn filter_against_history(
    entries: Vec<VocabularyEntry>,
    history: &[String],
) -> Vec<VocabularyEntry> {
    let issued: HashSet<String> = history.iter().map(|w| w.trim().to_lowercase()).collect();
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries {
        let key = entry.word.trim().to_lowercase();
        if issued.contains(&key) {
            warn!(word = %entry.word, "Provider returned a word already in history, dropping");
            continue;
        }
        if !seen.insert(key) {
            debug!(word = %entry.word, "Duplicate word in response, dropping");
            continue;
        }
        kept.push(entry);
    }
    kept
}
