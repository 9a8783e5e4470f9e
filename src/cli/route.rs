//! CLI route: single route table and run context. Dispatches to the pipeline
//! and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_history_json, format_history_text, format_models_json, format_models_text,
    format_run_outcome_text,
};
use crate::config::{Secrets, WordcastConfig};
use crate::error::ApiError;
use crate::generation::ContentGenerator;
use crate::history::HistoryStore;
use crate::notifier::{HttpWebhookTransport, Notifier};
use crate::pipeline::{Pipeline, RunOptions};
use crate::provider::{GeminiClient, GeminiSettings};

/// Runtime context for CLI execution: the loaded configuration and a way to
/// look up secrets.
pub struct RunContext {
    config: WordcastConfig,
    lookup: Box<dyn Fn(&str) -> Option<String>>,
}

impl RunContext {
    /// Create a run context that reads secrets from the process environment.
    pub fn new(config: WordcastConfig) -> Self {
        Self::with_secret_lookup(config, |key| std::env::var(key).ok())
    }

    /// Create a run context with an explicit secret lookup.
    pub fn with_secret_lookup<F>(config: WordcastConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        Self {
            config,
            lookup: Box::new(lookup),
        }
    }

    pub fn history_store(&self) -> HistoryStore {
        HistoryStore::new(self.config.history.path.clone(), self.config.history.max_entries)
    }

    fn generation_client(&self, api_key: String) -> Result<GeminiClient, ApiError> {
        GeminiClient::new(GeminiSettings {
            api_key,
            base_url: self.config.provider.base_url.clone(),
            connect_timeout: self.config.provider.connect_timeout(),
            request_timeout: self.config.provider.request_timeout(),
        })
    }

    /// Wire up a pipeline against the real provider and webhook.
    pub fn build_pipeline(&self, secrets: Secrets) -> Result<Pipeline, ApiError> {
        let client = self.generation_client(secrets.api_key)?;
        let transport = HttpWebhookTransport::new(
            self.config.provider.connect_timeout(),
            self.config.provider.request_timeout(),
        )?;
        let generation = &self.config.generation;
        let generator = ContentGenerator::new(
            generation.topics.clone(),
            generation.rate_limit_backoff(),
            generation.description_placeholder.clone(),
        );
        let notifier = Notifier::new(
            Box::new(transport),
            secrets.webhook_url,
            self.config.delivery.embed_style(),
        );
        Ok(Pipeline::new(
            Box::new(client),
            self.config.provider.resolver(),
            generator,
            notifier,
            self.history_store(),
        ))
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Run { dry_run } => self.handle_run(*dry_run),
            Commands::Models { format } => self.handle_models(format),
            Commands::History { limit, format } => self.handle_history(*limit, format),
        }
    }

    fn handle_run(&self, dry_run: bool) -> Result<String, ApiError> {
        // Both secrets are required before anything touches the network.
        let secrets = Secrets::from_lookup(|key| (self.lookup)(key))?;
        let pipeline = self.build_pipeline(secrets)?;
        let outcome = block_on(pipeline.run(RunOptions { dry_run }))??;
        Ok(format_run_outcome_text(&outcome))
    }

    fn handle_models(&self, format: &str) -> Result<String, ApiError> {
        let api_key = Secrets::api_key_from_lookup(|key| (self.lookup)(key))?;
        let client = self.generation_client(api_key)?;
        let resolver = self.config.provider.resolver();
        let resolved = block_on(resolver.resolve(&client))?;
        match format {
            "json" => format_models_json(&resolved),
            "text" => Ok(format_models_text(&resolved)),
            other => Err(unsupported_format(other)),
        }
    }

    fn handle_history(&self, limit: Option<usize>, format: &str) -> Result<String, ApiError> {
        let words = self.history_store().load();
        match format {
            "json" => format_history_json(&words, limit),
            "text" => Ok(format_history_text(&words, limit)),
            other => Err(unsupported_format(other)),
        }
    }
}

fn unsupported_format(format: &str) -> ApiError {
    ApiError::ConfigError(format!(
        "Unsupported output format: {} (must be 'text' or 'json')",
        format
    ))
}

/// Run `future` to completion on a fresh runtime.
fn block_on<F, T>(future: F) -> Result<T, ApiError>
where
    F: std::future::Future<Output = T>,
{
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(ApiError::ProviderError(
            "Cannot run the pipeline from within an async runtime context".to_string(),
        ));
    }
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create runtime: {}", e)))?;
    Ok(rt.block_on(future))
}
