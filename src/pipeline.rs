//! Run pipeline
//!
//! One run walks `RESOLVE_MODEL → GENERATE → DELIVER → PERSIST_HISTORY`. Each
//! stage hands back a value; the run's outcome is decided here, once. History
//! is only written after a successful delivery, and only with the words that
//! were actually delivered.

use crate::error::ApiError;
use crate::generation::{ContentGenerator, GenerationOutcome, VocabularyEntry};
use crate::history::HistoryStore;
use crate::notifier::Notifier;
use crate::provider::GenerationClient;
use crate::resolver::ModelResolver;
use tracing::{info, instrument};

/// Per-run switches
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Generate but skip delivery and history persistence
    pub dry_run: bool,
}

/// How a run that did not fail ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Entries were delivered and history was updated
    Delivered {
        model: String,
        words: Vec<String>,
        history_len: usize,
    },
    /// The provider produced nothing usable; nothing was sent or stored
    NothingGenerated { model: String },
    /// Entries were generated but, by request, not delivered or stored
    DryRun {
        model: String,
        entries: Vec<VocabularyEntry>,
    },
}

/// The wired-up components for one run
pub struct Pipeline {
    client: Box<dyn GenerationClient>,
    resolver: ModelResolver,
    generator: ContentGenerator,
    notifier: Notifier,
    history: HistoryStore,
}

impl Pipeline {
    pub fn new(
        client: Box<dyn GenerationClient>,
        resolver: ModelResolver,
        generator: ContentGenerator,
        notifier: Notifier,
        history: HistoryStore,
    ) -> Self {
        Self {
            client,
            resolver,
            generator,
            notifier,
            history,
        }
    }

    #[instrument(skip(self), fields(provider = self.client.provider_name()))]
    pub async fn run(&self, options: RunOptions) -> Result<RunOutcome, ApiError> {
        let resolved = self.resolver.resolve(self.client.as_ref()).await;
        let model = resolved.id;

        let history = self.history.load();
        let entries = match self
            .generator
            .generate(self.client.as_ref(), &model, &history)
            .await?
        {
            GenerationOutcome::Empty => {
                info!(model = %model, "Nothing generated, ending run");
                return Ok(RunOutcome::NothingGenerated { model });
            }
            GenerationOutcome::Entries(entries) => entries,
        };

        if options.dry_run {
            info!(model = %model, count = entries.len(), "Dry run, skipping delivery");
            return Ok(RunOutcome::DryRun { model, entries });
        }

        let delivered = self.notifier.deliver(&entries).await?;
        let written = self.history.save(&history, &delivered)?;
        info!(
            model = %model,
            delivered = delivered.len(),
            history_len = written.len(),
            "Run completed"
        );

        Ok(RunOutcome::Delivered {
            model,
            words: delivered,
            history_len: written.len(),
        })
    }
}
