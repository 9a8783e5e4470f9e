//! Model Resolver
//!
//! Picks the generation model for this run from what the credential can see.
//! Selection is advisory: the chosen identifier is only validated by the
//! generation call itself, and resolution always yields some identifier.

use crate::provider::{GenerationClient, ModelCandidate};
use tracing::{info, warn};

/// Known-good identifiers, most preferred first.
pub const DEFAULT_PREFERRED_MODELS: &[&str] = &[
    "gemini-1.5-flash",
    "gemini-1.5-flash-001",
    "gemini-1.5-flash-002",
    "gemini-1.5-pro",
    "gemini-1.5-pro-001",
    "gemini-1.0-pro",
    "gemini-pro",
];

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_MODEL_MARKER: &str = "gemini";
pub const DEFAULT_EXCLUDED_MARKER: &str = "vision";

/// Which rule picked the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Preferred,
    Marker,
    FirstAvailable,
    Default,
}

impl Selection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::Preferred => "preferred",
            Selection::Marker => "marker",
            Selection::FirstAvailable => "first_available",
            Selection::Default => "default",
        }
    }
}

/// A resolved model identifier and the rule that chose it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub id: String,
    pub selection: Selection,
    /// Generation-capable identifiers seen during resolution
    pub available: Vec<String>,
}

/// Model preference policy
#[derive(Debug, Clone)]
pub struct ModelResolver {
    preferred: Vec<String>,
    marker: String,
    excluded_marker: String,
    default_model: String,
}

impl Default for ModelResolver {
    fn default() -> Self {
        Self {
            preferred: DEFAULT_PREFERRED_MODELS.iter().map(|s| s.to_string()).collect(),
            marker: DEFAULT_MODEL_MARKER.to_string(),
            excluded_marker: DEFAULT_EXCLUDED_MARKER.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ModelResolver {
    pub fn new(
        preferred: Vec<String>,
        marker: String,
        excluded_marker: String,
        default_model: String,
    ) -> Self {
        Self {
            preferred,
            marker,
            excluded_marker,
            default_model,
        }
    }

    /// Apply the preference policy to an already-fetched model list.
    pub fn select(&self, candidates: &[ModelCandidate]) -> ResolvedModel {
        let available: Vec<String> = candidates
            .iter()
            .filter(|c| c.supports_generation)
            .map(|c| c.id.clone())
            .collect();

        let pick = |id: &str, selection: Selection| ResolvedModel {
            id: id.to_string(),
            selection,
            available: available.clone(),
        };

        if let Some(preferred) = self
            .preferred
            .iter()
            .find(|p| available.iter().any(|a| a == *p))
        {
            return pick(preferred, Selection::Preferred);
        }

        if let Some(marked) = available
            .iter()
            .find(|a| a.contains(&self.marker) && !a.contains(&self.excluded_marker))
        {
            return pick(marked, Selection::Marker);
        }

        if let Some(first) = available.first() {
            return pick(first, Selection::FirstAvailable);
        }

        pick(&self.default_model, Selection::Default)
    }

    /// Query the provider and pick a model. Never fails.
    pub async fn resolve(&self, client: &dyn GenerationClient) -> ResolvedModel {
        let candidates = match client.list_models().await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(
                    provider = client.provider_name(),
                    error = %e,
                    default = %self.default_model,
                    "Model list query failed, using default model"
                );
                Vec::new()
            }
        };

        let resolved = self.select(&candidates);
        info!(available = ?resolved.available, "Discovered generation models");
        if resolved.selection == Selection::Default {
            warn!(model = %resolved.id, "No generation models available, using default");
        } else {
            info!(model = %resolved.id, rule = resolved.selection.as_str(), "Selected model");
        }
        resolved
    }
}
