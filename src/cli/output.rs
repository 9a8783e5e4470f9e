//! CLI output: error mapping from domain errors to the CLI surface.

use crate::config::{API_KEY_VAR, WEBHOOK_URL_VAR};
use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::ConfigurationMissing(_) => format!(
            "{}\n\nSet {} and {} in the environment or in a .env file.",
            e, API_KEY_VAR, WEBHOOK_URL_VAR
        ),
        ApiError::DeliveryFailed { .. } => {
            format!("{}\n\nHistory was not updated; the words can be sent again.", e)
        }
        _ => e.to_string(),
    }
}
