//! Merge rules: defaults, override order.
//!
//! Only scalar defaults are registered here; structured defaults (topics,
//! preferred models) come from the serde defaults on `WordcastConfig` so a
//! partial file table does not wipe them out.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("history.path", "vocab_history.json")?
        .set_default("history.max_entries", 1000_i64)?
        .set_default("generation.rate_limit_backoff_secs", 5.0_f64)
}
