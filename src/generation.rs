//! Content Generator
//!
//! Prompt construction, the rate-limited generation call, and best-effort
//! extraction of vocabulary entries from free-form model output.

pub mod generator;
pub mod parse;
pub mod prompt;

pub use generator::{ContentGenerator, GenerationOutcome};
pub use parse::{extract_entries, VocabularyEntry, DEFAULT_DESCRIPTION_PLACEHOLDER};
pub use prompt::{build_prompt, TopicQuota};
