//! wordcast: scheduled vocabulary drops
//!
//! Asks a generative-text provider for a handful of vocabulary entries, steers
//! it away from words sent on earlier runs, posts the result to a chat webhook,
//! and records what was delivered in a bounded local history file.

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod history;
pub mod logging;
pub mod notifier;
pub mod pipeline;
pub mod provider;
pub mod resolver;
