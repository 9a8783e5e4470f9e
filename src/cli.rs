//! CLI domain: parse, route, output, and presentation only.
//! No pipeline logic; a single route table dispatches to domain services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_history_json, format_history_text, format_models_json, format_models_text,
    format_run_outcome_text,
};
pub use route::RunContext;
