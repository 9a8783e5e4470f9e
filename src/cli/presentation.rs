//! Presentation: text/json formatting for run outcomes, models, and history.

use crate::error::{ApiError, StorageError};
use crate::pipeline::RunOutcome;
use crate::resolver::ResolvedModel;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

fn to_json_string(value: &serde_json::Value) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::StorageError(StorageError::Serialization(e.to_string())))
}

pub fn format_run_outcome_text(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Delivered {
            model,
            words,
            history_len,
        } => format!(
            "{} Delivered {} word(s) with {}: {}\nHistory now holds {} word(s).",
            "✔".green(),
            words.len(),
            model,
            words.join(", "),
            history_len
        ),
        RunOutcome::NothingGenerated { model } => format!(
            "{} {} returned no usable vocabulary; nothing was sent.",
            "•".yellow(),
            model
        ),
        RunOutcome::DryRun { model, entries } => {
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Word", "Meaning", "Example"]);
            for entry in entries {
                table.add_row(vec![&entry.word, &entry.meaning, &entry.example_foreign]);
            }
            format!(
                "{}\nDry run with {}: {} word(s) generated, nothing sent.\n{}",
                "Dry run".bold().underline(),
                model,
                entries.len(),
                table
            )
        }
    }
}

pub fn format_models_text(resolved: &ResolvedModel) -> String {
    let mut output = format!("{}\n", "Generation models".bold().underline());
    if resolved.available.is_empty() {
        output.push_str("No generation-capable models were listed.\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Model", "Selected"]);
        for id in &resolved.available {
            let selected = if *id == resolved.id { "✔" } else { "" };
            table.add_row(vec![id.as_str(), selected]);
        }
        output.push_str(&format!("{}\n", table));
    }
    output.push_str(&format!(
        "\nSelected: {} (rule: {})",
        resolved.id,
        resolved.selection.as_str()
    ));
    output
}

pub fn format_models_json(resolved: &ResolvedModel) -> Result<String, ApiError> {
    to_json_string(&json!({
        "selected": resolved.id,
        "rule": resolved.selection.as_str(),
        "available": resolved.available,
    }))
}

/// Tail of `words` to display, oldest first, with its 1-based starting index
fn history_window(words: &[String], limit: Option<usize>) -> (usize, &[String]) {
    let start = limit.map(|n| words.len().saturating_sub(n)).unwrap_or(0);
    (start + 1, &words[start..])
}

pub fn format_history_text(words: &[String], limit: Option<usize>) -> String {
    if words.is_empty() {
        return "History is empty.".to_string();
    }
    let (first_index, shown) = history_window(words, limit);
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Word"]);
    for (offset, word) in shown.iter().enumerate() {
        table.add_row(vec![(first_index + offset).to_string(), word.clone()]);
    }
    format!(
        "{}\n{}\nShowing {} of {} word(s).",
        "History".bold().underline(),
        table,
        shown.len(),
        words.len()
    )
}

pub fn format_history_json(words: &[String], limit: Option<usize>) -> Result<String, ApiError> {
    let (_, shown) = history_window(words, limit);
    to_json_string(&json!({ "total": words.len(), "words": shown }))
}
