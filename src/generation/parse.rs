//! Best-effort extraction of vocabulary entries from model output.
//!
//! Model output is not guaranteed to follow the requested format. Extraction
//! strips code fences, tries a direct JSON parse, then falls back to the first
//! JSON array embedded in the text. This is a heuristic recovery path, not a
//! parser: anything it cannot recover yields an empty result and the raw text
//! is logged.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Deserializer, Map, Value};
use std::sync::OnceLock;
use tracing::{debug, warn};

pub const DEFAULT_DESCRIPTION_PLACEHOLDER: &str = "(설명 없음)";

/// One vocabulary item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    pub meaning: String,
    pub description: String,
    #[serde(rename = "example_en", alias = "example_foreign")]
    pub example_foreign: String,
    #[serde(rename = "example_kr", alias = "example_local")]
    pub example_local: String,
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```[A-Za-z0-9_-]*").expect("valid fence pattern"))
}

/// Remove code-fence markers (with or without a language tag).
pub fn strip_code_fences(text: &str) -> String {
    fence_regex().replace_all(text, "").trim().to_string()
}

/// Whether `items` holds at least one object with a `word` key.
fn has_entries(items: &[Value]) -> bool {
    items.iter().any(|item| item.get("word").is_some())
}

/// Turn a parsed JSON root into the list of candidate elements.
///
/// An object root is accepted when it wraps an array, e.g. `{"words": [...]}`.
/// The first array holding entry objects wins, then the first array of any
/// kind, in document order.
fn root_elements(root: Value) -> Option<Vec<Value>> {
    match root {
        Value::Array(items) => Some(items),
        Value::Object(map) => {
            let mut arrays: Vec<Vec<Value>> = map
                .into_iter()
                .filter_map(|(_, v)| match v {
                    Value::Array(items) => Some(items),
                    _ => None,
                })
                .collect();
            let index = arrays.iter().position(|a| has_entries(a)).unwrap_or(0);
            (index < arrays.len()).then(|| arrays.swap_remove(index))
        }
        _ => None,
    }
}

/// Find the first JSON array embedded in free text.
///
/// Every `[` is tried as the start of a JSON value; bracketed prose such as
/// `[Note]` or `[5 items]` does not parse and is skipped. An array holding
/// entry objects is preferred over an earlier array that holds none.
fn embedded_array(text: &str) -> Option<Vec<Value>> {
    let mut first_array = None;
    for (start, _) in text.match_indices('[') {
        let mut values = Deserializer::from_str(&text[start..]).into_iter::<Value>();
        if let Some(Ok(Value::Array(items))) = values.next() {
            if has_entries(&items) {
                return Some(items);
            }
            first_array.get_or_insert(items);
        }
    }
    first_array
}

fn parse_elements(text: &str) -> Option<Vec<Value>> {
    if let Ok(root) = serde_json::from_str::<Value>(text) {
        if let Some(items) = root_elements(root) {
            return Some(items);
        }
    }

    debug!("Direct parse failed, scanning for an embedded array");
    embedded_array(text)
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn to_entry(element: &Value, placeholder: &str) -> Option<VocabularyEntry> {
    let obj = element.as_object()?;
    let word = string_field(obj, &["word"])?;
    Some(VocabularyEntry {
        word,
        meaning: string_field(obj, &["meaning"]).unwrap_or_default(),
        description: string_field(obj, &["description"])
            .unwrap_or_else(|| placeholder.to_string()),
        example_foreign: string_field(obj, &["example_en", "example_foreign"]).unwrap_or_default(),
        example_local: string_field(obj, &["example_kr", "example_local"]).unwrap_or_default(),
    })
}

/// Extract vocabulary entries from raw model output.
///
/// Never fails: unrecoverable text yields an empty vector. Elements without a
/// non-empty string `word` are dropped.
pub fn extract_entries(raw: &str, description_placeholder: &str) -> Vec<VocabularyEntry> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        warn!("Generation response was empty");
        return Vec::new();
    }

    let Some(elements) = parse_elements(&cleaned) else {
        warn!(raw = %raw, "Could not extract a JSON array from generation response");
        return Vec::new();
    };

    let total = elements.len();
    let entries: Vec<VocabularyEntry> = elements
        .iter()
        .filter_map(|e| to_entry(e, description_placeholder))
        .collect();
    if entries.len() < total {
        debug!(dropped = total - entries.len(), "Dropped elements without a word");
    }
    entries
}
