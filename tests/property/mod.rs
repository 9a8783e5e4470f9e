//! Property-based tests for history merging and response extraction

mod history_merge;
mod response_parsing;
