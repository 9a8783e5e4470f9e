//! Properties of vocabulary extraction from free-form responses

use proptest::prelude::*;
use wordcast::generation::{extract_entries, VocabularyEntry};

fn entry_strategy() -> impl Strategy<Value = VocabularyEntry> {
    (
        "[a-z]{1,10}",
        "[가-힣]{1,6}( [가-힣]{1,6})?",
        "[A-Z][a-z]{0,8}( [a-z]{1,8}){0,3}\\.",
    )
        .prop_map(|(word, meaning, example)| VocabularyEntry {
            word,
            meaning: meaning.clone(),
            description: format!("{} 설명", meaning),
            example_foreign: example,
            example_local: meaning,
        })
}

proptest! {
    #[test]
    fn fences_and_chatter_do_not_change_entries(
        entries in proptest::collection::vec(entry_strategy(), 1..6),
        lead in "[A-Za-z0-9 ,.!:()\\[\\]]{0,30}",
        tag in prop_oneof![Just(""), Just("json"), Just("JSON")],
    ) {
        let array = serde_json::to_string_pretty(&entries).unwrap();
        let wrapped = format!("{}\n```{}\n{}\n```\nHope this helps.", lead, tag, array);

        prop_assert_eq!(extract_entries(&array, "-"), entries.clone());
        prop_assert_eq!(extract_entries(&wrapped, "-"), entries);
    }

    #[test]
    fn text_without_brackets_yields_nothing(text in "[^\\[\\]]{0,200}") {
        prop_assert!(extract_entries(&text, "-").is_empty());
    }
}
