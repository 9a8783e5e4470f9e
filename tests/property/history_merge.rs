//! Properties of history merging and persistence

use proptest::collection::{hash_set, vec};
use proptest::prelude::*;
use std::collections::HashSet;
use tempfile::TempDir;
use wordcast::history::{merge_history, HistoryStore};

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// Duplicate-free history, as produced by earlier merges
fn unique_history(max: usize) -> impl Strategy<Value = Vec<String>> {
    hash_set(word(), 0..max).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn merged_history_is_capped_union(
        existing in unique_history(40),
        new_words in vec(word(), 0..20),
        cap in 1usize..60,
    ) {
        let merged = merge_history(&existing, &new_words, cap);

        let union: HashSet<&String> = existing.iter().chain(new_words.iter()).collect();
        prop_assert_eq!(merged.len(), cap.min(union.len()));

        let distinct: HashSet<&String> = merged.iter().collect();
        prop_assert_eq!(distinct.len(), merged.len());
        prop_assert!(merged.iter().all(|w| union.contains(w)));
    }

    #[test]
    fn merge_keeps_existing_order_then_new_order(
        existing in unique_history(30),
        new_words in vec(word(), 0..20),
    ) {
        let merged = merge_history(&existing, &new_words, usize::MAX);
        prop_assert_eq!(&merged[..existing.len()], &existing[..]);

        let mut expected_tail = Vec::new();
        let mut seen: HashSet<&String> = existing.iter().collect();
        for w in &new_words {
            if seen.insert(w) {
                expected_tail.push(w.clone());
            }
        }
        prop_assert_eq!(&merged[existing.len()..], &expected_tail[..]);
    }

    #[test]
    fn overflow_drops_oldest_first(
        existing in unique_history(30),
        new_words in vec(word(), 0..20),
        cap in 1usize..30,
    ) {
        let uncapped = merge_history(&existing, &new_words, usize::MAX);
        let capped = merge_history(&existing, &new_words, cap);
        prop_assert_eq!(&capped[..], &uncapped[uncapped.len() - capped.len()..]);
    }
}

#[test]
fn saving_nothing_new_round_trips() {
    let mut runner = proptest::test_runner::TestRunner::default();
    runner
        .run(&unique_history(25), |existing| {
            let temp_dir = TempDir::new().unwrap();
            let store = HistoryStore::new(temp_dir.path().join("vocab_history.json"), 1000);

            let written = store.save(&existing, &[]).unwrap();
            prop_assert_eq!(&written, &existing);
            prop_assert_eq!(store.load(), existing);
            Ok(())
        })
        .unwrap();
}
