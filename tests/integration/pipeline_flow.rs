//! End-to-end pipeline runs against scripted provider and webhook doubles

use super::test_utils::{fenced_response, generation_models, RecordingTransport, ScriptedClient};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use wordcast::error::ApiError;
use wordcast::generation::{ContentGenerator, TopicQuota, DEFAULT_DESCRIPTION_PLACEHOLDER};
use wordcast::history::HistoryStore;
use wordcast::notifier::{EmbedStyle, Notifier};
use wordcast::pipeline::{Pipeline, RunOptions, RunOutcome};
use wordcast::resolver::ModelResolver;

struct Harness {
    _temp_dir: TempDir,
    history_path: std::path::PathBuf,
}

impl Harness {
    fn new(initial_history: Option<&str>) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let history_path = temp_dir.path().join("vocab_history.json");
        if let Some(contents) = initial_history {
            fs::write(&history_path, contents).unwrap();
        }
        Self {
            _temp_dir: temp_dir,
            history_path,
        }
    }

    fn pipeline(&self, client: ScriptedClient, transport: RecordingTransport) -> Pipeline {
        let generator = ContentGenerator::new(
            vec![TopicQuota::new("AI technology", 1)],
            Duration::from_millis(1),
            DEFAULT_DESCRIPTION_PLACEHOLDER.to_string(),
        );
        Pipeline::new(
            Box::new(client),
            ModelResolver::default(),
            generator,
            Notifier::new(
                Box::new(transport),
                "https://discord.example/api/webhooks/1/token".to_string(),
                EmbedStyle::default(),
            ),
            HistoryStore::new(&self.history_path, 1000),
        )
    }

    fn history(&self) -> Vec<String> {
        let raw = fs::read_to_string(&self.history_path).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

#[tokio::test]
async fn test_successful_run_appends_delivered_words() {
    let harness = Harness::new(Some(r#"["refactor"]"#));
    let client = ScriptedClient::new(
        generation_models(&["gemini-1.5-pro", "gemini-1.5-flash"]),
        vec![Ok(fenced_response(&["latency"]))],
    );
    let prompts = client.prompts();
    let transport = RecordingTransport::new(204);
    let sent = transport.sent();

    let outcome = harness
        .pipeline(client, transport)
        .run(RunOptions::default())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Delivered {
            model: "gemini-1.5-flash".to_string(),
            words: vec!["latency".to_string()],
            history_len: 2,
        }
    );
    assert_eq!(harness.history(), vec!["refactor", "latency"]);

    let prompts = prompts.lock();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].0, "gemini-1.5-flash");
    assert!(prompts[0].1.contains("refactor"));

    let sent = sent.lock();
    assert_eq!(sent.len(), 1);
    let fields = &sent[0].embeds[0].fields;
    assert_eq!(fields.len(), 1);
    assert!(fields[0].name.contains("latency"));
}

#[tokio::test]
async fn test_unparseable_response_sends_nothing() {
    let harness = Harness::new(Some(r#"["refactor"]"#));
    let client = ScriptedClient::new(
        generation_models(&["gemini-1.5-flash"]),
        vec![Ok("I'm sorry, I can't help with that today.".to_string())],
    );
    let transport = RecordingTransport::new(204);
    let sent = transport.sent();

    let outcome = harness
        .pipeline(client, transport)
        .run(RunOptions::default())
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::NothingGenerated { .. }));
    assert!(sent.lock().is_empty());
    assert_eq!(harness.history(), vec!["refactor"]);
}

#[tokio::test]
async fn test_failed_delivery_leaves_history_untouched() {
    let harness = Harness::new(Some(r#"["refactor"]"#));
    let before = fs::read_to_string(&harness.history_path).unwrap();
    let client = ScriptedClient::new(
        generation_models(&["gemini-1.5-flash"]),
        vec![Ok(fenced_response(&["latency", "throughput"]))],
    );
    let transport = RecordingTransport::new(401);

    let result = harness
        .pipeline(client, transport)
        .run(RunOptions::default())
        .await;

    match result {
        Err(ApiError::DeliveryFailed { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected DeliveryFailed, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(&harness.history_path).unwrap(), before);
}

#[tokio::test]
async fn test_dry_run_generates_without_delivering() {
    let harness = Harness::new(None);
    let client = ScriptedClient::new(
        generation_models(&["gemini-1.5-flash"]),
        vec![Ok(fenced_response(&["latency"]))],
    );
    let transport = RecordingTransport::new(204);
    let sent = transport.sent();

    let outcome = harness
        .pipeline(client, transport)
        .run(RunOptions { dry_run: true })
        .await
        .unwrap();

    match outcome {
        RunOutcome::DryRun { entries, .. } => assert_eq!(entries[0].word, "latency"),
        other => panic!("expected DryRun, got {:?}", other),
    }
    assert!(sent.lock().is_empty());
    assert!(!harness.history_path.exists());
}

#[tokio::test]
async fn test_repeated_words_are_not_sent_again() {
    let harness = Harness::new(Some(r#"["refactor", "latency"]"#));
    let client = ScriptedClient::new(
        generation_models(&["gemini-1.5-flash"]),
        vec![Ok(fenced_response(&["Latency", "throughput"]))],
    );
    let transport = RecordingTransport::new(200);

    let outcome = harness
        .pipeline(client, transport)
        .run(RunOptions::default())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Delivered {
            model: "gemini-1.5-flash".to_string(),
            words: vec!["throughput".to_string()],
            history_len: 3,
        }
    );
    assert_eq!(harness.history(), vec!["refactor", "latency", "throughput"]);
}

#[tokio::test]
async fn test_corrupt_history_is_treated_as_empty_and_replaced() {
    let harness = Harness::new(Some("{not json"));
    let client = ScriptedClient::new(
        generation_models(&["gemini-1.5-flash"]),
        vec![Ok(fenced_response(&["latency"]))],
    );
    let prompts = client.prompts();
    let transport = RecordingTransport::new(204);

    harness
        .pipeline(client, transport)
        .run(RunOptions::default())
        .await
        .unwrap();

    assert!(!prompts.lock()[0].1.contains("Do NOT include"));
    assert_eq!(harness.history(), vec!["latency"]);
}

#[tokio::test]
async fn test_persistent_rate_limit_fails_run_without_delivery() {
    let harness = Harness::new(None);
    let client = ScriptedClient::new(
        generation_models(&["gemini-1.5-flash"]),
        vec![
            Err(ApiError::ProviderRateLimit("429".to_string())),
            Err(ApiError::ProviderRateLimit("429".to_string())),
        ],
    );
    let prompts = client.prompts();
    let transport = RecordingTransport::new(204);
    let sent = transport.sent();

    let result = harness
        .pipeline(client, transport)
        .run(RunOptions::default())
        .await;

    assert!(matches!(result, Err(ApiError::GenerationFailed(_))));
    assert_eq!(prompts.lock().len(), 2);
    assert!(sent.lock().is_empty());
    assert!(!harness.history_path.exists());
}
