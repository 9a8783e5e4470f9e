//! Webhook delivery over HTTP against a local mock server

use super::test_utils::entry;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordcast::error::ApiError;
use wordcast::notifier::{EmbedStyle, HttpWebhookTransport, Notifier, MAX_EMBED_FIELDS};

const WEBHOOK_PATH: &str = "/api/webhooks/123/token";

fn notifier(server: &MockServer) -> Notifier {
    let transport = HttpWebhookTransport::new(Duration::from_secs(2), Duration::from_secs(5)).unwrap();
    Notifier::new(
        Box::new(transport),
        format!("{}{}", server.uri(), WEBHOOK_PATH),
        EmbedStyle::default(),
    )
}

#[tokio::test]
async fn test_no_content_response_counts_as_delivered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let words = notifier(&server)
        .deliver(&[entry("latency"), entry("throughput")])
        .await
        .unwrap();
    assert_eq!(words, vec!["latency", "throughput"]);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let embed = &body["embeds"][0];
    assert_eq!(embed["title"], "📚 오늘의 영단어");
    assert_eq!(embed["color"], 0x5865F2);
    assert_eq!(embed["fields"].as_array().unwrap().len(), 2);
    assert_eq!(embed["fields"][0]["name"], "📌 latency");
    assert_eq!(embed["fields"][0]["inline"], false);
    assert!(embed["fields"][0]["value"]
        .as_str()
        .unwrap()
        .contains("💡 지연 시간"));
    assert!(body.get("content").is_none());
}

#[tokio::test]
async fn test_error_status_is_a_delivery_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    match notifier(&server).deliver(&[entry("latency")]).await {
        Err(ApiError::DeliveryFailed { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected DeliveryFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_entries_past_field_limit_are_not_reported_delivered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let entries: Vec<_> = (0..MAX_EMBED_FIELDS + 3)
        .map(|i| entry(&format!("word{}", i)))
        .collect();
    let words = notifier(&server).deliver(&entries).await.unwrap();
    assert_eq!(words.len(), MAX_EMBED_FIELDS);
    assert_eq!(words.last().map(String::as_str), Some("word24"));
}
