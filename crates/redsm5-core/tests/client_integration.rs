//! Integration tests for the LLM client and generation pipeline against a mock server

use redsm5_core::concurrency::PermitPool;
use redsm5_core::config::{PipelineConfig, ProviderConfig};
use redsm5_core::dataset::{Example, read_jsonl};
use redsm5_core::generation::{Dispatcher, ExplanationGenerator, ResultRecord, ResultSink, SENTINEL};
use redsm5_core::llm::{ChatBackend, ChatMessage, ChatRequest, EmbeddingBackend, LlmClient};
use redsm5_core::{PipelineContext, Redsm5Error};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> ProviderConfig {
    ProviderConfig::new(server.uri())
        .with_api_key("test-key")
        .with_max_retries(2)
        .with_retry_base_delay_ms(0)
}

fn chat_response(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "llama3.1:8b",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
    })
}

#[tokio::test]
async fn test_chat_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"model": "llama3.1:8b", "stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(provider(&server), PermitPool::new(5)).unwrap();
    let request = ChatRequest::new("llama3.1:8b", vec![ChatMessage::user("hi")]);
    let completion = client.chat(&request).await.unwrap();

    assert_eq!(completion.content, "hello");
    assert!(!completion.is_truncated());
}

#[tokio::test]
async fn test_chat_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("recovered")))
        .mount(&server)
        .await;

    let client = LlmClient::new(provider(&server), PermitPool::new(5)).unwrap();
    let request = ChatRequest::new("llama3.1:8b", vec![ChatMessage::user("hi")]);
    let completion = client.chat(&request).await.unwrap();
    assert_eq!(completion.content, "recovered");
}

#[tokio::test]
async fn test_chat_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model 'nope' not found"))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(provider(&server), PermitPool::new(5)).unwrap();
    let request = ChatRequest::new("nope", vec![ChatMessage::user("hi")]);
    let err = client.chat(&request).await.unwrap_err();

    match err {
        Redsm5Error::Http { status_code, message, .. } => {
            assert_eq!(status_code, Some(404));
            assert!(message.contains("not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_requests_hold_a_permit_while_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_response("slow"))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let permits = PermitPool::new(1);
    let client = LlmClient::new(provider(&server), permits.clone()).unwrap();
    let request = ChatRequest::new("llama3.1:8b", vec![ChatMessage::user("hi")]);

    let in_flight = {
        let client = client.clone();
        let request = request.clone();
        tokio::spawn(async move { client.chat(&request).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(permits.available(), 0);
    in_flight.await.unwrap().unwrap();
    assert_eq!(permits.available(), 1);

    let start = Instant::now();
    let (a, b) = tokio::join!(client.chat(&request), client.chat(&request));
    assert!(a.is_ok() && b.is_ok());
    assert!(start.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_backoff_releases_the_permit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("recovered")))
        .mount(&server)
        .await;

    let permits = PermitPool::new(1);
    let config = ProviderConfig::new(server.uri())
        .with_max_retries(1)
        .with_retry_base_delay_ms(400);
    let client = LlmClient::new(config, permits.clone()).unwrap();

    let retrying = tokio::spawn(async move {
        let request = ChatRequest::new("llama3.1:8b", vec![ChatMessage::user("hi")]);
        client.chat(&request).await
    });
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(permits.available(), 1);

    let completion = retrying.await.unwrap().unwrap();
    assert_eq!(completion.content, "recovered");
}

#[tokio::test]
async fn test_embed_returns_first_vector() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .and(body_partial_json(json!({"model": "nomic-embed-text", "input": "some text"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"embeddings": [[0.1, 0.2, 0.3]]})),
        )
        .mount(&server)
        .await;

    let client = LlmClient::new(provider(&server), PermitPool::new(5)).unwrap();
    let vector = client.embed("nomic-embed-text", "some text").await.unwrap();
    assert_eq!(vector, vec![0.1, 0.2, 0.3]);
}

#[tokio::test]
async fn test_embed_without_embeddings_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"model": "nomic-embed-text"})),
        )
        .mount(&server)
        .await;

    let client = LlmClient::new(provider(&server), PermitPool::new(5)).unwrap();
    let vector = client.embed("nomic-embed-text", "x").await.unwrap();
    assert!(vector.is_empty());
}

#[tokio::test]
async fn test_generation_pipeline_end_to_end() {
    let server = MockServer::start().await;
    let valid = r#"{"explanation": "Hopelessness indicates depressed mood.", "chain_of_thought": "The writer says they feel hopeless daily."}"#;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(valid)))
        .mount(&server)
        .await;

    let mut config = PipelineConfig::default();
    config.provider = provider(&server);
    let train = vec![Example::new("I never sleep", "Sleep issues.")];
    let context = PipelineContext::new(config).with_few_shot(&train);

    let client = context.client().unwrap();
    let generator = ExplanationGenerator::new(Arc::new(client), &context);
    let dir = TempDir::new().unwrap();
    let sink = ResultSink::new(dir.path().join("results.jsonl"));

    let test = vec![
        Example::new("I feel hopeless every day.", "Depressed mood."),
        Example::new("Nothing brings me joy.", "Anhedonia."),
    ];
    let summary = Dispatcher::new(&generator, &sink, 1).run(test).await.unwrap();
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.fallbacks, 0);

    let records: Vec<ResultRecord> = read_jsonl(sink.path()).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].explanation_predicted, "Hopelessness indicates depressed mood.");
    assert_eq!(records[1].explanation_true, "Anhedonia.");
}

#[tokio::test]
async fn test_unreachable_server_yields_sentinel_records() {
    let mut config = PipelineConfig::default();
    config.provider = ProviderConfig::new("http://127.0.0.1:9")
        .with_max_retries(0)
        .with_retry_base_delay_ms(0);
    let context = PipelineContext::new(config);

    let generator = ExplanationGenerator::new(Arc::new(context.client().unwrap()), &context);
    let dir = TempDir::new().unwrap();
    let sink = ResultSink::new(dir.path().join("results.jsonl"));

    let summary = Dispatcher::new(&generator, &sink, 1)
        .run(vec![Example::new("I feel hopeless every day.", "ref")])
        .await
        .unwrap();
    assert_eq!(summary.fallbacks, 1);

    let records: Vec<ResultRecord> = read_jsonl(sink.path()).await.unwrap();
    assert_eq!(records[0].explanation_predicted, SENTINEL);
    assert_eq!(records[0].chain_of_thought, SENTINEL);
}
