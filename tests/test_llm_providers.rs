//! LLM provider integration tests against mocked provider APIs

use a2a_gateway::llm::provider::{
    CompletionRequest, LlmError, LlmProvider, Message, MessageRole,
};
use a2a_gateway::llm::providers::{AnthropicConfig, AnthropicProvider, OpenAiConfig, OpenAiProvider};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn classification_request() -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            Message {
                role: MessageRole::System,
                content: "Reply with exactly one word: RAG or SEARCH.".to_string(),
            },
            Message {
                role: MessageRole::User,
                content: "use my local rag system".to_string(),
            },
        ],
        model: "test-model".to_string(),
        max_tokens: Some(8),
        temperature: Some(0.0),
    }
}

fn openai_provider(base_url: &str) -> OpenAiProvider {
    OpenAiProvider::new(OpenAiConfig {
        api_key: "test-key".to_string(),
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(2),
    })
    .unwrap()
}

fn anthropic_provider(base_url: &str) -> AnthropicProvider {
    AnthropicProvider::new(AnthropicConfig {
        api_key: "test-key".to_string(),
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(2),
        version: "2023-06-01".to_string(),
    })
    .unwrap()
}

#[tokio::test]
async fn test_openai_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "test-model",
            "choices": [{"message": {"content": "RAG"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = openai_provider(&server.uri())
        .complete(classification_request())
        .await
        .unwrap();

    assert_eq!(response.content.as_deref(), Some("RAG"));
    assert_eq!(response.model, "test-model");
}

#[tokio::test]
async fn test_openai_rejected_key_is_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = openai_provider(&server.uri())
        .complete(classification_request())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::AuthenticationFailed(_)));
}

#[tokio::test]
async fn test_openai_server_error_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = openai_provider(&server.uri())
        .complete(classification_request())
        .await
        .unwrap_err();
    match err {
        LlmError::ApiError(detail) => assert!(detail.contains("500")),
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_openai_empty_choices_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "test-model",
            "choices": []
        })))
        .mount(&server)
        .await;

    let err = openai_provider(&server.uri())
        .complete(classification_request())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_anthropic_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "test-model",
            "content": [{"type": "text", "text": "SEARCH"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = anthropic_provider(&server.uri())
        .complete(classification_request())
        .await
        .unwrap();

    assert_eq!(response.content.as_deref(), Some("SEARCH"));
}

#[tokio::test]
async fn test_anthropic_non_text_blocks_yield_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "test-model",
            "content": []
        })))
        .mount(&server)
        .await;

    let response = anthropic_provider(&server.uri())
        .complete(classification_request())
        .await
        .unwrap();
    assert!(response.content.is_none());
}

#[tokio::test]
async fn test_anthropic_rejected_key_is_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = anthropic_provider(&server.uri())
        .complete(classification_request())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::AuthenticationFailed(_)));
}
