//! Forwarding proxy integration tests against a mocked downstream agent

use a2a_gateway::directory::AgentDescriptor;
use a2a_gateway::forwarding::ForwardingProxy;
use a2a_gateway::protocol::{AgentCapabilities, Task};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn descriptor(base_url: &str) -> AgentDescriptor {
    AgentDescriptor {
        identity: "search".to_string(),
        base_url: base_url.trim_end_matches('/').to_string(),
        capabilities: AgentCapabilities::default(),
    }
}

#[tokio::test]
async fn test_forward_delivers_downstream_response_verbatim() {
    let server = MockServer::start().await;
    let task = Task::from_user_text("What is Go?");

    let downstream_body = json!({
        "id": task.id,
        "status": {"state": "completed"},
        "messages": [
            {"role": "user", "parts": [{"text": "What is Go?"}]},
            {"role": "agent", "parts": [{"text": "Go is a programming language."}]}
        ]
    });

    // The proxy must post the envelope unmodified
    Mock::given(method("POST"))
        .and(path("/tasks/send"))
        .and(body_json(&task))
        .respond_with(ResponseTemplate::new(200).set_body_json(&downstream_body))
        .expect(1)
        .mount(&server)
        .await;

    let proxy = ForwardingProxy::new();
    let outcome = proxy
        .forward(&descriptor(&server.uri()), &task, Duration::from_secs(2))
        .await;

    assert!(!outcome.is_unreachable());
    let reply = outcome.into_task();
    assert_eq!(reply.id, task.id);
    assert_eq!(
        reply.messages.last().unwrap().text(),
        "Go is a programming language."
    );
}

#[tokio::test]
async fn test_error_status_becomes_failed_task() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/send"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let task = Task::from_user_text("hello");
    let proxy = ForwardingProxy::new();
    let outcome = proxy
        .forward(&descriptor(&server.uri()), &task, Duration::from_secs(2))
        .await;

    assert!(outcome.is_unreachable());
    let failed = outcome.into_task();
    assert_eq!(failed.id, task.id);
    assert!(failed.is_failed());

    let last = failed.messages.last().unwrap().text();
    assert!(last.contains(&server.uri()), "explanation names the target: {last}");
    assert!(last.contains("500"));
}

#[tokio::test]
async fn test_connection_refused_becomes_failed_task() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    drop(listener);

    let task = Task::from_user_text("use my local rag system");
    let proxy = ForwardingProxy::new();
    let outcome = proxy
        .forward(&descriptor(&url), &task, Duration::from_secs(2))
        .await;

    assert!(outcome.is_unreachable());
    let failed = outcome.into_task();
    assert_eq!(failed.id, task.id);
    assert!(failed.is_failed());
    assert_eq!(failed.messages[0].text(), "use my local rag system");
}

#[tokio::test]
async fn test_slow_downstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/send"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": uuid::Uuid::new_v4()}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let task = Task::from_user_text("hello");
    let proxy = ForwardingProxy::new();
    let outcome = proxy
        .forward(&descriptor(&server.uri()), &task, Duration::from_millis(100))
        .await;

    assert!(outcome.is_unreachable());
    let failed = outcome.into_task();
    assert!(failed.is_failed());
    assert!(failed.messages.last().unwrap().text().contains("timed out"));
}

#[tokio::test]
async fn test_unparseable_downstream_body_becomes_failed_task() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>surprise</html>"))
        .mount(&server)
        .await;

    let task = Task::from_user_text("hello");
    let proxy = ForwardingProxy::new();
    let outcome = proxy
        .forward(&descriptor(&server.uri()), &task, Duration::from_secs(2))
        .await;

    assert!(outcome.is_unreachable());
    let failed = outcome.into_task();
    assert_eq!(failed.id, task.id);
    assert!(failed.is_failed());
}
