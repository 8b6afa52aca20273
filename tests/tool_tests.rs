//! Tests for the built-in tools and the registry wiring.

mod common;

use std::sync::Arc;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use abacus::config::AbacusConfig;
use abacus::error::AbacusError;
use abacus::tools::calculator::CalculatorTool;
use abacus::tools::wikipedia::WikipediaTool;
use abacus::tools::{default_registry, Tool};
use common::MockProvider;

#[tokio::test]
async fn default_registry_has_the_three_capabilities() {
    let provider = Arc::new(MockProvider::new("test-model"));
    let registry = default_registry(provider, &AbacusConfig::new()).unwrap();

    assert_eq!(registry.names(), vec!["Calculator", "Wikipedia", "Reasoning"]);
    assert!(registry.get("Calculator").is_some());
    assert!(registry.get("calculator").is_none(), "lookup is exact");
}

#[tokio::test]
async fn calculator_is_idempotent_across_invocations() {
    let tool = CalculatorTool::new();
    let first = tool.invoke("12 * (3 + 4)").await.unwrap();
    let second = tool.invoke("12 * (3 + 4)").await.unwrap();
    assert_eq!(first, "84");
    assert_eq!(first, second);
}

#[tokio::test]
async fn calculator_rejects_word_problems() {
    let tool = CalculatorTool::new();
    let err = tool.invoke("how many bananas are left?").await.unwrap_err();
    assert!(matches!(err, AbacusError::ToolExecution { .. }));
}

#[tokio::test]
async fn wikipedia_formats_search_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("list", "search"))
        .and(query_param("srsearch", "banana"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": {
                "search": [
                    {
                        "title": "Banana",
                        "snippet": "A <span class=\"searchmatch\">banana</span> is an elongated berry"
                    },
                    {
                        "title": "Banana republic",
                        "snippet": "A politically unstable country"
                    }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tool = WikipediaTool::new().with_api_url(format!("{}/w/api.php", server.uri()));
    let output = tool.invoke("banana").await.unwrap();

    assert!(output.starts_with("Top Wikipedia results for 'banana':"));
    assert!(output.contains("- Banana: A banana is an elongated berry"));
    assert!(output.contains("- Banana republic: A politically unstable country"));
    assert!(!output.contains("searchmatch"), "markup must be stripped");
}

#[tokio::test]
async fn wikipedia_no_results_is_a_tool_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": {"search": []}
        })))
        .mount(&server)
        .await;

    let tool = WikipediaTool::new().with_api_url(format!("{}/w/api.php", server.uri()));
    let err = tool.invoke("zxqy nonsense").await.unwrap_err();

    match err {
        AbacusError::ToolExecution { tool_name, message } => {
            assert_eq!(tool_name, "Wikipedia");
            assert!(message.contains("no results"));
        }
        other => panic!("expected ToolExecution, got {other:?}"),
    }
}

#[tokio::test]
async fn wikipedia_upstream_failure_is_a_tool_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let tool = WikipediaTool::new().with_api_url(format!("{}/w/api.php", server.uri()));
    let err = tool.invoke("banana").await.unwrap_err();
    assert!(matches!(err, AbacusError::ToolExecution { .. }), "{err:?}");
}

#[tokio::test]
async fn reasoning_tool_delegates_to_the_provider() {
    let provider = Arc::new(MockProvider::new("test-model"));
    provider.queue_response("1. Point one.\n2. Point two.");

    let registry = default_registry(Arc::clone(&provider) as _, &AbacusConfig::new()).unwrap();
    let tool = registry.get("Reasoning").unwrap();

    let answer = tool
        .invoke("If I have twice as many oranges as apples, and 4 apples, how many oranges?")
        .await
        .unwrap();

    assert_eq!(answer, "1. Point one.\n2. Point two.");
    assert_eq!(provider.request_count(), 1);
    let prompt = &provider.last_request().unwrap().messages[0].content;
    assert!(prompt.contains("Question: If I have twice as many oranges"));
    assert!(prompt.contains("display it point-wise"));
}

#[tokio::test]
async fn reasoning_tool_wraps_upstream_failures() {
    let provider = Arc::new(MockProvider::new("test-model"));
    provider.queue_error(500, "boom");

    let registry = default_registry(Arc::clone(&provider) as _, &AbacusConfig::new()).unwrap();
    let tool = registry.get("Reasoning").unwrap();

    let err = tool.invoke("why?").await.unwrap_err();
    match err {
        AbacusError::ToolExecution { tool_name, .. } => assert_eq!(tool_name, "Reasoning"),
        other => panic!("expected ToolExecution, got {other:?}"),
    }
}
