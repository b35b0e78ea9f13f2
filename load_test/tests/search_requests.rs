//! Request-level tests against a mock search API.

use reqwest::Url;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use search_load_test::auth::BearerToken;
use search_load_test::client::{ClientOptions, SearchClient};
use search_load_test::error::TaskError;
use search_load_test::metrics::collector::MetricsCollector;
use search_load_test::tasks::{self, CountSearch, FilterSearch, KeywordSearch, SearchTask, TemplateSearch};
use search_load_test::user::{SimulatedUser, UserIdAllocator};

// ============================================================================
// Helper Functions
// ============================================================================

fn search_client(server: &MockServer, options: ClientOptions) -> SearchClient {
    let host = Url::parse(&server.uri()).unwrap();
    SearchClient::new(&host, options).unwrap()
}

fn user_with_token(token: &str) -> SimulatedUser {
    SimulatedUser::start(&UserIdAllocator::new(), BearerToken::new(token).unwrap())
}

fn ok_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"data": {"search": [{"items": []}]}}))
}

// ============================================================================
// TEST: Request shape
// ============================================================================

#[tokio::test]
async fn test_filter_search_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/searchapi/graphql"))
        .and(query_param("op", "searchByFilter"))
        .and(header("Authorization", "Bearer tok"))
        .and(body_json(json!({
            "query": tasks::filter::QUERY,
            "variables": {
                "input": [{
                    "filters": [{"property": "namespace", "values": ["default"]}],
                    "limit": 1000
                }]
            }
        })))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;

    let client = search_client(
        &server,
        ClientOptions {
            tag_operations: true,
            ..Default::default()
        },
    );
    let user = user_with_token("tok");
    let collector = MetricsCollector::new();

    let status = user.execute(&client, &FilterSearch, &collector).await.unwrap();
    assert_eq!(status, 200);

    let snapshot = collector.get_snapshot();
    assert_eq!(snapshot.requests.succeeded, 1);
    assert_eq!(snapshot.operations["searchByFilter"].requests, 1);
}

#[tokio::test]
async fn test_every_request_carries_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/searchapi/graphql"))
        .respond_with(ok_response())
        .mount(&server)
        .await;

    let client = search_client(&server, ClientOptions::default());
    let user = user_with_token("abc123");
    let collector = MetricsCollector::new();

    let catalog = tasks::catalog();
    for name in catalog.operation_names() {
        let task = catalog.get(name).unwrap();
        user.execute(&client, task.as_ref(), &collector).await.unwrap();
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), catalog.len());
    for request in requests {
        let auth = request.headers.get("authorization").unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer abc123");
        let content_type = request.headers.get("content-type").unwrap();
        assert_eq!(content_type.to_str().unwrap(), "application/json");
    }
}

#[tokio::test]
async fn test_untagged_requests_have_no_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/searchapi/graphql"))
        .respond_with(ok_response())
        .mount(&server)
        .await;

    let client = search_client(&server, ClientOptions::default());
    let user = user_with_token("tok");
    user.execute(&client, &KeywordSearch, &MetricsCollector::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_count_search_body_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"search": []}})))
        .mount(&server)
        .await;

    let client = search_client(&server, ClientOptions::default());
    user_with_token("tok")
        .execute(&client, &CountSearch, &MetricsCollector::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let input = body["variables"]["input"].as_array().unwrap();
    assert_eq!(input.len(), 2);
    assert_eq!(input[0]["filters"][0]["values"], json!(["Pod"]));
    assert_eq!(input[1]["filters"][0]["values"], json!(["Deployment"]));
}

// ============================================================================
// TEST: Failure handling
// ============================================================================

#[tokio::test]
async fn test_http_error_is_a_failed_sample() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = search_client(&server, ClientOptions::default());
    let collector = MetricsCollector::new();
    let err = user_with_token("tok")
        .execute(&client, &KeywordSearch, &collector)
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::Status { status: 500 }));
    let snapshot = collector.get_snapshot();
    assert_eq!(snapshot.requests.failed, 1);
    assert_eq!(snapshot.operations["searchByKeyword"].failures, 1);
}

#[tokio::test]
async fn test_graphql_errors_only_fail_when_validating() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": null, "errors": [{"message": "not authorized"}]})),
        )
        .mount(&server)
        .await;

    let user = user_with_token("tok");

    let lenient = search_client(&server, ClientOptions::default());
    assert!(user
        .execute(&lenient, &FilterSearch, &MetricsCollector::new())
        .await
        .is_ok());

    let strict = search_client(
        &server,
        ClientOptions {
            validate_responses: true,
            ..Default::default()
        },
    );
    let err = user
        .execute(&strict, &FilterSearch, &MetricsCollector::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not authorized"));
}

#[tokio::test]
async fn test_connection_refused_is_a_failed_sample() {
    // Port 9 (discard) is closed on test hosts
    let host = Url::parse("http://127.0.0.1:9").unwrap();
    let client = SearchClient::new(&host, ClientOptions::default()).unwrap();
    let collector = MetricsCollector::new();

    let err = user_with_token("tok")
        .execute(&client, &KeywordSearch, &collector)
        .await
        .unwrap_err();
    assert!(matches!(err, TaskError::Transport(_)));
    assert_eq!(collector.get_snapshot().requests.failed, 1);
}

#[tokio::test]
async fn test_missing_template_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok_response())
        .expect(0)
        .mount(&server)
        .await;

    let client = search_client(&server, ClientOptions::default());
    let collector = MetricsCollector::new();
    let task = TemplateSearch::new("/nonexistent/search-query-template.json");

    let err = user_with_token("tok")
        .execute(&client, &task, &collector)
        .await
        .unwrap_err();
    assert!(matches!(err, TaskError::TemplateRead { .. }));
    assert_eq!(collector.get_snapshot().operations[task.operation_name()].failures, 1);
}

#[tokio::test]
async fn test_template_payload_is_sent_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("search-query-template.json");
    let template = json!({
        "query": "query mySearch($input: [SearchInput]) { search(input: $input) { count } }",
        "variables": {"input": [{"keywords": ["nginx"]}]}
    });
    std::fs::write(&file, template.to_string()).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(template.clone()))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;

    let client = search_client(&server, ClientOptions::default());
    user_with_token("tok")
        .execute(&client, &TemplateSearch::new(&file), &MetricsCollector::new())
        .await
        .unwrap();
}
