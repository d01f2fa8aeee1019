use std::time::{Duration, Instant};

use reqwest::Method;
use tenkft_api::{Error, Fetcher, RequestSpec, RetryPolicy};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> Fetcher {
    Fetcher::new(RetryPolicy::fixed(Duration::ZERO, Duration::ZERO)).unwrap()
}

fn get_spec(server: &MockServer, retries: u32) -> RequestSpec {
    RequestSpec::new(Method::GET, &format!("{}/projects", server.uri()))
        .unwrap()
        .with_max_retries(retries)
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

#[tokio::test]
async fn success_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = fetcher().execute(&get_spec(&server, 3)).await.unwrap();
    assert_eq!(outcome.status, 200);
    assert_eq!(outcome.text(), r#"{"data":[]}"#);
}

#[tokio::test]
async fn any_2xx_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = fetcher().execute(&get_spec(&server, 0)).await.unwrap();
    assert_eq!(outcome.status, 204);
    assert!(outcome.body.is_empty());
}

#[tokio::test]
async fn server_error_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let outcome = fetcher().execute(&get_spec(&server, 2)).await.unwrap();
    assert_eq!(outcome.status, 200);
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn exhausted_budget_returns_last_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .expect(3)
        .mount(&server)
        .await;

    let err = fetcher().execute(&get_spec(&server, 2)).await.unwrap_err();
    match err {
        Error::HttpStatus {
            status,
            body,
            response,
        } => {
            assert_eq!(status, 503);
            assert_eq!(body.as_deref(), Some("upstream down"));
            assert_eq!(response.status, 503);
            assert_eq!(response.text(), "upstream down");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn zero_budget_means_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"not found"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetcher().execute(&get_spec(&server, 0)).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.to_string(),
        r#"non-OK status code 404, body: {"message":"not found"}"#
    );
}

#[tokio::test]
async fn rate_limited_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let outcome = fetcher().execute(&get_spec(&server, 1)).await.unwrap();
    assert_eq!(outcome.status, 200);
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn rate_limit_without_budget_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetcher().execute(&get_spec(&server, 0)).await.unwrap_err();
    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn rate_limit_and_errors_share_one_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    // 429 and 500 each use one retry; the budget of 1 runs out on the 500.
    let err = fetcher().execute(&get_spec(&server, 1)).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn rate_limit_waits_longer_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(RetryPolicy::fixed(
        Duration::from_millis(200),
        Duration::ZERO,
    ))
    .unwrap();
    let started = Instant::now();
    fetcher.execute(&get_spec(&server, 1)).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn body_is_resent_on_every_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_string(r#"{"first_name":"Ada"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":1}"#))
        .mount(&server)
        .await;

    let spec = RequestSpec::new(Method::POST, &format!("{}/users", server.uri()))
        .unwrap()
        .with_body(r#"{"first_name":"Ada"}"#.to_string())
        .with_max_retries(2);
    let outcome = fetcher().execute(&spec).await.unwrap();
    assert_eq!(outcome.status, 201);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    for request in requests {
        assert_eq!(request.body, br#"{"first_name":"Ada"}"#.to_vec());
    }
}

#[tokio::test]
async fn sends_json_content_type_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("content-type", "application/json"))
        .and(header("auth", "token-123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let spec = get_spec(&server, 0).with_header("auth", "token-123");
    fetcher().execute(&spec).await.unwrap();
}

#[tokio::test]
async fn caller_content_type_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("content-type", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let spec = get_spec(&server, 0).with_header("Content-Type", "application/vnd.api+json");
    fetcher().execute(&spec).await.unwrap();
}

#[tokio::test]
async fn transport_failure_is_not_retried() {
    // Nothing listens on port 1.
    let spec = RequestSpec::new(Method::GET, "http://127.0.0.1:1/projects")
        .unwrap()
        .with_max_retries(5);
    let started = Instant::now();
    let err = fetcher().execute(&spec).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got {:?}", err);
    assert!(started.elapsed() < Duration::from_secs(5));
}

/// Serves `status_line` with a body shorter than its declared length, then hangs up.
async fn short_body_server(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-length: 100\r\nconnection: close\r\n\r\npartial",
                status_line
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{}/projects", addr)
}

#[tokio::test]
async fn unreadable_error_body_is_reported_without_text() {
    let url = short_body_server("500 Internal Server Error").await;
    let spec = RequestSpec::new(Method::GET, &url).unwrap();

    let err = fetcher().execute(&spec).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "non-OK status code 500 and could not parse response text"
    );
    match err {
        Error::HttpStatus {
            status,
            body,
            response,
        } => {
            assert_eq!(status, 500);
            assert_eq!(body, None);
            assert_eq!(response.status, 500);
            assert!(response.body.is_empty());
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn unreadable_success_body_is_a_transport_error() {
    let url = short_body_server("200 OK").await;
    let spec = RequestSpec::new(Method::GET, &url).unwrap().with_max_retries(2);

    let err = fetcher().execute(&spec).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got {:?}", err);
}
