//! Connectivity probe tests.

mod helpers;

use httptest::{matchers::*, responders::*, Expectation, Server};
use result_relay::ResultClient;
use wiremock::matchers::{body_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::{fast_config, success_body};

fn probe_client(url: &str) -> ResultClient {
    ResultClient::new(fast_config(url).build().unwrap()).unwrap()
}

#[tokio::test]
async fn test_probe_passes_repeatedly_against_healthy_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({"id": 0, "result": "Connection Test", "score": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_string(success_body(2, 0.3)))
        .mount(&server)
        .await;
    let client = probe_client(&server.uri());

    for _ in 0..3 {
        assert!(client.test_connection().await);
    }
    // No retries: exactly one request per probe
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_probe_follows_post_redirect_to_get() {
    let server = Server::run();
    let content_url = format!("http://{}/echo?user_content_key=k", server.addr());
    server.expect(
        Expectation::matching(request::method_path("POST", "/exec"))
            .respond_with(status_code(302).append_header("Location", content_url.as_str())),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/echo"))
            .respond_with(status_code(200).body(success_body(4, 0.7))),
    );

    let client = probe_client(&format!("http://{}/exec", server.addr()));
    assert!(client.test_connection().await);
}

#[tokio::test]
async fn test_probe_stops_at_login_redirect() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/exec")).respond_with(
            status_code(302).append_header("Location", "https://accounts.google.com/ServiceLogin"),
        ),
    );

    let client = probe_client(&format!("http://{}/exec", server.addr()));
    assert!(!client.test_connection().await);
}

#[tokio::test]
async fn test_probe_fails_on_non_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    assert!(!probe_client(&server.uri()).test_connection().await);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_probe_fails_on_html_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Page not found</html>"))
        .mount(&server)
        .await;
    assert!(!probe_client(&server.uri()).test_connection().await);
}

#[tokio::test]
async fn test_probe_fails_on_server_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"status":"error","message":"Sheet 'Processed_Data' not found"}"#,
        ))
        .mount(&server)
        .await;
    assert!(!probe_client(&server.uri()).test_connection().await);
}

#[tokio::test]
async fn test_probe_fails_when_unreachable() {
    // Port 9 (discard) is not listening on the loopback interface in test environments
    let client = probe_client("http://127.0.0.1:9/exec");
    assert!(!client.test_connection().await);
}
