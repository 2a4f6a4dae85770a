use reqwest::Method;
use serde::Deserialize;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use shared_gateway::{ApiGateway, GatewayError};

#[derive(Debug, Deserialize)]
struct Pong {
    ok: bool,
}

fn gateway_for(url: &str) -> ApiGateway {
    ApiGateway::new(&AppConfig {
        api_base_url: url.to_string(),
        request_timeout_secs: 5,
        session_file: String::new(),
        locale: "en".to_string(),
    })
}

#[tokio::test]
async fn decodes_successful_json_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    let pong: Pong = gateway_for(&server.uri())
        .request(Method::GET, "/ping", None, None)
        .await
        .unwrap();
    assert!(pong.ok);
}

#[tokio::test]
async fn attaches_bearer_header_when_token_given() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let _: Pong = gateway_for(&server.uri())
        .request(Method::GET, "/ping", Some("tok-123"), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn non_success_status_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
        .mount(&server)
        .await;

    let err = gateway_for(&server.uri())
        .request::<Pong>(Method::GET, "/ping", None, None)
        .await
        .unwrap_err();

    match err {
        GatewayError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "down for maintenance");
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error_not_a_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = gateway_for(&server.uri())
        .request::<Pong>(Method::GET, "/ping", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let err = gateway_for("http://127.0.0.1:9")
        .request::<Pong>(Method::GET, "/ping", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}
