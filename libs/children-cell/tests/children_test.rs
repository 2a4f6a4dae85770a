use std::sync::Arc;

use assert_matches::assert_matches;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use children_cell::models::ChildrenError;
use children_cell::ChildrenService;
use shared_gateway::ApiGateway;
use shared_utils::test_utils::{MockGatewayResponses, TestConfig};

fn service_for(server: &MockServer) -> ChildrenService {
    let config = TestConfig::with_base_url(&server.uri()).to_app_config();
    ChildrenService::new(Arc::new(ApiGateway::new(&config)))
}

#[tokio::test]
async fn fetches_children_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/children/"))
        .and(header("Authorization", "Bearer guardian-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            MockGatewayResponses::child_response(11, "alia"),
            MockGatewayResponses::child_response(12, "omar"),
        ]))
        .mount(&server)
        .await;

    let children = service_for(&server)
        .fetch_children(Some("guardian-token"))
        .await
        .unwrap();

    assert_eq!(children.len(), 2);
    assert_eq!(children[0].id, 11);
    assert_eq!(children[1].full_name, "omar");
    assert_eq!(children[0].nationality.as_deref(), Some("Jordanian"));
}

#[tokio::test]
async fn missing_token_never_hits_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/children/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .expect(0)
        .mount(&server)
        .await;

    let err = service_for(&server).fetch_children(None).await.unwrap_err();
    assert_matches!(err, ChildrenError::NotAuthenticated);

    let err = service_for(&server)
        .fetch_children(Some(""))
        .await
        .unwrap_err();
    assert_matches!(err, ChildrenError::NotAuthenticated);
}

#[tokio::test]
async fn backend_rejection_surfaces_as_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/children/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(MockGatewayResponses::error_response("token expired")),
        )
        .mount(&server)
        .await;

    let err = service_for(&server)
        .fetch_children(Some("stale-token"))
        .await
        .unwrap_err();
    assert_matches!(err, ChildrenError::Fetch(_));
}
