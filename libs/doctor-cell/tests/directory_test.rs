use std::sync::Arc;

use assert_matches::assert_matches;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::models::DoctorError;
use doctor_cell::DoctorDirectoryService;
use shared_gateway::ApiGateway;
use shared_utils::test_utils::{MockGatewayResponses, TestConfig};

fn service_for(server: &MockServer) -> DoctorDirectoryService {
    let config = TestConfig::with_base_url(&server.uri()).to_app_config();
    DoctorDirectoryService::new(Arc::new(ApiGateway::new(&config)))
}

#[tokio::test]
async fn lists_doctors_from_roster_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockGatewayResponses::doctors_list_response(vec![
                MockGatewayResponses::doctor_response(7, "Dr. Huda", "Pediatrics"),
                MockGatewayResponses::doctor_response(9, "Dr. Samir", "Neonatology"),
            ]),
        ))
        .mount(&server)
        .await;

    let doctors = service_for(&server).list_doctors().await.unwrap();

    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[0].id, 7);
    assert_eq!(doctors[0].specialty, "Pediatrics");
    assert_eq!(doctors[1].name, "Dr. Samir");
}

#[tokio::test]
async fn fetches_single_doctor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockGatewayResponses::doctor_response(7, "Dr. Huda", "Pediatrics")),
        )
        .mount(&server)
        .await;

    let doctor = service_for(&server).get_doctor(7).await.unwrap();

    assert_eq!(doctor.name, "Dr. Huda");
    assert_eq!(doctor.day_window().unwrap().0, "09:00");
}

#[tokio::test]
async fn missing_doctor_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(
            MockGatewayResponses::error_response("no such doctor"),
        ))
        .mount(&server)
        .await;

    let err = service_for(&server).get_doctor(404).await.unwrap_err();
    assert_matches!(err, DoctorError::NotFound);
}

#[tokio::test]
async fn transport_failure_is_not_not_found() {
    // Point the service at a closed port: the error must stay a fetch
    // failure, never collapse into NotFound or an empty roster.
    let config = TestConfig::with_base_url("http://127.0.0.1:9").to_app_config();
    let service = DoctorDirectoryService::new(Arc::new(ApiGateway::new(&config)));

    let err = service.list_doctors().await.unwrap_err();
    assert_matches!(err, DoctorError::Fetch(_));
}
