use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::models::BookingError;
use booking_cell::SlotAvailabilityResolver;
use shared_gateway::ApiGateway;
use shared_utils::test_utils::{MockGatewayResponses, TestConfig};

fn resolver_for(server: &MockServer) -> SlotAvailabilityResolver {
    let config = TestConfig::with_base_url(&server.uri()).to_app_config();
    SlotAvailabilityResolver::new(Arc::new(ApiGateway::new(&config)))
}

#[tokio::test]
async fn returns_ordered_slots_for_a_date() {
    let server = MockServer::start().await;
    let date = Utc::now().date_naive() + Duration::days(7);

    Mock::given(method("GET"))
        .and(path("/doctors/7/available_slots/"))
        .and(query_param("selected_date", date.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockGatewayResponses::available_slots_response(&[
                ("09:00", "09:30"),
                ("09:30", "10:00"),
                ("10:00", "10:30"),
            ]),
        ))
        .mount(&server)
        .await;

    let slots = resolver_for(&server).available_slots(7, date).await.unwrap();

    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0].start, "09:00");
    assert_eq!(slots[2].end, "10:30");
}

#[tokio::test]
async fn zero_slots_is_a_successful_empty_result() {
    // A day with nothing open must come back Ok(vec![]) - the view renders
    // "no slots available", never an error notice.
    let server = MockServer::start().await;
    let date = Utc::now().date_naive() + Duration::days(7);

    Mock::given(method("GET"))
        .and(path("/doctors/7/available_slots/"))
        .and(query_param("selected_date", date.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockGatewayResponses::available_slots_response(&[])),
        )
        .mount(&server)
        .await;

    let slots = resolver_for(&server).available_slots(7, date).await.unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn fetch_failure_is_distinguishable_from_zero_slots() {
    let server = MockServer::start().await;
    let date = Utc::now().date_naive() + Duration::days(7);

    Mock::given(method("GET"))
        .and(path("/doctors/7/available_slots/"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(MockGatewayResponses::error_response("boom")),
        )
        .mount(&server)
        .await;

    let err = resolver_for(&server)
        .available_slots(7, date)
        .await
        .unwrap_err();
    assert_matches!(err, BookingError::SlotFetchFailed(_));
}

#[tokio::test]
async fn missing_slots_field_reads_as_empty() {
    let server = MockServer::start().await;
    let date = Utc::now().date_naive() + Duration::days(7);

    Mock::given(method("GET"))
        .and(path("/doctors/7/available_slots/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let slots = resolver_for(&server).available_slots(7, date).await.unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn past_dates_are_refused_before_any_request() {
    let server = MockServer::start().await;
    let yesterday = Utc::now().date_naive() - Duration::days(1);

    Mock::given(method("GET"))
        .and(path("/doctors/7/available_slots/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockGatewayResponses::available_slots_response(&[("09:00", "09:30")]),
        ))
        .expect(0)
        .mount(&server)
        .await;

    let err = resolver_for(&server)
        .available_slots(7, yesterday)
        .await
        .unwrap_err();
    assert_matches!(err, BookingError::DateInPast { .. });
}
