use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use serde_json::json;

use shared_config::AppConfig;

pub struct TestConfig {
    pub api_base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.to_string(),
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_base_url.clone(),
            request_timeout_secs: 5,
            session_file: String::new(),
            locale: "en".to_string(),
        }
    }
}

pub struct TestUser {
    pub user_id: i64,
    pub email: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            user_id: 1001,
            email: "guardian@example.com".to_string(),
        }
    }
}

impl TestUser {
    pub fn with_id(user_id: i64) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    /// Build a structurally valid bearer token carrying the given user's
    /// claims. The signature is opaque filler: the client never verifies it.
    pub fn create_test_token(user: &TestUser, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "user_id": user.user_id,
            "email": user.email,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(b"test-signature");

        format!("{}.{}.{}", header_encoded, payload_encoded, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser) -> String {
        Self::create_test_token(user, Some(-1))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub struct MockGatewayResponses;

impl MockGatewayResponses {
    pub fn doctor_response(id: i64, name: &str, specialty: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "specialty": specialty,
            "profile_photo": format!("/media/doctors/{}.png", id),
            "is_available": true,
            "morning_start": "09:00:00 AM",
            "morning_end": "12:00:00 PM",
            "afternoon_start": "04:00:00 PM",
            "afternoon_end": "08:00:00 PM"
        })
    }

    pub fn doctors_list_response(doctors: Vec<serde_json::Value>) -> serde_json::Value {
        json!({ "doctors": doctors })
    }

    pub fn child_response(id: i64, full_name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "full_name": full_name,
            "gender": "Female",
            "date_of_birth": "2019-03-14",
            "nationality": "Jordanian",
            "insurance_company": "MedGulf",
            "insurance_number": "INS-4471",
            "national_id": "200191234567"
        })
    }

    pub fn available_slots_response(slots: &[(&str, &str)]) -> serde_json::Value {
        let entries: Vec<serde_json::Value> = slots
            .iter()
            .map(|(start, end)| json!({ "start": start, "end": end }))
            .collect();
        json!({ "available_slots": entries })
    }

    pub fn booking_response(
        booking_id: i64,
        doctor_id: i64,
        user_id: i64,
        children_names: &str,
        slot: (&str, &str),
        date: &str,
    ) -> serde_json::Value {
        json!({
            "id": booking_id,
            "doctor": doctor_id,
            "user": user_id,
            "children_names": children_names,
            "slot_start": slot.0,
            "slot_end": slot.1,
            "date": date
        })
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({ "error": message })
    }
}
