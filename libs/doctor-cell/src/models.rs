// libs/doctor-cell/src/models.rs
use serde::{Deserialize, Serialize};

use shared_gateway::GatewayError;

/// A clinic doctor as served by the backend. Read-only on the client; the
/// schedule window fields are display strings in the backend's own format
/// (`"09:00:00 AM"`), trimmed down for rendering by the helpers below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub morning_start: Option<String>,
    #[serde(default)]
    pub morning_end: Option<String>,
    #[serde(default)]
    pub afternoon_start: Option<String>,
    #[serde(default)]
    pub afternoon_end: Option<String>,
}

fn default_available() -> bool {
    true
}

impl Doctor {
    /// Absolute URL of the profile photo, which the backend serves relative
    /// to the API host.
    pub fn photo_url(&self, base_url: &str) -> Option<String> {
        self.profile_photo
            .as_ref()
            .map(|path| format!("{}{}", base_url.trim_end_matches('/'), path))
    }

    /// Opening and closing labels for the working day: morning opening
    /// time and afternoon closing time, shortened to `HH:MM`.
    pub fn day_window(&self) -> Option<(String, String)> {
        let opens = self.morning_start.as_deref().map(short_time)?;
        let closes = self.afternoon_end.as_deref().map(short_time)?;
        Some((opens, closes))
    }
}

/// `"09:00:00 AM"` → `"09:00"`. Keeps whatever is there if the shape is
/// unexpected rather than guessing.
fn short_time(raw: &str) -> String {
    let clock = raw.split_whitespace().next().unwrap_or(raw);
    let mut parts = clock.split(':');
    match (parts.next(), parts.next()) {
        (Some(h), Some(m)) => format!("{}:{}", h, m),
        _ => clock.to_string(),
    }
}

#[derive(Debug, Deserialize)]
pub struct DoctorListResponse {
    #[serde(default)]
    pub doctors: Vec<Doctor>,
}

#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Failed to fetch doctors: {0}")]
    Fetch(#[from] GatewayError),
}
