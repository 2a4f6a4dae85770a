use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub session_file: String,
    pub locale: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("CLINIC_API_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_API_BASE_URL not set, using empty value");
                    String::new()
                }),
            request_timeout_secs: env::var("CLINIC_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(30),
            session_file: env::var("CLINIC_SESSION_FILE")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_SESSION_FILE not set, using default");
                    ".clinic-session.json".to_string()
                }),
            locale: env::var("CLINIC_LOCALE").unwrap_or_else(|_| "en".to_string()),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
    }
}
