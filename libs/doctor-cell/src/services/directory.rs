use std::sync::Arc;

use reqwest::Method;
use tracing::debug;

use shared_gateway::{ApiGateway, GatewayError};

use crate::models::{Doctor, DoctorError, DoctorListResponse};

/// Read-only view over the clinic's doctor roster.
pub struct DoctorDirectoryService {
    gateway: Arc<ApiGateway>,
}

impl DoctorDirectoryService {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch the full roster shown on the booking entry screen.
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        debug!("Fetching doctor roster");

        let response: DoctorListResponse = self
            .gateway
            .request(Method::GET, "/doctors/", None, None)
            .await?;

        Ok(response.doctors)
    }

    /// Fetch a single doctor's profile.
    pub async fn get_doctor(&self, doctor_id: i64) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor {}", doctor_id);

        let path = format!("/doctors/{}", doctor_id);
        match self.gateway.request(Method::GET, &path, None, None).await {
            Ok(doctor) => Ok(doctor),
            Err(GatewayError::Status { status: 404, .. }) => Err(DoctorError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}
