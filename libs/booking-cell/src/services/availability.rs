use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use reqwest::Method;
use tracing::debug;

use shared_gateway::ApiGateway;

use crate::models::{AvailableSlotsResponse, BookingError, TimeSlot};

/// Translates a (doctor, date) pair into the list of bookable windows for
/// that date. A legitimate empty day comes back as `Ok(vec![])`; a failed
/// fetch comes back as `Err`, so the two can never be confused upstream.
pub struct SlotAvailabilityResolver {
    gateway: Arc<ApiGateway>,
}

impl SlotAvailabilityResolver {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch the open windows for one date. Dates before today are refused
    /// locally; the date picker normally prevents them, but the resolver
    /// does not rely on that.
    pub async fn available_slots(
        &self,
        doctor_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, BookingError> {
        let today = Utc::now().date_naive();
        if date < today {
            return Err(BookingError::DateInPast { date });
        }

        debug!("Fetching available slots for doctor {} on {}", doctor_id, date);

        let path = format!(
            "/doctors/{}/available_slots/?selected_date={}",
            doctor_id,
            date.format("%Y-%m-%d")
        );

        let response: AvailableSlotsResponse = self
            .gateway
            .request(Method::GET, &path, None, None)
            .await
            .map_err(BookingError::SlotFetchFailed)?;

        debug!("Found {} available slots", response.available_slots.len());
        Ok(response.available_slots)
    }
}
