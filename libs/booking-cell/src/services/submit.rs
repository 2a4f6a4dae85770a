use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Method;
use serde_json::json;
use tracing::{info, warn};

use doctor_cell::models::Doctor;
use shared_gateway::ApiGateway;
use shared_utils::jwt;

use crate::models::{
    BookingConfirmation, BookingError, BookingRecord, BookingRequest, SelectedChild, TimeSlot,
};

/// Commits a fully specified booking to the backend. The precondition
/// chain runs before any I/O, in this order: children present → slot
/// selected → token present. A failed precondition never issues a request.
pub struct BookingSubmitter {
    gateway: Arc<ApiGateway>,
}

impl BookingSubmitter {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Submit one booking. The slot travels with the date it was fetched
    /// for; a slot without its date context does not exist.
    ///
    /// There is no idempotency key on the wire: resubmitting after a
    /// transient failure creates a second reservation server-side.
    pub async fn submit(
        &self,
        doctor: &Doctor,
        children: &[SelectedChild],
        slot: Option<(&TimeSlot, NaiveDate)>,
        token: Option<&str>,
    ) -> Result<BookingConfirmation, BookingError> {
        let names: Vec<String> = children
            .iter()
            .filter(|child| !child.is_blank())
            .map(|child| child.name.trim().to_string())
            .collect();
        if names.is_empty() {
            return Err(BookingError::NoChildSelected);
        }

        let (slot, date) = slot.ok_or(BookingError::NoSlotSelected)?;

        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(BookingError::NotAuthenticated),
        };

        // The user identity always comes out of the token; the client never
        // supplies its own id.
        let claims = jwt::decode_claims(token).map_err(BookingError::InvalidToken)?;

        let request = BookingRequest::new(doctor.id, claims.user_id, &names, slot, date);

        info!(
            "Submitting booking for doctor {} on {} ({} children)",
            doctor.id,
            date,
            names.len()
        );

        let body = json!({
            "doctor": request.doctor,
            "user": request.user,
            "children_names": request.children_names,
            "slot_start": request.slot_start,
            "slot_end": request.slot_end,
            "date": request.date.format("%Y-%m-%d").to_string(),
        });

        let record: BookingRecord = self
            .gateway
            .request(Method::POST, "/book-slot/", Some(token), Some(body))
            .await
            .map_err(|e| {
                warn!("Booking submission failed: {}", e);
                BookingError::SubmissionFailed(e)
            })?;

        info!(
            "Booking confirmed for doctor {} (server id {:?})",
            doctor.id, record.id
        );

        Ok(BookingConfirmation {
            booking_id: record.id,
            request,
            doctor: doctor.clone(),
        })
    }
}
