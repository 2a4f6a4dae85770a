// libs/booking-cell/src/models.rs
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use doctor_cell::models::Doctor;
use shared_gateway::GatewayError;

// ==============================================================================
// CORE BOOKING MODELS
// ==============================================================================

/// A bookable window for one (doctor, date) pair. Ephemeral: fetched fresh
/// on every date selection, never cached, invalid outside its date context.
/// Start/end are the backend's time-of-day labels (`"09:00"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailableSlotsResponse {
    #[serde(default)]
    pub available_slots: Vec<TimeSlot>,
}

/// One child selector row: the child's id plus the display name that is
/// submitted with the booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedChild {
    pub id: i64,
    pub name: String,
}

impl SelectedChild {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Wire shape of `POST /book-slot/`. `children_names` is a JSON array
/// serialized into a string field; the backend accepts exactly this shape,
/// so it is preserved verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub doctor: i64,
    pub user: i64,
    pub children_names: String,
    pub slot_start: String,
    pub slot_end: String,
    pub date: NaiveDate,
}

impl BookingRequest {
    pub fn new(
        doctor: i64,
        user: i64,
        child_names: &[String],
        slot: &TimeSlot,
        date: NaiveDate,
    ) -> Self {
        Self {
            doctor,
            user,
            children_names: serde_json::to_string(child_names).unwrap_or_else(|_| "[]".to_string()),
            slot_start: slot.start.clone(),
            slot_end: slot.end.clone(),
            date,
        }
    }

    /// Deserialize the string-encoded name list back into an array.
    pub fn child_names(&self) -> Result<Vec<String>, serde_json::Error> {
        serde_json::from_str(&self.children_names)
    }
}

/// Server echo of a successful booking. Only the assigned identifier is
/// read; everything else shown afterwards comes from the submitted request.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRecord {
    #[serde(default)]
    pub id: Option<i64>,
}

/// What the confirmation screen renders: the request exactly as submitted
/// (no re-fetch, no re-validation), the doctor snapshot, and the server id.
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub booking_id: Option<i64>,
    pub request: BookingRequest,
    pub doctor: Doctor,
}

impl BookingConfirmation {
    /// Child names as displayed: trimmed, first letter uppercased, joined
    /// with `", "`. `None` when the stored payload does not parse.
    pub fn display_child_names(&self) -> Option<String> {
        let names = self.request.child_names().ok()?;
        Some(
            names
                .iter()
                .map(|name| capitalize_first(name.trim()))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    pub fn display_time(&self) -> String {
        format!("{} {}", self.request.slot_start, self.request.slot_end)
    }
}

fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ==============================================================================
// FLOW STATE
// ==============================================================================

/// Stages of one booking flow instance. Transitions are user-driven only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Idle,
    DateChosen,
    SlotsLoaded,
    SlotSelected,
    Submitting,
    Confirmed,
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowStage::Idle => write!(f, "idle"),
            FlowStage::DateChosen => write!(f, "date_chosen"),
            FlowStage::SlotsLoaded => write!(f, "slots_loaded"),
            FlowStage::SlotSelected => write!(f, "slot_selected"),
            FlowStage::Submitting => write!(f, "submitting"),
            FlowStage::Confirmed => write!(f, "confirmed"),
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("No child selected")]
    NoChildSelected,

    #[error("No time slot selected")]
    NoSlotSelected,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    #[error("No date chosen")]
    DateNotChosen,

    #[error("Selected date {date} is in the past")]
    DateInPast { date: NaiveDate },

    #[error("Slot is not part of the loaded set")]
    SlotNotLoaded,

    #[error("Child already selected: {name}")]
    DuplicateChild { name: String },

    #[error("Failed to fetch available slots: {0}")]
    SlotFetchFailed(#[source] GatewayError),

    #[error("Failed to book the slot: {0}")]
    SubmissionFailed(#[source] GatewayError),

    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

impl BookingError {
    /// Catalog id of the user-facing message for this error.
    pub fn message_id(&self) -> &'static str {
        match self {
            BookingError::NoChildSelected => "select_child_prompt",
            BookingError::NoSlotSelected | BookingError::SlotNotLoaded => "select_slot_prompt",
            BookingError::NotAuthenticated | BookingError::InvalidToken(_) => "not_authenticated",
            BookingError::DateNotChosen => "enter_valid_date",
            BookingError::DateInPast { .. } => "date_in_past",
            BookingError::DuplicateChild { .. } => "duplicate_child",
            BookingError::SlotFetchFailed(_) => "slot_fetch_failed",
            BookingError::SubmissionFailed(_) => "booking_failed",
            BookingError::InvalidTransition { .. } => "invalid_data",
        }
    }
}
