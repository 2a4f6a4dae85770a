use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use doctor_cell::models::Doctor;
use shared_gateway::ApiGateway;
use shared_utils::session::{SessionStore, ACCESS_TOKEN_KEY};

use crate::models::{BookingConfirmation, BookingError, FlowStage, SelectedChild, TimeSlot};
use crate::services::availability::SlotAvailabilityResolver;
use crate::services::submit::BookingSubmitter;

/// Owns the mutable selection state of one booking flow instance and
/// sequences the resolver and the submitter. One coordinator per opened
/// flow; abandoning the flow drops the coordinator and with it any
/// in-flight request, so nothing can complete against a torn-down view.
///
/// Stages: Idle → DateChosen → SlotsLoaded → SlotSelected → Submitting →
/// Confirmed, falling back to the pre-submit stage on failure. All
/// transitions are explicit calls; nothing advances in the background.
pub struct BookingFlowCoordinator {
    resolver: SlotAvailabilityResolver,
    submitter: BookingSubmitter,
    store: Arc<dyn SessionStore>,
    doctor: Doctor,
    stage: FlowStage,
    children: Vec<SelectedChild>,
    date: Option<NaiveDate>,
    slots: Vec<TimeSlot>,
    selected_slot: Option<TimeSlot>,
    confirmation: Option<BookingConfirmation>,
}

impl BookingFlowCoordinator {
    pub fn new(gateway: Arc<ApiGateway>, store: Arc<dyn SessionStore>, doctor: Doctor) -> Self {
        Self {
            resolver: SlotAvailabilityResolver::new(Arc::clone(&gateway)),
            submitter: BookingSubmitter::new(gateway),
            store,
            doctor,
            stage: FlowStage::Idle,
            children: Vec::new(),
            date: None,
            slots: Vec::new(),
            selected_slot: None,
            confirmation: None,
        }
    }

    pub fn stage(&self) -> FlowStage {
        self.stage
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn selected_slot(&self) -> Option<&TimeSlot> {
        self.selected_slot.as_ref()
    }

    pub fn children(&self) -> &[SelectedChild] {
        &self.children
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    /// Pick the calendar date. A slot belongs to exactly one date context,
    /// so any loaded or selected slot is invalidated here.
    pub fn choose_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        if self.stage == FlowStage::Confirmed {
            return Err(BookingError::InvalidTransition {
                from: "confirmed",
                action: "choose a date",
            });
        }

        let today = Utc::now().date_naive();
        if date < today {
            return Err(BookingError::DateInPast { date });
        }

        debug!("Date chosen: {} (resetting slot selection)", date);
        self.date = Some(date);
        self.slots.clear();
        self.selected_slot = None;
        self.stage = FlowStage::DateChosen;
        Ok(())
    }

    /// "Apply": fetch the open windows for the chosen date. Zero slots is a
    /// successful load (the view shows "no slots available"); only an actual
    /// fetch failure leaves the stage where it was.
    pub async fn load_slots(&mut self) -> Result<&[TimeSlot], BookingError> {
        if self.stage == FlowStage::Confirmed {
            return Err(BookingError::InvalidTransition {
                from: "confirmed",
                action: "load slots",
            });
        }
        let date = self.date.ok_or(BookingError::DateNotChosen)?;

        let slots = self.resolver.available_slots(self.doctor.id, date).await?;

        self.slots = slots;
        self.selected_slot = None;
        self.stage = FlowStage::SlotsLoaded;
        Ok(&self.slots)
    }

    /// Pick one of the currently loaded slots by position.
    pub fn select_slot(&mut self, index: usize) -> Result<(), BookingError> {
        if !matches!(self.stage, FlowStage::SlotsLoaded | FlowStage::SlotSelected) {
            return Err(BookingError::SlotNotLoaded);
        }

        let slot = self
            .slots
            .get(index)
            .cloned()
            .ok_or(BookingError::SlotNotLoaded)?;

        debug!("Slot selected: {} - {}", slot.start, slot.end);
        self.selected_slot = Some(slot);
        self.stage = FlowStage::SlotSelected;
        Ok(())
    }

    /// Add a child selector row. Rows are independent of slot state, but
    /// the same child cannot occupy two rows.
    pub fn add_child(&mut self, child: SelectedChild) -> Result<(), BookingError> {
        let taken: HashSet<i64> = self.children.iter().map(|c| c.id).collect();
        if taken.contains(&child.id) {
            return Err(BookingError::DuplicateChild { name: child.name });
        }
        self.children.push(child);
        Ok(())
    }

    pub fn remove_child(&mut self, index: usize) {
        if index < self.children.len() {
            self.children.remove(index);
        }
    }

    /// "Book": run the precondition chain and commit. The submitter checks
    /// children → slot → token before touching the network; the slot/date
    /// pairing here is the explicit fetch-before-submit guard (a slot can
    /// only be present if it came out of the current date's load).
    ///
    /// On failure the stage falls back and every selection survives, so the
    /// user can re-trigger without re-entering anything.
    pub async fn submit(&mut self) -> Result<BookingConfirmation, BookingError> {
        if self.stage == FlowStage::Confirmed {
            return Err(BookingError::InvalidTransition {
                from: "confirmed",
                action: "submit",
            });
        }

        let token = match self.store.get(ACCESS_TOKEN_KEY).await {
            Ok(token) => token,
            Err(e) => {
                warn!("Session store read failed: {}", e);
                None
            }
        };

        let slot_context = match (self.selected_slot.as_ref(), self.date) {
            (Some(slot), Some(date)) => Some((slot, date)),
            _ => None,
        };

        let previous = self.stage;
        self.stage = FlowStage::Submitting;

        match self
            .submitter
            .submit(&self.doctor, &self.children, slot_context, token.as_deref())
            .await
        {
            Ok(confirmation) => {
                self.stage = FlowStage::Confirmed;
                self.confirmation = Some(confirmation.clone());
                Ok(confirmation)
            }
            Err(e) => {
                self.stage = previous;
                Err(e)
            }
        }
    }
}
