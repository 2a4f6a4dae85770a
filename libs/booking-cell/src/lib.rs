pub mod models;
pub mod services;

pub use models::{
    BookingConfirmation, BookingError, BookingRequest, FlowStage, SelectedChild, TimeSlot,
};
pub use services::availability::SlotAvailabilityResolver;
pub use services::flow::BookingFlowCoordinator;
pub use services::submit::BookingSubmitter;
