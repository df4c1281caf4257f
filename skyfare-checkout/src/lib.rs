pub mod coordinator;
pub mod flow;
pub mod lease;

pub use coordinator::{BookingConfirmation, CheckoutCoordinator};
pub use flow::{FlowError, FlowEvent, FlowState};
pub use lease::{CountdownTask, IgnoreReason, LeaseController, ToggleOutcome};
