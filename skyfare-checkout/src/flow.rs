use chrono::{DateTime, Utc};
use skyfare_domain::Hold;
use thiserror::Error;

/// Checkout flow states, in forward order. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    SeatSelection,
    Held,
    PassengerDetails,
    Submitting,
    Completed,
}

/// Events that drive the flow. Hold-carrying events are checked for
/// liveness at transition time.
#[derive(Debug, Clone, Copy)]
pub enum FlowEvent<'a> {
    HoldConfirmed(&'a Hold),
    EnterPassengerDetails,
    HoldExpired,
    BeginSubmission(&'a Hold),
    SubmissionSucceeded,
    SubmissionFailed,
    Reset,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("event not valid in state {state:?}")]
    InvalidTransition { state: FlowState },
    #[error("seat hold has expired")]
    HoldExpired,
}

/// Pure transition function. Expiry of the hold can interrupt any state
/// short of submission and throws the flow back to seat selection; once a
/// submission is in flight it runs to its own outcome.
pub fn transition(
    state: FlowState,
    event: FlowEvent<'_>,
    now: DateTime<Utc>,
) -> Result<FlowState, FlowError> {
    use FlowEvent::*;
    use FlowState::*;

    match (state, event) {
        (SeatSelection, HoldConfirmed(hold)) => {
            if hold.is_expired(now) {
                return Err(FlowError::HoldExpired);
            }
            Ok(Held)
        }
        (Held, EnterPassengerDetails) => Ok(PassengerDetails),
        (Held | PassengerDetails, HoldExpired) => Ok(SeatSelection),
        (PassengerDetails, BeginSubmission(hold)) => {
            if hold.is_expired(now) {
                return Err(FlowError::HoldExpired);
            }
            Ok(Submitting)
        }
        (Submitting, SubmissionSucceeded) => Ok(Completed),
        (Submitting, SubmissionFailed) => Ok(PassengerDetails),
        (SeatSelection | Held | PassengerDetails, Reset) => Ok(SeatSelection),
        (state, _) => Err(FlowError::InvalidTransition { state }),
    }
}
