use chrono::{DateTime, Utc};
use skyfare_core::{ApiError, BookingApi, EngineError};
use skyfare_domain::{Booking, BookingDraft, Contact, Hold, Passenger, PriceBreakdown};
use uuid::Uuid;

/// Outcome of a successful submission. `redirect_url` is absent when the
/// booking needs no payment step (zero-fee reissue, pay-at-counter fares).
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub booking: Booking,
    pub redirect_url: Option<String>,
}

/// Drives booking creation and the payment handoff. One coordinator lives
/// per checkout flow; it owns the idempotency key for the in-flight attempt.
#[derive(Default)]
pub struct CheckoutCoordinator {
    /// Key for the current attempt, tagged with the breakdown it priced.
    /// Reused on retry only while the breakdown is unchanged; any repricing
    /// is a new attempt and gets a fresh key.
    attempt: Option<(Uuid, PriceBreakdown)>,
}

impl CheckoutCoordinator {
    pub fn new() -> Self {
        CheckoutCoordinator::default()
    }

    /// Field-level form validation, resolved locally before any network
    /// call. Messages are indexed per passenger so the form can point at
    /// the offending entry.
    pub fn validate_draft(passengers: &[Passenger], contact: &Contact) -> Result<(), EngineError> {
        for (i, p) in passengers.iter().enumerate() {
            let n = i + 1;
            if p.first_name.trim().is_empty() {
                return Err(EngineError::ValidationFailure(format!(
                    "Passenger {n}: first name required"
                )));
            }
            if p.last_name.trim().is_empty() {
                return Err(EngineError::ValidationFailure(format!(
                    "Passenger {n}: last name required"
                )));
            }
            if p.date_of_birth.is_none() {
                return Err(EngineError::ValidationFailure(format!(
                    "Passenger {n}: date of birth required"
                )));
            }
            let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
            if blank(&p.document_type) || blank(&p.document_number) {
                return Err(EngineError::ValidationFailure(format!(
                    "Passenger {n}: ID document required"
                )));
            }
        }
        if contact.name.trim().is_empty() {
            return Err(EngineError::ValidationFailure(
                "Contact name required".into(),
            ));
        }
        if contact.email.inner().trim().is_empty() {
            return Err(EngineError::ValidationFailure(
                "Contact email required".into(),
            ));
        }
        Ok(())
    }

    fn attempt_key(&mut self, price: &PriceBreakdown) -> Uuid {
        match &self.attempt {
            Some((key, priced)) if priced == price => *key,
            _ => {
                let key = Uuid::new_v4();
                self.attempt = Some((key, price.clone()));
                key
            }
        }
    }

    /// Create the booking and obtain the payment redirect. All local
    /// preconditions are checked before the first network call; a failed
    /// submission leaves the attempt key in place so an unchanged retry is
    /// deduplicated server-side.
    pub async fn submit(
        &mut self,
        api: &dyn BookingApi,
        draft: &BookingDraft,
        hold: Option<&Hold>,
        now: DateTime<Utc>,
    ) -> Result<BookingConfirmation, EngineError> {
        let hold = hold.ok_or_else(|| {
            EngineError::PreconditionFailure("no seat hold for this submission".into())
        })?;
        if hold.is_expired(now) {
            return Err(EngineError::HoldExpired);
        }
        if !hold.covers_exactly(&draft.seats) {
            return Err(EngineError::PreconditionFailure(
                "held seats do not match the submitted seats".into(),
            ));
        }
        Self::validate_draft(&draft.passengers, &draft.contact)?;
        if draft.price.total <= 0 {
            return Err(EngineError::PreconditionFailure(
                "booking total must be positive".into(),
            ));
        }

        let key = self.attempt_key(&draft.price);
        tracing::info!(idempotency_key = %key, total = draft.price.total, "submitting booking");

        let response = api
            .create_booking(draft, key)
            .await
            .map_err(|e| EngineError::SubmissionFailed(e.to_string()))?;

        if let Some(session) = response.session {
            // session created in the same call; its URL is authoritative
            self.attempt = None;
            return Ok(BookingConfirmation {
                booking: response.booking,
                redirect_url: Some(session.url),
            });
        }

        let redirect_url = match api
            .create_payment_session(response.booking.id, draft.price.total, &draft.currency, key)
            .await
        {
            Ok(session) => Some(session.url),
            // no session to create: the booking stands on its own
            Err(ApiError::NotFound) => None,
            Err(ApiError::AmountMismatch {
                server_computed,
                client_computed,
            }) => {
                return Err(EngineError::PriceMismatch {
                    server_computed,
                    client_computed,
                })
            }
            Err(e) => return Err(EngineError::SubmissionFailed(e.to_string())),
        };

        self.attempt = None;
        Ok(BookingConfirmation {
            booking: response.booking,
            redirect_url,
        })
    }
}
