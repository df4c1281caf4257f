use thiserror::Error;

/// Ordered coupon rejection reasons. The first failing check wins and is
/// reported as-is; a rejected coupon is never silently dropped into a
/// generic failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CouponRejected {
    #[error("Coupon is inactive")]
    Inactive,

    #[error("Coupon not yet valid")]
    NotYetValid,

    #[error("Coupon expired")]
    Expired,

    #[error("Requires a minimum fare of {required}, current fare is {actual}")]
    MinFareNotMet { required: i64, actual: i64 },
}

/// Engine-wide error taxonomy. Precondition and validation failures are
/// resolved locally and never reach the network layer; remote failures carry
/// the service's message verbatim where one was supplied.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Missing required context (travel date, route...). Short-circuits
    /// before any remote call.
    #[error("precondition failed: {0}")]
    PreconditionFailure(String),

    /// No seat map exists for this flight. Terminal, unlike a transient
    /// network failure.
    #[error("no seat map found for flight {0}")]
    InventoryUnavailable(String),

    /// Seat taken concurrently or the hold request failed in transit.
    #[error("Hold failed: {0}")]
    HoldFailed(String),

    /// The hold TTL elapsed; the flow returns to seat selection.
    #[error("seat hold expired")]
    HoldExpired,

    #[error(transparent)]
    CouponRejected(#[from] CouponRejected),

    /// Client and server totals disagree at payment-session creation.
    #[error("pricing changed, please refresh (server computed {server_computed}, client computed {client_computed})")]
    PriceMismatch {
        server_computed: i64,
        client_computed: i64,
    },

    /// Missing passenger or contact fields, caught before any network call.
    #[error("{0}")]
    ValidationFailure(String),

    /// Remote error during booking creation. Retryable, but only with a
    /// fresh idempotency key if any priced input changed.
    #[error("booking submission failed: {0}")]
    SubmissionFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coupon_rejection_messages_carry_the_reason() {
        let err = CouponRejected::MinFareNotMet {
            required: 5000,
            actual: 3200,
        };
        assert_eq!(
            err.to_string(),
            "Requires a minimum fare of 5000, current fare is 3200"
        );
        assert_eq!(CouponRejected::Expired.to_string(), "Coupon expired");
    }

    #[test]
    fn price_mismatch_shows_both_values() {
        let err = EngineError::PriceMismatch {
            server_computed: 8100,
            client_computed: 7875,
        };
        let msg = err.to_string();
        assert!(msg.contains("8100"));
        assert!(msg.contains("7875"));
    }
}
