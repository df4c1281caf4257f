use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyfare_domain::{Addon, BookingDraft, BookingResponse, Coupon, FlightQuery, PaymentSession};
use thiserror::Error;
use uuid::Uuid;

/// Failure modes at the remote-service boundary. `Remote` carries the
/// service's human-readable message verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Remote(String),

    #[error("network error: {0}")]
    Transport(String),

    /// The service computed a different amount than the client submitted.
    #[error("amount mismatch (server computed {server_computed}, client computed {client_computed})")]
    AmountMismatch {
        server_computed: i64,
        client_computed: i64,
    },
}

/// Successful hold grant from the inventory service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldGrant {
    pub hold_until: DateTime<Utc>,
}

/// Inventory side of the remote booking service. The seat-map wire shape is
/// the collaborator's concern; snapshots come back as raw JSON and are
/// normalized once at the inventory-fetch boundary.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn fetch_seat_map(&self, query: &FlightQuery) -> Result<serde_json::Value, ApiError>;

    async fn request_hold(
        &self,
        query: &FlightQuery,
        seat_ids: &[String],
        ttl_minutes: u32,
        holder_id: &str,
    ) -> Result<HoldGrant, ApiError>;

    async fn fetch_addons(&self) -> Result<Vec<Addon>, ApiError>;

    async fn fetch_coupons(&self) -> Result<Vec<Coupon>, ApiError>;
}

/// Booking/payment side of the remote service.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Create a booking. The service may create the payment session in the
    /// same call and embed a ready redirect URL in the response.
    async fn create_booking(
        &self,
        draft: &BookingDraft,
        idempotency_key: Uuid,
    ) -> Result<BookingResponse, ApiError>;

    /// Create a payment session for an existing booking, passing the
    /// client-computed amount for server-side verification.
    async fn create_payment_session(
        &self,
        booking_id: Uuid,
        amount: i64,
        currency: &str,
        idempotency_key: Uuid,
    ) -> Result<PaymentSession, ApiError>;
}
