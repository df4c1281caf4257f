use crate::passenger::{Contact, Passenger};
use crate::pricing::{AddonLine, CouponHint, PriceBreakdown, SeatCharge};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Expired,
}

/// Everything the remote service needs to create a booking. Assembled by the
/// checkout coordinator from the held selection, the passenger/contact form
/// and the current price breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDraft {
    pub flight_id: String,
    pub travel_date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub held_by: String,
    pub passengers: Vec<Passenger>,
    pub contact: Contact,
    /// Held seats, in selection order (passenger at index i sits in seat i).
    pub seats: Vec<String>,
    pub price: PriceBreakdown,
    pub currency: String,
    pub seat_charges: Vec<SeatCharge>,
    pub addons: Vec<AddonLine>,
    pub coupon: Option<CouponHint>,
}

/// Booking record returned by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub reference: String,
    pub status: BookingStatus,
    pub amount: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// Ready-to-follow payment redirect created by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub url: String,
}

/// Booking-creation response; the service may have created the payment
/// session in the same call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking: Booking,
    pub session: Option<PaymentSession>,
}
