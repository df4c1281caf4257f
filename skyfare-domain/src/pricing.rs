use crate::passenger::PassengerType;
use crate::seat::SeatClass;
use serde::{Deserialize, Serialize};

/// The decomposed total backing the final charge. Purely derived; never
/// mutated in place, always recomputed from the current inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub seats_subtotal: i64,
    pub addons_total: i64,
    pub discount: i64,
    pub tax: i64,
    pub total: i64,
}

impl PriceBreakdown {
    pub fn zero() -> Self {
        PriceBreakdown {
            seats_subtotal: 0,
            addons_total: 0,
            discount: 0,
            tax: 0,
            total: 0,
        }
    }
}

/// Per-seat charge line sent with the booking payload so the remote service
/// can audit how each seat was priced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatCharge {
    pub seat_id: String,
    pub seat_class: SeatClass,
    pub base_price: i64,
    pub price_modifier: i64,
    /// Price after the passenger-type discount.
    pub final_price: i64,
    pub passenger_type: PassengerType,
    pub special_assistance: bool,
}

/// Resolved addon line (unit x per-seat multiplier x qty).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddonLine {
    pub addon_id: String,
    pub title: String,
    pub qty: u32,
    pub amount: i64,
}

/// Applied-coupon hint forwarded with the booking; the remote service
/// revalidates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CouponHint {
    pub code: String,
    pub amount: i64,
}
