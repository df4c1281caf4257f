use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An ancillary product (bag, meal, lounge...) from the external catalog.
/// Read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Addon {
    pub id: String,
    pub title: String,
    /// Unit amount in whole currency units.
    pub amount: i64,
    pub currency: String,
    /// When true the unit amount applies once per seat in the party.
    pub per_seat: bool,
    pub active: bool,
    pub description: Option<String>,
}

/// A user's pick from the addon catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedAddon {
    pub addon_id: String,
    pub qty: u32,
}

impl SelectedAddon {
    pub fn new(addon_id: impl Into<String>, qty: u32) -> Self {
        SelectedAddon {
            addon_id: addon_id.into(),
            // quantity floors at 1
            qty: qty.max(1),
        }
    }
}

/// A discount coupon. Percent-based coupons may carry a cap; fixed-amount
/// coupons discount a flat value. Validated at application time only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub title: Option<String>,
    pub percent: Option<f64>,
    pub fixed_amount: Option<i64>,
    /// Upper bound on a percent discount.
    pub cap: Option<i64>,
    /// Minimum seats+addons subtotal required.
    pub min_fare: Option<i64>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub active: bool,
}
