use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A server-confirmed, time-boxed exclusive claim on a set of seats.
/// Created only after a successful hold request; authoritative over snapshot
/// seat status for the seats it covers until it expires or is dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hold {
    /// Frozen snapshot of the selection at hold time, in selection order.
    pub seats: Vec<String>,
    pub hold_until: DateTime<Utc>,
}

impl Hold {
    pub fn new(seats: Vec<String>, hold_until: DateTime<Utc>) -> Self {
        Hold { seats, hold_until }
    }

    /// Remaining lifetime in milliseconds, floored at zero. Always re-derived
    /// from `hold_until` so the countdown tolerates clock drift and
    /// suspended timers.
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        (self.hold_until - now).num_milliseconds().max(0)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.hold_until
    }

    /// True when the hold covers exactly `seats` (order-insensitive).
    pub fn covers_exactly(&self, seats: &[String]) -> bool {
        let held: BTreeSet<&str> = self.seats.iter().map(String::as_str).collect();
        let asked: BTreeSet<&str> = seats.iter().map(String::as_str).collect();
        held == asked
    }

    pub fn covers_seat(&self, seat_id: &str) -> bool {
        self.seats.iter().any(|s| s == seat_id)
    }
}
