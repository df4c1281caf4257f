use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Cabin class of a seat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatClass {
    First,
    Business,
    PremiumEconomy,
    Economy,
}

impl SeatClass {
    /// Parse a loosely formatted class name ("Premium Economy", "premeco",
    /// "BUSINESS"...). Unknown names fall back to Economy so a malformed
    /// snapshot never leaves a seat unpriceable.
    pub fn parse_loose(name: &str) -> SeatClass {
        let n: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match n.as_str() {
            "first" | "firstclass" => SeatClass::First,
            "business" | "businessclass" => SeatClass::Business,
            "premiumeconomy" | "premiumeco" | "premeco" => SeatClass::PremiumEconomy,
            _ => SeatClass::Economy,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SeatClass::First => "First Class",
            SeatClass::Business => "Business Class",
            SeatClass::PremiumEconomy => "Premium Economy",
            SeatClass::Economy => "Economy",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Held,
    Booked,
}

/// Canonical seat shape. Produced once at the inventory-fetch boundary;
/// downstream code never re-probes alternate field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub seat_id: String,
    pub row: u32,
    pub col: u32,
    pub seat_class: SeatClass,
    pub status: SeatStatus,
    pub held_by: Option<String>,
    pub hold_expires_at: Option<DateTime<Utc>>,
    /// Signed delta on the map base price. Ignored when `absolute_price` is set.
    pub price_modifier: i64,
    /// Absolute per-seat price, overriding base + modifier.
    pub absolute_price: Option<i64>,
    pub extra_legroom: bool,
}

impl Seat {
    pub fn is_booked(&self) -> bool {
        self.status == SeatStatus::Booked
    }

    /// Held by someone other than `holder`.
    pub fn held_by_other(&self, holder: &str) -> bool {
        self.status == SeatStatus::Held
            && self.held_by.as_deref().map_or(false, |h| h != holder)
    }
}

/// Identifies the flight/date/route a seat map is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightQuery {
    pub flight_id: String,
    pub travel_date: NaiveDate,
    pub origin: String,
    pub destination: String,
}

/// A full seat map for one flight/date/route. Replaced wholesale on each
/// refresh; seat identity by `seat_id` does not survive a refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatMap {
    pub flight_id: String,
    pub travel_date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub rows: u32,
    pub cols: u32,
    pub base_price: i64,
    pub currency: String,
    pub seats: Vec<Seat>,
}

impl SeatMap {
    pub fn seat(&self, seat_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.seat_id == seat_id)
    }

    pub fn seat_mut(&mut self, seat_id: &str) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.seat_id == seat_id)
    }
}
