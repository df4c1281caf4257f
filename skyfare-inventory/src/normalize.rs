use crate::exit_rows::{detect_exit_rows, first_economy_row};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use skyfare_domain::{FlightQuery, Seat, SeatClass, SeatMap, SeatStatus};
use skyfare_shared::money::DEFAULT_CURRENCY;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("malformed seat map snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Raw wire shapes. The remote service has grown several spellings for the
/// same fields over time; they are all resolved here, once, and nowhere else.
#[derive(Debug, Deserialize)]
struct RawSeatMap {
    rows: Option<u32>,
    cols: Option<u32>,
    seats: Option<Vec<RawSeat>>,
    #[serde(rename = "defaultPrice")]
    default_price: Option<f64>,
    #[serde(rename = "basePrice")]
    base_price: Option<f64>,
    #[serde(rename = "defaultPerSeat")]
    default_per_seat: Option<f64>,
    price: Option<serde_json::Value>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSeat {
    #[serde(rename = "seatId", alias = "label", alias = "id")]
    seat_id: Option<String>,
    row: Option<u32>,
    col: Option<u32>,
    #[serde(rename = "seatClass", alias = "category", alias = "class")]
    seat_class: Option<String>,
    status: Option<String>,
    #[serde(rename = "heldBy")]
    held_by: Option<String>,
    #[serde(rename = "holdExpiresAt", alias = "holdUntil")]
    hold_expires_at: Option<DateTime<Utc>>,
    /// Absolute price when numeric.
    #[serde(alias = "absolutePrice")]
    price: Option<f64>,
    #[serde(rename = "priceModifier", alias = "classPrice")]
    price_modifier: Option<f64>,
    features: Option<RawFeatures>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFeatures {
    #[serde(rename = "extraLegroom", default)]
    extra_legroom: bool,
}

/// Base price resolution order, from the shapes the service has been seen to
/// emit: defaultPrice, basePrice, price.amount, defaultPerSeat, then a bare
/// numeric or numeric-string price. Falls back to 0 (absolute seat prices
/// still apply).
fn resolve_base_price(raw: &RawSeatMap) -> i64 {
    if let Some(p) = raw.default_price {
        return p.round() as i64;
    }
    if let Some(p) = raw.base_price {
        return p.round() as i64;
    }
    if let Some(value) = &raw.price {
        if let Some(amount) = value.get("amount").and_then(|a| a.as_f64()) {
            return amount.round() as i64;
        }
        if let Some(p) = raw.default_per_seat {
            return p.round() as i64;
        }
        if let Some(n) = value.as_f64() {
            return n.round() as i64;
        }
        if let Some(s) = value.as_str() {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            if let Ok(n) = cleaned.parse::<f64>() {
                return n.round() as i64;
            }
        }
    }
    if let Some(p) = raw.default_per_seat {
        return p.round() as i64;
    }
    0
}

fn parse_status(status: Option<&str>) -> SeatStatus {
    match status.map(|s| s.trim().to_lowercase()).as_deref() {
        // "reserved" is treated as booked: not selectable by anyone
        Some("booked") | Some("reserved") => SeatStatus::Booked,
        Some("held") => SeatStatus::Held,
        _ => SeatStatus::Available,
    }
}

/// Turn a raw snapshot into the canonical `SeatMap`, keyed by the query that
/// requested it. Seats without an id or position are dropped with a warning.
/// Extra-legroom flags are the union of the explicit feature flag, detected
/// exit rows, and the first Economy (bulkhead) row.
pub fn normalize_snapshot(
    query: &FlightQuery,
    snapshot: &serde_json::Value,
) -> Result<SeatMap, NormalizeError> {
    let raw: RawSeatMap = serde_json::from_value(snapshot.clone())?;
    let base_price = resolve_base_price(&raw);
    let currency = raw
        .currency
        .clone()
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let mut seats = Vec::new();
    for raw_seat in raw.seats.unwrap_or_default() {
        let (Some(seat_id), Some(row), Some(col)) =
            (raw_seat.seat_id.clone(), raw_seat.row, raw_seat.col)
        else {
            tracing::warn!(?raw_seat, "dropping seat without id or position");
            continue;
        };
        let absolute_price = raw_seat.price.map(|p| p.round() as i64);
        seats.push(Seat {
            seat_id,
            row,
            col,
            seat_class: raw_seat
                .seat_class
                .as_deref()
                .map(SeatClass::parse_loose)
                .unwrap_or(SeatClass::Economy),
            status: parse_status(raw_seat.status.as_deref()),
            held_by: raw_seat.held_by,
            hold_expires_at: raw_seat.hold_expires_at,
            price_modifier: raw_seat.price_modifier.map(|m| m.round() as i64).unwrap_or(0),
            absolute_price,
            extra_legroom: raw_seat.features.unwrap_or_default().extra_legroom,
        });
    }

    let exit_rows = detect_exit_rows(&seats);
    let bulkhead = first_economy_row(&seats);
    for seat in &mut seats {
        if exit_rows.contains(&seat.row) {
            seat.extra_legroom = true;
        }
        if bulkhead == Some(seat.row) && seat.seat_class == SeatClass::Economy {
            seat.extra_legroom = true;
        }
    }

    let rows = raw
        .rows
        .unwrap_or_else(|| seats.iter().map(|s| s.row).max().unwrap_or(0));
    let cols = raw
        .cols
        .unwrap_or_else(|| seats.iter().map(|s| s.col).max().unwrap_or(0));

    Ok(SeatMap {
        flight_id: query.flight_id.clone(),
        travel_date: query.travel_date,
        origin: query.origin.clone(),
        destination: query.destination.clone(),
        rows,
        cols,
        base_price,
        currency,
        seats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn query() -> FlightQuery {
        FlightQuery {
            flight_id: "SK-101".into(),
            travel_date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            origin: "DEL".into(),
            destination: "BOM".into(),
        }
    }

    #[test]
    fn default_price_wins_the_resolution_order() {
        let snapshot = json!({
            "defaultPrice": 5200,
            "basePrice": 4800,
            "price": { "amount": 4600 },
            "seats": []
        });
        let map = normalize_snapshot(&query(), &snapshot).unwrap();
        assert_eq!(map.base_price, 5200);
    }

    #[test]
    fn price_amount_and_string_fallbacks() {
        let from_amount = normalize_snapshot(
            &query(),
            &json!({ "price": { "amount": 4600 }, "seats": [] }),
        )
        .unwrap();
        assert_eq!(from_amount.base_price, 4600);

        let from_string =
            normalize_snapshot(&query(), &json!({ "price": "INR 4,750", "seats": [] })).unwrap();
        assert_eq!(from_string.base_price, 4750);

        let missing = normalize_snapshot(&query(), &json!({ "seats": [] })).unwrap();
        assert_eq!(missing.base_price, 0);
    }

    #[test]
    fn seat_fields_normalize_from_alternate_spellings() {
        let snapshot = json!({
            "basePrice": 5000,
            "rows": 2,
            "cols": 2,
            "seats": [
                { "seatId": "1A", "row": 1, "col": 1, "seatClass": "business",
                  "status": "held", "heldBy": "someone-else", "priceModifier": 1500 },
                { "label": "1B", "row": 1, "col": 2, "class": "Business",
                  "status": "reserved", "classPrice": 1500 },
                { "id": "2A", "row": 2, "col": 1, "category": "eco",
                  "price": 6100, "features": { "extraLegroom": true } }
            ]
        });
        let map = normalize_snapshot(&query(), &snapshot).unwrap();
        assert_eq!(map.seats.len(), 3);

        let a = map.seat("1A").unwrap();
        assert_eq!(a.seat_class, SeatClass::Business);
        assert_eq!(a.status, SeatStatus::Held);
        assert_eq!(a.held_by.as_deref(), Some("someone-else"));
        assert_eq!(a.price_modifier, 1500);

        let b = map.seat("1B").unwrap();
        assert_eq!(b.status, SeatStatus::Booked);
        assert_eq!(b.price_modifier, 1500);

        let c = map.seat("2A").unwrap();
        assert_eq!(c.absolute_price, Some(6100));
        assert!(c.extra_legroom);
    }

    #[test]
    fn seats_without_position_are_dropped() {
        let snapshot = json!({
            "basePrice": 5000,
            "seats": [
                { "seatId": "1A", "row": 1, "col": 1 },
                { "seatId": "ghost" }
            ]
        });
        let map = normalize_snapshot(&query(), &snapshot).unwrap();
        assert_eq!(map.seats.len(), 1);
    }

    #[test]
    fn bulkhead_economy_row_gains_extra_legroom() {
        let mut seats = Vec::new();
        for row in [11u8, 12, 13] {
            for col in 1u8..=4 {
                seats.push(json!({
                    "seatId": format!("{}{}", row, (b'A' + col - 1) as char),
                    "row": row, "col": col, "seatClass": "Economy"
                }));
            }
        }
        let snapshot = json!({ "basePrice": 5000, "seats": seats });
        let map = normalize_snapshot(&query(), &snapshot).unwrap();
        assert!(map.seat("11A").unwrap().extra_legroom);
        assert!(!map.seat("12A").unwrap().extra_legroom);
    }

    #[test]
    fn grid_dimensions_fall_back_to_seat_extents() {
        let snapshot = json!({
            "seats": [
                { "seatId": "3C", "row": 3, "col": 3 }
            ]
        });
        let map = normalize_snapshot(&query(), &snapshot).unwrap();
        assert_eq!(map.rows, 3);
        assert_eq!(map.cols, 3);
    }
}
