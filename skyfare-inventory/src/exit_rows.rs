use skyfare_domain::{Seat, SeatClass};
use std::collections::{BTreeMap, BTreeSet};

/// Detect structurally likely exit rows from seat geometry. Three signals,
/// any of which flags a row:
///
/// 1. an internal column gap of two or more positions (door cutout),
/// 2. a vertical gap of two or more row numbers to the next row (door space),
/// 3. a row with markedly fewer seats than the median row.
///
/// The heuristic is advisory-additive: it can only add extra-legroom
/// restrictions, never clear an explicit feature flag on a seat.
pub fn detect_exit_rows(seats: &[Seat]) -> BTreeSet<u32> {
    let mut rows: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for s in seats {
        rows.entry(s.row).or_default().push(s.col);
    }
    if rows.is_empty() {
        return BTreeSet::new();
    }

    let mut exit_rows = BTreeSet::new();

    // column gap within a row
    for (&row, cols) in &rows {
        let mut sorted = cols.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[1] - w[0] >= 2) {
            exit_rows.insert(row);
        }
    }

    // vertical gap between consecutive rows
    let row_numbers: Vec<u32> = rows.keys().copied().collect();
    for w in row_numbers.windows(2) {
        if w[1] - w[0] >= 2 {
            exit_rows.insert(w[0]);
        }
    }

    // fallback: significantly fewer seats than the median row
    let mut counts: Vec<usize> = rows.values().map(Vec::len).collect();
    counts.sort_unstable();
    let median = counts[counts.len() / 2];
    let threshold = 1.max((median as f64 * 0.6).floor() as usize);
    for (&row, cols) in &rows {
        if cols.len() <= threshold {
            exit_rows.insert(row);
        }
    }

    exit_rows
}

/// The first Economy row (the bulkhead behind the forward cabins) counts as
/// extra legroom.
pub fn first_economy_row(seats: &[Seat]) -> Option<u32> {
    seats
        .iter()
        .filter(|s| s.seat_class == SeatClass::Economy)
        .map(|s| s.row)
        .min()
}
