/// All engine amounts are whole major currency units (i64).
/// Fractional intermediate results (percent discounts, tax) are rounded
/// half-up to the nearest whole unit.
pub fn round_major(value: f64) -> i64 {
    value.round() as i64
}

/// Default currency code when neither map nor flight carries one.
pub const DEFAULT_CURRENCY: &str = "INR";
