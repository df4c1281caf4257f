use chrono::{DateTime, Utc};
use skyfare_core::CouponRejected;
use skyfare_domain::{Addon, AddonLine, Coupon, SelectedAddon};
use skyfare_shared::round_major;

/// Pure add-on and coupon arithmetic on top of a seat subtotal. No state.
#[derive(Debug, Clone, Default)]
pub struct DiscountEngine;

impl DiscountEngine {
    /// Resolve selected add-ons against the catalog into priced lines.
    /// A selection whose add-on is missing from the catalog (or inactive)
    /// is excluded from the total rather than guessed at.
    pub fn addon_lines(
        &self,
        selected: &[SelectedAddon],
        catalog: &[Addon],
        seat_count: usize,
    ) -> Vec<AddonLine> {
        let mut lines = Vec::with_capacity(selected.len());
        for sel in selected {
            let Some(addon) = catalog.iter().find(|a| a.id == sel.addon_id) else {
                tracing::warn!(addon_id = %sel.addon_id, "selected add-on missing from catalog, excluding");
                continue;
            };
            if !addon.active {
                tracing::warn!(addon_id = %addon.id, "selected add-on inactive, excluding");
                continue;
            }
            let qty = sel.qty.max(1);
            let per_seat_factor = if addon.per_seat { seat_count as i64 } else { 1 };
            let amount = addon.amount * per_seat_factor * qty as i64;
            lines.push(AddonLine {
                addon_id: addon.id.clone(),
                title: addon.title.clone(),
                qty,
                amount,
            });
        }
        lines
    }

    pub fn addons_total(lines: &[AddonLine]) -> i64 {
        lines.iter().map(|l| l.amount).sum()
    }

    /// Ordered validity checks; the first failing reason wins and is
    /// reported as-is.
    pub fn validate_coupon(
        &self,
        coupon: &Coupon,
        now: DateTime<Utc>,
        pre_discount_total: i64,
    ) -> Result<(), CouponRejected> {
        if !coupon.active {
            return Err(CouponRejected::Inactive);
        }
        if let Some(from) = coupon.valid_from {
            if now < from {
                return Err(CouponRejected::NotYetValid);
            }
        }
        if let Some(to) = coupon.valid_to {
            if now > to {
                return Err(CouponRejected::Expired);
            }
        }
        if let Some(min_fare) = coupon.min_fare {
            if pre_discount_total < min_fare {
                return Err(CouponRejected::MinFareNotMet {
                    required: min_fare,
                    actual: pre_discount_total,
                });
            }
        }
        Ok(())
    }

    /// Discount amount for a validated coupon. Percent discounts round then
    /// cap; fixed discounts never exceed the pre-discount total.
    pub fn coupon_discount(&self, coupon: &Coupon, pre_discount_total: i64) -> i64 {
        if let Some(percent) = coupon.percent {
            if percent > 0.0 {
                let mut d = round_major(pre_discount_total as f64 * percent / 100.0);
                if let Some(cap) = coupon.cap {
                    d = d.min(cap);
                }
                return d.max(0);
            }
        }
        if let Some(fixed) = coupon.fixed_amount {
            return fixed.clamp(0, pre_discount_total);
        }
        0
    }
}
