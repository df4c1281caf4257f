use crate::discount::DiscountEngine;
use crate::rules::FareRules;
use chrono::{DateTime, Utc};
use skyfare_core::{BusinessRules, CouponRejected};
use skyfare_domain::{
    Addon, AddonLine, Coupon, CouponHint, Passenger, PriceBreakdown, SeatCharge, SeatMap,
    SelectedAddon,
};
use skyfare_shared::round_major;

/// Inputs to one pricing pass. Any change to any field requires a fresh
/// `recompute` call; there is no hidden dependency tracking.
#[derive(Debug, Clone, Copy)]
pub struct PricingInputs<'a> {
    pub seat_map: &'a SeatMap,
    /// Selected seat ids, in selection order (paired with the passenger at
    /// the same index).
    pub selection: &'a [String],
    pub passengers: &'a [Passenger],
    pub selected_addons: &'a [SelectedAddon],
    pub addon_catalog: &'a [Addon],
    pub coupon: Option<&'a Coupon>,
    pub now: DateTime<Utc>,
}

/// One recomputed price: the breakdown plus the audit lines the booking
/// payload carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub breakdown: PriceBreakdown,
    pub seat_charges: Vec<SeatCharge>,
    pub addons: Vec<AddonLine>,
    pub coupon: Option<CouponHint>,
}

/// Composes fare rules and the discount engine into a single authoritative
/// (client-side) price. Invoked by the coordinator after every mutating
/// operation.
#[derive(Debug, Clone)]
pub struct FareCalculator {
    rules: FareRules,
    discounts: DiscountEngine,
    tax_rate: f64,
}

impl FareCalculator {
    pub fn new(rules: &BusinessRules) -> Self {
        FareCalculator {
            rules: FareRules::from_rules(rules),
            discounts: DiscountEngine,
            tax_rate: rules.tax_rate,
        }
    }

    pub fn fare_rules(&self) -> &FareRules {
        &self.rules
    }

    /// Recompute the full breakdown. A rejected coupon is returned as the
    /// specific ordered reason, never folded into a generic failure.
    pub fn recompute(&self, inputs: &PricingInputs<'_>) -> Result<Quote, CouponRejected> {
        let base_fare = inputs.seat_map.base_price;

        let mut seat_charges = Vec::with_capacity(inputs.selection.len());
        let mut seats_subtotal: i64 = 0;
        for (idx, seat_id) in inputs.selection.iter().enumerate() {
            let Some(seat) = inputs.seat_map.seat(seat_id) else {
                // the selection should always reference the live map; a
                // vanished seat is excluded rather than priced by guesswork
                tracing::warn!(%seat_id, "selected seat missing from seat map, excluding from fare");
                continue;
            };
            let price = self.rules.seat_price(seat, base_fare);
            let passenger = inputs.passengers.get(idx);
            let final_price = match passenger {
                Some(p) => self.rules.discounted_seat_price(price, p),
                None => price,
            };
            seats_subtotal += final_price;
            seat_charges.push(SeatCharge {
                seat_id: seat.seat_id.clone(),
                seat_class: seat.seat_class,
                base_price: base_fare,
                price_modifier: seat.price_modifier,
                final_price,
                passenger_type: passenger
                    .map(|p| p.passenger_type)
                    .unwrap_or(skyfare_domain::PassengerType::Adult),
                special_assistance: passenger.map(|p| p.special_assistance).unwrap_or(false),
            });
        }

        let addon_lines = self.discounts.addon_lines(
            inputs.selected_addons,
            inputs.addon_catalog,
            inputs.selection.len(),
        );
        let addons_total = DiscountEngine::addons_total(&addon_lines);

        let pre_discount = seats_subtotal + addons_total;
        let (discount, coupon_hint) = match inputs.coupon {
            Some(coupon) => {
                self.discounts
                    .validate_coupon(coupon, inputs.now, pre_discount)?;
                let amount = self.discounts.coupon_discount(coupon, pre_discount);
                (
                    amount,
                    Some(CouponHint {
                        code: coupon.code.clone(),
                        amount,
                    }),
                )
            }
            None => (0, None),
        };

        let taxable = (pre_discount - discount).max(0);
        let tax = round_major(taxable as f64 * self.tax_rate);

        let raw_total = pre_discount - discount + tax;
        let total = if pre_discount > 0 && raw_total < 1 {
            // a zero-or-negative total on priced inputs is a defect; clamp
            // to the 1-unit floor but surface it in the logs
            tracing::warn!(raw_total, "computed total not positive, clamping to 1");
            1
        } else {
            raw_total.max(0)
        };

        Ok(Quote {
            breakdown: PriceBreakdown {
                seats_subtotal,
                addons_total,
                discount,
                tax,
                total,
            },
            seat_charges,
            addons: addon_lines,
            coupon: coupon_hint,
        })
    }
}
