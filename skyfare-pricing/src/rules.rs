use skyfare_core::BusinessRules;
use skyfare_domain::{Passenger, PassengerType, Seat};
use skyfare_shared::round_major;

/// Pure per-seat fare rules. No state beyond the configured discount rates.
#[derive(Debug, Clone)]
pub struct FareRules {
    child_discount_percent: f64,
    assistance_discount_percent: f64,
}

impl FareRules {
    pub fn from_rules(rules: &BusinessRules) -> Self {
        FareRules {
            child_discount_percent: rules.child_discount_percent,
            assistance_discount_percent: rules.assistance_discount_percent,
        }
    }

    /// Price of a seat before passenger discounts. An absolute seat price
    /// overrides base + modifier unconditionally.
    pub fn seat_price(&self, seat: &Seat, base_fare: i64) -> i64 {
        match seat.absolute_price {
            Some(absolute) => absolute,
            None => base_fare + seat.price_modifier,
        }
    }

    /// Apply the larger of the child / assistance discounts where the
    /// passenger qualifies; otherwise the price is unchanged. Rounded to the
    /// nearest whole unit, floored at zero.
    pub fn discounted_seat_price(&self, price: i64, passenger: &Passenger) -> i64 {
        let mut percent: f64 = 0.0;
        if passenger.passenger_type == PassengerType::Child {
            percent = percent.max(self.child_discount_percent);
        }
        if passenger.special_assistance {
            percent = percent.max(self.assistance_discount_percent);
        }
        if percent <= 0.0 {
            return price;
        }
        round_major(price as f64 * (1.0 - percent / 100.0)).max(0)
    }
}

impl Default for FareRules {
    fn default() -> Self {
        FareRules::from_rules(&BusinessRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyfare_domain::{SeatClass, SeatStatus};

    fn seat(modifier: i64, absolute: Option<i64>) -> Seat {
        Seat {
            seat_id: "14C".into(),
            row: 14,
            col: 3,
            seat_class: SeatClass::Economy,
            status: SeatStatus::Available,
            held_by: None,
            hold_expires_at: None,
            price_modifier: modifier,
            absolute_price: absolute,
            extra_legroom: false,
        }
    }

    #[test]
    fn absolute_price_wins_regardless_of_modifier() {
        let rules = FareRules::default();
        assert_eq!(rules.seat_price(&seat(2500, Some(9000)), 5000), 9000);
        assert_eq!(rules.seat_price(&seat(-9999, Some(9000)), 5000), 9000);
        assert_eq!(rules.seat_price(&seat(0, Some(0)), 5000), 0);
    }

    #[test]
    fn modifier_applies_on_top_of_base_fare() {
        let rules = FareRules::default();
        assert_eq!(rules.seat_price(&seat(750, None), 5000), 5750);
        assert_eq!(rules.seat_price(&seat(-500, None), 5000), 4500);
        assert_eq!(rules.seat_price(&seat(0, None), 5000), 5000);
    }

    #[test]
    fn adult_without_assistance_pays_full_price() {
        let rules = FareRules::default();
        let adult = Passenger::blank();
        assert_eq!(rules.discounted_seat_price(5000, &adult), 5000);
    }

    #[test]
    fn child_gets_quarter_off() {
        let rules = FareRules::default();
        let mut child = Passenger::blank();
        child.passenger_type = PassengerType::Child;
        assert_eq!(rules.discounted_seat_price(5000, &child), 3750);
    }

    #[test]
    fn assistance_discount_beats_child_discount() {
        let rules = FareRules::default();
        let mut p = Passenger::blank();
        p.passenger_type = PassengerType::Child;
        p.special_assistance = true;
        // 30% assistance discount is the larger of the two
        assert_eq!(rules.discounted_seat_price(5000, &p), 3500);
    }

    #[test]
    fn discounted_price_never_exceeds_price_and_floors_at_zero() {
        let rules = FareRules::default();
        let mut p = Passenger::blank();
        p.special_assistance = true;
        for price in [0i64, 1, 99, 5000, 123457] {
            let discounted = rules.discounted_seat_price(price, &p);
            assert!(discounted <= price);
            assert!(discounted >= 0);
        }
    }
}
