pub mod calculator;
pub mod discount;
pub mod rules;

pub use calculator::{FareCalculator, PricingInputs, Quote};
pub use discount::DiscountEngine;
pub use rules::FareRules;
