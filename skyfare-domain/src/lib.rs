pub mod booking;
pub mod catalog;
pub mod hold;
pub mod passenger;
pub mod pricing;
pub mod seat;

pub use booking::{Booking, BookingDraft, BookingResponse, BookingStatus, PaymentSession};
pub use catalog::{Addon, Coupon, SelectedAddon};
pub use hold::Hold;
pub use passenger::{Contact, PartyProfile, Passenger, PassengerType};
pub use pricing::{AddonLine, CouponHint, PriceBreakdown, SeatCharge};
pub use seat::{FlightQuery, Seat, SeatClass, SeatMap, SeatStatus};
