pub mod config;
pub mod error;
pub mod ports;

pub use config::{BusinessRules, EngineConfig};
pub use error::{CouponRejected, EngineError};
pub use ports::{ApiError, BookingApi, HoldGrant, InventoryApi};
