pub mod money;
pub mod pii;

pub use money::round_major;
pub use pii::Masked;
