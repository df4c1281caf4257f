pub mod exit_rows;
pub mod model;
pub mod normalize;

pub use exit_rows::detect_exit_rows;
pub use model::{RefreshTask, SeatInventoryModel};
pub use normalize::normalize_snapshot;
