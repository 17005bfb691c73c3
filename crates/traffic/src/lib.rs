//! Traffic: autonomous vehicles driving the road grid one tick at a time.
//!
//! # Invariants
//! - A vehicle never reverses in place; U-turns are refused.
//! - A heading chosen at a block boundary keeps the vehicle inside the road
//!   margin for at least one more tick.
//! - Vehicles move independently; overlap is allowed.

mod controller;
mod heading;
mod vehicle;

pub use controller::TrafficController;
pub use heading::Heading;
pub use vehicle::{DrivingRules, PALETTE, RoadBounds, Vehicle};

/// Package name and version, as reported by `tinytown-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
