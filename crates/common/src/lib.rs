//! Shared value types and configuration for the town.
//!
//! # Invariants
//! - Types here carry no behaviour beyond construction and conversion.
//! - `TownConfig` defaults reproduce the stock 300x300 town.

mod config;
mod types;

pub use config::{ConfigError, HeadingDraw, TownConfig};
pub use types::{Cell, Rgb};

/// Package name and version, as reported by `tinytown-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
