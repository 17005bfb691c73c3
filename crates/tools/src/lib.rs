//! Developer Tooling: read-only scene inspection for the CLI and overlay.
//!
//! # Invariants
//! - Inspectors never mutate the scene.

mod inspector;

pub use inspector::{HeadingCounts, SceneInspector, SceneSummary, VehicleInfo};

/// Package name and version, as reported by `tinytown-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
