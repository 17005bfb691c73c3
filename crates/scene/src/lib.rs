//! Scene: the single context object behind every frame and input event.
//!
//! # Invariants
//! - Within a frame, ground, lots, lane markings and blocks are emitted
//!   before the fleet is drawn, and the fleet is drawn before it is ticked.
//! - The block grid and height sampler are rewound before every pass.
//! - Input is applied strictly between frames.

mod camera;
mod compose;
mod state;

pub use camera::{CameraMode, CameraView, FlyCamera, follow_view, orbit_view, projection};
pub use compose::{
    CLEAR_COLOR, GRASS_COLOR, GROUND_COLOR, LANE_COLOR, LOT_COLOR, SUN_DIRECTION, TRUNK_COLOR,
    draw_block, draw_ground, draw_lane_markings, draw_lot,
};
pub use state::{Control, SceneState};

/// Package name and version, as reported by `tinytown-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
