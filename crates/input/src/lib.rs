//! Input: raw keys and mouse motion mapped to a small action graph.
//!
//! # Invariants
//! - The scene consumes actions, never raw input events.
//! - Windowing layers translate their own key codes into `Key` first.

pub mod action;
mod bindings;

pub use action::{Action, LookDir, MoveDir};
pub use bindings::{Key, MOUSE_LOOK_DEGREES_PER_PIXEL, bind_key, mouse_look};

/// Package name and version, as reported by `tinytown-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
