//! Layout: ground-plane partition and per-block content decisions.
//!
//! # Invariants
//! - Enumerators carry a single cursor; callers reset before every full pass.
//! - Height samples are drawn once at construction and never re-rolled, so a
//!   given block keeps its content for the lifetime of the process.

mod block_grid;
mod plan;
mod sampler;

pub use block_grid::BlockGrid;
pub use plan::{BlockContent, BlockPlan, TEXTURE_PAIRS};
pub use sampler::HeightSampler;

/// Package name and version, as reported by `tinytown-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
