//! Rendering Adapter: renderer-agnostic draw interface and geometry emission.
//!
//! # Invariants
//! - Geometry is emitted immediately into a `DrawSink`; nothing is retained.
//! - Every mesh leaves the texture flag off when it finishes.
//!
//! Backends implement `DrawSink`. `RecordingSink` keeps every submission in
//! memory for the CLI and for tests; the wgpu backend batches the same calls
//! into a vertex buffer.

mod prism;
mod recorder;
mod shapes;
mod sink;

pub use prism::{Face, PRISM_VERTEX_COUNT, PrismMesh, PrismSpec, Surface, face_vertices};
pub use recorder::{DrawBatch, RecordingSink};
pub use shapes::{emit_sphere, emit_torus};
pub use sink::{DrawSink, Primitive, TextureFlag, Vertex, with_transform};

/// Package name and version, as reported by `tinytown-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
