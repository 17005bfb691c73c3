//! wgpu render backend for the town.
//!
//! The scene talks to a `FrameBatch`, which flattens every immediate-mode
//! submission into one world-space triangle list on the CPU. `WgpuRenderer`
//! uploads that list once per frame and draws it with a single pipeline.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - Shader and pipeline errors surface at construction, never mid-frame.

mod batch;
mod error;
mod gpu;
mod shaders;

pub use batch::{FrameBatch, GpuVertex};
pub use error::RenderError;
pub use gpu::WgpuRenderer;
pub use shaders::TOWN_SHADER;
