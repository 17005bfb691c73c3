use glam::{Mat4, Vec2, Vec3};
use tinytown_common::Rgb;

use crate::sink::{DrawSink, Primitive, TextureFlag, Vertex};

/// One `begin`..`end` block as the sink saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub primitive: Primitive,
    pub texture_flag: TextureFlag,
    pub color: Rgb,
    /// Model matrix in effect when the batch began.
    pub transform: Mat4,
    pub vertices: Vec<Vertex>,
}

impl DrawBatch {
    pub fn triangle_count(&self) -> usize {
        match self.primitive {
            Primitive::Triangles => self.vertices.len() / 3,
            Primitive::TriangleStrip => self.vertices.len().saturating_sub(2),
        }
    }

    /// Vertex positions with the batch transform applied.
    pub fn world_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .iter()
            .map(|v| self.transform.transform_point3(v.position))
    }
}

/// Sink that keeps every submission in memory.
///
/// Used by the CLI to report on a frame without a GPU and by tests to check
/// exactly what geometry a drawing routine produced.
#[derive(Debug)]
pub struct RecordingSink {
    batches: Vec<DrawBatch>,
    open: Option<DrawBatch>,
    stack: Vec<Mat4>,
    current: Mat4,
    color: Rgb,
    flag: TextureFlag,
    sun_direction: Option<Vec3>,
    viewport_size: Option<Vec2>,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self {
            batches: Vec::new(),
            open: None,
            stack: Vec::new(),
            current: Mat4::IDENTITY,
            color: Rgb::WHITE,
            flag: TextureFlag::Off,
            sun_direction: None,
            viewport_size: None,
        }
    }
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed batches in submission order.
    pub fn batches(&self) -> &[DrawBatch] {
        &self.batches
    }

    pub fn vertex_count(&self) -> usize {
        self.batches.iter().map(|b| b.vertices.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.batches.iter().map(DrawBatch::triangle_count).sum()
    }

    /// Texture flag currently in effect.
    pub fn texture_flag(&self) -> TextureFlag {
        self.flag
    }

    pub fn sun_direction(&self) -> Option<Vec3> {
        self.sun_direction
    }

    pub fn viewport_size(&self) -> Option<Vec2> {
        self.viewport_size
    }

    /// Number of transforms currently pushed.
    pub fn transform_depth(&self) -> usize {
        self.stack.len()
    }

    /// Drop recorded batches, keeping uniforms and state.
    pub fn clear(&mut self) {
        self.batches.clear();
        self.open = None;
    }
}

impl DrawSink for RecordingSink {
    fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport_size = Some(size);
    }

    fn set_sun_direction(&mut self, direction: Vec3) {
        self.sun_direction = Some(direction);
    }

    fn set_texture_flag(&mut self, flag: TextureFlag) {
        self.flag = flag;
    }

    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn push_transform(&mut self, transform: Mat4) {
        self.stack.push(self.current);
        self.current *= transform;
    }

    fn pop_transform(&mut self) {
        match self.stack.pop() {
            Some(previous) => self.current = previous,
            None => tracing::warn!("pop_transform without matching push"),
        }
    }

    fn begin(&mut self, primitive: Primitive) {
        if self.open.is_some() {
            tracing::warn!("begin inside an open batch; previous batch closed");
            self.end();
        }
        self.open = Some(DrawBatch {
            primitive,
            texture_flag: self.flag,
            color: self.color,
            transform: self.current,
            vertices: Vec::new(),
        });
    }

    fn vertex(&mut self, vertex: Vertex) {
        match &mut self.open {
            Some(batch) => batch.vertices.push(vertex),
            None => tracing::warn!("vertex submitted outside begin/end"),
        }
    }

    fn end(&mut self) {
        if let Some(batch) = self.open.take() {
            self.batches.push(batch);
        }
    }
}

impl std::fmt::Display for RecordingSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let textured = self
            .batches
            .iter()
            .filter(|b| b.texture_flag != TextureFlag::Off)
            .count();
        write!(
            f,
            "Frame: batches={} textured={} vertices={} triangles={}",
            self.batches.len(),
            textured,
            self.vertex_count(),
            self.triangle_count()
        )
    }
}
