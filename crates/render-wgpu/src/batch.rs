use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec2, Vec3};
use tinytown_common::Rgb;
use tinytown_render::{DrawSink, Primitive, TextureFlag, Vertex};

/// One world-space vertex as the town shader reads it.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub texcoord: [f32; 2],
    /// 0 for flat colour, `n + 1` to sample texture slot `n`.
    pub tex_flag: f32,
}

/// CPU-side frame accumulator.
///
/// Applies the transform stack to each vertex as it is submitted and turns
/// strips into plain triangles, so the GPU sees one triangle list per frame.
#[derive(Debug)]
pub struct FrameBatch {
    vertices: Vec<GpuVertex>,
    open: Option<(Primitive, Vec<Vertex>)>,
    color: Rgb,
    flag: TextureFlag,
    current: Mat4,
    stack: Vec<Mat4>,
    sun_direction: Vec3,
    viewport_size: Vec2,
}

impl Default for FrameBatch {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            open: None,
            color: Rgb::WHITE,
            flag: TextureFlag::Off,
            current: Mat4::IDENTITY,
            stack: Vec::new(),
            sun_direction: Vec3::Y,
            viewport_size: Vec2::ONE,
        }
    }
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame. Uniforms carry over.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.open = None;
        self.current = Mat4::IDENTITY;
        self.stack.clear();
    }

    pub fn vertices(&self) -> &[GpuVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn sun_direction(&self) -> Vec3 {
        self.sun_direction
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    fn push_world(&mut self, v: &Vertex, normal_matrix: &Mat3) {
        let position = self.current.transform_point3(v.position);
        let normal = (*normal_matrix * v.normal).normalize_or_zero();
        self.vertices.push(GpuVertex {
            position: position.to_array(),
            normal: normal.to_array(),
            color: self.color.to_array(),
            texcoord: v.texcoord.to_array(),
            tex_flag: self.flag.uniform_value(),
        });
    }
}

impl DrawSink for FrameBatch {
    fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport_size = size;
    }

    fn set_sun_direction(&mut self, direction: Vec3) {
        self.sun_direction = direction;
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
            self.end();
        }
        self.open = Some((primitive, Vec::new()));
    }

    fn vertex(&mut self, vertex: Vertex) {
        if let Some((_, pending)) = &mut self.open {
            pending.push(vertex);
        }
    }

    fn end(&mut self) {
        let Some((primitive, pending)) = self.open.take() else {
            return;
        };
        let normal_matrix = Mat3::from_mat4(self.current).inverse().transpose();
        match primitive {
            Primitive::Triangles => {
                let whole = pending.len() - pending.len() % 3;
                for v in &pending[..whole] {
                    self.push_world(v, &normal_matrix);
                }
            }
            Primitive::TriangleStrip => {
                for i in 0..pending.len().saturating_sub(2) {
                    // Odd triangles swap their first two vertices to keep winding.
                    let tri = if i % 2 == 0 {
                        [i, i + 1, i + 2]
                    } else {
                        [i + 1, i, i + 2]
                    };
                    for k in tri {
                        self.push_world(&pending[k], &normal_matrix);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinytown_render::PrismMesh;

    fn quad_strip(sink: &mut FrameBatch) {
        sink.begin(Primitive::TriangleStrip);
        for (x, z) in [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)] {
            sink.vertex(Vertex::flat(Vec3::new(x, 0.0, z), Vec3::Y));
        }
        sink.end();
    }

    #[test]
    fn strip_becomes_triangles() {
        let mut batch = FrameBatch::new();
        quad_strip(&mut batch);
        assert_eq!(batch.vertex_count(), 6);
        assert_eq!(batch.vertices()[3].position, [1.0, 0.0, 0.0]);
        assert_eq!(batch.vertices()[4].position, [0.0, 0.0, 1.0]);
        assert_eq!(batch.vertices()[5].position, [1.0, 0.0, 1.0]);
    }

    #[test]
    fn transform_is_baked_in() {
        let mut batch = FrameBatch::new();
        batch.push_transform(Mat4::from_translation(Vec3::new(10.0, 0.0, -5.0)));
        quad_strip(&mut batch);
        batch.pop_transform();
        assert_eq!(batch.vertices()[0].position, [10.0, 0.0, -5.0]);
    }

    #[test]
    fn normals_survive_non_uniform_scale() {
        let mut batch = FrameBatch::new();
        batch.push_transform(Mat4::from_scale(Vec3::new(5.0, 1.0, 5.0)));
        PrismMesh::textured(3.0, 0).emit(&mut batch);
        for v in batch.vertices() {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn color_and_flag_are_per_vertex() {
        let mut batch = FrameBatch::new();
        PrismMesh::textured(2.0, 4).emit(&mut batch);
        let flags: Vec<f32> = batch.vertices().iter().map(|v| v.tex_flag).collect();
        assert_eq!(flags[0], 5.0);
        assert_eq!(flags[35], 6.0);
        batch.set_color(Rgb::new(0.5, 0.25, 0.0));
        batch.begin(Primitive::Triangles);
        batch.vertex(Vertex::flat(Vec3::ZERO, Vec3::Y));
        batch.vertex(Vertex::flat(Vec3::X, Vec3::Y));
        batch.vertex(Vertex::flat(Vec3::Z, Vec3::Y));
        batch.end();
        assert_eq!(batch.vertices()[36].color, [0.5, 0.25, 0.0]);
        assert_eq!(batch.vertices()[36].tex_flag, 0.0);
    }

    #[test]
    fn clear_keeps_uniforms() {
        let mut batch = FrameBatch::new();
        batch.set_sun_direction(Vec3::new(0.0, 1.0, 1.0));
        batch.set_viewport_size(Vec2::new(800.0, 600.0));
        quad_strip(&mut batch);
        batch.clear();
        assert_eq!(batch.vertex_count(), 0);
        assert_eq!(batch.sun_direction(), Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(batch.viewport_size(), Vec2::new(800.0, 600.0));
    }
}
