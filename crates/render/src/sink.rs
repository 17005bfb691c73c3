use glam::{Mat4, Vec2, Vec3};
use tinytown_common::Rgb;

/// How the submitted vertices between `begin` and `end` are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    TriangleStrip,
}

/// One vertex submission in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub texcoord: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, texcoord: Vec2) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }

    /// Untextured vertex.
    pub fn flat(position: Vec3, normal: Vec3) -> Self {
        Self::new(position, normal, Vec2::ZERO)
    }
}

/// Shader-visible texture toggle.
///
/// `Off` draws with the flat vertex colour; `Slot(n)` samples texture unit `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFlag {
    #[default]
    Off,
    Slot(u32),
}

impl TextureFlag {
    /// Scalar handed to the shader: 0 for off, `n + 1` for slot `n`.
    pub fn uniform_value(self) -> f32 {
        match self {
            TextureFlag::Off => 0.0,
            TextureFlag::Slot(n) => n as f32 + 1.0,
        }
    }
}

/// Immediate-mode draw target.
///
/// The scene issues state changes and vertex submissions in order; the sink
/// decides what to do with them. Transforms nest: `push_transform` multiplies
/// onto the current model matrix and `pop_transform` restores the previous one.
pub trait DrawSink {
    fn set_viewport_size(&mut self, size: Vec2);
    fn set_sun_direction(&mut self, direction: Vec3);
    fn set_texture_flag(&mut self, flag: TextureFlag);
    /// Colour applied to subsequent vertices.
    fn set_color(&mut self, color: Rgb);
    fn push_transform(&mut self, transform: Mat4);
    fn pop_transform(&mut self);
    fn begin(&mut self, primitive: Primitive);
    fn vertex(&mut self, vertex: Vertex);
    fn end(&mut self);
}

/// Run `draw` with `transform` pushed, popping it afterwards.
pub fn with_transform<S, F>(sink: &mut S, transform: Mat4, draw: F)
where
    S: DrawSink + ?Sized,
    F: FnOnce(&mut S),
{
    sink.push_transform(transform);
    draw(sink);
    sink.pop_transform();
}
