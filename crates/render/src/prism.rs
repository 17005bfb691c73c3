use glam::{Vec2, Vec3};
use tinytown_common::Rgb;

use crate::sink::{DrawSink, Primitive, TextureFlag, Vertex};

/// Vertices submitted by one `PrismMesh::emit`: 6 faces x 2 triangles.
pub const PRISM_VERTEX_COUNT: usize = 36;

/// Geometry of an axis-aligned box spanning `[-1, 1]` in x and z, with its
/// bottom at y = -1 and its top four corners at y = `height`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrismSpec {
    height: f32,
    corners: [Vec3; 8],
    texcoords: [Vec2; 4],
}

impl PrismSpec {
    pub fn new(height: f32) -> Self {
        let h = height;
        Self {
            height,
            corners: [
                Vec3::new(-1.0, -1.0, 1.0),
                Vec3::new(1.0, -1.0, 1.0),
                Vec3::new(1.0, h, 1.0),
                Vec3::new(-1.0, h, 1.0),
                Vec3::new(-1.0, h, -1.0),
                Vec3::new(1.0, h, -1.0),
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(1.0, -1.0, -1.0),
            ],
            texcoords: [
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    pub fn texcoords(&self) -> &[Vec2; 4] {
        &self.texcoords
    }
}

/// Prism faces in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
}

// Which of a face's four corners and which texcoord each of its six
// submissions uses. Every face shares the same pattern.
const QUAD_CORNERS: [usize; 6] = [0, 1, 2, 0, 2, 3];
const QUAD_TEXCOORDS: [usize; 6] = [3, 0, 1, 3, 1, 2];

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Up,
        Face::Down,
    ];

    /// Indices into `PrismSpec::corners` for this face's quad.
    fn corner_indices(self) -> [usize; 4] {
        match self {
            Face::Front => [3, 0, 1, 2],
            Face::Back => [4, 6, 7, 5],
            Face::Left => [4, 6, 0, 3],
            Face::Right => [2, 1, 7, 5],
            Face::Up => [4, 3, 2, 5],
            Face::Down => [0, 6, 7, 1],
        }
    }

    /// Outward normal.
    pub fn normal(self) -> Vec3 {
        match self {
            Face::Front => Vec3::Z,
            Face::Back => Vec3::NEG_Z,
            Face::Left => Vec3::NEG_X,
            Face::Right => Vec3::X,
            Face::Up => Vec3::Y,
            Face::Down => Vec3::NEG_Y,
        }
    }

    pub fn is_wall(self) -> bool {
        !matches!(self, Face::Up | Face::Down)
    }
}

/// The six vertex submissions (two triangles) for one face.
pub fn face_vertices(spec: &PrismSpec, face: Face) -> [Vertex; 6] {
    let quad = face.corner_indices();
    let normal = face.normal();
    std::array::from_fn(|i| {
        Vertex::new(
            spec.corners[quad[QUAD_CORNERS[i]]],
            normal,
            spec.texcoords[QUAD_TEXCOORDS[i]],
        )
    })
}

/// How a prism is coloured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// Walls sample texture slot `base`; roof and floor sample `base + 1`.
    Textured { base: u32 },
    /// One colour on all six faces, no texture.
    Flat(Rgb),
}

/// A rectangular prism ready to emit.
#[derive(Debug, Clone, PartialEq)]
pub struct PrismMesh {
    spec: PrismSpec,
    surface: Surface,
}

impl PrismMesh {
    pub fn textured(height: f32, base: u32) -> Self {
        Self {
            spec: PrismSpec::new(height),
            surface: Surface::Textured { base },
        }
    }

    pub fn flat(height: f32, color: Rgb) -> Self {
        Self {
            spec: PrismSpec::new(height),
            surface: Surface::Flat(color),
        }
    }

    pub fn spec(&self) -> &PrismSpec {
        &self.spec
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    fn face_flag(&self, face: Face) -> TextureFlag {
        match self.surface {
            Surface::Textured { base } if face.is_wall() => TextureFlag::Slot(base),
            Surface::Textured { base } => TextureFlag::Slot(base + 1),
            Surface::Flat(_) => TextureFlag::Off,
        }
    }

    /// Submit all six faces, front, back, left, right, up, down.
    pub fn emit<S: DrawSink + ?Sized>(&self, sink: &mut S) {
        let color = match self.surface {
            Surface::Textured { .. } => Rgb::WHITE,
            Surface::Flat(color) => color,
        };
        sink.set_color(color);
        for face in Face::ALL {
            sink.set_texture_flag(self.face_flag(face));
            sink.begin(Primitive::Triangles);
            for vertex in face_vertices(&self.spec, face) {
                sink.vertex(vertex);
            }
            sink.end();
        }
        sink.set_texture_flag(TextureFlag::Off);
    }
}
