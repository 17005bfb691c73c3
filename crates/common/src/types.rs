use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// One square block of the ground-plane grid.
///
/// `origin` is the smallest (x, y) corner in block-plane coordinates; world
/// space maps block-plane y to negative world z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub origin: Vec2,
    pub size: f32,
}

impl Cell {
    pub fn new(origin: Vec2, size: f32) -> Self {
        Self { origin, size }
    }

    /// Centre of the cell in block-plane coordinates.
    pub fn center(&self) -> Vec2 {
        self.origin + Vec2::splat(self.size / 2.0)
    }

    /// World-space position of a point offset from the cell origin.
    pub fn world_at(&self, dx: f32, height: f32, dy: f32) -> Vec3 {
        Vec3::new(self.origin.x + dx, height, -(self.origin.y + dy))
    }
}

/// Flat RGB colour, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Rgb> for Vec3 {
    fn from(c: Rgb) -> Self {
        Vec3::new(c.r, c.g, c.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_center_is_half_size_in() {
        let cell = Cell::new(Vec2::new(30.0, 60.0), 30.0);
        assert_eq!(cell.center(), Vec2::new(45.0, 75.0));
    }

    #[test]
    fn world_at_negates_plane_y() {
        let cell = Cell::new(Vec2::new(30.0, 60.0), 30.0);
        assert_eq!(cell.world_at(5.0, 0.1, 25.0), Vec3::new(35.0, 0.1, -85.0));
    }

    #[test]
    fn rgb_converts_to_vec3() {
        let v: Vec3 = Rgb::new(0.2, 0.6, 0.2).into();
        assert_eq!(v, Vec3::new(0.2, 0.6, 0.2));
    }
}
