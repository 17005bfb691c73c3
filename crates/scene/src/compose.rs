use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};
use tinytown_common::{Cell, Rgb};
use tinytown_layout::BlockContent;
use tinytown_render::{
    DrawSink, Primitive, PrismMesh, TextureFlag, Vertex, emit_sphere, emit_torus, with_transform,
};

pub const CLEAR_COLOR: Rgb = Rgb::new(0.52, 0.8, 0.92);
pub const SUN_DIRECTION: Vec3 = Vec3::new(0.0, 1.0, 1.0);
pub const GROUND_COLOR: Rgb = Rgb::new(0.2, 0.2, 0.2);
pub const LOT_COLOR: Rgb = Rgb::new(0.5, 0.5, 0.5);
pub const LANE_COLOR: Rgb = Rgb::new(0.9, 0.9, 0.0);
pub const GRASS_COLOR: Rgb = Rgb::new(0.2, 0.6, 0.2);
pub const TRUNK_COLOR: Rgb = Rgb::new(0.6, 0.3, 0.0);

const GROUND_APRON: f32 = 5.0;
const LOT_INSET: f32 = 5.0;
const LOT_HEIGHT: f32 = 0.1;
const LANE_HEIGHT: f32 = 0.1;
const LANE_DASH: f32 = 2.0;
const LANE_WIDTH: f32 = 0.25;
const LANE_PERIOD: usize = 6;
const GRASS_INSET: f32 = 7.0;
const GRASS_HEIGHT: f32 = 0.16;
const BUILDING_BASE: f32 = 2.0;
const BUILDING_FOOTPRINT: f32 = 5.0;
const CANOPY_HEIGHT: f32 = 15.0;
const CANOPY_RADIUS: f32 = 10.0;
const TRUNK_STRETCH: f32 = 7.5;
const TRUNK_LIFT: f32 = 1.01;

/// Horizontal quad at `height` between two block-plane corners, as a strip.
fn flat_square<S: DrawSink + ?Sized>(sink: &mut S, cell: &Cell, inset: f32, height: f32) {
    let (near, far) = (inset, cell.size - inset);
    sink.begin(Primitive::TriangleStrip);
    for (dx, dy) in [(near, far), (near, near), (far, far), (far, near)] {
        sink.vertex(Vertex::flat(cell.world_at(dx, height, dy), Vec3::Y));
    }
    sink.end();
}

/// One lane dash spanning `x0..x1` and `z0..z1` in world space.
fn dash<S: DrawSink + ?Sized>(sink: &mut S, x0: f32, z0: f32, x1: f32, z1: f32) {
    let a = Vec3::new(x0, LANE_HEIGHT, z0);
    let b = Vec3::new(x0, LANE_HEIGHT, z1);
    let c = Vec3::new(x1, LANE_HEIGHT, z0);
    let d = Vec3::new(x1, LANE_HEIGHT, z1);
    for p in [a, b, c, c, b, d] {
        sink.vertex(Vertex::flat(p, Vec3::Y));
    }
}

/// Dark ground quad under a `width` x `height` plane, with a small apron.
pub fn draw_ground<S: DrawSink + ?Sized>(sink: &mut S, width: f32, height: f32) {
    let (x0, x1) = (-GROUND_APRON, width + GROUND_APRON);
    let (z0, z1) = (GROUND_APRON, -(height + GROUND_APRON));
    let corners = [
        Vec3::new(x0, 0.0, z1),
        Vec3::new(x0, 0.0, z0),
        Vec3::new(x1, 0.0, z0),
        Vec3::new(x1, 0.0, z1),
    ];

    sink.set_texture_flag(TextureFlag::Off);
    sink.set_color(GROUND_COLOR);
    sink.begin(Primitive::Triangles);
    for i in [0, 1, 2, 0, 2, 3] {
        sink.vertex(Vertex::flat(corners[i], Vec3::Y));
    }
    sink.end();
}

/// Paved lot inside one cell.
pub fn draw_lot<S: DrawSink + ?Sized>(sink: &mut S, cell: &Cell) {
    sink.set_color(LOT_COLOR);
    flat_square(sink, cell, LOT_INSET, LOT_HEIGHT);
}

/// Dashed lane markings along all four edges of a cell.
pub fn draw_lane_markings<S: DrawSink + ?Sized>(sink: &mut S, cell: &Cell) {
    let (x, y, size) = (cell.origin.x, cell.origin.y, cell.size);
    let (far, right) = (-y - size, x + size);
    let limit = size as usize + 2;

    sink.set_color(LANE_COLOR);
    sink.begin(Primitive::Triangles);
    for i in (2..limit).step_by(LANE_PERIOD) {
        let i = i as f32;
        dash(sink, x + i, far, x + i + LANE_DASH, far + LANE_WIDTH);
        dash(sink, x + i, -y, x + i + LANE_DASH, -y - LANE_WIDTH);
    }
    for i in (2..limit).step_by(LANE_PERIOD) {
        let i = i as f32;
        dash(sink, x, -y - i, x + LANE_WIDTH, -y - i - LANE_DASH);
        dash(sink, right, -y - i, right - LANE_WIDTH, -y - i - LANE_DASH);
    }
    sink.end();
}

/// Building, or grass with a tree, at the centre of a cell.
pub fn draw_block<S: DrawSink + ?Sized>(sink: &mut S, cell: &Cell, content: BlockContent) {
    let center = cell.center();
    match content {
        BlockContent::Building {
            height,
            texture_base,
        } => {
            let place = Mat4::from_translation(Vec3::new(center.x, BUILDING_BASE, -center.y))
                * Mat4::from_scale(Vec3::new(BUILDING_FOOTPRINT, 1.0, BUILDING_FOOTPRINT));
            with_transform(sink, place, |sink| {
                PrismMesh::textured(height, texture_base).emit(sink);
            });
        }
        BlockContent::Grass => {
            sink.set_texture_flag(TextureFlag::Off);
            sink.set_color(GRASS_COLOR);
            flat_square(sink, cell, GRASS_INSET, GRASS_HEIGHT);

            let canopy = Mat4::from_translation(Vec3::new(center.x, CANOPY_HEIGHT, -center.y));
            with_transform(sink, canopy, |sink| emit_sphere(sink, CANOPY_RADIUS, 5, 5));

            // The stretch applies to the trunk's placement as well as its shape.
            let trunk = Mat4::from_scale(Vec3::new(1.0, TRUNK_STRETCH, 1.0))
                * Mat4::from_translation(Vec3::new(center.x, TRUNK_LIFT, -center.y))
                * Mat4::from_rotation_x(FRAC_PI_2);
            sink.set_color(TRUNK_COLOR);
            with_transform(sink, trunk, |sink| emit_torus(sink, 1.0, 1.2, 6, 6));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use tinytown_render::{PRISM_VERTEX_COUNT, RecordingSink};

    fn cell() -> Cell {
        Cell::new(Vec2::new(30.0, 60.0), 30.0)
    }

    #[test]
    fn ground_covers_plane_with_apron() {
        let mut sink = RecordingSink::new();
        draw_ground(&mut sink, 300.0, 300.0);
        let batch = &sink.batches()[0];
        assert_eq!(batch.color, GROUND_COLOR);
        assert_eq!(batch.vertices.len(), 6);
        let xs: Vec<f32> = batch.vertices.iter().map(|v| v.position.x).collect();
        let zs: Vec<f32> = batch.vertices.iter().map(|v| v.position.z).collect();
        assert!(xs.contains(&-5.0) && xs.contains(&305.0));
        assert!(zs.contains(&5.0) && zs.contains(&-305.0));
    }

    #[test]
    fn lot_is_inset_strip() {
        let mut sink = RecordingSink::new();
        draw_lot(&mut sink, &cell());
        let batch = &sink.batches()[0];
        assert_eq!(batch.primitive, Primitive::TriangleStrip);
        assert_eq!(batch.triangle_count(), 2);
        for v in &batch.vertices {
            assert_eq!(v.position.y, 0.1);
            assert!((35.0..=55.0).contains(&v.position.x));
            assert!((-85.0..=-65.0).contains(&v.position.z));
        }
    }

    #[test]
    fn lane_markings_have_twenty_dashes_per_block() {
        let mut sink = RecordingSink::new();
        draw_lane_markings(&mut sink, &cell());
        let batch = &sink.batches()[0];
        assert_eq!(batch.color, LANE_COLOR);
        assert_eq!(batch.vertices.len(), 5 * 4 * 6);
    }

    #[test]
    fn building_is_textured_prism_at_centre() {
        let mut sink = RecordingSink::new();
        draw_block(
            &mut sink,
            &cell(),
            BlockContent::Building {
                height: 20.0,
                texture_base: 2,
            },
        );
        assert_eq!(sink.vertex_count(), PRISM_VERTEX_COUNT);
        assert_eq!(sink.transform_depth(), 0);
        assert_eq!(sink.batches()[0].texture_flag, TextureFlag::Slot(2));
        let top = sink
            .batches()
            .iter()
            .flat_map(|b| b.world_positions())
            .fold(f32::MIN, |m, p| m.max(p.y));
        assert_eq!(top, 22.0);
        let centre = sink.batches()[0].transform.transform_point3(Vec3::ZERO);
        assert_eq!(centre, Vec3::new(45.0, 2.0, -75.0));
    }

    #[test]
    fn grass_block_has_patch_canopy_and_trunk() {
        let mut sink = RecordingSink::new();
        draw_block(&mut sink, &cell(), BlockContent::Grass);
        let batches = sink.batches();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].color, GRASS_COLOR);
        assert_eq!(batches[1].vertices.len(), 5 * 5 * 6);
        assert_eq!(batches[2].color, TRUNK_COLOR);
        assert_eq!(batches[2].vertices.len(), 6 * 6 * 6);
        assert!(batches.iter().all(|b| b.texture_flag == TextureFlag::Off));
        assert_eq!(sink.transform_depth(), 0);
    }
}
