use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::sink::{DrawSink, Primitive, TextureFlag, Vertex};

/// Solid sphere centred on the origin, `slices` around the z axis and
/// `stacks` from pole to pole. Emits `slices * stacks * 6` vertices.
pub fn emit_sphere<S: DrawSink + ?Sized>(sink: &mut S, radius: f32, slices: u32, stacks: u32) {
    let point = |stack: u32, slice: u32| {
        let polar = PI * stack as f32 / stacks as f32;
        let azimuth = TAU * slice as f32 / slices as f32;
        Vec3::new(
            polar.sin() * azimuth.cos(),
            polar.sin() * azimuth.sin(),
            polar.cos(),
        )
    };

    sink.set_texture_flag(TextureFlag::Off);
    sink.begin(Primitive::Triangles);
    for stack in 0..stacks {
        for slice in 0..slices {
            let quad = [
                point(stack, slice),
                point(stack + 1, slice),
                point(stack + 1, slice + 1),
                point(stack, slice + 1),
            ];
            for i in [0, 1, 2, 0, 2, 3] {
                sink.vertex(Vertex::flat(quad[i] * radius, quad[i]));
            }
        }
    }
    sink.end();
}

/// Solid torus around the z axis. `tube` is the tube radius and `ring` the
/// distance from the centre to the middle of the tube. Emits
/// `sides * rings * 6` vertices.
pub fn emit_torus<S: DrawSink + ?Sized>(
    sink: &mut S,
    tube: f32,
    ring: f32,
    sides: u32,
    rings: u32,
) {
    let point = |r: u32, s: u32| {
        let theta = TAU * r as f32 / rings as f32;
        let phi = TAU * s as f32 / sides as f32;
        let normal = Vec3::new(
            phi.cos() * theta.cos(),
            phi.cos() * theta.sin(),
            phi.sin(),
        );
        let centre = Vec3::new(theta.cos(), theta.sin(), 0.0) * ring;
        Vertex::flat(centre + normal * tube, normal)
    };

    sink.set_texture_flag(TextureFlag::Off);
    sink.begin(Primitive::Triangles);
    for r in 0..rings {
        for s in 0..sides {
            let quad = [
                point(r, s),
                point(r + 1, s),
                point(r + 1, s + 1),
                point(r, s + 1),
            ];
            for i in [0, 1, 2, 0, 2, 3] {
                sink.vertex(quad[i]);
            }
        }
    }
    sink.end();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingSink;

    #[test]
    fn sphere_vertex_count_and_radius() {
        let mut sink = RecordingSink::new();
        emit_sphere(&mut sink, 10.0, 5, 5);
        assert_eq!(sink.vertex_count(), 150);
        for v in &sink.batches()[0].vertices {
            assert!((v.position.length() - 10.0).abs() < 1e-3);
            assert!((v.normal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn torus_vertices_stay_within_tube() {
        let mut sink = RecordingSink::new();
        emit_torus(&mut sink, 1.0, 1.2, 6, 6);
        assert_eq!(sink.vertex_count(), 216);
        for v in &sink.batches()[0].vertices {
            let radial = v.position.truncate().length();
            assert!(radial <= 2.2 + 1e-4);
            assert!(v.position.z.abs() <= 1.0 + 1e-4);
        }
    }

    #[test]
    fn shapes_are_untextured() {
        let mut sink = RecordingSink::new();
        sink.set_texture_flag(TextureFlag::Slot(3));
        emit_sphere(&mut sink, 1.0, 4, 4);
        assert_eq!(sink.batches()[0].texture_flag, TextureFlag::Off);
    }
}
