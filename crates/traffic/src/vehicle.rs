use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec2, Vec3};
use rand::Rng;
use tinytown_common::{HeadingDraw, Rgb, TownConfig};
use tinytown_render::{DrawSink, PrismMesh, TextureFlag, with_transform};

use crate::heading::Heading;

/// Body colours a vehicle can be given: red, green, blue, dark grey, white,
/// yellow.
pub const PALETTE: [Rgb; 6] = [
    Rgb::new(0.8, 0.0, 0.0),
    Rgb::new(0.0, 0.8, 0.0),
    Rgb::new(0.0, 0.0, 0.8),
    Rgb::new(0.4, 0.4, 0.4),
    Rgb::new(0.9, 0.9, 0.9),
    Rgb::new(0.8, 0.8, 0.0),
];

// Sub-blocks stacked on top of and in front of/behind the base block.
const BODY_OFFSETS: [Vec3; 3] = [
    Vec3::new(0.0, 2.0, 0.0),
    Vec3::new(0.0, 0.0, -2.0),
    Vec3::new(0.0, 0.0, 2.0),
];

/// The paved area vehicles keep to, in block-plane coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl RoadBounds {
    /// Inset a `width` x `height` plane by `margin` on every side.
    pub fn inset(width: f32, height: f32, margin: f32) -> Self {
        Self {
            min: Vec2::splat(margin),
            max: Vec2::new(width - margin, height - margin),
        }
    }
}

/// Parameters shared by every vehicle in a fleet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivingRules {
    pub block_size: f32,
    /// Speed adopted whenever a new heading is picked.
    pub cruise_speed: f32,
    pub bounds: RoadBounds,
    pub heading_draw: HeadingDraw,
}

impl DrivingRules {
    pub fn from_config(config: &TownConfig) -> Self {
        Self {
            block_size: config.block_size as f32,
            cruise_speed: config.cruise_speed,
            bounds: RoadBounds::inset(
                config.plane_width as f32,
                config.plane_height as f32,
                config.road_margin,
            ),
            heading_draw: config.heading_draw,
        }
    }
}

impl Default for DrivingRules {
    fn default() -> Self {
        Self::from_config(&TownConfig::default())
    }
}

/// One car on the road grid.
///
/// Moves in straight segments of one block; when a segment completes it
/// picks a new legal heading at random.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    position: Vec2,
    heading: Heading,
    speed: f32,
    ticks: u32,
    color: Rgb,
}

impl Vehicle {
    /// A stopped vehicle at `position`.
    pub fn new(position: Vec2, color: Rgb) -> Self {
        Self {
            position,
            heading: Heading::Stop,
            speed: 0.0,
            ticks: 0,
            color,
        }
    }

    /// A stopped vehicle with a colour picked from `PALETTE`.
    pub fn with_random_color<R: Rng + ?Sized>(position: Vec2, rng: &mut R) -> Self {
        let color = PALETTE[rng.gen_range(0..PALETTE.len())];
        Self::new(position, color)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Ticks spent in the current segment.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_stopped(&self) -> bool {
        self.heading == Heading::Stop
    }

    /// Position in world space: plane y becomes world -z.
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.position.x, 0.0, -self.position.y)
    }

    /// Begin a new segment. The speed and tick counter always reset; the
    /// heading is kept if `heading` would reverse the current one.
    pub fn start_movement(&mut self, heading: Heading, speed: f32) {
        self.speed = speed;
        self.ticks = 0;
        if self.heading.reverse() == Some(heading) {
            return;
        }
        self.heading = heading;
    }

    /// Whether one more step along `heading` stays inside `bounds`.
    pub fn can_move(&self, heading: Heading, bounds: &RoadBounds) -> bool {
        let p = self.position;
        match heading {
            Heading::Right => p.x < bounds.max.x,
            Heading::Left => p.x > bounds.min.x,
            Heading::Up => p.y < bounds.max.y,
            Heading::Down => p.y > bounds.min.y,
            Heading::Stop => true,
        }
    }

    /// Ticks one segment lasts at the current speed; `None` while parked.
    pub fn segment_ticks(&self) -> Option<u32> {
        if self.speed > 0.0 {
            Some((1.0 / self.speed).round() as u32)
        } else {
            None
        }
    }

    /// Advance one animation tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, rules: &DrivingRules, rng: &mut R) {
        if self.segment_ticks() == Some(self.ticks) {
            // Candidates are judged against the heading the segment ended
            // with; a reverse draw keeps that heading.
            let previous = self.heading;
            let next = loop {
                let candidate = Heading::draw(rules.heading_draw, rng);
                let resolved = if previous.reverse() == Some(candidate) {
                    previous
                } else {
                    candidate
                };
                if self.can_move(resolved, &rules.bounds) {
                    break candidate;
                }
            };
            self.start_movement(next, rules.cruise_speed);
            if self.heading != previous {
                tracing::trace!(?previous, heading = ?self.heading, "vehicle turned");
            }
        }

        self.ticks = self.ticks.saturating_add(1);
        self.position += self.heading.step() * rules.block_size * self.speed;
    }

    /// Submit the body: a base block with one block on top and one in front
    /// and behind, turned a quarter when driving along x.
    pub fn draw<S: DrawSink + ?Sized>(&self, sink: &mut S) {
        sink.set_texture_flag(TextureFlag::Off);
        let mut body = Mat4::from_translation(self.world_position());
        if self.heading.is_horizontal() {
            body *= Mat4::from_rotation_y(FRAC_PI_2);
        }
        let block = PrismMesh::flat(1.0, self.color);
        with_transform(sink, body, |sink| {
            block.emit(sink);
            for offset in BODY_OFFSETS {
                let offset = Mat4::from_translation(offset);
                with_transform(sink, offset, |sink| block.emit(sink));
            }
        });
    }
}
