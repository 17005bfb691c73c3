use glam::Vec2;
use rand::Rng;
use rand::rngs::StdRng;
use tinytown_common::TownConfig;
use tinytown_render::DrawSink;

use crate::heading::Heading;
use crate::vehicle::{DrivingRules, Vehicle};

/// Owns the fleet and steps it.
///
/// The fleet is fixed at construction. Order is creation order; index 0 is
/// the vehicle the follow camera tracks.
pub struct TrafficController {
    vehicles: Vec<Vehicle>,
    rules: DrivingRules,
    rng: StdRng,
}

impl TrafficController {
    /// Place `fleet_size` stopped vehicles on random intersections of a
    /// `lattice.0` x `lattice.1` block lattice.
    pub fn new(
        fleet_size: usize,
        lattice: (u32, u32),
        rules: DrivingRules,
        mut rng: StdRng,
    ) -> Self {
        let (lx, ly) = (lattice.0.max(1), lattice.1.max(1));
        let vehicles = (0..fleet_size)
            .map(|_| {
                let x = rng.gen_range(0..lx) as f32 * rules.block_size;
                let y = rng.gen_range(0..ly) as f32 * rules.block_size;
                Vehicle::with_random_color(Vec2::new(x, y), &mut rng)
            })
            .collect();
        Self {
            vehicles,
            rules,
            rng,
        }
    }

    pub fn from_config(config: &TownConfig, rng: StdRng) -> Self {
        Self::new(
            config.fleet_size,
            config.blocks_per_axis(),
            DrivingRules::from_config(config),
            rng,
        )
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn rules(&self) -> &DrivingRules {
        &self.rules
    }

    /// The first vehicle created, if any.
    pub fn lead(&self) -> Option<&Vehicle> {
        self.vehicles.first()
    }

    /// Set every vehicle off heading up at cruise speed.
    pub fn start_cars(&mut self) {
        for vehicle in &mut self.vehicles {
            vehicle.start_movement(Heading::Up, self.rules.cruise_speed);
        }
        tracing::info!(vehicles = self.vehicles.len(), "fleet started");
    }

    /// Advance every vehicle exactly once.
    pub fn tick_all(&mut self) {
        for vehicle in &mut self.vehicles {
            vehicle.tick(&self.rules, &mut self.rng);
        }
    }

    /// Draw every vehicle in fleet order.
    pub fn draw_all<S: DrawSink + ?Sized>(&self, sink: &mut S) {
        for vehicle in &self.vehicles {
            vehicle.draw(sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use tinytown_render::{PRISM_VERTEX_COUNT, RecordingSink};

    fn fleet(size: usize, seed: u64) -> TrafficController {
        TrafficController::from_config(
            &TownConfig {
                fleet_size: size,
                ..TownConfig::default()
            },
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn vehicles_start_on_block_lattice() {
        let traffic = fleet(40, 1);
        assert_eq!(traffic.len(), 40);
        for v in traffic.vehicles() {
            let p = v.position();
            assert_eq!(p.x % 30.0, 0.0);
            assert_eq!(p.y % 30.0, 0.0);
            assert!((0.0..=270.0).contains(&p.x));
            assert!((0.0..=270.0).contains(&p.y));
            assert!(v.is_stopped());
        }
    }

    #[test]
    fn start_cars_heads_everyone_up() {
        let mut traffic = fleet(10, 2);
        traffic.start_cars();
        let vehicles = traffic.vehicles();
        assert!(vehicles.iter().all(|v| v.heading() == Heading::Up));
    }

    #[test]
    fn draw_all_covers_fleet() {
        let traffic = fleet(3, 3);
        let mut sink = RecordingSink::new();
        traffic.draw_all(&mut sink);
        assert_eq!(sink.vertex_count(), 3 * 4 * PRISM_VERTEX_COUNT);
    }

    #[test]
    fn same_seed_same_traffic() {
        let mut a = fleet(20, 9);
        let mut b = fleet(20, 9);
        a.start_cars();
        b.start_cars();
        for _ in 0..500 {
            a.tick_all();
            b.tick_all();
        }
        assert_eq!(a.vehicles(), b.vehicles());
    }

    #[test]
    fn empty_fleet_has_no_lead() {
        let traffic = fleet(0, 1);
        assert!(traffic.is_empty());
        assert!(traffic.lead().is_none());
    }
}
