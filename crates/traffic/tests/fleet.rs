use rand::SeedableRng;
use rand::rngs::StdRng;
use tinytown_common::TownConfig;
use tinytown_traffic::{Heading, TrafficController};

fn stock_fleet(seed: u64) -> TrafficController {
    TrafficController::from_config(&TownConfig::default(), StdRng::seed_from_u64(seed))
}

#[test]
fn first_tick_moves_every_vehicle_up() {
    let mut traffic = stock_fleet(1);
    traffic.start_cars();
    let before: Vec<f32> = traffic.vehicles().iter().map(|v| v.position().y).collect();

    traffic.tick_all();

    let step = traffic.rules().block_size * traffic.rules().cruise_speed;
    assert!((step - 0.3).abs() < 1e-6);
    for (v, y0) in traffic.vehicles().iter().zip(before) {
        assert_eq!(v.heading(), Heading::Up);
        assert!((v.position().y - (y0 + step)).abs() < 1e-4);
    }
}

#[test]
fn vehicles_respect_margin_when_turning() {
    let mut traffic = stock_fleet(4);
    traffic.start_cars();
    let bounds = traffic.rules().bounds;

    for _ in 0..5_000 {
        traffic.tick_all();
        for v in traffic.vehicles() {
            // Right after a new heading is picked the vehicle has taken one
            // step; that step must have been legal from where it stood.
            if v.ticks() == 1 {
                let p = v.position() - v.heading().step() * 0.3;
                match v.heading() {
                    Heading::Right => assert!(p.x < bounds.max.x),
                    Heading::Left => assert!(p.x > bounds.min.x),
                    Heading::Up => assert!(p.y < bounds.max.y),
                    Heading::Down => assert!(p.y > bounds.min.y),
                    Heading::Stop => {}
                }
            }
        }
    }
}

#[test]
fn fleet_stays_near_plane() {
    let mut traffic = stock_fleet(8);
    traffic.start_cars();
    for _ in 0..20_000 {
        traffic.tick_all();
    }
    for v in traffic.vehicles() {
        let p = v.position();
        assert!((-1.0..=301.0).contains(&p.x), "{p}");
        assert!((-1.0..=301.0).contains(&p.y), "{p}");
    }
}

#[test]
fn no_vehicle_ever_reverses() {
    for seed in 0..40 {
        let mut traffic = stock_fleet(seed);
        traffic.start_cars();
        let mut last: Vec<Heading> = traffic.vehicles().iter().map(|v| v.heading()).collect();
        for tick in 0..5_000 {
            traffic.tick_all();
            for (v, prev) in traffic.vehicles().iter().zip(last.iter_mut()) {
                assert_ne!(
                    prev.reverse(),
                    Some(v.heading()),
                    "seed {seed} tick {tick} at {}",
                    v.position()
                );
                *prev = v.heading();
            }
        }
    }
}
