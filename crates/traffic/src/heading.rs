use glam::{Vec2, Vec3};
use rand::Rng;
use serde::Serialize;
use tinytown_common::HeadingDraw;

/// Direction of travel on the block plane, or stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Heading {
    Right,
    Left,
    Up,
    Down,
    Stop,
}

impl Heading {
    pub const ALL: [Heading; 5] = [
        Heading::Right,
        Heading::Left,
        Heading::Up,
        Heading::Down,
        Heading::Stop,
    ];

    /// The heading that would undo this one, if any.
    pub fn reverse(self) -> Option<Heading> {
        match self {
            Heading::Right => Some(Heading::Left),
            Heading::Left => Some(Heading::Right),
            Heading::Up => Some(Heading::Down),
            Heading::Down => Some(Heading::Up),
            Heading::Stop => None,
        }
    }

    /// Unit step on the block plane.
    pub fn step(self) -> Vec2 {
        match self {
            Heading::Right => Vec2::X,
            Heading::Left => Vec2::NEG_X,
            Heading::Up => Vec2::Y,
            Heading::Down => Vec2::NEG_Y,
            Heading::Stop => Vec2::ZERO,
        }
    }

    /// Direction a driver looks in world space. Plane y maps to world -z;
    /// a stopped vehicle looks along +x.
    pub fn view_direction(self) -> Vec3 {
        match self {
            Heading::Right | Heading::Stop => Vec3::X,
            Heading::Left => Vec3::NEG_X,
            Heading::Up => Vec3::NEG_Z,
            Heading::Down => Vec3::Z,
        }
    }

    /// Whether the vehicle body is drawn turned a quarter around the
    /// vertical axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Heading::Right | Heading::Left)
    }

    /// Pick a candidate heading.
    pub fn draw<R: Rng + ?Sized>(mode: HeadingDraw, rng: &mut R) -> Heading {
        let index = match mode {
            HeadingDraw::Uniform => rng.gen_range(0..Self::ALL.len()),
            HeadingDraw::Legacy => rng.gen_range(0..9) % Self::ALL.len(),
        };
        Self::ALL[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn reverse_pairs() {
        assert_eq!(Heading::Right.reverse(), Some(Heading::Left));
        assert_eq!(Heading::Up.reverse(), Some(Heading::Down));
        assert_eq!(Heading::Stop.reverse(), None);
    }

    #[test]
    fn up_looks_down_negative_z() {
        assert_eq!(Heading::Up.view_direction(), Vec3::NEG_Z);
        assert_eq!(Heading::Up.step(), Vec2::Y);
    }

    fn histogram(mode: HeadingDraw) -> [usize; 5] {
        let mut rng = StdRng::seed_from_u64(5);
        let mut counts = [0usize; 5];
        for _ in 0..90_000 {
            let h = Heading::draw(mode, &mut rng);
            let i = Heading::ALL.iter().position(|&x| x == h).unwrap();
            counts[i] += 1;
        }
        counts
    }

    #[test]
    fn uniform_draw_is_balanced() {
        for count in histogram(HeadingDraw::Uniform) {
            assert!((16_500..19_500).contains(&count), "{count}");
        }
    }

    #[test]
    fn legacy_draw_halves_stop() {
        let counts = histogram(HeadingDraw::Legacy);
        for &count in &counts[..4] {
            assert!((18_500..21_500).contains(&count), "{count}");
        }
        assert!((8_800..11_200).contains(&counts[4]), "{}", counts[4]);
    }
}
