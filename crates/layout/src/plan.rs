use serde::Serialize;
use tinytown_common::Cell;

use crate::{BlockGrid, HeightSampler};

/// Number of wall/roof texture pairs buildings cycle through.
pub const TEXTURE_PAIRS: u32 = 3;

/// What occupies one block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BlockContent {
    /// A textured building. Walls use texture slot `texture_base`, the roof
    /// uses `texture_base + 1`.
    Building { height: f32, texture_base: u32 },
    /// A grass patch with a tree.
    Grass,
}

impl BlockContent {
    /// Decide a block's content from its height sample. `placed` is the
    /// number of buildings already placed earlier in the same pass.
    pub fn decide(sample: u32, placed: usize) -> Self {
        if sample * 10 > 10 {
            let pair = (placed % TEXTURE_PAIRS as usize) as u32;
            BlockContent::Building {
                height: 10.0 * sample as f32,
                texture_base: pair * 2,
            }
        } else {
            BlockContent::Grass
        }
    }

    pub fn is_building(&self) -> bool {
        matches!(self, BlockContent::Building { .. })
    }
}

/// One full pass over the grid, pairing each cell with its content.
///
/// Both enumerators are rewound on construction, so every pass visits the
/// same cells with the same samples.
pub struct BlockPlan<'a> {
    grid: &'a mut BlockGrid,
    heights: &'a mut HeightSampler,
    placed: usize,
}

impl<'a> BlockPlan<'a> {
    pub fn new(grid: &'a mut BlockGrid, heights: &'a mut HeightSampler) -> Self {
        grid.reset();
        heights.reset();
        Self {
            grid,
            heights,
            placed: 0,
        }
    }
}

impl Iterator for BlockPlan<'_> {
    type Item = (Cell, BlockContent);

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.grid.next()?;
        let sample = self.heights.next_wrapping().unwrap_or(0);
        let content = BlockContent::decide(sample, self.placed);
        if content.is_building() {
            self.placed += 1;
        }
        Some((cell, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn low_samples_become_grass() {
        assert_eq!(BlockContent::decide(0, 0), BlockContent::Grass);
        assert_eq!(BlockContent::decide(1, 4), BlockContent::Grass);
    }

    #[test]
    fn high_samples_become_buildings() {
        assert_eq!(
            BlockContent::decide(3, 0),
            BlockContent::Building {
                height: 30.0,
                texture_base: 0
            }
        );
        assert_eq!(
            BlockContent::decide(2, 4),
            BlockContent::Building {
                height: 20.0,
                texture_base: 2
            }
        );
        assert_eq!(
            BlockContent::decide(4, 5),
            BlockContent::Building {
                height: 40.0,
                texture_base: 4
            }
        );
    }

    #[test]
    fn plan_is_stable_across_passes() {
        let mut grid = BlockGrid::new(300, 300, 30);
        let mut heights = HeightSampler::new(100, 5, &mut StdRng::seed_from_u64(9));

        let first: Vec<_> = BlockPlan::new(&mut grid, &mut heights).collect();
        let second: Vec<_> = BlockPlan::new(&mut grid, &mut heights).collect();
        assert_eq!(first.len(), 100);
        assert_eq!(first, second);
    }

    #[test]
    fn plan_follows_samples_in_order() {
        let mut grid = BlockGrid::new(300, 300, 30);
        let mut heights = HeightSampler::new(100, 5, &mut StdRng::seed_from_u64(11));
        let samples = heights.values().to_vec();

        let plan: Vec<_> = BlockPlan::new(&mut grid, &mut heights).collect();
        let mut placed = 0;
        for ((_, content), sample) in plan.iter().zip(&samples) {
            assert_eq!(*content, BlockContent::decide(*sample, placed));
            if content.is_building() {
                placed += 1;
            }
        }
    }

    #[test]
    fn short_sampler_wraps_within_pass() {
        let mut grid = BlockGrid::new(90, 90, 30);
        let mut heights = HeightSampler::new(4, 5, &mut StdRng::seed_from_u64(2));
        let plan: Vec<_> = BlockPlan::new(&mut grid, &mut heights).collect();
        assert_eq!(plan.len(), 9);
    }
}
