use glam::Vec2;
use tinytown_common::{Cell, TownConfig};

/// Fixed-size partition of the ground plane into whole square blocks.
///
/// Produces the origin corner of each block in row-major order, x varying
/// fastest. Whatever does not fit a whole block along either axis is dropped.
/// The grid is its own cursor: drain it with `next`, rewind with `reset`.
#[derive(Debug, Clone)]
pub struct BlockGrid {
    width: u32,
    height: u32,
    blocks_x: u32,
    blocks_y: u32,
    cursor: u32,
}

impl BlockGrid {
    /// Create a grid over a `width` x `height` plane with the given block size.
    pub fn new(width: u32, height: u32, block_size: u32) -> Self {
        assert!(block_size > 0, "block_size must be positive");
        assert!(
            block_size <= width && block_size <= height,
            "block_size must fit the plane"
        );
        Self {
            width,
            height,
            blocks_x: width / block_size,
            blocks_y: height / block_size,
            cursor: 0,
        }
    }

    pub fn from_config(config: &TownConfig) -> Self {
        Self::new(config.plane_width, config.plane_height, config.block_size)
    }

    pub fn blocks_x(&self) -> u32 {
        self.blocks_x
    }

    pub fn blocks_y(&self) -> u32 {
        self.blocks_y
    }

    /// Total number of cells in one pass.
    pub fn cell_count(&self) -> usize {
        (self.blocks_x * self.blocks_y) as usize
    }

    /// Edge length of a cell along x after trimming.
    pub fn cell_size(&self) -> f32 {
        (self.width / self.blocks_x) as f32
    }

    /// Cell at a linear row-major index.
    pub fn cell_at(&self, index: u32) -> Cell {
        let x = (self.width / self.blocks_x) * (index % self.blocks_x);
        let y = (index / self.blocks_x) * (self.height / self.blocks_y);
        Cell::new(Vec2::new(x as f32, y as f32), self.cell_size())
    }

    pub fn has_next(&self) -> bool {
        (self.cursor as usize) < self.cell_count()
    }

    /// Rewind to the first cell.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl Iterator for BlockGrid {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if !self.has_next() {
            return None;
        }
        let cell = self.cell_at(self.cursor);
        self.cursor += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.cell_count() - self.cursor as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for BlockGrid {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_grid_has_hundred_cells() {
        let mut grid = BlockGrid::new(300, 300, 30);
        let cells: Vec<Cell> = grid.by_ref().collect();
        assert_eq!(cells.len(), 100);
        assert!(!grid.has_next());

        let steps: Vec<f32> = (0..10).map(|i| i as f32 * 30.0).collect();
        for cell in &cells {
            assert!(steps.contains(&cell.origin.x));
            assert!(steps.contains(&cell.origin.y));
            assert_eq!(cell.size, 30.0);
        }
    }

    #[test]
    fn row_major_x_fastest() {
        let mut grid = BlockGrid::new(300, 300, 30);
        let first: Vec<Vec2> = grid.by_ref().take(11).map(|c| c.origin).collect();
        assert_eq!(first[0], Vec2::new(0.0, 0.0));
        assert_eq!(first[1], Vec2::new(30.0, 0.0));
        assert_eq!(first[9], Vec2::new(270.0, 0.0));
        assert_eq!(first[10], Vec2::new(0.0, 30.0));
    }

    #[test]
    fn remainder_strip_is_dropped() {
        let mut grid = BlockGrid::new(310, 295, 30);
        assert_eq!(grid.blocks_x(), 10);
        assert_eq!(grid.blocks_y(), 9);
        assert_eq!(grid.by_ref().count(), 90);
    }

    #[test]
    fn every_cell_inside_plane() {
        let (w, h) = (250, 170);
        let grid = BlockGrid::new(w, h, 40);
        for cell in grid {
            let right = cell.origin.x + cell.size;
            assert!(cell.origin.x >= 0.0 && right <= w as f32);
            assert!(cell.origin.y >= 0.0 && cell.origin.y <= h as f32);
        }
    }

    #[test]
    fn reset_reproduces_sequence() {
        let mut grid = BlockGrid::new(120, 90, 30);
        let first: Vec<Cell> = grid.by_ref().collect();
        grid.reset();
        assert!(grid.has_next());
        let second: Vec<Cell> = grid.by_ref().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn exact_size_tracks_cursor() {
        let mut grid = BlockGrid::new(90, 90, 30);
        assert_eq!(grid.len(), 9);
        grid.next();
        grid.next();
        assert_eq!(grid.len(), 7);
    }

    #[test]
    #[should_panic(expected = "block_size must be positive")]
    fn zero_block_size_panics() {
        let _ = BlockGrid::new(300, 300, 0);
    }
}
