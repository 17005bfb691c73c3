use rand::Rng;

/// A fixed-length sequence of random magnitudes drawn once up front.
///
/// Used to decide per block whether a building stands there and how tall it
/// is. Walking the sequence never re-rolls it: after `reset` the same values
/// come back in the same order.
#[derive(Debug, Clone)]
pub struct HeightSampler {
    values: Vec<u32>,
    range: u32,
    cursor: usize,
}

impl HeightSampler {
    /// Draw `count` independent uniform values in `[0, range)`.
    pub fn new<R: Rng + ?Sized>(count: usize, range: u32, rng: &mut R) -> Self {
        assert!(range > 0, "range must be positive");
        let values = (0..count).map(|_| rng.gen_range(0..range)).collect();
        tracing::debug!(count, range, "height samples drawn");
        Self {
            values,
            range,
            cursor: 0,
        }
    }

    pub fn range(&self) -> u32 {
        self.range
    }

    /// All samples in draw order.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.values.len()
    }

    /// Rewind to the first sample.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Next sample, restarting from the first once the sequence runs out.
    /// Returns `None` only for an empty sampler.
    pub fn next_wrapping(&mut self) -> Option<u32> {
        if !self.has_next() {
            self.reset();
        }
        self.next()
    }
}

impl Iterator for HeightSampler {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let value = self.values.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(value)
    }
}
