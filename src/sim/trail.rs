//! Fixed-capacity ring of trail samples for bent lasers

use glam::Vec2;

/// Ring buffer of positions backed by an inline `[Vec2; N]`
///
/// The active capacity may be smaller than `N`; once full, each push
/// overwrites the oldest sample.
#[derive(Debug, Clone)]
pub struct TrailRing<const N: usize> {
    samples: [Vec2; N],
    capacity: usize,
    /// Slot holding the newest sample
    cursor: usize,
    len: usize,
}

impl<const N: usize> TrailRing<N> {
    /// Create an empty ring using `capacity` slots (clamped to `1..=N`)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, N);
        Self {
            samples: [Vec2::ZERO; N],
            capacity,
            // First push lands in slot 0
            cursor: capacity - 1,
            len: 0,
        }
    }

    /// Advance the cursor and overwrite that slot
    pub fn push(&mut self, pos: Vec2) {
        self.cursor = (self.cursor + 1) % self.capacity;
        self.samples[self.cursor] = pos;
        self.len = (self.len + 1).min(self.capacity);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest sample, if any
    pub fn newest(&self) -> Option<Vec2> {
        (self.len > 0).then(|| self.samples[self.cursor])
    }

    /// Valid samples ordered oldest to newest, as two contiguous runs
    ///
    /// The second run is empty unless the valid range wraps the end of storage.
    pub fn as_slices(&self) -> (&[Vec2], &[Vec2]) {
        let start = (self.cursor + self.capacity + 1 - self.len) % self.capacity;
        let end = start + self.len;
        if end <= self.capacity {
            (&self.samples[start..end], &self.samples[..0])
        } else {
            (
                &self.samples[start..self.capacity],
                &self.samples[..end - self.capacity],
            )
        }
    }

    /// Valid samples ordered oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        let (older, newer) = self.as_slices();
        older.iter().chain(newer.iter()).copied()
    }

    pub fn clear(&mut self) {
        self.cursor = self.capacity - 1;
        self.len = 0;
    }
}
