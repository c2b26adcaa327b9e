use super::adjacency::Candidates;

/// Fixed-capacity adjacency: a `counts[N]` array plus an `N × width` slot buffer.
///
/// Insertions past `width` for an index are dropped, so the kept partners are
/// the first `width` offered, in the order they were offered.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbors {
    width: usize,
    counts: Vec<usize>,
    slots: Vec<usize>,
}

impl Neighbors {
    pub fn new(n: usize, width: usize) -> Self {
        Self {
            width,
            counts: vec![0; n],
            slots: vec![0; n * width],
        }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    /// Records y as a partner of x. Returns false when x is already full.
    pub fn insert(&mut self, x: usize, y: usize) -> bool {
        let count = self.counts[x];
        if count < self.width {
            self.slots[x * self.width + count] = y;
            self.counts[x] += 1;
            true
        } else {
            false
        }
    }
    /// Reverse adjacency over `n` opposite indices: y lists every x that
    /// listed y, visiting x in ascending order, capped at the same width.
    pub fn transpose(&self, n: usize) -> Self {
        let mut reverse = Self::new(n, self.width);
        for x in 0..self.len() {
            for &y in self.candidates(x) {
                reverse.insert(y, x);
            }
        }
        reverse
    }
}

impl Candidates for Neighbors {
    fn len(&self) -> usize {
        self.counts.len()
    }
    fn candidates(&self, x: usize) -> &[usize] {
        let base = x * self.width;
        &self.slots[base..base + self.counts[x]]
    }
}
