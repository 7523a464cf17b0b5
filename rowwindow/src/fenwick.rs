use alloc::vec::Vec;

/// Binary indexed tree over row heights.
///
/// `nodes[i]` (1-based) holds the sum of the `lsb(i)` heights ending at row `i - 1`.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fenwick {
    nodes: Vec<u64>,
    total: u64,
}

impl Fenwick {
    /// Builds the tree in `O(n)` by pushing each node's sum into its parent.
    pub(crate) fn from_heights(heights: &[u32]) -> Self {
        let n = heights.len();
        let mut nodes = alloc::vec![0u64; n + 1];
        let mut total = 0u64;
        for (row, &h) in heights.iter().enumerate() {
            let i = row + 1;
            total = total.saturating_add(h as u64);
            nodes[i] = nodes[i].saturating_add(h as u64);
            let parent = i + lsb(i);
            if parent <= n {
                nodes[parent] = nodes[parent].saturating_add(nodes[i]);
            }
        }
        Self { nodes, total }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    /// Sum of the first `count` heights.
    pub(crate) fn prefix(&self, count: usize) -> u64 {
        let mut i = count.min(self.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.nodes[i]);
            i &= i - 1;
        }
        sum
    }

    pub(crate) fn point_add(&mut self, row: usize, delta: i64) {
        let n = self.len();
        if row >= n || delta == 0 {
            return;
        }
        self.total = apply_delta(self.total, delta);
        let mut i = row + 1;
        while i <= n {
            self.nodes[i] = apply_delta(self.nodes[i], delta);
            i += lsb(i);
        }
    }

    /// Appends one height in `O(log n)`.
    pub(crate) fn push(&mut self, height: u32) {
        let i = self.len() + 1;
        // The new node covers rows (i - lsb(i), i]; everything but the last one is already here.
        let covered = self.prefix(i - 1) - self.prefix(i - lsb(i));
        self.nodes.push(covered.saturating_add(height as u64));
        self.total = self.total.saturating_add(height as u64);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        if len >= self.len() {
            return;
        }
        self.total = self.prefix(len);
        self.nodes.truncate(len + 1);
    }

    /// Largest `count` with `prefix(count) <= target`, i.e. how many rows end at or before
    /// `target`.
    pub(crate) fn rows_ending_at_or_before(&self, mut target: u64) -> usize {
        let n = self.len();
        let mut pos = 0usize;
        let mut step = highest_bit(n);
        while step > 0 {
            let next = pos + step;
            if next <= n && self.nodes[next] <= target {
                target -= self.nodes[next];
                pos = next;
            }
            step >>= 1;
        }
        pos
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_bit(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1usize << (usize::BITS - 1 - n.leading_zeros())
    }
}

fn apply_delta(v: u64, delta: i64) -> u64 {
    if delta >= 0 {
        v.saturating_add(delta as u64)
    } else {
        v.saturating_sub(delta.unsigned_abs())
    }
}
