use alloc::vec::Vec;

use crate::WindowError;
use crate::fenwick::Fenwick;
use crate::layout::RowLayout;

/// A collection whose rows each have their own height.
///
/// Heights live in a Fenwick tree, so offset → row lookups and single-row height updates are
/// both `O(log n)`. Every row must be at least one pixel tall.
#[derive(Clone, Debug, Default)]
pub struct VariableRows {
    heights: Vec<u32>,
    sums: Fenwick,
}

impl VariableRows {
    pub fn from_heights(heights: &[u32]) -> Result<Self, WindowError> {
        if let Some(index) = heights.iter().position(|&h| h == 0) {
            return Err(WindowError::ZeroRowHeight { index });
        }
        wdebug!(len = heights.len(), "VariableRows::from_heights");
        Ok(Self {
            heights: heights.to_vec(),
            sums: Fenwick::from_heights(heights),
        })
    }

    /// Builds a layout by asking `height(i)` for every row.
    pub fn from_fn(len: usize, mut height: impl FnMut(usize) -> u32) -> Result<Self, WindowError> {
        let mut heights = Vec::with_capacity(len);
        for index in 0..len {
            let h = height(index);
            if h == 0 {
                return Err(WindowError::ZeroRowHeight { index });
            }
            heights.push(h);
        }
        Ok(Self {
            sums: Fenwick::from_heights(&heights),
            heights,
        })
    }

    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    /// Records a measured height for `index` and returns the change in total height.
    ///
    /// Indexes past the end are ignored and report no change.
    pub fn set_height(&mut self, index: usize, height: u32) -> Result<i64, WindowError> {
        if height == 0 {
            return Err(WindowError::ZeroRowHeight { index });
        }
        let Some(cur) = self.heights.get_mut(index) else {
            return Ok(0);
        };
        let delta = height as i64 - *cur as i64;
        *cur = height;
        self.sums.point_add(index, delta);
        wtrace!(index, height, delta, "VariableRows::set_height");
        Ok(delta)
    }

    /// Grows or shrinks to `len` rows. Existing heights are kept; new rows ask `height(i)`.
    ///
    /// On error the layout is left with every row that validated before the failure.
    pub fn resize(
        &mut self,
        len: usize,
        mut height: impl FnMut(usize) -> u32,
    ) -> Result<(), WindowError> {
        if len <= self.heights.len() {
            self.heights.truncate(len);
            self.sums.truncate(len);
            return Ok(());
        }
        for index in self.heights.len()..len {
            let h = height(index);
            if h == 0 {
                return Err(WindowError::ZeroRowHeight { index });
            }
            self.heights.push(h);
            self.sums.push(h);
        }
        Ok(())
    }
}

impl RowLayout for VariableRows {
    fn len(&self) -> usize {
        self.heights.len()
    }

    fn total_height(&self) -> u64 {
        self.sums.total()
    }

    fn row_start(&self, index: usize) -> u64 {
        self.sums.prefix(index)
    }

    fn row_height(&self, index: usize) -> Option<u32> {
        self.heights.get(index).copied()
    }

    fn index_at(&self, offset: u64) -> usize {
        if offset >= self.sums.total() {
            return self.heights.len();
        }
        self.sums.rows_ending_at_or_before(offset)
    }

    fn end_index_for(&self, end: u64) -> usize {
        if end == 0 {
            return 0;
        }
        let last_pixel = end - 1;
        if last_pixel >= self.sums.total() {
            return self.heights.len();
        }
        self.sums.rows_ending_at_or_before(last_pixel) + 1
    }
}
