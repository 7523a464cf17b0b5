use crate::WindowError;
use crate::viewport::ceil_to_u64;

/// Row geometry along the scroll axis.
///
/// The windowing math in [`crate::window_for`] only talks to rows through this trait, so fixed
/// and variable-height collections share one algorithm.
pub trait RowLayout {
    /// Number of rows in the collection.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height of the full-size spacer element.
    fn total_height(&self) -> u64;

    /// Offset of the top edge of row `index`. `index >= len` yields `total_height()`.
    fn row_start(&self, index: usize) -> u64;

    fn row_height(&self, index: usize) -> Option<u32>;

    /// Index of the row containing `offset`.
    ///
    /// Offsets at or past the end map to `len()` or beyond; callers clamp.
    fn index_at(&self, offset: u64) -> usize;

    /// One past the last row that intersects `[0, end)`.
    fn end_index_for(&self, end: u64) -> usize;
}

/// A collection whose rows all share one height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedRows {
    len: usize,
    item_height: u32,
}

impl FixedRows {
    /// Fails with [`WindowError::ZeroItemHeight`] when `item_height == 0`.
    pub fn new(len: usize, item_height: u32) -> Result<Self, WindowError> {
        if item_height == 0 {
            wwarn!(len, "FixedRows::new: zero item height");
            return Err(WindowError::ZeroItemHeight);
        }
        Ok(Self { len, item_height })
    }

    /// Same as [`FixedRows::new`], from a raw pixel height. Fractional heights round up.
    pub fn from_pixels(len: usize, item_height: f64) -> Result<Self, WindowError> {
        if !item_height.is_finite() || item_height <= 0.0 {
            return Err(WindowError::InvalidItemHeight(item_height));
        }
        let h = u32::try_from(ceil_to_u64(item_height))
            .map_err(|_| WindowError::InvalidItemHeight(item_height))?;
        Self::new(len, h)
    }

    pub fn item_height(&self) -> u32 {
        self.item_height
    }

    /// Returns a copy describing a collection of `len` rows at the same height.
    pub fn with_len(self, len: usize) -> Self {
        Self { len, ..self }
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len;
    }
}

impl RowLayout for FixedRows {
    fn len(&self) -> usize {
        self.len
    }

    fn total_height(&self) -> u64 {
        (self.len as u64).saturating_mul(self.item_height as u64)
    }

    fn row_start(&self, index: usize) -> u64 {
        (index.min(self.len) as u64).saturating_mul(self.item_height as u64)
    }

    fn row_height(&self, index: usize) -> Option<u32> {
        (index < self.len).then_some(self.item_height)
    }

    fn index_at(&self, offset: u64) -> usize {
        to_index(offset / self.item_height as u64)
    }

    fn end_index_for(&self, end: u64) -> usize {
        to_index(end.div_ceil(self.item_height as u64))
    }
}

pub(crate) fn to_index(v: u64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}
