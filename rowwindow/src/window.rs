use core::iter::{Enumerate, FusedIterator};
use core::ops::Range;
use core::slice;

use crate::layout::{FixedRows, RowLayout};
use crate::{Viewport, VisibleItem, WindowError};

/// Rows rendered beyond each viewport edge when no overscan is configured.
pub const DEFAULT_OVERSCAN: usize = 5;

/// The slice of a collection to materialize for one render, plus the two layout values the
/// consumer needs to position it.
///
/// `start_index..end_index` is always within `0..=len`. The rendered subset goes inside a spacer
/// of `total_height`, translated down by `offset_y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start_index: usize,
    pub end_index: usize, // exclusive
    pub total_height: u64,
    pub offset_y: u64,
}

impl Window {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
        total_height: 0,
        offset_y: 0,
    };

    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    /// Pairs each index in the window with its row.
    ///
    /// The range is clamped to `rows.len()`, so a window computed for a longer collection never
    /// indexes out of bounds.
    pub fn items<'a, T>(&self, rows: &'a [T]) -> VisibleItems<'a, T> {
        let end = self.end_index.min(rows.len());
        let start = self.start_index.min(end);
        VisibleItems {
            inner: rows[start..end].iter().enumerate(),
            base: start,
        }
    }
}

/// Iterator returned by [`Window::items`].
#[derive(Clone, Debug)]
pub struct VisibleItems<'a, T> {
    inner: Enumerate<slice::Iter<'a, T>>,
    base: usize,
}

impl<'a, T> Iterator for VisibleItems<'a, T> {
    type Item = VisibleItem<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let (i, item) = self.inner.next()?;
        Some(VisibleItem {
            index: self.base + i,
            item,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for VisibleItems<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (i, item) = self.inner.next_back()?;
        Some(VisibleItem {
            index: self.base + i,
            item,
        })
    }
}

impl<T> ExactSizeIterator for VisibleItems<'_, T> {}

impl<T> FusedIterator for VisibleItems<'_, T> {}

/// Inputs of the fixed-height window computation, as plain numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowParams {
    pub len: usize,
    pub item_height: u32,
    pub container_height: u32,
    pub scroll_top: u64,
    pub overscan: usize,
}

impl WindowParams {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.scroll_top, self.container_height)
    }
}

/// Computes the window for a fixed-height collection.
///
/// Fails only when `item_height` is zero.
pub fn compute_window(params: &WindowParams) -> Result<Window, WindowError> {
    let layout = FixedRows::new(params.len, params.item_height)?;
    Ok(window_for(&layout, params.viewport(), params.overscan))
}

/// Computes the window for any row layout.
///
/// The range starts `overscan` rows above the row at `scroll_top` and ends `overscan` rows
/// below the last row intersecting `[scroll_top, scroll_top + container_height)`, clamped to
/// `0..=len`. An empty viewport has no visible rows, so only the overscan around `scroll_top`
/// is rendered. A scroll position past the end (e.g. after the collection shrank) clamps the
/// start to the end.
pub fn window_for<L: RowLayout + ?Sized>(layout: &L, viewport: Viewport, overscan: usize) -> Window {
    let len = layout.len();
    if len == 0 {
        return Window::EMPTY;
    }

    let first = layout.index_at(viewport.scroll_top);
    let last = if viewport.container_height == 0 {
        first
    } else {
        layout.end_index_for(viewport.bottom()).max(first)
    };

    let end_index = last.saturating_add(overscan).min(len);
    let start_index = first.saturating_sub(overscan).min(end_index);

    let window = Window {
        start_index,
        end_index,
        total_height: layout.total_height(),
        offset_y: layout.row_start(start_index),
    };
    wtrace!(
        scroll_top = viewport.scroll_top,
        container_height = viewport.container_height,
        start_index,
        end_index,
        "window_for"
    );
    window
}
