use alloc::sync::Arc;
use core::cell::Cell;
use core::cmp;
use core::fmt;

use crate::layout::{FixedRows, RowLayout};
use crate::options::OnChangeCallback;
use crate::{Align, ScrollDirection, Viewport, Window, WindowError, WindowOptions, window_for};

/// A stateful windowing engine over a row layout.
///
/// This type holds no UI objects. The owning view drives it with scroll and resize events and
/// asks for a fresh [`Window`] whenever it renders; the window is recomputed on every call and
/// never cached, so it always matches the current layout and viewport.
#[derive(Clone)]
pub struct Windower<L = FixedRows> {
    layout: L,
    options: WindowOptions,
    viewport: Viewport,
    scroll_direction: Option<ScrollDirection>,
    on_change: Option<OnChangeCallback<L>>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Windower<FixedRows> {
    /// Creates a windower over `len` rows of `item_height` pixels.
    pub fn fixed(len: usize, item_height: u32, options: WindowOptions) -> Result<Self, WindowError> {
        Ok(Self::new(FixedRows::new(len, item_height)?, options))
    }

    /// Changes the row count, keeping the row height.
    ///
    /// The scroll position is kept as is; see [`Windower::set_scroll_top_clamped`].
    pub fn set_len(&mut self, len: usize) {
        if self.layout.len() == len {
            return;
        }
        wdebug!(from = self.layout.len(), to = len, "Windower::set_len");
        self.layout.set_len(len);
        self.notify();
    }
}

impl<L: RowLayout> Windower<L> {
    pub fn new(layout: L, options: WindowOptions) -> Self {
        wdebug!(
            len = layout.len(),
            overscan = options.overscan,
            "Windower::new"
        );
        Self {
            layout,
            options,
            viewport: Viewport::default(),
            scroll_direction: None,
            on_change: None,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_on_change(mut self, on_change: impl Fn(&Self) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    /// Replaces the change callback. `None` removes it.
    pub fn set_on_change(&mut self, on_change: Option<OnChangeCallback<L>>) {
        self.on_change = on_change;
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Runs `f` and fires at most one `on_change` notification afterwards.
    ///
    /// A resize that also moves the scroll position should go through here so the host
    /// re-renders once.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_top(&self) -> u64 {
        self.viewport.scroll_top
    }

    pub fn container_height(&self) -> u32 {
        self.viewport.container_height
    }

    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    pub fn total_height(&self) -> u64 {
        self.layout.total_height()
    }

    /// Direction of the most recent scroll position change.
    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_options(&mut self, options: WindowOptions) {
        if self.options == options {
            return;
        }
        self.options = options;
        self.notify();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.notify();
    }

    /// Replaces the row layout, e.g. after the collection was filtered or re-measured.
    pub fn set_layout(&mut self, layout: L) {
        self.layout = layout;
        wdebug!(len = self.layout.len(), "Windower::set_layout");
        self.notify();
    }

    /// Mutates the layout in place, then notifies once.
    pub fn update_layout<R>(&mut self, f: impl FnOnce(&mut L) -> R) -> R {
        let out = f(&mut self.layout);
        self.notify();
        out
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.batch_update(|w| {
            w.set_container_height(viewport.container_height);
            w.set_scroll_top(viewport.scroll_top);
        });
    }

    pub fn set_container_height(&mut self, container_height: u32) {
        if self.viewport.container_height == container_height {
            return;
        }
        self.viewport.container_height = container_height;
        self.notify();
    }

    /// Applies a raw scroll position from the UI layer. Scroll events are never debounced.
    pub fn set_scroll_top(&mut self, scroll_top: u64) {
        let prev = self.viewport.scroll_top;
        if prev == scroll_top {
            return;
        }
        self.viewport.scroll_top = scroll_top;
        self.scroll_direction = match scroll_top.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        wtrace!(scroll_top, "Windower::set_scroll_top");
        self.notify();
    }

    pub fn max_scroll_top(&self) -> u64 {
        self.layout
            .total_height()
            .saturating_sub(self.viewport.container_height as u64)
    }

    pub fn clamp_scroll_top(&self, scroll_top: u64) -> u64 {
        scroll_top.min(self.max_scroll_top())
    }

    /// Same as `set_scroll_top`, but clamps to the scrollable range first.
    ///
    /// A native scroll container does this on its own when content shrinks; call it after
    /// replacing the layout to keep the engine in step.
    pub fn set_scroll_top_clamped(&mut self, scroll_top: u64) {
        let clamped = self.clamp_scroll_top(scroll_top);
        self.set_scroll_top(clamped);
    }

    /// The window to render for the current layout and viewport.
    pub fn window(&self) -> Window {
        window_for(&self.layout, self.viewport, self.options.overscan)
    }

    /// The window for an arbitrary viewport, without touching state.
    pub fn window_at(&self, viewport: Viewport) -> Window {
        window_for(&self.layout, viewport, self.options.overscan)
    }

    /// Rows actually intersecting the viewport (no overscan).
    pub fn visible_window(&self) -> Window {
        window_for(&self.layout, self.viewport, 0)
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let index = self.layout.index_at(offset);
        (index < self.layout.len()).then_some(index)
    }

    /// Computes the scroll position that brings `index` into view, clamped to the scrollable
    /// range. Out-of-range indexes snap to the last row.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        let len = self.layout.len();
        if len == 0 {
            return 0;
        }
        let index = index.min(len - 1);
        let start = self.layout.row_start(index);
        let size = self.layout.row_height(index).unwrap_or(0) as u64;
        let end = start.saturating_add(size);

        let sp_start = self.options.scroll_padding_start as u64;
        let sp_end = self.options.scroll_padding_end as u64;
        let view = self.viewport.container_height as u64;

        let target = match align {
            Align::Start => start.saturating_sub(sp_start),
            Align::End => end.saturating_add(sp_end).saturating_sub(view),
            Align::Center => start.saturating_add(size / 2).saturating_sub(view / 2),
            Align::Auto => {
                let cur = self.viewport.scroll_top;
                let cur_end = cur.saturating_add(view);
                if start >= cur.saturating_add(sp_start) && end.saturating_add(sp_end) <= cur_end {
                    cur
                } else if start < cur.saturating_add(sp_start) {
                    start.saturating_sub(sp_start)
                } else {
                    end.saturating_add(sp_end).saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_top(target)
    }

    /// Scrolls so that `index` is in view and returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_top(offset);
        offset
    }
}

impl<L: fmt::Debug> fmt::Debug for Windower<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Windower")
            .field("layout", &self.layout)
            .field("options", &self.options)
            .field("viewport", &self.viewport)
            .field("scroll_direction", &self.scroll_direction)
            .finish_non_exhaustive()
    }
}
