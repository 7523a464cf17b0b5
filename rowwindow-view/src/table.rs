use alloc::string::String;
use alloc::vec::Vec;

use rowwindow::{Align, FixedRows, RowLayout, Viewport, Window, WindowError, WindowOptions, Windower};

use crate::{
    Column, DEFAULT_SEARCH_DEBOUNCE_MS, Debouncer, QueryState, SortDirection, normalize_search,
};

/// Row height used when none is configured.
pub const DEFAULT_ROW_HEIGHT: u32 = 48;

/// Configuration for a [`TableView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableOptions {
    /// Height of every row, in pixels. Must be non-zero.
    pub row_height: u32,
    /// Initial height of the scroll container.
    pub container_height: u32,
    pub window: WindowOptions,
    pub search_debounce_ms: u64,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            container_height: 0,
            window: WindowOptions::default(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_container_height(mut self, container_height: u32) -> Self {
        self.container_height = container_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.window.overscan = overscan;
        self
    }

    pub fn with_window(mut self, window: WindowOptions) -> Self {
        self.window = window;
        self
    }

    pub fn with_search_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.search_debounce_ms = delay_ms;
        self
    }
}

/// Whether a search keystroke is waiting out its debounce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    PendingSearch,
}

/// A row selected for rendering.
#[derive(Debug)]
pub struct VisibleRow<'a, T> {
    /// Position in the filtered, sorted view (what the windowing engine indexes).
    pub index: usize,
    /// Position in the collection passed to [`TableView::new`]/[`TableView::set_rows`].
    pub source_index: usize,
    /// Offset of the row's top edge inside the spacer.
    pub top: u64,
    pub item: &'a T,
}

impl<T> Clone for VisibleRow<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VisibleRow<'_, T> {}

/// A headless virtualized table.
///
/// The view owns the collection, its columns, the search/sort state, the search debounce
/// timer and a fixed-height [`Windower`]. Adapters drive it by calling:
/// - `on_scroll` / `on_resize` when the scroll container changes (applied immediately)
/// - `on_search_input` on each keystroke and `tick(now_ms)` on each frame or timer tick
///
/// and paint the rows from `visible_rows()` (or `render`) inside a spacer of
/// `spacer_height()`, translated by `offset_y()`.
#[derive(Clone, Debug)]
pub struct TableView<T> {
    rows: Vec<T>,
    columns: Vec<Column<T>>,
    query: QueryState,
    view: Vec<usize>,
    windower: Windower<FixedRows>,
    search: Debouncer<String>,
}

impl<T> TableView<T> {
    /// Fails only when `options.row_height` is zero.
    pub fn new(
        rows: Vec<T>,
        columns: Vec<Column<T>>,
        options: TableOptions,
    ) -> Result<Self, WindowError> {
        let windower = Windower::fixed(rows.len(), options.row_height, options.window)?
            .with_viewport(Viewport::new(0, options.container_height));
        wdebug!(
            rows = rows.len(),
            columns = columns.len(),
            row_height = options.row_height,
            "TableView::new"
        );
        Ok(Self {
            view: (0..rows.len()).collect(),
            rows,
            columns,
            query: QueryState::default(),
            windower,
            search: Debouncer::new(options.search_debounce_ms),
        })
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn windower(&self) -> &Windower<FixedRows> {
        &self.windower
    }

    /// Number of rows after search, i.e. what the windowing engine sees.
    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Source indexes of the filtered, sorted view, in display order.
    pub fn view_indexes(&self) -> &[usize] {
        &self.view
    }

    /// Replaces the collection wholesale (e.g. after a refetch) and re-applies search and sort.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.refresh();
    }

    pub fn phase(&self) -> SearchPhase {
        if self.search.is_pending() {
            SearchPhase::PendingSearch
        } else {
            SearchPhase::Idle
        }
    }

    /// Records a keystroke in the search box. The filter is applied once input has been quiet
    /// for the debounce delay (see [`TableView::tick`]).
    pub fn on_search_input(&mut self, text: impl Into<String>, now_ms: u64) {
        let text = text.into();
        wtrace!(text = %text, now_ms, "TableView::on_search_input");
        self.search.start(text, now_ms);
    }

    /// Applies a search term immediately, dropping any pending keystroke.
    pub fn search_now(&mut self, text: impl Into<String>) {
        self.search.cancel();
        self.apply_search(text.into());
    }

    /// Applies the pending keystroke now, if any. Returns whether the view changed.
    pub fn commit_search(&mut self) -> bool {
        match self.search.flush() {
            Some(text) => self.apply_search(text),
            None => false,
        }
    }

    /// Advances the debounce timer. Returns `true` when a pending search fired and changed the
    /// view.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.search.poll(now_ms) {
            Some(text) => self.apply_search(text),
            None => false,
        }
    }

    fn apply_search(&mut self, text: String) -> bool {
        let changed = normalize_search(&text) != self.query.needle();
        self.query.search_term = text;
        if changed {
            self.refresh();
        }
        changed
    }

    /// Forwards the container's scroll position. Never debounced.
    pub fn on_scroll(&mut self, scroll_top: u64) {
        self.windower.set_scroll_top(scroll_top);
    }

    pub fn on_resize(&mut self, container_height: u32) {
        self.windower.set_container_height(container_height);
    }

    /// Forwards raw host pixel values (e.g. DOM `scrollTop` and `clientHeight`).
    pub fn on_viewport_pixels(
        &mut self,
        scroll_top: f64,
        container_height: f64,
    ) -> Result<(), WindowError> {
        let viewport = Viewport::from_pixels(scroll_top, container_height)?;
        self.windower.set_viewport(viewport);
        Ok(())
    }

    pub fn sort_by(&mut self, key: impl Into<String>, direction: SortDirection) {
        self.query = core::mem::take(&mut self.query).with_sort(key, direction);
        self.refresh();
    }

    /// Header-click sorting: flips the active column, otherwise sorts ascending by `key`.
    pub fn toggle_sort(&mut self, key: &str) {
        self.query.toggle_sort(key);
        self.refresh();
    }

    pub fn clear_sort(&mut self) {
        if self.query.sort.take().is_some() {
            self.refresh();
        }
    }

    pub fn scroll_top(&self) -> u64 {
        self.windower.scroll_top()
    }

    /// Scrolls so that the row at view position `index` is visible. Returns the new offset.
    pub fn scroll_to_row(&mut self, index: usize, align: Align) -> u64 {
        self.windower.scroll_to_index(index, align)
    }

    pub fn window(&self) -> Window {
        self.windower.window()
    }

    pub fn spacer_height(&self) -> u64 {
        self.windower.total_height()
    }

    pub fn offset_y(&self) -> u64 {
        self.window().offset_y
    }

    /// The rows to paint this frame, in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = VisibleRow<'_, T>> + '_ {
        let layout = self.windower.layout();
        self.window()
            .items(&self.view)
            .filter_map(move |v| {
                let source_index = *v.item;
                self.rows.get(source_index).map(|item| VisibleRow {
                    index: v.index,
                    source_index,
                    top: layout.row_start(v.index),
                    item,
                })
            })
    }

    /// Calls `f(item, index)` for each visible row and collects the results.
    pub fn render<R>(&self, mut f: impl FnMut(&T, usize) -> R) -> Vec<R> {
        self.visible_rows().map(|r| f(r.item, r.index)).collect()
    }

    /// Rendered cell text for each visible row, one entry per column.
    pub fn visible_cells(&self) -> Vec<Vec<String>> {
        self.render(|item, _| self.columns.iter().map(|c| c.render_cell(item)).collect())
    }

    /// Cancels the pending search. Call when the view is torn down.
    pub fn dispose(&mut self) {
        self.search.dispose();
    }

    fn refresh(&mut self) {
        self.view = self.query.apply(&self.rows, &self.columns);
        let len = self.view.len();
        wdebug!(
            total = self.rows.len(),
            visible = len,
            "TableView::refresh"
        );
        self.windower.batch_update(|w| {
            w.set_len(len);
            let scroll_top = w.scroll_top();
            w.set_scroll_top_clamped(scroll_top);
        });
    }
}
