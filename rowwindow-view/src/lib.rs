//! Table and list consumers for the `rowwindow` engine.
//!
//! `rowwindow` only does the windowing math. This crate owns the pieces a table screen wraps
//! around it:
//!
//! - [`TableView`]: collection + typed [`Column`]s + search/sort ([`QueryState`]) + a fixed-height
//!   [`rowwindow::Windower`], driven by scroll, resize and keystroke events
//! - [`Debouncer`]: the cancellable single-slot timer behind the search box
//! - [`ToastQueue`]: a bounded notification queue with FIFO eviction
//!
//! Nothing here paints. Time is passed in as `now_ms`, so hosts drive it from whatever clock or
//! frame loop they already have.
//!
//! ```
//! use rowwindow_view::{Column, TableOptions, TableView};
//!
//! let guests = vec!["Ada", "Grace", "Linus", "Barbara"];
//! let mut table = TableView::new(
//!     guests,
//!     vec![Column::new("name", |g: &&str| g.to_string())],
//!     TableOptions::new().with_row_height(40).with_container_height(80),
//! )
//! .unwrap();
//!
//! table.on_search_input("a", 0);
//! table.tick(300);
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.spacer_height(), 120);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod column;
mod debounce;
mod query;
mod table;
mod toast;

#[cfg(test)]
mod tests;

pub use column::{CellRenderer, Column, RowComparator};
pub use debounce::{DEFAULT_SEARCH_DEBOUNCE_MS, Debouncer};
pub use query::{QueryState, SortDirection, SortState, matches_search, normalize_search};
pub use table::{DEFAULT_ROW_HEIGHT, SearchPhase, TableOptions, TableView, VisibleRow};
pub use toast::{
    DEFAULT_TOAST_CAPACITY, DEFAULT_TOAST_DURATION_MS, PushOutcome, QueuedToast, Toast,
    ToastConfig, ToastDuration, ToastId, ToastKind, ToastQueue, ToastStats,
};
