//! A headless windowing engine for virtualized tables and lists.
//!
//! Given a collection length, row heights, the scroll container's height and scroll position,
//! and an overscan margin, the engine computes the contiguous index range worth materializing
//! and the two numbers needed to place it: the height of the full-size spacer and the offset of
//! the rendered subset inside it. Everything else (sorting, filtering, painting) belongs to the
//! consumer; see the `rowwindow-view` crate.
//!
//! ```
//! use rowwindow::{WindowParams, compute_window};
//!
//! let window = compute_window(&WindowParams {
//!     len: 1000,
//!     item_height: 60,
//!     container_height: 400,
//!     scroll_top: 6000,
//!     overscan: 5,
//! })
//! .unwrap();
//! assert_eq!(window.range(), 95..112);
//! assert_eq!(window.offset_y, 5700);
//! assert_eq!(window.total_height, 60_000);
//! ```
//!
//! Rows can share one height ([`FixedRows`]) or carry their own ([`VariableRows`], backed by a
//! Fenwick tree so offset lookups and re-measurements stay `O(log n)`).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod fenwick;
mod layout;
mod options;
mod types;
mod variable;
mod viewport;
mod window;
mod windower;


pub use error::WindowError;
pub use layout::{FixedRows, RowLayout};
pub use options::{OnChangeCallback, WindowOptions};
pub use types::{Align, ScrollDirection, VisibleItem};
pub use variable::VariableRows;
pub use viewport::Viewport;
pub use window::{DEFAULT_OVERSCAN, VisibleItems, Window, WindowParams, compute_window, window_for};
pub use windower::Windower;
