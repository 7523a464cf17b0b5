use thiserror::Error;

/// Input-validation failures at the windowing boundary.
///
/// These are the only errors the engine can produce. Once a layout and viewport have been
/// constructed, every window computation is infallible and clamps instead of failing.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum WindowError {
    /// A fixed row height of zero pixels.
    #[error("item height must be greater than zero")]
    ZeroItemHeight,
    /// A variable-height row reported a height of zero pixels.
    #[error("row {index} has a height of zero")]
    ZeroRowHeight { index: usize },
    /// A raw pixel height that is non-finite or not positive.
    #[error("item height must be a finite positive pixel value, got {0}")]
    InvalidItemHeight(f64),
    /// A raw scroll position that is non-finite or negative.
    #[error("scroll position must be a finite non-negative pixel value, got {0}")]
    InvalidScrollTop(f64),
}
