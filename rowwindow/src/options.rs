use alloc::sync::Arc;

use crate::DEFAULT_OVERSCAN;

/// A callback fired after a [`crate::Windower`] state change.
pub type OnChangeCallback<L> = Arc<dyn Fn(&crate::Windower<L>) + Send + Sync>;

/// Tunables for [`crate::Windower`].
///
/// Plain data, so it can be loaded from host configuration with the `serde` feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowOptions {
    /// Rows rendered beyond each viewport edge.
    pub overscan: usize,

    /// Space kept above a row when scrolling to it with `Align::Start`/`Align::Auto`
    /// (e.g. under a sticky table header).
    pub scroll_padding_start: u32,
    /// Space kept below a row when scrolling to it with `Align::End`/`Align::Auto`.
    pub scroll_padding_end: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            overscan: DEFAULT_OVERSCAN,
            scroll_padding_start: 0,
            scroll_padding_end: 0,
        }
    }
}

impl WindowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_scroll_padding(
        mut self,
        scroll_padding_start: u32,
        scroll_padding_end: u32,
    ) -> Self {
        self.scroll_padding_start = scroll_padding_start;
        self.scroll_padding_end = scroll_padding_end;
        self
    }
}
