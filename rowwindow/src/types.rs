/// Where a row should land inside the viewport after a programmatic scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Scroll the minimum distance needed to bring the row fully into view.
    #[default]
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// A row that falls inside a [`crate::Window`], paired with its index in the collection.
#[derive(Debug, PartialEq, Eq)]
pub struct VisibleItem<'a, T> {
    pub index: usize,
    pub item: &'a T,
}

impl<T> Clone for VisibleItem<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VisibleItem<'_, T> {}
