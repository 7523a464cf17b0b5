use alloc::string::String;
use alloc::sync::Arc;
use core::cmp::Ordering;
use core::fmt;

/// Renders one cell of a row as display text.
pub type CellRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Orders two rows for a column sort.
pub type RowComparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// A typed table column: a stable key plus the renderer that turns a row into cell text.
///
/// Columns sort by their rendered text unless given a typed comparator, and take part in
/// search unless marked otherwise.
pub struct Column<T> {
    key: String,
    header: String,
    render: CellRenderer<T>,
    compare: Option<RowComparator<T>>,
    searchable: bool,
}

impl<T> Column<T> {
    pub fn new(key: impl Into<String>, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        let key = key.into();
        Self {
            header: key.clone(),
            key,
            render: Arc::new(render),
            compare: None,
            searchable: true,
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_compare(
        mut self,
        compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.compare = Some(Arc::new(compare));
        self
    }

    /// Sorts by a typed key instead of the rendered text (e.g. a folio total, not `"$1,200"`).
    pub fn sortable_by_key<K: Ord>(self, key: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        self.with_compare(move |a, b| key(a).cmp(&key(b)))
    }

    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn render_cell(&self, row: &T) -> String {
        (self.render)(row)
    }

    /// Whether the column sorts by a typed comparator rather than its rendered text.
    pub fn has_comparator(&self) -> bool {
        self.compare.is_some()
    }

    pub fn compare_rows(&self, a: &T, b: &T) -> Ordering {
        match &self.compare {
            Some(cmp) => cmp(a, b),
            None => self.render_cell(a).cmp(&self.render_cell(b)),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            render: Arc::clone(&self.render),
            compare: self.compare.clone(),
            searchable: self.searchable,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable_by_key", &self.compare.is_some())
            .field("searchable", &self.searchable)
            .finish_non_exhaustive()
    }
}
