use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::Column;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Which column the collection is sorted by, and which way.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }
}

/// Search and sort applied to the collection before it reaches the windowing engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QueryState {
    pub search_term: String,
    pub sort: Option<SortState>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search_term: impl Into<String>) -> Self {
        self.search_term = search_term.into();
        self
    }

    pub fn with_sort(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortState::new(key, direction));
        self
    }

    /// Header-click semantics: the active column flips direction, any other column starts
    /// ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = Some(match self.sort.take() {
            Some(s) if s.key == key => SortState {
                direction: s.direction.toggled(),
                ..s
            },
            _ => SortState::new(key, SortDirection::Ascending),
        });
    }

    pub fn is_filtering(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// The search term as it is matched: trimmed and lowercased.
    pub fn needle(&self) -> String {
        normalize_search(&self.search_term)
    }

    /// Returns the indexes of `rows` that pass the search, in sorted order.
    ///
    /// Search is a case-insensitive substring match over the rendered text of searchable
    /// columns. Sorting is stable, so ties keep collection order.
    pub fn apply<T>(&self, rows: &[T], columns: &[Column<T>]) -> Vec<usize> {
        let needle = self.needle();
        let mut out: Vec<usize> = if needle.is_empty() {
            (0..rows.len()).collect()
        } else {
            rows.iter()
                .enumerate()
                .filter(|(_, row)| matches_search(*row, columns, &needle))
                .map(|(i, _)| i)
                .collect()
        };

        if let Some(sort) = &self.sort {
            match columns.iter().find(|c| c.key() == sort.key) {
                Some(col) if col.has_comparator() => {
                    out.sort_by(|&a, &b| sort.direction.apply(col.compare_rows(&rows[a], &rows[b])));
                }
                Some(col) => {
                    // render each row once, not once per comparison
                    let mut keyed: Vec<(String, usize)> =
                        out.iter().map(|&i| (col.render_cell(&rows[i]), i)).collect();
                    keyed.sort_by(|a, b| sort.direction.apply(a.0.cmp(&b.0)));
                    out = keyed.into_iter().map(|(_, i)| i).collect();
                }
                None => {
                    wwarn!(key = %sort.key, "sort key does not name a column; keeping order");
                }
            }
        }

        wtrace!(
            total = rows.len(),
            matched = out.len(),
            "QueryState::apply"
        );
        out
    }
}

/// Trims and lowercases a raw search term.
pub fn normalize_search(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Whether any searchable column of `row` contains `needle_lower`.
///
/// `needle_lower` must already be lowercased.
pub fn matches_search<T>(row: &T, columns: &[Column<T>], needle_lower: &str) -> bool {
    columns
        .iter()
        .filter(|c| c.is_searchable())
        .any(|c| c.render_cell(row).to_lowercase().contains(needle_lower))
}
