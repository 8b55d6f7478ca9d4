use serde::Serialize;

/// Paging description of the currently loaded slice of a collection.
///
/// Rebuilt from scratch on every collection fetch: `all` and `filtered`
/// come from the envelope's counts element, `first` and `rows` from the
/// filter the backend echoed, `length` from the page actually returned.
/// `rows = -1` marks the unbounded view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionCounts {
    /// 1-based index of the first row on this page.
    pub first: i64,
    /// Requested page size; -1 for unbounded.
    pub rows: i64,
    /// Number of entities actually on this page.
    pub length: i64,
    /// Total number of entities, ignoring the filter.
    pub all: i64,
    /// Number of entities matching the filter.
    pub filtered: i64,
}

impl CollectionCounts {
    pub fn new(first: i64, rows: i64, length: i64, all: i64, filtered: i64) -> Self {
        CollectionCounts {
            first,
            rows,
            length,
            all,
            filtered,
        }
    }

    /// 1-based index of the last row on this page.
    pub fn last(&self) -> i64 {
        if self.rows < 0 || self.length == 0 {
            self.filtered
        } else {
            self.first + self.length - 1
        }
    }

    pub fn is_first(&self) -> bool {
        self.first <= 1
    }

    pub fn is_last(&self) -> bool {
        self.last() >= self.filtered
    }

    pub fn has_previous(&self) -> bool {
        !self.is_first()
    }

    pub fn has_next(&self) -> bool {
        !self.is_last()
    }
}
