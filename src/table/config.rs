//! Table registration records.

use crate::data::TableSource;

/// Page size used when a table does not declare one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Configuration for one embeddable table.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Unique key; also derives the DOM id `table-<id>`.
    pub id: String,
    pub source: TableSource,
    /// Explicit column subset, in display order.
    pub columns: Option<Vec<String>>,
    /// Rows per page. `0` disables pagination.
    pub page_size: usize,
}

impl TableConfig {
    pub fn new(id: impl Into<String>, source: impl Into<TableSource>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            columns: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}
