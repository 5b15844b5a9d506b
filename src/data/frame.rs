//! Normalized in-memory table.
//!
//! # Responsibilities
//! - Hold an ordered, unique column list and rows aligned to it
//! - Project to a column subset
//! - Stable sort by one column
//! - Contiguous row slices
//!
//! # Design Decisions
//! - Immutable once constructed; sort/slice consume and return a frame
//! - Every row has exactly `columns.len()` values (checked on construction)

use std::collections::HashSet;
use std::fmt;

use crate::data::value::Value;
use crate::error::TableError;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// `desc` (any case) is descending, everything else ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            Direction::Desc
        } else {
            Direction::Asc
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataFrame {
    /// Build a frame, rejecting duplicate columns and ragged rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(TableError::DuplicateColumn(column.clone()));
            }
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RaggedRow {
                    row: index,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// A frame with columns and no rows.
    pub fn empty(columns: Vec<String>) -> Result<Self, TableError> {
        Self::new(columns, Vec::new())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Row count.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Keep exactly `columns`, in that order.
    pub fn select(self, columns: &[String]) -> Result<Self, TableError> {
        let indices = columns
            .iter()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| TableError::ColumnNotFound { column: name.clone() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let rows = self
            .rows
            .into_iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Self::new(columns.to_vec(), rows)
    }

    /// Stable sort by `column`. Returns the frame unchanged when the column
    /// does not exist.
    pub fn sort(mut self, column: &str, direction: Direction) -> Self {
        let Some(index) = self.column_index(column) else {
            return self;
        };
        self.rows.sort_by(|a, b| {
            let ord = a[index].sort_cmp(&b[index]);
            match direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        });
        self
    }

    /// Rows `offset..offset + len`, clamped to the frame.
    pub fn slice(mut self, offset: usize, len: usize) -> Self {
        let start = offset.min(self.rows.len());
        let end = start.saturating_add(len).min(self.rows.len());
        self.rows.truncate(end);
        self.rows.drain(..start);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> DataFrame {
        DataFrame::new(
            cols(&["name", "score"]),
            vec![
                vec!["b".into(), 2.into()],
                vec!["a".into(), 1.into()],
                vec!["c".into(), 2.into()],
                vec!["d".into(), 10.into()],
            ],
        )
        .unwrap()
    }

    fn names(frame: &DataFrame) -> Vec<String> {
        frame.rows().iter().map(|r| r[0].to_string()).collect()
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = DataFrame::new(cols(&["a", "b"]), vec![vec![1.into()]]).unwrap_err();
        assert_eq!(
            err,
            TableError::RaggedRow {
                row: 0,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let err = DataFrame::empty(cols(&["a", "a"])).unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn("a".into()));
    }

    #[test]
    fn test_sort_is_stable_and_numeric() {
        let sorted = sample().sort("score", Direction::Asc);
        assert_eq!(names(&sorted), ["a", "b", "c", "d"]);

        let sorted = sample().sort("score", Direction::Desc);
        // ties keep original relative order
        assert_eq!(names(&sorted), ["d", "b", "c", "a"]);
    }

    #[test]
    fn test_sort_twice_equals_sort_once() {
        let once = sample().sort("score", Direction::Desc);
        let twice = once.clone().sort("score", Direction::Desc);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_unknown_column_is_noop() {
        assert_eq!(sample().sort("missing", Direction::Desc), sample());
    }

    #[test]
    fn test_slice_clamps() {
        assert_eq!(names(&sample().slice(1, 2)), ["a", "c"]);
        assert_eq!(names(&sample().slice(3, 10)), ["d"]);
        assert!(sample().slice(10, 2).is_empty());
    }

    #[test]
    fn test_select_reorders_and_validates() {
        let projected = sample().select(&cols(&["score", "name"])).unwrap();
        assert_eq!(projected.columns(), ["score", "name"]);
        assert_eq!(projected.rows()[0][1], Value::from("b"));

        let err = sample().select(&cols(&["nope"])).unwrap_err();
        assert_eq!(err, TableError::ColumnNotFound { column: "nope".into() });
    }

    #[test]
    fn test_direction_parse_and_toggle() {
        assert_eq!(Direction::parse("DESC"), Direction::Desc);
        assert_eq!(Direction::parse("sideways"), Direction::Asc);
        assert_eq!(Direction::Asc.toggled(), Direction::Desc);
        assert_eq!(Direction::Desc.to_string(), "desc");
    }
}
