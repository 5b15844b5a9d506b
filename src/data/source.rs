//! Table sources and normalization.
//!
//! # Responsibilities
//! - Accept a prebuilt frame, a list of records, or a producer of either
//! - Invoke producers (sync or async) on every normalization
//! - Turn records into a `DataFrame`, applying an optional column projection
//!
//! # Design Decisions
//! - The first record fixes the column set and order
//! - Later records missing a column are padded with `Null`
//! - A later record with a key the first one lacks is a `SchemaMismatch`
//! - With explicit columns, only those keys are read

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use indexmap::IndexMap;

use crate::data::frame::DataFrame;
use crate::data::value::Value;
use crate::error::TableError;

/// One row-oriented record: field name to value, in insertion order.
pub type Record = IndexMap<String, Value>;

/// Build a [`Record`] from `key => value` pairs.
///
/// ```
/// let row = bentoapp::record! { "endpoint" => "/demo", "rps" => 1240 };
/// assert_eq!(row.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut record = $crate::data::Record::new();
        $(record.insert(::std::string::String::from($key), $crate::data::Value::from($value));)*
        record
    }};
}

/// Materialized table data.
#[derive(Debug, Clone)]
pub enum TableData {
    Frame(DataFrame),
    Records(Vec<Record>),
}

impl TableData {
    /// Normalize into a frame, projecting to `columns` when given.
    pub fn into_frame(self, columns: Option<&[String]>) -> Result<DataFrame, TableError> {
        match self {
            TableData::Frame(frame) => match columns {
                Some(columns) => frame.select(columns),
                None => Ok(frame),
            },
            TableData::Records(records) => frame_from_records(records, columns),
        }
    }
}

impl From<DataFrame> for TableData {
    fn from(frame: DataFrame) -> Self {
        TableData::Frame(frame)
    }
}

impl From<Vec<Record>> for TableData {
    fn from(records: Vec<Record>) -> Self {
        TableData::Records(records)
    }
}

fn frame_from_records(
    records: Vec<Record>,
    columns: Option<&[String]>,
) -> Result<DataFrame, TableError> {
    let Some(first) = records.first() else {
        return DataFrame::empty(columns.map(<[String]>::to_vec).unwrap_or_default());
    };

    let columns = match columns {
        Some(columns) => {
            if let Some(missing) = columns.iter().find(|c| !first.contains_key(c.as_str())) {
                return Err(TableError::ColumnNotFound {
                    column: missing.clone(),
                });
            }
            columns.to_vec()
        }
        None => {
            let columns: Vec<String> = first.keys().cloned().collect();
            for (row, record) in records.iter().enumerate().skip(1) {
                if let Some(extra) = record.keys().find(|k| !first.contains_key(k.as_str())) {
                    return Err(TableError::SchemaMismatch {
                        row,
                        column: extra.clone(),
                    });
                }
            }
            columns
        }
    };

    let rows = records
        .into_iter()
        .map(|mut record| {
            columns
                .iter()
                .map(|c| record.swap_remove(c.as_str()).unwrap_or_default())
                .collect()
        })
        .collect();
    DataFrame::new(columns, rows)
}

/// Parse a JSON array of objects into records, keeping key order.
pub fn records_from_json(json: serde_json::Value) -> Result<Vec<Record>, TableError> {
    let serde_json::Value::Array(items) = json else {
        return Err(TableError::InvalidRecords("expected a JSON array".into()));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect()),
            _ => Err(TableError::InvalidRecords(format!(
                "item {index} is not an object"
            ))),
        })
        .collect()
}

pub type Producer = Arc<dyn Fn() -> TableData + Send + Sync>;
pub type AsyncProducer = Arc<dyn Fn() -> BoxFuture<'static, TableData> + Send + Sync>;

/// Where a table's rows come from.
#[derive(Clone)]
pub enum TableSource {
    /// Fixed data, cloned for each render.
    Static(TableData),
    /// Zero-argument producer, re-invoked on every render.
    Lazy(Producer),
    /// Asynchronous producer, awaited on every render.
    AsyncLazy(AsyncProducer),
}

impl TableSource {
    pub fn lazy<F, T>(producer: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<TableData>,
    {
        TableSource::Lazy(Arc::new(move || producer().into()))
    }

    pub fn async_lazy<F, Fut, T>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<TableData>,
    {
        TableSource::AsyncLazy(Arc::new(move || -> BoxFuture<'static, TableData> {
            let fut = producer();
            Box::pin(async move { fut.await.into() })
        }))
    }

    pub fn is_static(&self) -> bool {
        matches!(self, TableSource::Static(_))
    }

    /// Produce the current data, invoking the producer if there is one.
    pub async fn resolve(&self) -> TableData {
        match self {
            TableSource::Static(data) => data.clone(),
            TableSource::Lazy(producer) => producer(),
            TableSource::AsyncLazy(producer) => producer().await,
        }
    }
}

impl fmt::Debug for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Static(data) => f.debug_tuple("Static").field(data).finish(),
            TableSource::Lazy(_) => f.write_str("Lazy(..)"),
            TableSource::AsyncLazy(_) => f.write_str("AsyncLazy(..)"),
        }
    }
}

impl From<DataFrame> for TableSource {
    fn from(frame: DataFrame) -> Self {
        TableSource::Static(TableData::Frame(frame))
    }
}

impl From<Vec<Record>> for TableSource {
    fn from(records: Vec<Record>) -> Self {
        TableSource::Static(TableData::Records(records))
    }
}

impl From<TableData> for TableSource {
    fn from(data: TableData) -> Self {
        TableSource::Static(data)
    }
}

/// Resolve `source` and normalize it into a fresh frame.
pub async fn normalize(
    source: &TableSource,
    columns: Option<&[String]>,
) -> Result<DataFrame, TableError> {
    source.resolve().await.into_frame(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_columns_follow_first_record() {
        let frame = TableData::from(vec![
            record! { "b" => 1, "a" => "x" },
            record! { "a" => "y", "b" => 2 },
        ])
        .into_frame(None)
        .unwrap();
        assert_eq!(frame.columns(), ["b", "a"]);
        assert_eq!(frame.rows()[1], vec![Value::from(2), Value::from("y")]);
    }

    #[test]
    fn test_missing_fields_are_null() {
        let frame = TableData::from(vec![record! { "a" => 1, "b" => 2 }, record! { "a" => 3 }])
            .into_frame(None)
            .unwrap();
        assert_eq!(frame.rows()[1], vec![Value::from(3), Value::Null]);
    }

    #[test]
    fn test_unexpected_field_is_schema_mismatch() {
        let err = TableData::from(vec![record! { "a" => 1 }, record! { "a" => 2, "z" => 0 }])
            .into_frame(None)
            .unwrap_err();
        assert_eq!(
            err,
            TableError::SchemaMismatch {
                row: 1,
                column: "z".into()
            }
        );
    }

    #[test]
    fn test_declared_columns_project_and_ignore_extras() {
        let frame = TableData::from(vec![
            record! { "a" => 1, "b" => 2, "c" => 3 },
            record! { "a" => 4, "c" => 6, "extra" => 0 },
        ])
        .into_frame(Some(&cols(&["c", "a"])))
        .unwrap();
        assert_eq!(frame.columns(), ["c", "a"]);
        assert_eq!(frame.rows()[1], vec![Value::from(6), Value::from(4)]);
    }

    #[test]
    fn test_declared_column_absent_from_source() {
        let err = TableData::from(vec![record! { "a" => 1 }])
            .into_frame(Some(&cols(&["a", "nope"])))
            .unwrap_err();
        assert_eq!(err, TableError::ColumnNotFound { column: "nope".into() });
    }

    #[test]
    fn test_empty_records_keep_declared_columns() {
        let frame = TableData::Records(Vec::new())
            .into_frame(Some(&cols(&["a"])))
            .unwrap();
        assert_eq!(frame.columns(), ["a"]);
        assert_eq!(frame.height(), 0);
    }

    #[test]
    fn test_records_from_json_preserves_key_order() {
        let records = records_from_json(serde_json::json!([
            {"zeta": 1, "alpha": "x"},
            {"zeta": 2, "alpha": "y"}
        ]))
        .unwrap();
        let frame = TableData::from(records).into_frame(None).unwrap();
        assert_eq!(frame.columns(), ["zeta", "alpha"]);
    }

    #[test]
    fn test_records_from_json_rejects_non_objects() {
        assert!(records_from_json(serde_json::json!({"a": 1})).is_err());
        assert!(records_from_json(serde_json::json!([1, 2])).is_err());
    }

    #[tokio::test]
    async fn test_lazy_source_is_reinvoked() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let source = TableSource::lazy(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            vec![record! { "calls" => n as i64 }]
        });

        let first = normalize(&source, None).await.unwrap();
        let second = normalize(&source, None).await.unwrap();
        assert_eq!(first.rows()[0][0], Value::from(1));
        assert_eq!(second.rows()[0][0], Value::from(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_async_source_is_awaited() {
        let source = TableSource::async_lazy(|| async {
            tokio::task::yield_now().await;
            vec![record! { "a" => 1 }, record! { "a" => 2 }]
        });
        let frame = normalize(&source, None).await.unwrap();
        assert_eq!(frame.height(), 2);
        assert!(!source.is_static());
    }
}
