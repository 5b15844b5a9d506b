//! Table registry.
//!
//! # Responsibilities
//! - Map table ids to their latest `TableConfig`
//! - Re-derive a fresh frame for every lookup
//! - Render table fragments for pages and for the partial endpoint
//!
//! # Design Decisions
//! - Last registration wins; replacing a config is a single map write
//! - Static sources are validated at registration so bad column lists fail
//!   during assembly; producer-backed sources on first render
//! - Ids are limited to `[A-Za-z0-9_-]` so `#table-<id>` is a valid selector
//! - No map guard is held across an `.await`

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;

use crate::data::{normalize, DataFrame, Direction, TableSource};
use crate::error::TableError;
use crate::html::Fragment;
use crate::observability::metrics;
use crate::table::config::TableConfig;
use crate::table::query::TableView;
use crate::table::render::render_table;

/// Process-wide mapping from table id to configuration.
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: DashMap<String, Arc<TableConfig>>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a table.
    pub fn register(&self, config: TableConfig) -> Result<(), TableError> {
        if !is_valid_id(&config.id) {
            return Err(TableError::InvalidTableId(config.id));
        }
        if let TableSource::Static(data) = &config.source {
            data.clone().into_frame(config.columns.as_deref())?;
        }

        let id = config.id.clone();
        let page_size = config.page_size;
        let is_static = config.source.is_static();
        match self.tables.insert(id.clone(), Arc::new(config)) {
            Some(_) => tracing::debug!(table = %id, page_size, is_static, "Table config replaced"),
            None => tracing::info!(table = %id, page_size, is_static, "Table registered"),
        }
        Ok(())
    }

    /// Look up a table's current configuration.
    pub fn get(&self, table_id: &str) -> Result<Arc<TableConfig>, TableError> {
        self.tables
            .get(table_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| TableError::UnknownTable(table_id.to_string()))
    }

    /// Build a fresh frame for `table_id`, invoking its producer if any.
    pub async fn frame_for(&self, table_id: &str) -> Result<DataFrame, TableError> {
        let config = self.get(table_id)?;
        normalize(&config.source, config.columns.as_deref()).await
    }

    /// Render the table fragment for `view`.
    pub async fn render(&self, table_id: &str, view: &TableView) -> Result<String, TableError> {
        let start = Instant::now();
        let config = self.get(table_id)?;
        let frame = normalize(&config.source, config.columns.as_deref()).await?;
        let page_size = view.page_size.unwrap_or(config.page_size);
        let rendered = render_table(
            frame,
            &config.id,
            view.page,
            page_size,
            view.sort.as_deref(),
            view.direction,
        );

        tracing::debug!(
            table = %config.id,
            page = rendered.window.page,
            total_pages = rendered.window.total_pages,
            rows = rendered.window.len,
            "Table rendered"
        );
        metrics::record_table_render(&config.id, rendered.window.len, start);
        Ok(rendered.html)
    }

    /// Register `config` and render its first page, for embedding in a page.
    pub async fn embed(
        &self,
        config: TableConfig,
        sort: Option<&str>,
        direction: Direction,
    ) -> Result<Fragment, TableError> {
        let id = config.id.clone();
        self.register(config)?;
        let html = self.render(&id, &TableView::sorted(sort, direction)).await?;
        Ok(Fragment::trusted(html))
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.tables.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
