//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bento_page_renders_total` (counter): page/partial renders by route, status
//! - `bento_page_render_seconds` (histogram): handler + shell latency by route
//! - `bento_table_renders_total` (counter): table fragment renders by table
//! - `bento_table_render_seconds` (histogram): normalize + render latency
//! - `bento_table_rows_rendered` (histogram): visible rows per render

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with an HTTP scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one page or partial render.
pub fn record_page_render(route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    counter!("bento_page_renders_total", "route" => route.clone(), "status" => status.to_string())
        .increment(1);
    histogram!("bento_page_render_seconds", "route" => route).record(start.elapsed().as_secs_f64());
}

/// Record one table fragment render.
pub fn record_table_render(table_id: &str, rows: usize, start: Instant) {
    let table = table_id.to_string();
    counter!("bento_table_renders_total", "table" => table.clone()).increment(1);
    histogram!("bento_table_render_seconds", "table" => table.clone())
        .record(start.elapsed().as_secs_f64());
    histogram!("bento_table_rows_rendered", "table" => table).record(rows as f64);
}
