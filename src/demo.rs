//! Demo site: a metrics grid, a paginated table, an echo form and an upload
//! form, all wired through HTMX.

use std::sync::Arc;

use axum::http::Method;

use crate::config::AppConfig;
use crate::data::Record;
use crate::error::{PageError, TableError};
use crate::html::{button, card, grid, input_text, metric, page, text, upload, Form, Fragment};
use crate::http::HttpServer;
use crate::pages::{PageContext, PageRegistry, Route};
use crate::record;
use crate::table::{TableConfig, TableRegistry};

pub const DEMO_TABLE_ID: &str = "demo-table";
pub const DEMO_TABLE_PAGE_SIZE: usize = 3;

/// Endpoint latency sample shown in the demo table.
pub fn demo_records() -> Vec<Record> {
    vec![
        record! { "endpoint" => "/demo", "latency_ms" => 42, "rps" => 1240 },
        record! { "endpoint" => "/demo/table", "latency_ms" => 55, "rps" => 980 },
        record! { "endpoint" => "/demo/upload", "latency_ms" => 71, "rps" => 640 },
        record! { "endpoint" => "/demo/form", "latency_ms" => 38, "rps" => 1520 },
        record! { "endpoint" => "/demo/chart", "latency_ms" => 65, "rps" => 820 },
    ]
}

fn demo_table() -> TableConfig {
    TableConfig::new(DEMO_TABLE_ID, demo_records()).page_size(DEMO_TABLE_PAGE_SIZE)
}

/// Register the demo table so its partial endpoint answers before `/demo` is
/// first rendered.
pub fn seed_tables(tables: &TableRegistry) -> Result<(), TableError> {
    tables.register(demo_table())
}

async fn demo_page(ctx: PageContext) -> Result<Fragment, TableError> {
    let metrics = [
        metric("Throughput (req/s)", "1,240", Some("+6.2%")),
        metric("Latency p95 (ms)", 42, Some("-3.1%")),
        metric("Active sessions", 312, Some("+12")),
    ];
    let table = ctx.table(demo_table()).await?;

    let echo_form = Form::new("/demo/echo")
        .target("#echo-result")
        .child(input_text("message", "Echo message", "Type something...", ""))
        .child(button("Send", "primary"))
        .render();
    let upload_form = Form::new("/demo/upload")
        .target("#upload-result")
        .multipart()
        .child(upload("file", "File", Some(".csv,.txt")))
        .child(button("Upload", "primary"))
        .render();

    Ok(page(
        "Bentoapp demo",
        [
            text("Starter page using HTMX-friendly fragments."),
            grid(metrics, 240),
            table,
            echo_form,
            text("Upload a small file:"),
            upload_form,
            text("Echo result:"),
            card(Some("echo-result"), Vec::new()),
            text("Upload result:"),
            card(Some("upload-result"), Vec::new()),
        ],
    ))
}

fn echo(ctx: PageContext) -> Fragment {
    let message = ctx.form("message").unwrap_or_default();
    text(&format!("You said: {message}"))
}

fn upload_result(ctx: PageContext) -> Fragment {
    match ctx.file("file") {
        Some(file) => text(&format!("Uploaded {} ({} bytes)", file.file_name, file.len())),
        None => text("No file uploaded."),
    }
}

/// Page and partial routes of the demo site.
pub fn demo_pages() -> Result<PageRegistry, PageError> {
    let mut pages = PageRegistry::new();
    pages.register(Route::new("/demo", "demo", demo_page))?;
    pages.register_partial(Route::new_sync("/demo/echo", "echo", echo).methods([Method::POST]))?;
    pages.register_partial(
        Route::new_sync("/demo/upload", "upload", upload_result).methods([Method::POST]),
    )?;
    Ok(pages)
}

/// Assemble the demo server with its table pre-registered.
pub fn demo_server(config: AppConfig) -> Result<HttpServer, PageError> {
    let tables = Arc::new(TableRegistry::new());
    seed_tables(&tables)?;
    HttpServer::with_tables(config, demo_pages()?, tables)
}
