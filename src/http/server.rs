//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Mount every registered page and partial route on an axum `Router`
//! - Serve the page directory at `/` and table partials under `/_bento/table`
//! - Wire up middleware (trace, request id, timeout, body limit, compression,
//!   security headers)
//! - Serve until the shutdown broadcast fires

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Path, RawQuery, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, MethodFilter, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    compression::{
        predicate::{DefaultPredicate, Predicate, SizeAbove},
        CompressionLayer,
    },
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::PageError;
use crate::html::{page, shell::document};
use crate::http::error::AppError;
use crate::http::headers::with_security_headers;
use crate::http::request::{propagate_request_id_layer, request_id_of, set_request_id_layer};
use crate::observability::metrics;
use crate::pages::{PageContext, PageRegistry, Route};
use crate::table::{TableQuery, TableRegistry, TABLE_ENDPOINT};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pages: Arc<PageRegistry>,
    pub tables: Arc<TableRegistry>,
    pub config: Arc<AppConfig>,
}

/// HTTP server for a bentoapp site.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Build the server for `pages` with a fresh table registry.
    pub fn new(config: AppConfig, pages: PageRegistry) -> Result<Self, PageError> {
        Self::with_tables(config, pages, Arc::new(TableRegistry::new()))
    }

    /// Build the server for `pages` over an existing table registry.
    pub fn with_tables(
        config: AppConfig,
        pages: PageRegistry,
        tables: Arc<TableRegistry>,
    ) -> Result<Self, PageError> {
        let state = AppState {
            pages: Arc::new(pages),
            tables,
            config: Arc::new(config),
        };
        let router = Self::build_router(&state)?;
        Ok(Self { router, state })
    }

    /// Build the axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: &AppState) -> Result<Router, PageError> {
        let mut by_path: HashMap<String, MethodRouter<AppState>> = HashMap::new();
        let pages = state.pages.routes().iter().map(|r| (r, false));
        let partials = state.pages.partials().iter().map(|r| (r, true));

        for (route, partial) in pages.chain(partials) {
            for method in &route.methods {
                let filter = MethodFilter::try_from(method.clone())
                    .map_err(|_| PageError::InvalidMethod(method.to_string()))?;
                let handler_route = route.clone();
                let handler = move |State(state): State<AppState>, ctx: PageContext| {
                    let route = handler_route.clone();
                    async move { serve_route(state, route, partial, ctx).await }
                };
                let slot = by_path
                    .entry(route.path.clone())
                    .or_insert_with(MethodRouter::new);
                *slot = std::mem::replace(slot, MethodRouter::new()).on(filter, handler);
            }
        }

        let mut router = Router::new();
        for (path, method_router) in by_path {
            router = router.route(&path, method_router);
        }
        if !state.pages.owns_root() {
            router = router.route("/", get(directory_handler));
        }

        let config = &state.config;
        let mut router = router
            .route(&format!("{TABLE_ENDPOINT}/{{table_id}}"), get(table_handler))
            .fallback(not_found)
            .with_state(state.clone())
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        if config.security.enable_headers {
            router = with_security_headers(router);
        }
        if config.security.compression {
            router = router.layer(
                CompressionLayer::new()
                    .compress_when(DefaultPredicate::new().and(SizeAbove::new(512))),
            );
        }

        Ok(router.layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        path = %req.uri().path(),
                        request_id = %request_id_of(req),
                    )
                }))
                .layer(propagate_request_id_layer()),
        ))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn tables(&self) -> &Arc<TableRegistry> {
        &self.state.tables
    }

    /// A clone of the fully layered router, for in-process serving.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            pages = self.state.pages.routes().len(),
            partials = self.state.pages.partials().len(),
            tables = ?self.state.tables.ids(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Invoke a route handler; pages are wrapped in the document shell, partials
/// are returned bare.
async fn serve_route(
    state: AppState,
    route: Route,
    partial: bool,
    ctx: PageContext,
) -> Result<Html<String>, AppError> {
    let start = Instant::now();
    match route.call(ctx).await {
        Ok(fragment) => {
            let body = if partial {
                fragment.into_string()
            } else {
                document(&state.config.app.title, &state.config.app.htmx_src, &fragment)
            };
            tracing::debug!(route = %route.name, partial, "Page rendered");
            metrics::record_page_render(&route.name, 200, start);
            Ok(Html(body))
        }
        Err(err) => {
            let err = AppError::from(err);
            metrics::record_page_render(&route.name, err.status().as_u16(), start);
            Err(err)
        }
    }
}

async fn directory_handler(State(state): State<AppState>) -> Html<String> {
    let title = &state.config.app.title;
    let body = page(title, [state.pages.default_page_fragment()]);
    Html(document(title, &state.config.app.htmx_src, &body))
}

async fn table_handler(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, AppError> {
    let view = TableQuery::parse(raw.as_deref().unwrap_or_default()).into_view();
    let html = state.tables.render(&table_id, &view).await?;
    Ok(Html(html))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html("<div class='card notice notice--error'>Page not found.</div>"),
    )
}
