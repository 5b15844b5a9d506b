//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use bentoapp::config::AppConfig;
use bentoapp::demo::demo_server;
use bentoapp::lifecycle::Shutdown;
use bentoapp::HttpServer;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Response parts collected for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// The demo site's fully layered router.
pub fn demo_router() -> Router {
    demo_server(AppConfig::default())
        .expect("demo assembles")
        .router()
}

pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(router: Router, uri: &str) -> TestResponse {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

pub async fn post_form(router: Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

/// POST a single-file multipart body.
pub async fn post_file(
    router: Router,
    uri: &str,
    field: &str,
    file_name: &str,
    contents: &[u8],
) -> TestResponse {
    let boundary = "bentoapp-test-boundary";
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(router, request).await
}

/// The decoded `hx-get` URL of the pager button labelled `label`.
pub fn pager_link(html: &str, label: &str) -> Option<String> {
    let end = html.find(&format!(">{label}</button>"))?;
    let start = html[..end].rfind("hx-get='")? + "hx-get='".len();
    let raw = &html[start..];
    let raw = &raw[..raw.find('\'')?];
    Some(html_escape::decode_html_entities(raw).into_owned())
}

/// Query pairs of a URL.
pub fn query_pairs(url: &str) -> Vec<(String, String)> {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or_default();
    serde_urlencoded::from_str(query).unwrap()
}

/// Number of `<tr>` rows in the table body.
pub fn body_row_count(html: &str) -> usize {
    html.split_once("<tbody>")
        .and_then(|(_, rest)| rest.split_once("</tbody>"))
        .map(|(body, _)| body.matches("<tr>").count())
        .unwrap_or(0)
}

/// Serve `server` on an ephemeral port.
pub async fn spawn_server(server: HttpServer) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    (addr, shutdown)
}
