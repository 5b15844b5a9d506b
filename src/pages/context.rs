//! Request context handed to page handlers.
//!
//! # Responsibilities
//! - Expose method, path and query parameters
//! - Decode urlencoded and multipart bodies into form fields and files
//! - Give handlers access to the table registry
//!
//! # Design Decisions
//! - Bodies are read eagerly; size is bounded by the body limit layer
//! - Unknown content types leave form and files empty

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::{header, Method},
};

use crate::data::{Direction, TableSource};
use crate::error::TableError;
use crate::html::Fragment;
use crate::http::error::AppError;
use crate::http::server::AppState;
use crate::table::{TableConfig, TableRegistry, DEFAULT_PAGE_SIZE};

/// A file received in a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Form field name.
    pub field: String,
    /// Client-supplied file name.
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Everything a handler may read from the current request.
#[derive(Debug, Clone)]
pub struct PageContext {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,
    files: Vec<UploadedFile>,
    tables: Arc<TableRegistry>,
    default_page_size: usize,
}

impl PageContext {
    /// Empty `GET /` context over `tables`.
    pub fn new(tables: Arc<TableRegistry>) -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            query: Vec::new(),
            form: Vec::new(),
            files: Vec::new(),
            tables,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    pub fn with_file(mut self, file: UploadedFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// First query value for `name`.
    pub fn query(&self, name: &str) -> Option<&str> {
        first_value(&self.query, name)
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// First form value for `name`.
    pub fn form(&self, name: &str) -> Option<&str> {
        first_value(&self.form, name)
    }

    pub fn form_pairs(&self) -> &[(String, String)] {
        &self.form
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    /// First uploaded file for form field `field`.
    pub fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field == field)
    }

    pub fn tables(&self) -> &TableRegistry {
        &self.tables
    }

    /// A table config using the application's default page size.
    pub fn table_config(&self, id: impl Into<String>, source: impl Into<TableSource>) -> TableConfig {
        TableConfig::new(id, source).page_size(self.default_page_size)
    }

    /// Register `config` and render its first page unsorted.
    pub async fn table(&self, config: TableConfig) -> Result<Fragment, TableError> {
        self.tables.embed(config, None, Direction::Asc).await
    }
}

fn first_value<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn parse_pairs(raw: &[u8]) -> Result<Vec<(String, String)>, AppError> {
    serde_urlencoded::from_bytes(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

impl FromRequest<AppState> for PageContext {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let mut ctx = PageContext::new(state.tables.clone())
            .with_method(req.method().clone())
            .with_path(req.uri().path())
            .with_default_page_size(state.config.tables.default_page_size);
        ctx.query = parse_pairs(req.uri().query().unwrap_or_default().as_bytes())?;

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::rejection(e.status(), e.body_text()))?;
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::rejection(e.status(), e.body_text()))?
            {
                let name = field.name().unwrap_or_default().to_string();
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::rejection(e.status(), e.body_text()))?;
                match file_name {
                    Some(file_name) => ctx.files.push(UploadedFile {
                        field: name,
                        file_name,
                        content_type,
                        data,
                    }),
                    None => ctx
                        .form
                        .push((name, String::from_utf8_lossy(&data).into_owned())),
                }
            }
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| AppError::rejection(e.status(), e.body_text()))?;
            ctx.form = parse_pairs(&body)?;
        }

        Ok(ctx)
    }
}
