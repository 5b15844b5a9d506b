//! Error responses.
//!
//! Every failure is rendered as a small HTML notice so an HTMX swap shows
//! something readable instead of a blank target.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::error::{PageError, TableError};
use crate::html::escape;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("request body too large")]
    PayloadTooLarge,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Table(TableError::UnknownTable(_))
            | AppError::Page(PageError::Table(TableError::UnknownTable(_))) => {
                StatusCode::NOT_FOUND
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map an extractor rejection, keeping the body-limit status.
    pub fn rejection(status: StatusCode, message: impl Into<String>) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::BadRequest(message.into())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "Something went wrong while rendering this view.".to_string()
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
            self.to_string()
        };

        let body = format!(
            "<div class='card notice notice--error'>{}</div>",
            escape(&message)
        );
        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(TableError::UnknownTable("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(PageError::from(TableError::UnknownTable("x".into()))).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("nope".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::rejection(StatusCode::PAYLOAD_TOO_LARGE, "too big").status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::from(TableError::ColumnNotFound { column: "c".into() }).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unknown_table_response() {
        let response = AppError::from(TableError::UnknownTable("<t>".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
