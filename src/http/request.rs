//! Request identification.
//!
//! # Responsibilities
//! - Assign a UUID v4 `x-request-id` to requests that arrive without one
//! - Echo the id on the response for client-side correlation
//!
//! # Design Decisions
//! - A client-supplied id is kept as-is
//! - The id is attached before the trace layer so spans can record it

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

pub fn set_request_id_layer() -> SetRequestIdLayer<UuidRequestId> {
    SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Request id of `request`, or `"unknown"`.
pub fn request_id_of<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_is_uuid() {
        let request = Request::new(());
        let id = UuidRequestId.make_request_id(&request).unwrap();
        let raw = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(raw).is_ok());
    }

    #[test]
    fn test_request_id_of() {
        let request = Request::builder()
            .header(X_REQUEST_ID, "abc")
            .body(())
            .unwrap();
        assert_eq!(request_id_of(&request), "abc");
        assert_eq!(request_id_of(&Request::new(())), "unknown");
    }
}
