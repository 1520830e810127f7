//! services/portal/src/web/middleware.rs
//!
//! Request logging. Every request gets a fresh id which is attached to a
//! span around the handler and echoed back in the `x-request-id` header.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub async fn log_requests(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    // Handler and adapter logs inherit the id through this span.
    let span = info_span!("request", %request_id, %method, path = %path);

    let started = Instant::now();
    let mut response = next.run(req).instrument(span.clone()).await;
    let status = response.status();
    let elapsed = started.elapsed();

    span.in_scope(|| {
        if status.is_server_error() {
            warn!("{} {} -> {} in {:?}", method, path, status, elapsed);
        } else {
            info!("{} {} -> {} in {:?}", method, path, status, elapsed);
        }
    });

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }
    response
}
