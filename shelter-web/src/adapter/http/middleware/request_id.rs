use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{warn, Span};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Ensures every request carries an `x-request-id` and echoes it back on the
/// response. Clients may supply their own; otherwise a v4 uuid is minted.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = match req.headers().get(X_REQUEST_ID) {
        Some(v) => v.clone(),
        None => {
            let generated = Uuid::new_v4().to_string();
            match HeaderValue::from_str(&generated) {
                Ok(v) => {
                    req.headers_mut().insert(X_REQUEST_ID, v.clone());
                    v
                }
                Err(e) => {
                    warn!("parse request id error: {e}");
                    return next.run(req).await;
                }
            }
        }
    };
    let mut res = next.run(req).await;
    res.headers_mut().insert(X_REQUEST_ID, id);
    res
}

/// Span for the tower-http trace layer, tagged with the request id.
pub fn request_span(req: &Request<Body>) -> Span {
    let id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    tracing::info_span!(
        "request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = %id,
    )
}
