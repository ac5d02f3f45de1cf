use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Calculator id addressed by a `/calculators/{id}...` path.
pub fn calculator_id(path: &str) -> Option<&str> {
    path.strip_prefix("/calculators/")?
        .split('/')
        .next()
        .filter(|id| !id.is_empty())
}

/// Emits one `api_request` event per request, tagged with the calculator
/// the request addressed, if any.
pub async fn request_log(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        calculator = calculator_id(&path).unwrap_or("-"),
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "api_request"
    );

    response
}
