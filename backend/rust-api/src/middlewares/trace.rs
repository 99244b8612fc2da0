use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub static TRACE_ID_HEADER: HeaderName = HeaderName::from_static("x-trace-id");

const MAX_TRACE_ID_LEN: usize = 128;

/// Caller ids are kept only when short and printable, otherwise a fresh
/// UUID is issued.
fn accept_trace_id(value: Option<&HeaderValue>) -> Option<String> {
    let raw = value?.to_str().ok()?.trim();
    let printable = raw.chars().all(|c| c.is_ascii_graphic());
    (!raw.is_empty() && raw.len() <= MAX_TRACE_ID_LEN && printable).then(|| raw.to_string())
}

/// Runs the request inside a `hunt_request` span tagged with the trace id and
/// echoes the id back in the `x-trace-id` response header.
pub async fn trace_context_middleware(request: Request, next: Next) -> Response {
    let trace_id = accept_trace_id(request.headers().get(&TRACE_ID_HEADER))
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "hunt_request",
        trace_id = %trace_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response
            .headers_mut()
            .insert(TRACE_ID_HEADER.clone(), value);
    }

    response
}
