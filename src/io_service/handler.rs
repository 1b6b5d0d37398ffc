use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
};

use super::{IoState, SERVICE};
use crate::http::RequestIdExt;
use crate::observability::metrics;

/// Sleep for the configured delay, then answer with the payload.
pub async fn serve_io(State(state): State<Arc<IoState>>, headers: HeaderMap) -> impl IntoResponse {
    let start = Instant::now();
    tracing::debug!(
        request_id = %headers.request_id_str(),
        delay_ms = state.delay.as_millis() as u64,
        "Simulating I/O"
    );

    tokio::time::sleep(state.delay).await;

    metrics::record_request(SERVICE, &state.path, StatusCode::OK.as_u16(), start);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.payload.clone(),
    )
}
