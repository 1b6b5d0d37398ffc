use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{ApiState, SERVICE};
use crate::api::client::UpstreamResponse;
use crate::api::error::UpstreamError;
use crate::http::RequestIdExt;
use crate::observability::metrics;

/// Body of the JSON call variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResult {
    pub result: String,
}

/// Relay the io-service body verbatim with `200`.
pub async fn call(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Response, UpstreamError> {
    let upstream = relay(&state, &headers, &state.call_path).await?;

    let mut response = (StatusCode::OK, upstream.body).into_response();
    if let Some(content_type) = upstream.content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    Ok(response)
}

/// Relay the io-service body wrapped as `{"result": ...}`.
pub async fn call_json(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<CallResult>, UpstreamError> {
    let route = state.json_call_path.as_deref().unwrap_or_default();
    let upstream = relay(&state, &headers, route).await?;

    Ok(Json(CallResult {
        result: String::from_utf8_lossy(&upstream.body).into_owned(),
    }))
}

async fn relay(
    state: &ApiState,
    headers: &HeaderMap,
    route: &str,
) -> Result<UpstreamResponse, UpstreamError> {
    let start = Instant::now();
    let request_id = headers.request_id_str();

    tracing::debug!(
        request_id = %request_id,
        upstream = %state.upstream.target(),
        "Calling io-service"
    );

    match state.upstream.fetch(headers.request_id()).await {
        Ok(upstream) => {
            tracing::debug!(
                request_id = %request_id,
                upstream_status = %upstream.status,
                bytes = upstream.body.len(),
                "io-service answered"
            );
            metrics::record_request(SERVICE, route, StatusCode::OK.as_u16(), start);
            Ok(upstream)
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Upstream call failed");
            metrics::record_upstream_error(e.kind());
            metrics::record_request(
                SERVICE,
                route,
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                start,
            );
            Err(e)
        }
    }
}
