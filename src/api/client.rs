//! The single outbound client used by every api request.
//!
//! # Design Decisions
//! - One deadline per call, covering connect, response head and body
//! - Failures before the head are errors; body failures yield an empty body
//! - The upstream status is reported but never turned into an error
//! - The inbound request does not cancel or shorten the call

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, Method, Request, StatusCode, Uri},
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::time::{self, Instant};

use crate::api::error::{describe, UpstreamError};
use crate::config::{UpstreamConfig, ValidationError};
use crate::http::X_REQUEST_ID;

/// What came back from io-service.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// GET client bound to one target URL.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    target: Uri,
    timeout: Duration,
    max_body_bytes: usize,
}

impl UpstreamClient {
    pub fn new(target: Uri, timeout: Duration, max_body_bytes: usize) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            target,
            timeout,
            max_body_bytes,
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ValidationError> {
        Ok(Self::new(
            config.target_uri()?,
            Duration::from_millis(config.timeout_ms),
            config.max_body_bytes,
        ))
    }

    pub fn target(&self) -> &Uri {
        &self.target
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue one GET to the target and buffer the whole body.
    pub async fn fetch(
        &self,
        request_id: Option<&HeaderValue>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let deadline = Instant::now() + self.timeout;

        let mut builder = Request::builder()
            .method(Method::GET)
            .uri(self.target.clone())
            .header(header::USER_AGENT, concat!("io-relay/", env!("CARGO_PKG_VERSION")));
        if let Some(id) = request_id {
            builder = builder.header(X_REQUEST_ID, id.clone());
        }
        let request = builder
            .body(Body::empty())
            .map_err(|e| UpstreamError::Request {
                url: self.target.to_string(),
                message: e.to_string(),
            })?;

        let response = match time::timeout_at(deadline, self.client.request(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                return Err(UpstreamError::Transport {
                    url: self.target.to_string(),
                    message: describe(&e),
                })
            }
            Err(_) => {
                return Err(UpstreamError::Timeout {
                    url: self.target.to_string(),
                    timeout: self.timeout,
                })
            }
        };

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = self.read_body(response.into_body(), deadline).await;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }

    async fn read_body(&self, body: Incoming, deadline: Instant) -> Bytes {
        let read = axum::body::to_bytes(Body::new(body), self.max_body_bytes);
        match time::timeout_at(deadline, read).await {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Discarding unreadable upstream body");
                Bytes::new()
            }
            Err(_) => {
                tracing::debug!(timeout = ?self.timeout, "Upstream body read hit the deadline");
                Bytes::new()
            }
        }
    }
}
