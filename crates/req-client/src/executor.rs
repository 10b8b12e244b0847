//! HTTP executor seam.

use crate::request::RequestEnvelope;
use async_trait::async_trait;
use req_core::{ReqError, Result};
use reqwest::header::HeaderMap;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::debug;

/// Raw HTTP response handed back by an executor
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as text
    pub body: String,
}

/// Sends request envelopes over the wire.
///
/// Implementations only move bytes: status handling, cookies and session keys
/// are the client's job. An `Err` means no response was obtained at all.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Execute one request
    async fn execute(&self, request: RequestEnvelope) -> Result<HttpResponse>;
}

/// [`HttpExecutor`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    http: HttpClient,
}

impl ReqwestExecutor {
    /// Build an executor with the given User-Agent and optional timeout
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = HttpClient::builder().user_agent(user_agent).gzip(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| ReqError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }

    /// Wrap an existing `reqwest` client
    #[must_use]
    pub const fn from_client(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: RequestEnvelope) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self
            .http
            .request(request.method, &request.url)
            .headers(request.headers)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| ReqError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| ReqError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
