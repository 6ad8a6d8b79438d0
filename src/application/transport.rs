// Transport trait for performing a single HTTP round trip
use crate::domain::error::ClientResult;
use crate::domain::response::RawResponse;
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;

/// A fully built outbound request
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// JSON-encoded payload, absent for bodiless requests
    pub body: Option<String>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request once.
    ///
    /// Connection failures and non-2xx statuses are reported as
    /// `ClientError::Transport`; retries and timeouts are the implementor's business.
    async fn send(&self, request: OutboundRequest) -> ClientResult<RawResponse>;
}
