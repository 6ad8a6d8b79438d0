// Request executor - builds the HTTP request and applies the fidelity tier
use crate::application::normalizer::Endpoint;
use crate::application::transport::{OutboundRequest, Transport};
use crate::domain::connection::Connection;
use crate::domain::error::{ClientError, ClientResult};
use crate::domain::response::{DatasourceResponse, RawResponse};
use crate::domain::settings::{self, FidelityLevel, Settings};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

const APPLICATION_JSON: &str = "application/json";

#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    settings: Option<Settings>,
}

impl RequestExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            settings: None,
        }
    }

    /// Pin settings for this executor instead of following the global default
    pub fn with_settings(self, settings: Settings) -> Self {
        Self {
            settings: Some(settings),
            ..self
        }
    }

    pub fn pinned_settings(&self) -> Option<Settings> {
        self.settings
    }

    /// Settings that would apply to a request completing right now
    pub fn effective_settings(&self) -> Settings {
        settings::resolve(self.settings)
    }

    /// Perform one request against `endpoint` and shape the response.
    ///
    /// Settings are resolved after the transport returns, so a scope that
    /// wraps only the completion still takes effect.
    pub async fn execute<B: Serialize + ?Sized>(
        &self,
        connection: &Connection,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> ClientResult<DatasourceResponse> {
        let request = build_request(connection, endpoint, body)?;
        let method = request.method.clone();
        let url = request.url.clone();

        let started = Instant::now();
        let raw = match self.transport.send(request).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("{} {} failed: {}", method, url, e);
                return Err(e);
            }
        };
        tracing::debug!(
            "{} {} -> {} ({} bytes) in {:?}",
            method,
            url,
            raw.status,
            raw.body.len(),
            started.elapsed()
        );

        let settings = self.effective_settings();
        tracing::trace!(
            "Shaping {} response at fidelity={} convert={}",
            endpoint.name(),
            settings.fidelity,
            settings.convert
        );

        match settings.fidelity {
            FidelityLevel::Raw => Ok(DatasourceResponse::Raw(raw)),
            FidelityLevel::Body => decode_body(&raw, endpoint).map(DatasourceResponse::Body),
            FidelityLevel::Best => {
                let body = decode_body(&raw, endpoint)?;
                endpoint.normalize(body, settings.convert)
            }
        }
    }
}

/// Assemble method, URL, headers and the encoded payload.
///
/// `content-type` is only sent alongside a body.
pub fn build_request<B: Serialize + ?Sized>(
    connection: &Connection,
    endpoint: Endpoint,
    body: Option<&B>,
) -> ClientResult<OutboundRequest> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

    let body = match body {
        Some(body) => {
            let encoded = serde_json::to_string(body)
                .map_err(|e| ClientError::decode(format!("{} request body", endpoint.name()), e))?;
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
            Some(encoded)
        }
        None => None,
    };

    Ok(OutboundRequest {
        method: endpoint.method(),
        url: connection.endpoint_url(endpoint.path()),
        headers,
        body,
    })
}

fn decode_body(raw: &RawResponse, endpoint: Endpoint) -> ClientResult<serde_json::Value> {
    serde_json::from_slice(&raw.body)
        .map_err(|e| ClientError::decode(format!("{} response", endpoint.name()), e))
}
