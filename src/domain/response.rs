// Response envelopes, one variant per fidelity outcome
use crate::domain::error::{ClientError, ClientResult};
use crate::domain::results::{QueryResult, SearchResult};
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// A transport response before any decoding
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ClientError::decode("response body", e))
    }
}

/// What a datasource call returns, depending on the fidelity in effect
#[derive(Debug, Clone)]
pub enum DatasourceResponse {
    Raw(RawResponse),
    Body(serde_json::Value),
    Search(SearchResult),
    Query(QueryResult),
}

impl DatasourceResponse {
    pub fn into_raw(self) -> Option<RawResponse> {
        match self {
            DatasourceResponse::Raw(raw) => Some(raw),
            _ => None,
        }
    }

    pub fn into_body(self) -> Option<serde_json::Value> {
        match self {
            DatasourceResponse::Body(body) => Some(body),
            _ => None,
        }
    }

    pub fn into_search(self) -> Option<SearchResult> {
        match self {
            DatasourceResponse::Search(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_query(self) -> Option<QueryResult> {
        match self {
            DatasourceResponse::Query(result) => Some(result),
            _ => None,
        }
    }
}
