// Per-endpoint response normalization
use crate::domain::error::{ClientError, ClientResult};
use crate::domain::response::DatasourceResponse;
use crate::domain::results::{QueryResult, RawTimestamp, SearchResult, SeriesContext, SeriesPoints};
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The datasource endpoints. Each one knows its route and how its body is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Ping,
    Search,
    Query,
    Annotations,
    TagKeys,
    TagValues,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Ping => "/",
            Endpoint::Search => "/search",
            Endpoint::Query => "/query",
            Endpoint::Annotations => "/annotations",
            Endpoint::TagKeys => "/tag-keys",
            Endpoint::TagValues => "/tag-values",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::Ping => Method::GET,
            _ => Method::POST,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Ping => "ping",
            Endpoint::Search => "search",
            Endpoint::Query => "query",
            Endpoint::Annotations => "annotations",
            Endpoint::TagKeys => "tag-keys",
            Endpoint::TagValues => "tag-values",
        }
    }

    /// Shape a decoded body for this endpoint.
    ///
    /// Only search and query have a dedicated shape; the rest come back as the
    /// decoded body.
    pub fn normalize(self, body: Value, convert: bool) -> ClientResult<DatasourceResponse> {
        match self {
            Endpoint::Search => normalize_search(body).map(DatasourceResponse::Search),
            Endpoint::Query => normalize_query(body, convert).map(DatasourceResponse::Query),
            _ => Ok(DatasourceResponse::Body(body)),
        }
    }
}

/// `[{"value": .., "text": ..}]` into an id to name mapping.
///
/// Bare strings in the array map to themselves.
pub fn normalize_search(body: Value) -> ClientResult<SearchResult> {
    let items = match body {
        Value::Array(items) => items,
        other => {
            return Err(ClientError::decode(
                "search response",
                format!("expected an array, got {}", json_kind(&other)),
            ));
        }
    };

    let mut result = SearchResult::new();
    for item in items {
        match item {
            Value::String(name) => result.insert(Some(name.clone()), Some(name)),
            item => result.insert(
                scalar_to_string(item.get("value")),
                scalar_to_string(item.get("text")),
            ),
        }
    }

    Ok(result)
}

#[derive(Debug, Deserialize)]
struct TargetPayload {
    #[serde(default)]
    times: Vec<f64>,
    #[serde(default)]
    data: Vec<SeriesPayload>,
}

#[derive(Debug, Deserialize)]
struct SeriesPayload {
    label: Option<String>,
    unit: Option<String>,
    #[serde(default)]
    data: Vec<Option<f64>>,
}

/// Flatten per-target query results into `(context, points)` pairs.
///
/// Each series is paired index-for-index with its target's `times`; a length
/// mismatch pairs up to the shorter of the two.
pub fn normalize_query(body: Value, convert: bool) -> ClientResult<QueryResult> {
    let targets: Vec<TargetPayload> =
        serde_json::from_value(body).map_err(|e| ClientError::decode("query response", e))?;

    let mut result = QueryResult::default();
    for target in targets {
        if convert {
            for series in target.data {
                // Only paired timestamps are converted
                let points = target
                    .times
                    .iter()
                    .zip(series.data)
                    .map(|(secs, value)| Ok((epoch_seconds_to_instant(*secs)?, value)))
                    .collect::<ClientResult<BTreeMap<DateTime<Utc>, Option<f64>>>>()?;
                result.push(
                    SeriesContext::new(series.unit, series.label),
                    SeriesPoints::Instants(points),
                );
            }
        } else {
            for series in target.data {
                let points: BTreeMap<RawTimestamp, Option<f64>> = target
                    .times
                    .iter()
                    .map(|secs| RawTimestamp(*secs))
                    .zip(series.data)
                    .collect();
                result.push(
                    SeriesContext::new(series.unit, series.label),
                    SeriesPoints::Raw(points),
                );
            }
        }
    }

    tracing::trace!("Normalized query response into {} series", result.len());
    Ok(result)
}

/// Epoch seconds to an instant, at millisecond precision
pub fn epoch_seconds_to_instant(secs: f64) -> ClientResult<DateTime<Utc>> {
    let out_of_range =
        || ClientError::decode("query timestamp", format!("{:e}s is out of range", secs));

    let millis = (secs * 1000.0).round();
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return Err(out_of_range());
    }

    Utc.timestamp_millis_opt(millis as i64)
        .single()
        .ok_or_else(out_of_range)
}

fn scalar_to_string(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
