// Request payloads sent to the datasource endpoints
use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, TimeZone, Utc};
use serde::Serialize;

/// Query window. Both ends are sent as ISO-8601 date-times rendered at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl TimeRange {
    pub fn new<Tz: TimeZone>(from: DateTime<Tz>, to: DateTime<Tz>) -> Self {
        Self {
            from: from.with_timezone(&Utc),
            to: to.with_timezone(&Utc),
            offset: Utc.fix(),
        }
    }

    /// Render both ends at a different UTC offset; the instants do not change
    pub fn with_offset(self, offset: FixedOffset) -> Self {
        Self { offset, ..self }
    }

    fn format(&self, instant: &DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.offset)
            .to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }

    pub(crate) fn to_body(&self) -> RangeBody {
        RangeBody {
            from: self.format(&self.from),
            to: self.format(&self.to),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RangeBody {
    from: String,
    to: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    target: &'a str,
}

impl<'a> SearchRequest<'a> {
    pub fn new(target: &'a str) -> Self {
        Self { target }
    }
}

#[derive(Debug, Serialize)]
struct QueryTarget<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    target: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryRequest<'a> {
    targets: Vec<QueryTarget<'a>>,
    range: RangeBody,
}

impl<'a> QueryRequest<'a> {
    pub fn new<S: AsRef<str>>(targets: &'a [S], range: &TimeRange) -> Self {
        Self {
            targets: targets
                .iter()
                .map(|target| QueryTarget {
                    kind: "timeserie",
                    target: target.as_ref(),
                })
                .collect(),
            range: range.to_body(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Annotation<'a> {
    name: &'a str,
    enable: bool,
    query: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnnotationRequest<'a> {
    annotation: Annotation<'a>,
    range: RangeBody,
}

impl<'a> AnnotationRequest<'a> {
    pub fn new(name: &'a str, range: &TimeRange) -> Self {
        Self {
            annotation: Annotation {
                name,
                enable: true,
                query: format!("#{}", name),
            },
            range: range.to_body(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TagKeysRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct TagValuesRequest<'a> {
    key: &'a str,
}

impl<'a> TagValuesRequest<'a> {
    pub fn new(key: &'a str) -> Self {
        Self { key }
    }
}
