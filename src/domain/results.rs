// Normalized result shapes for search and query
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Identifier to display name, as returned by `/search`.
///
/// Entries whose `value` or `text` was missing carry `None` in that slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    entries: HashMap<Option<String>, Option<String>>,
}

impl SearchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair; a repeated identifier replaces the earlier name
    pub fn insert(&mut self, id: Option<String>, name: Option<String>) {
        self.entries.insert(id, name);
    }

    /// Display name for `id`. `Some(None)` means the id was present without text.
    pub fn get(&self, id: &str) -> Option<Option<&str>> {
        self.entries
            .get(&Some(id.to_string()))
            .map(|name| name.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, Option<&str>)> {
        self.entries
            .iter()
            .map(|(id, name)| (id.as_deref(), name.as_deref()))
    }

    pub fn into_inner(self) -> HashMap<Option<String>, Option<String>> {
        self.entries
    }
}

/// Identifies one series inside a query result
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SeriesContext {
    pub unit: Option<String>,
    pub label: Option<String>,
}

impl SeriesContext {
    pub fn new(unit: Option<String>, label: Option<String>) -> Self {
        Self { unit, label }
    }
}

/// Timestamp exactly as the server sent it, in epoch seconds.
///
/// Ordered with `f64::total_cmp` so it can key a `BTreeMap`. Held as an `f64`,
/// so integers beyond 2^53 are not kept exactly; epoch seconds stay far below that.
#[derive(Debug, Clone, Copy)]
pub struct RawTimestamp(pub f64);

impl PartialEq for RawTimestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RawTimestamp {}

impl PartialOrd for RawTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RawTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp to value for one series. `None` values are JSON nulls.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesPoints {
    /// Timestamps converted to instants
    Instants(BTreeMap<DateTime<Utc>, Option<f64>>),
    /// Timestamps left as the raw numbers from the response
    Raw(BTreeMap<RawTimestamp, Option<f64>>),
}

impl SeriesPoints {
    pub fn len(&self) -> usize {
        match self {
            SeriesPoints::Instants(points) => points.len(),
            SeriesPoints::Raw(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_instants(&self) -> Option<&BTreeMap<DateTime<Utc>, Option<f64>>> {
        match self {
            SeriesPoints::Instants(points) => Some(points),
            SeriesPoints::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&BTreeMap<RawTimestamp, Option<f64>>> {
        match self {
            SeriesPoints::Raw(points) => Some(points),
            SeriesPoints::Instants(_) => None,
        }
    }
}

/// Every series returned by `/query`, flattened in target order then series order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    series: Vec<(SeriesContext, SeriesPoints)>,
}

impl QueryResult {
    pub fn new(series: Vec<(SeriesContext, SeriesPoints)>) -> Self {
        Self { series }
    }

    pub fn push(&mut self, context: SeriesContext, points: SeriesPoints) {
        self.series.push((context, points));
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SeriesContext, SeriesPoints)> {
        self.series.iter()
    }

    /// First series carrying `label`
    pub fn find_by_label(&self, label: &str) -> Option<&(SeriesContext, SeriesPoints)> {
        self.series
            .iter()
            .find(|(context, _)| context.label.as_deref() == Some(label))
    }

    pub fn into_inner(self) -> Vec<(SeriesContext, SeriesPoints)> {
        self.series
    }
}

impl IntoIterator for QueryResult {
    type Item = (SeriesContext, SeriesPoints);
    type IntoIter = std::vec::IntoIter<(SeriesContext, SeriesPoints)>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_last_insert_wins() {
        let mut result = SearchResult::new();
        result.insert(Some("id1".to_string()), Some("first".to_string()));
        result.insert(Some("id1".to_string()), Some("second".to_string()));
        result.insert(Some("id2".to_string()), None);

        assert_eq!(result.len(), 2);
        assert_eq!(result.get("id1"), Some(Some("second")));
        assert_eq!(result.get("id2"), Some(None));
        assert_eq!(result.get("id3"), None);
    }

    #[test]
    fn test_search_result_into_inner() {
        let mut result = SearchResult::new();
        result.insert(Some("id1".to_string()), Some("cows".to_string()));
        result.insert(None, Some("orphan".to_string()));

        let entries = result.into_inner();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[&Some("id1".to_string())], Some("cows".to_string()));
        assert_eq!(entries[&None], Some("orphan".to_string()));
    }

    #[test]
    fn test_raw_timestamp_keeps_integers_up_to_2_pow_53() {
        let largest = (1u64 << 53) as f64;
        let timestamp: RawTimestamp = serde_json::from_str::<f64>("9007199254740992")
            .map(RawTimestamp)
            .unwrap();

        assert_eq!(timestamp, RawTimestamp(largest));
        assert_eq!(timestamp.to_string(), "9007199254740992");
        assert_ne!(RawTimestamp(largest - 1.0), timestamp);
    }

    #[test]
    fn test_raw_timestamp_ordering() {
        let mut points = BTreeMap::new();
        points.insert(RawTimestamp(1601.0), Some(0.2));
        points.insert(RawTimestamp(1600.0), Some(0.1));
        points.insert(RawTimestamp(1600.0), Some(0.3));

        let keys: Vec<f64> = points.keys().map(|k| k.0).collect();
        assert_eq!(keys, vec![1600.0, 1601.0]);
        assert_eq!(points[&RawTimestamp(1600.0)], Some(0.3));
    }

    #[test]
    fn test_find_by_label() {
        let mut result = QueryResult::default();
        result.push(
            SeriesContext::new(Some("percent".to_string()), Some("cows".to_string())),
            SeriesPoints::Raw(BTreeMap::new()),
        );
        result.push(
            SeriesContext::new(None, Some("babies".to_string())),
            SeriesPoints::Instants(BTreeMap::new()),
        );

        let (context, points) = result.find_by_label("babies").unwrap();
        assert_eq!(context.unit, None);
        assert!(points.as_instants().is_some());
        assert!(result.find_by_label("pigs").is_none());

        let series = result.into_inner();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0.label.as_deref(), Some("cows"));
    }
}
