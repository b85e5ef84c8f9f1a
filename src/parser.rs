//! Parser for InfluxDB 1.x JSON query responses.
//!
//! The `/query` endpoint answers with
//!
//! ```text
//! {"results":[{"statement_id":0,"series":[{"name":"bench","columns":["time","os"],"values":[[0,"linux"]]}]}]}
//! ```
//!
//! A statement without matching points has no `series` key at all; that is
//! an empty result, not an error.

use chrono::DateTime;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Name InfluxDB gives the timestamp column.
pub const TIME_COLUMN: &str = "time";

/// Top-level query response body.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    /// One entry per statement in the query.
    #[serde(default)]
    pub results: Vec<StatementResult>,

    /// Request-level error (e.g. query parse failure).
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of a single statement.
#[derive(Debug, Deserialize)]
pub struct StatementResult {
    /// Series returned by the statement.
    #[serde(default)]
    pub series: Vec<Series>,

    /// Statement-level error.
    #[serde(default)]
    pub error: Option<String>,
}

/// A block of rows sharing the same columns.
#[derive(Debug, Deserialize)]
pub struct Series {
    /// Measurement name, when reported.
    #[serde(default)]
    pub name: Option<String>,

    /// Column names, in row order.
    pub columns: Vec<String>,

    /// Rows; each row has one entry per column.
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl QueryResponse {
    /// Parse a response body, surfacing embedded InfluxDB errors.
    pub fn parse(body: &str) -> Result<Self> {
        let response: QueryResponse = serde_json::from_str(body)?;

        if let Some(message) = &response.error {
            return Err(Error::Query {
                status: 200,
                body: message.clone(),
            });
        }
        if let Some(message) = response.results.iter().find_map(|r| r.error.as_ref()) {
            return Err(Error::Query {
                status: 200,
                body: message.clone(),
            });
        }

        Ok(response)
    }

    /// All series of all statements, in response order.
    pub fn series(&self) -> impl Iterator<Item = &Series> {
        self.results.iter().flat_map(|r| r.series.iter())
    }

    /// First non-`time` column of every row.
    ///
    /// Shapes like `SELECT DISTINCT(...)` answer with `["time", "distinct"]`;
    /// this pulls out the interesting column.
    pub fn first_values(&self) -> Vec<&serde_json::Value> {
        let mut values = Vec::new();
        for series in self.series() {
            let Some(index) = series.columns.iter().position(|c| c != TIME_COLUMN) else {
                continue;
            };
            for row in &series.values {
                if let Some(v) = row.get(index) {
                    values.push(v);
                }
            }
        }
        values
    }
}

/// Parse a `time` cell into nanoseconds since the Unix epoch.
///
/// Accepts integer epochs (`epoch=ns` queries) and RFC3339 strings (the
/// server default).
pub fn parse_time(value: &serde_json::Value) -> Result<Option<u64>> {
    let invalid = || Error::TypeCoercion {
        column: TIME_COLUMN.to_string(),
        expected: "timestamp".to_string(),
        value: value.to_string(),
    };

    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(n) => n.as_u64().map(Some).ok_or_else(invalid),
        serde_json::Value::String(s) => {
            let t = DateTime::parse_from_rfc3339(s).map_err(|_| invalid())?;
            let nanos = t.timestamp_nanos_opt().ok_or_else(invalid)?;
            u64::try_from(nanos).map(Some).map_err(|_| invalid())
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_series() {
        let body = r#"{"results":[{"statement_id":0,"series":[{"name":"bench","columns":["os","score"],"values":[["linux",3.5]]}]}]}"#;
        let response = QueryResponse::parse(body).unwrap();
        let series: Vec<_> = response.series().collect();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name.as_deref(), Some("bench"));
        assert_eq!(series[0].columns, vec!["os", "score"]);
        assert_eq!(series[0].values[0][1], json!(3.5));
    }

    #[test]
    fn test_missing_series_is_empty() {
        let response = QueryResponse::parse(r#"{"results":[{"statement_id":0}]}"#).unwrap();
        assert_eq!(response.series().count(), 0);
        assert!(response.first_values().is_empty());
    }

    #[test]
    fn test_statement_error() {
        let body = r#"{"results":[{"statement_id":0,"error":"database not found: perf"}]}"#;
        match QueryResponse::parse(body).unwrap_err() {
            Error::Query { status, body } => {
                assert_eq!(status, 200);
                assert_eq!(body, "database not found: perf");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_request_error() {
        let body = r#"{"error":"error parsing query: found EOF"}"#;
        assert!(matches!(
            QueryResponse::parse(body).unwrap_err(),
            Error::Query { .. }
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            QueryResponse::parse("not json").unwrap_err(),
            Error::Json(_)
        ));
    }

    #[test]
    fn test_first_values_skips_time() {
        let body = r#"{"results":[{"series":[{"name":"benchmarks","columns":["time","distinct"],"values":[[0,"1.3.0-dev-1"],[0,"1.3.0-dev-2"]]}]}]}"#;
        let response = QueryResponse::parse(body).unwrap();
        assert_eq!(
            response.first_values(),
            vec![&json!("1.3.0-dev-1"), &json!("1.3.0-dev-2")]
        );
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time(&json!(1_500_000_000)).unwrap(), Some(1_500_000_000));
        assert_eq!(parse_time(&json!(null)).unwrap(), None);
        assert_eq!(
            parse_time(&json!("1970-01-01T00:00:01Z")).unwrap(),
            Some(1_000_000_000)
        );
        assert!(parse_time(&json!("yesterday")).is_err());
        assert!(parse_time(&json!(-1)).is_err());
    }
}
