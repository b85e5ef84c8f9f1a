//! Measurements: a named schema of Tag and Field columns plus one point's
//! worth of values.
//!
//! A measurement is declared once, either through [`MeasurementBuilder`] or
//! the `declare_*` methods, and then used two ways:
//!
//! - as a data point: assign values and encode with
//!   [`Measurement::to_line_protocol`];
//! - as a schema template: build queries against its columns and decode
//!   query responses with [`Measurement::decode`].
//!
//! ```
//! use influxdb_measure::{Measurement, ValueKind};
//!
//! let mut point = Measurement::builder("bench")
//!     .tag("os")
//!     .field("score", ValueKind::Float)
//!     .build()?;
//! point.set_tag("os", "linux")?.set_field("score", 3.5)?;
//! assert_eq!(point.to_line_protocol(), "bench,os=linux score=3.5");
//! # Ok::<(), influxdb_measure::Error>(())
//! ```

use std::collections::HashSet;

use tracing::warn;

use crate::error::{Error, Result};
use crate::parser::{QueryResponse, TIME_COLUMN, parse_time};
use crate::query::{AggregateFunction, Expression, Select, WherePredicate};
use crate::types::{Column, ValueKind};
use crate::value::FieldValue;

/// A named record of Tag and Field columns with an optional timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    name: String,
    tags: Vec<Column>,
    fields: Vec<Column>,
    timestamp: Option<u64>,
}

impl Measurement {
    /// Create a measurement with no columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            fields: Vec::new(),
            timestamp: None,
        }
    }

    /// Start declaring a measurement schema.
    pub fn builder(name: impl Into<String>) -> MeasurementBuilder {
        MeasurementBuilder {
            measurement: Measurement::new(name),
            error: None,
        }
    }

    /// Measurement name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared tags, in declaration order.
    pub fn tags(&self) -> &[Column] {
        &self.tags
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> &[Column] {
        &self.fields
    }

    /// Point timestamp in nanoseconds since the Unix epoch.
    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    /// Set the point timestamp.
    pub fn set_timestamp(&mut self, timestamp: u64) -> &mut Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Declare a Tag column.
    pub fn declare_tag(&mut self, name: impl Into<String>) -> Result<&mut Column> {
        let name = name.into();
        self.ensure_unique(&name)?;
        self.tags.push(Column::tag(name, self.name.clone()));
        let index = self.tags.len() - 1;
        Ok(&mut self.tags[index])
    }

    /// Declare a Field column of the given kind.
    pub fn declare_field(&mut self, name: impl Into<String>, kind: ValueKind) -> Result<&mut Column> {
        let name = name.into();
        self.ensure_unique(&name)?;
        self.fields.push(Column::field(name, self.name.clone(), kind));
        let index = self.fields.len() - 1;
        Ok(&mut self.fields[index])
    }

    // Tag and field names share one namespace: query responses identify
    // columns by name only.
    fn ensure_unique(&self, name: &str) -> Result<()> {
        if self.column(name).is_some() {
            return Err(Error::DuplicateColumn {
                measurement: self.name.clone(),
                column: name.to_string(),
            });
        }
        Ok(())
    }

    /// Look up any column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.tags
            .iter()
            .chain(self.fields.iter())
            .find(|c| c.name() == name)
    }

    fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.tags
            .iter_mut()
            .chain(self.fields.iter_mut())
            .find(|c| c.name() == name)
    }

    /// Look up a Tag column by name.
    pub fn tag(&self, name: &str) -> Result<&Column> {
        self.tags
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| self.unknown(name))
    }

    /// Look up a Field column by name.
    pub fn field(&self, name: &str) -> Result<&Column> {
        self.fields
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| self.unknown(name))
    }

    fn unknown(&self, column: &str) -> Error {
        Error::UnknownColumn {
            measurement: self.name.clone(),
            column: column.to_string(),
        }
    }

    /// Assign a Tag value.
    pub fn set_tag(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<&mut Self> {
        let Some(tag) = self.tags.iter_mut().find(|c| c.name() == name) else {
            return Err(self.unknown(name));
        };
        tag.set_value(value)?;
        Ok(self)
    }

    /// Assign a Field value. The value must match the declared kind.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<&mut Self> {
        let Some(field) = self.fields.iter_mut().find(|c| c.name() == name) else {
            return Err(self.unknown(name));
        };
        field.set_value(value)?;
        Ok(self)
    }

    /// Current value of a column, if declared and set.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.column(name).and_then(Column::value)
    }

    /// A copy of this schema with every value and the timestamp unset.
    pub fn instance(&self) -> Self {
        let mut point = self.clone();
        point.timestamp = None;
        for column in point.tags.iter_mut().chain(point.fields.iter_mut()) {
            column.clear();
        }
        point
    }

    /// Encode this point as one line of line protocol.
    ///
    /// Unset columns, and Float fields holding `NaN` or an infinity, are
    /// left out with a warning. A point with nothing set
    /// still encodes (to `name, `); InfluxDB rejects it, not this crate.
    pub fn to_line_protocol(&self) -> String {
        let tags = self.render_columns(&self.tags, "Tag");
        let fields = self.render_columns(&self.fields, "Field");

        let mut line = format!("{},{} {}", self.name, tags.join(","), fields.join(","));
        if let Some(timestamp) = self.timestamp {
            line.push(' ');
            line.push_str(&timestamp.to_string());
        }
        line
    }

    fn render_columns(&self, columns: &[Column], kind: &str) -> Vec<String> {
        columns
            .iter()
            .filter_map(|column| {
                let Some(value) = column.value() else {
                    warn!(
                        measurement = %self.name,
                        column = %column.name(),
                        "{} isn't initialized, skipping",
                        kind
                    );
                    return None;
                };
                if matches!(value, FieldValue::Float(f) if !f.0.is_finite()) {
                    warn!(
                        measurement = %self.name,
                        column = %column.name(),
                        value = %value,
                        "{} isn't a finite number, skipping",
                        kind
                    );
                    return None;
                }
                column.to_line_protocol()
            })
            .collect()
    }

    /// `*`
    pub fn all(&self) -> Expression {
        Expression::All
    }

    /// `DISTINCT("field")` over a declared Field.
    pub fn distinct(&self, field: &str) -> Result<Expression> {
        self.aggregate(AggregateFunction::Distinct, field)
    }

    /// Apply an aggregate function to a declared Field.
    pub fn aggregate(&self, function: AggregateFunction, field: &str) -> Result<Expression> {
        let column = self.field(field)?;
        Ok(Expression::Aggregate {
            function,
            column: column.name().to_string(),
        })
    }

    /// This measurement as a query source.
    pub fn source(&self) -> Expression {
        Expression::Measurement(self.name.clone())
    }

    /// `SELECT columns FROM "name" [WHERE filter]`
    pub fn select(&self, columns: Expression, filter: Option<WherePredicate>) -> Select {
        Select::new(columns, self.source(), filter)
    }

    /// Names of all declared columns, tags first.
    pub fn column_names(&self) -> Vec<String> {
        self.tags
            .iter()
            .chain(self.fields.iter())
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Decode a `/query` JSON response into points of this schema.
    ///
    /// Every series must carry exactly the declared columns (plus an optional
    /// `time` column, which becomes the timestamp). `null` cells leave the
    /// column unset.
    pub fn decode(&self, body: &str) -> Result<Vec<Measurement>> {
        let response = QueryResponse::parse(body)?;
        let mut points = Vec::new();

        for series in response.series() {
            let expected = self.column_names();
            let mismatch = || Error::SchemaMismatch {
                expected: expected.clone(),
                actual: series.columns.clone(),
            };

            // Resolve each response column to a declared column once.
            let mut time_index = None;
            let mut seen = HashSet::with_capacity(series.columns.len());
            let mut mapping = Vec::with_capacity(series.columns.len());
            for (index, name) in series.columns.iter().enumerate() {
                if name == TIME_COLUMN && self.column(TIME_COLUMN).is_none() {
                    if time_index.replace(index).is_some() {
                        return Err(mismatch());
                    }
                    continue;
                }
                if self.column(name).is_none() || !seen.insert(name.as_str()) {
                    return Err(mismatch());
                }
                mapping.push((index, name.as_str()));
            }
            if mapping.len() != expected.len() {
                return Err(mismatch());
            }

            for row in &series.values {
                if row.len() != series.columns.len() {
                    return Err(Error::Parse {
                        message: format!(
                            "Row has {} values, series declares {} columns",
                            row.len(),
                            series.columns.len()
                        ),
                    });
                }

                let mut point = self.instance();
                if let Some(index) = time_index {
                    point.timestamp = parse_time(&row[index])?;
                }
                for &(index, name) in &mapping {
                    let raw = &row[index];
                    if raw.is_null() {
                        continue;
                    }
                    let Some(column) = point.column_mut(name) else {
                        continue;
                    };
                    let value = if column.is_tag() {
                        FieldValue::from_json(raw).ok_or_else(|| Error::TypeCoercion {
                            column: name.to_string(),
                            expected: ValueKind::String.to_string(),
                            value: raw.to_string(),
                        })?
                    } else {
                        FieldValue::coerce(column.kind().value_kind(), raw, name)?
                    };
                    column.set_value(value)?;
                }
                points.push(point);
            }
        }

        Ok(points)
    }
}

/// Declares a measurement schema column by column.
///
/// The first declaration error is kept and returned from [`build`], so a
/// schema is either complete or rejected as a whole.
///
/// [`build`]: MeasurementBuilder::build
#[derive(Debug)]
pub struct MeasurementBuilder {
    measurement: Measurement,
    error: Option<Error>,
}

impl MeasurementBuilder {
    /// Declare a Tag column.
    pub fn tag(mut self, name: impl Into<String>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.measurement.declare_tag(name) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Declare a Field column.
    pub fn field(mut self, name: impl Into<String>, kind: ValueKind) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.measurement.declare_field(name, kind) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Finish the declaration.
    pub fn build(self) -> Result<Measurement> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.measurement),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bench() -> Measurement {
        Measurement::builder("bench")
            .tag("os")
            .field("score", ValueKind::Float)
            .build()
            .unwrap()
    }

    // =========================================================================
    // Declaration
    // =========================================================================

    #[test]
    fn test_duplicate_field_fails() {
        let err = Measurement::builder("bench")
            .field("x", ValueKind::Int)
            .field("x", ValueKind::Float)
            .build()
            .unwrap_err();
        match err {
            Error::DuplicateColumn { measurement, column } => {
                assert_eq!(measurement, "bench");
                assert_eq!(column, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_tag_fails() {
        let mut m = Measurement::new("bench");
        m.declare_tag("os").unwrap();
        assert!(matches!(
            m.declare_tag("os"),
            Err(Error::DuplicateColumn { .. })
        ));
        assert!(matches!(
            m.declare_field("os", ValueKind::String),
            Err(Error::DuplicateColumn { .. })
        ));
        assert_eq!(m.tags().len(), 1);
        assert!(m.fields().is_empty());
    }

    #[test]
    fn test_columns_know_their_measurement() {
        let m = bench();
        assert_eq!(m.tag("os").unwrap().measurement(), "bench");
        assert_eq!(m.field("score").unwrap().measurement(), "bench");
        assert!(matches!(m.tag("score"), Err(Error::UnknownColumn { .. })));
        assert!(matches!(m.field("os"), Err(Error::UnknownColumn { .. })));
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    #[test]
    fn test_float_field_example() {
        let mut m = bench();
        m.set_tag("os", "linux").unwrap().set_field("score", 3.5).unwrap();
        assert_eq!(m.to_line_protocol(), "bench,os=linux score=3.5");
    }

    #[test]
    fn test_int_field_example() {
        let mut m = Measurement::builder("bench")
            .tag("os")
            .field("repeat", ValueKind::Int)
            .build()
            .unwrap();
        m.set_tag("os", "linux").unwrap().set_field("repeat", 10i64).unwrap();
        assert_eq!(m.to_line_protocol(), "bench,os=linux repeat=10i");
    }

    #[test]
    fn test_multiple_columns_and_timestamp() {
        let mut m = Measurement::builder("bench")
            .tag("os")
            .tag("cpu")
            .field("score", ValueKind::Float)
            .field("status", ValueKind::String)
            .field("ok", ValueKind::Boolean)
            .build()
            .unwrap();
        m.set_tag("os", "mac os")
            .unwrap()
            .set_tag("cpu", "x86_64")
            .unwrap()
            .set_field("score", 1.25)
            .unwrap()
            .set_field("status", "PASSED")
            .unwrap()
            .set_field("ok", true)
            .unwrap()
            .set_timestamp(1_600_000_000_000_000_000);
        assert_eq!(
            m.to_line_protocol(),
            r#"bench,os=mac\ os,cpu=x86_64 score=1.25,status="PASSED",ok=true 1600000000000000000"#
        );
    }

    #[test]
    fn test_unset_columns_are_skipped() {
        let mut m = Measurement::builder("bench")
            .tag("os")
            .tag("cpu")
            .field("score", ValueKind::Float)
            .field("repeat", ValueKind::Int)
            .build()
            .unwrap();
        m.set_tag("cpu", "arm").unwrap().set_field("repeat", 3i64).unwrap();
        assert_eq!(m.to_line_protocol(), "bench,cpu=arm repeat=3i");
    }

    #[test]
    fn test_all_unset_encodes_to_name_and_separators() {
        assert_eq!(bench().to_line_protocol(), "bench, ");
    }

    #[test]
    fn test_non_finite_floats_are_skipped() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut m = bench();
            m.set_tag("os", "linux").unwrap().set_field("score", value).unwrap();
            assert_eq!(m.to_line_protocol(), "bench,os=linux ");
        }
    }

    #[test]
    fn test_tag_before_first_space_field_after() {
        let mut m = bench();
        m.set_tag("os", "a,b c=d").unwrap().set_field("score", 2.0).unwrap();
        let line = m.to_line_protocol();

        // First space not preceded by a backslash.
        let bytes = line.as_bytes();
        let split = (0..bytes.len())
            .find(|&i| bytes[i] == b' ' && (i == 0 || bytes[i - 1] != b'\\'))
            .unwrap();
        let (head, tail) = line.split_at(split);
        assert_eq!(head.matches("os=").count(), 1);
        assert_eq!(tail.matches("score=").count(), 1);
        assert_eq!(line, r"bench,os=a\,b\ c\=d score=2");
    }

    #[test]
    fn test_set_field_kind_mismatch() {
        let mut m = bench();
        assert!(matches!(
            m.set_field("score", 3i64),
            Err(Error::KindMismatch { .. })
        ));
        assert!(matches!(
            m.set_field("missing", 3.0),
            Err(Error::UnknownColumn { .. })
        ));
        assert!(matches!(
            m.set_tag("score", "linux"),
            Err(Error::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_instance_clears_values() {
        let mut m = bench();
        m.set_tag("os", "linux").unwrap().set_timestamp(5);
        let fresh = m.instance();
        assert_eq!(fresh.get("os"), None);
        assert_eq!(fresh.timestamp(), None);
        assert_eq!(fresh.column_names(), vec!["os", "score"]);
    }

    // =========================================================================
    // Query building
    // =========================================================================

    #[test]
    fn test_select_all() {
        let m = bench();
        assert_eq!(m.select(m.all(), None).render(), r#"SELECT * FROM "bench""#);
    }

    #[test]
    fn test_select_with_filters() {
        let m = bench();
        let filter = m.tag("os").unwrap().eq("linux").and(m.field("score").unwrap().eq(3.5));
        assert_eq!(
            m.select(m.all(), Some(filter)).render(),
            r#"SELECT * FROM "bench" WHERE "os"='linux' AND "score"='3.5'"#
        );
    }

    #[test]
    fn test_distinct_requires_field() {
        let m = bench();
        assert_eq!(m.distinct("score").unwrap().render(), r#"DISTINCT("score")"#);
        assert!(matches!(m.distinct("os"), Err(Error::UnknownColumn { .. })));
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    #[test]
    fn test_decode_example() {
        let body = r#"{"results":[{"series":[{"columns":["os","score"],"values":[["linux",3.5]]}]}]}"#;
        let points = bench().decode(body).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].get("os"), Some(&FieldValue::from("linux")));
        assert_eq!(points[0].get("score"), Some(&FieldValue::from(3.5)));
        assert_eq!(points[0].timestamp(), None);
    }

    #[test]
    fn test_decode_with_time_and_reordered_columns() {
        let body = r#"{"results":[{"series":[{"name":"bench","columns":["time","score","os"],"values":[[10,1.5,"linux"],[20,null,"mac"]]}]}]}"#;
        let points = bench().decode(body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp(), Some(10));
        assert_eq!(points[0].get("score"), Some(&FieldValue::from(1.5)));
        assert_eq!(points[1].get("os"), Some(&FieldValue::from("mac")));
        assert_eq!(points[1].get("score"), None);
    }

    #[test]
    fn test_decode_no_series() {
        let points = bench()
            .decode(r#"{"results":[{"statement_id":0}]}"#)
            .unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_decode_column_count_mismatch() {
        let body = r#"{"results":[{"series":[{"columns":["os"],"values":[["linux"]]}]}]}"#;
        match bench().decode(body).unwrap_err() {
            Error::SchemaMismatch { expected, actual } => {
                assert_eq!(expected, vec!["os", "score"]);
                assert_eq!(actual, vec!["os"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_unknown_column() {
        let body = r#"{"results":[{"series":[{"columns":["os","speed"],"values":[["linux",1]]}]}]}"#;
        assert!(matches!(
            bench().decode(body),
            Err(Error::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_repeated_column() {
        let body = r#"{"results":[{"series":[{"columns":["os","os"],"values":[["linux","mac"]]}]}]}"#;
        assert!(matches!(
            bench().decode(body),
            Err(Error::SchemaMismatch { .. })
        ));

        let body = r#"{"results":[{"series":[{"columns":["time","os","score","time"],"values":[[1,"linux",1.0,2]]}]}]}"#;
        assert!(matches!(
            bench().decode(body),
            Err(Error::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_int_out_of_range() {
        let m = Measurement::builder("bench")
            .tag("os")
            .field("repeat", ValueKind::Int)
            .build()
            .unwrap();
        let body = r#"{"results":[{"series":[{"columns":["os","repeat"],"values":[["linux",9223372036854775808]]}]}]}"#;
        assert!(matches!(
            m.decode(body),
            Err(Error::TypeCoercion { .. })
        ));
    }

    #[test]
    fn test_decode_type_coercion_error() {
        let m = Measurement::builder("bench")
            .tag("os")
            .field("repeat", ValueKind::Int)
            .build()
            .unwrap();
        let body = r#"{"results":[{"series":[{"columns":["os","repeat"],"values":[["linux","ten"]]}]}]}"#;
        assert!(matches!(
            m.decode(body),
            Err(Error::TypeCoercion { .. })
        ));
    }

    #[test]
    fn test_decode_numeric_tag_is_stringified() {
        let body = r#"{"results":[{"series":[{"columns":["os","score"],"values":[[42,1.0]]}]}]}"#;
        let points = bench().decode(body).unwrap();
        assert_eq!(points[0].get("os"), Some(&FieldValue::from("42")));
    }

    #[test]
    fn test_decoded_points_encode_like_originals() {
        let mut original = Measurement::builder("bench")
            .tag("os")
            .field("score", ValueKind::Float)
            .field("repeat", ValueKind::Int)
            .field("ok", ValueKind::Boolean)
            .build()
            .unwrap();
        original
            .set_tag("os", "linux")
            .unwrap()
            .set_field("score", 0.5)
            .unwrap()
            .set_field("repeat", 7i64)
            .unwrap()
            .set_field("ok", false)
            .unwrap();

        let body = r#"{"results":[{"series":[{"columns":["os","score","repeat","ok"],"values":[["linux",0.5,7,false]]}]}]}"#;
        let decoded = original.instance().decode(body).unwrap();
        assert_eq!(decoded, vec![original.clone()]);
        assert_eq!(decoded[0].to_line_protocol(), original.to_line_protocol());
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Encode `point` and return the lines logged at WARN while doing so.
    fn encode_capturing_warnings(point: &Measurement) -> (String, Vec<String>) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();

        let line = tracing::subscriber::with_default(subscriber, || point.to_line_protocol());
        let logged = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        (line, logged.lines().map(str::to_string).collect())
    }

    #[test]
    fn test_unset_column_is_logged() {
        let mut m = bench();
        m.set_field("score", 1.5).unwrap();

        let (line, warnings) = encode_capturing_warnings(&m);
        assert_eq!(line, "bench, score=1.5");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Tag isn't initialized, skipping"));
        assert!(warnings[0].contains("column=os"));
    }

    #[test]
    fn test_every_unset_column_is_logged() {
        let (line, warnings) = encode_capturing_warnings(&bench());
        assert_eq!(line, "bench, ");
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Tag isn't initialized") && warnings[0].contains("column=os"));
        assert!(warnings[1].contains("Field isn't initialized") && warnings[1].contains("column=score"));
    }

    #[test]
    fn test_non_finite_float_is_logged() {
        let mut m = bench();
        m.set_tag("os", "linux").unwrap().set_field("score", f64::NAN).unwrap();

        let (_, warnings) = encode_capturing_warnings(&m);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Field isn't a finite number, skipping"));
        assert!(warnings[0].contains("value=NaN"));
    }

    #[test]
    fn test_complete_point_logs_nothing() {
        let mut m = bench();
        m.set_tag("os", "linux").unwrap().set_field("score", 3.5).unwrap();

        let (_, warnings) = encode_capturing_warnings(&m);
        assert!(warnings.is_empty());
    }
}
