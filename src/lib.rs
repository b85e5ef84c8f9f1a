//! # influxdb-measure
//!
//! Typed measurement codec and InfluxQL query builder for InfluxDB 1.x,
//! used to report performance-benchmark results and read them back.
//!
//! ## Why?
//!
//! Writing points by formatting strings by hand gets the details wrong
//! sooner or later: an integer field written without its `i` suffix, a tag
//! value with an unescaped space, a query with two `WHERE` keywords.
//! `influxdb-measure` declares the schema once and derives everything else
//! from it:
//!
//! ```
//! use influxdb_measure::{Measurement, ValueKind};
//!
//! let mut point = Measurement::builder("bench")
//!     .tag("os")
//!     .field("score", ValueKind::Float)
//!     .field("repeat", ValueKind::Int)
//!     .build()?;
//! point
//!     .set_tag("os", "linux")?
//!     .set_field("score", 3.5)?
//!     .set_field("repeat", 10i64)?;
//! assert_eq!(point.to_line_protocol(), "bench,os=linux score=3.5,repeat=10i");
//!
//! let os = point.tag("os")?;
//! let query = point.select(point.all(), Some(os.eq("linux")));
//! assert_eq!(query.render(), r#"SELECT * FROM "bench" WHERE "os"='linux'"#);
//! # Ok::<(), influxdb_measure::Error>(())
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use influxdb_measure::{Connector, ConnectorConfig, BenchmarkMeasurement};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let connector = Connector::new(ConnectorConfig::from_env()?)?;
//!
//!     let report = std::fs::read_to_string("nativeReport.json")?;
//!     let points = BenchmarkMeasurement::from_report(&report, None)?;
//!     connector.insert_all(&points).await?;
//!
//!     let builds = connector
//!         .select_values(&BenchmarkMeasurement::build_numbers_query("Linux"))
//!         .await?;
//!     println!("{:?}", builds);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed fields**: Int, Float, String and Boolean fields keep their wire
//!   form (`42i`, `4.2`, `"s"`, `true`)
//! - **Escaped tags**: spaces, commas and equals signs in tag values are
//!   escaped on encode
//! - **Query trees**: SELECT lists, aggregates, subqueries and WHERE
//!   conjunctions render from an AST, never by string surgery
//! - **Schema-driven decoding**: JSON query responses become typed points,
//!   with schema drift reported as errors instead of silently coerced
//! - **Pluggable transport**: the HTTP layer is a trait; reqwest is the default

pub mod benchmark;
pub mod client;
pub mod error;
pub mod measurement;
pub mod parser;
pub mod query;
pub mod transport;
pub mod types;
pub mod value;

// Re-export main types at crate root
pub use benchmark::{
    BenchmarkMeasurement, BuildInfo, Commit, CommitsList, GoldenResult, GoldenResultMeasurement,
};
pub use client::{Connector, ConnectorConfig};
pub use error::{Error, Result};
pub use measurement::{Measurement, MeasurementBuilder};
pub use query::{AggregateFunction, Expression, Select, WherePredicate};
pub use transport::{HttpTransport, Request, RequestMethod, Transport};
pub use types::{Column, ColumnKind, ValueKind};
pub use value::FieldValue;

// Re-export parser for advanced use cases
pub use parser::QueryResponse;
