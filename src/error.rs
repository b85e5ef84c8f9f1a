//! Error types for influxdb-measure.

use thiserror::Error;

/// Error type for influxdb-measure operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A Field or Tag with this name was already declared on the measurement.
    #[error("Column '{column}' already exists in measurement '{measurement}'")]
    DuplicateColumn {
        /// Measurement being declared.
        measurement: String,
        /// Offending column name.
        column: String,
    },

    /// The measurement has no column with this name (or not of the requested kind).
    #[error("No column '{column}' in measurement '{measurement}'")]
    UnknownColumn {
        /// Measurement that was searched.
        measurement: String,
        /// Requested column name.
        column: String,
    },

    /// A value of the wrong variant was assigned to a typed Field.
    #[error("Column '{column}' expects {expected} value, got {actual}")]
    KindMismatch {
        /// Column being assigned.
        column: String,
        /// Declared value kind.
        expected: String,
        /// Kind of the rejected value.
        actual: String,
    },

    /// Query response columns disagree with the declared schema.
    #[error("Schema mismatch: expected columns {expected:?}, got {actual:?}")]
    SchemaMismatch {
        /// Columns declared by the measurement.
        expected: Vec<String>,
        /// Columns present in the response.
        actual: Vec<String>,
    },

    /// A response literal cannot be coerced into the column's value kind.
    #[error("Cannot coerce {value} into {expected} for column '{column}'")]
    TypeCoercion {
        /// Column being decoded.
        column: String,
        /// Declared value kind.
        expected: String,
        /// Offending JSON literal.
        value: String,
    },

    /// Write request was rejected by InfluxDB.
    #[error("Write failed with status {status}: {body}")]
    Write {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Query request was rejected by InfluxDB.
    #[error("Query failed with status {status}: {body}")]
    Query {
        /// HTTP status code.
        status: u16,
        /// Response body or InfluxDB error message.
        body: String,
    },

    /// Non-2xx response reported by a transport.
    #[error("Request failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Connection parameters were never supplied.
    #[error("Not connected: {0}")]
    NotConnected(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse a JSON response.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse a value or configuration entry.
    #[error("Failed to parse value: {message}")]
    Parse {
        /// Description of what failed to parse.
        message: String,
    },
}

/// Result type alias for influxdb-measure operations.
pub type Result<T> = std::result::Result<T, Error>;
