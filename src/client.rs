//! InfluxDB 1.x connector.
//!
//! This module provides the `Connector` type, which writes measurements as
//! line protocol and reads them back through InfluxQL queries.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::measurement::Measurement;
use crate::parser::QueryResponse;
use crate::query::Select;
use crate::transport::{HttpTransport, Request, RequestMethod, Transport};
use crate::value::FieldValue;

/// Connection parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ConnectorConfig {
    /// Server address including scheme, e.g. `http://localhost`.
    #[serde(default)]
    pub host: String,

    /// Database name.
    #[serde(default)]
    pub database: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Request timeout used by the default HTTP transport.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    8086
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            database: String::new(),
            port: default_port(),
            user: None,
            password: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ConnectorConfig {
    /// Configuration for `database` on `host` with the default port.
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Override the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Use HTTP basic authentication.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Read `INFLUXDB_HOST`, `INFLUXDB_DATABASE`, `INFLUXDB_PORT`,
    /// `INFLUXDB_USER` and `INFLUXDB_PASSWORD`.
    ///
    /// Missing host or database are left empty; operations on a connector
    /// built from such a config fail with [`Error::NotConnected`].
    pub fn from_env() -> Result<Self> {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        let mut config = Self {
            host: var("INFLUXDB_HOST").unwrap_or_default(),
            database: var("INFLUXDB_DATABASE").unwrap_or_default(),
            user: var("INFLUXDB_USER"),
            password: var("INFLUXDB_PASSWORD"),
            ..Self::default()
        };
        if let Some(port) = var("INFLUXDB_PORT") {
            config.port = port.parse().map_err(|e| Error::Parse {
                message: format!("Invalid INFLUXDB_PORT '{}': {}", port, e),
            })?;
        }
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::NotConnected("host is not set".to_string()));
        }
        if self.database.is_empty() {
            return Err(Error::NotConnected("database is not set".to_string()));
        }
        Ok(())
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        self.check()?;
        let base = format!("{}:{}/{}", self.host.trim_end_matches('/'), self.port, path);
        let mut pairs = vec![("db", self.database.as_str())];
        pairs.extend_from_slice(params);
        let url = Url::parse_with_params(&base, &pairs).map_err(|e| Error::Parse {
            message: format!("Invalid InfluxDB URL '{}': {}", base, e),
        })?;
        // "localhost:8086/write" parses as a URL with scheme "localhost".
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Parse {
                message: format!("InfluxDB host must start with http:// or https://: {}", self.host),
            });
        }
        Ok(url)
    }
}

/// InfluxDB 1.x connector.
///
/// The configuration is fixed at construction; clone the connector to share
/// it between tasks.
///
/// # Example
///
/// ```ignore
/// use influxdb_measure::{Connector, ConnectorConfig, Measurement, ValueKind};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let connector = Connector::new(ConnectorConfig::new("http://localhost", "perf"))?;
///
///     let mut point = Measurement::builder("bench")
///         .tag("os")
///         .field("score", ValueKind::Float)
///         .build()?;
///     point.set_tag("os", "linux")?.set_field("score", 3.5)?;
///     connector.insert(&point).await?;
///
///     let query = point.select(point.all(), None);
///     for row in connector.select(&point, &query).await? {
///         println!("{}", row.to_line_protocol());
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Connector {
    config: ConnectorConfig,
    transport: Arc<dyn Transport>,
}

impl Connector {
    /// Create a connector sending over HTTP.
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a connector with a custom send capability.
    pub fn with_transport(config: ConnectorConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Get the connection parameters.
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    fn request(&self, method: RequestMethod, url: Url) -> Request {
        Request {
            user: self.config.user.clone(),
            password: self.config.password.clone(),
            ..Request::new(method, url.to_string())
        }
    }

    /// Write a single point.
    pub async fn insert(&self, point: &Measurement) -> Result<String> {
        self.insert_all(std::iter::once(point)).await
    }

    /// Write a batch of points, one line each.
    ///
    /// An empty batch is not sent.
    pub async fn insert_all<'a, I>(&self, points: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a Measurement>,
    {
        let lines: Vec<String> = points.into_iter().map(Measurement::to_line_protocol).collect();
        if lines.is_empty() {
            return Ok(String::new());
        }

        let url = self.config.endpoint("write", &[])?;
        debug!(url = %url, points = lines.len(), "Writing points");

        let mut request = self.request(RequestMethod::Post, url);
        request.body = Some(lines.join("\n"));

        self.transport.send(request).await.map_err(|e| match e {
            Error::Status { status, body } => Error::Write { status, body },
            other => other,
        })
    }

    /// Run a raw InfluxQL query and return the JSON body.
    pub async fn query(&self, query: &str) -> Result<String> {
        let url = self.config.endpoint("query", &[("q", query)])?;
        debug!(query, "Sending query");

        let mut request = self.request(RequestMethod::Get, url);
        request.accept_json = true;

        self.transport.send(request).await.map_err(|e| match e {
            Error::Status { status, body } => Error::Query { status, body },
            other => other,
        })
    }

    /// Run `query` and decode every row into a point of `schema`.
    pub async fn select(&self, schema: &Measurement, query: &Select) -> Result<Vec<Measurement>> {
        let body = self.query(&query.render()).await?;
        schema.decode(&body)
    }

    /// Run `query` and return the first non-`time` column of every row.
    ///
    /// Meant for single-column queries such as `SELECT DISTINCT(...)`.
    /// Rows holding `null` or non-scalar values are skipped.
    pub async fn select_values(&self, query: &Select) -> Result<Vec<FieldValue>> {
        let body = self.query(&query.render()).await?;
        let response = QueryResponse::parse(&body)?;
        Ok(response
            .first_values()
            .into_iter()
            .filter_map(FieldValue::from_json)
            .collect())
    }
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("host", &self.config.host)
            .field("database", &self.config.database)
            .field("port", &self.config.port)
            .finish_non_exhaustive()
    }
}
