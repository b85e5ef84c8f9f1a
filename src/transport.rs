//! The send capability used by [`Connector`](crate::Connector).
//!
//! The connector never talks HTTP itself: it renders a [`Request`] and hands
//! it to a [`Transport`]. [`HttpTransport`] is the reqwest-backed
//! implementation; tests and embedders can supply their own.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Method;

use crate::error::{Error, Result};

/// HTTP methods the connector issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestMethod {
    /// Queries.
    Get,
    /// Writes.
    Post,
    /// Unused by the connector; available to custom callers.
    Put,
}

impl From<RequestMethod> for Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
        }
    }
}

/// A single request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    /// HTTP method.
    pub method: RequestMethod,
    /// Absolute URL, query string included.
    pub url: String,
    /// Basic auth user.
    pub user: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Ask for `application/json`.
    pub accept_json: bool,
    /// Request body.
    pub body: Option<String>,
}

impl Request {
    /// Create a request with no credentials and no body.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            user: None,
            password: None,
            accept_json: false,
            body: None,
        }
    }

    /// `Authorization` header value, when both credentials are present.
    pub fn authorization(&self) -> Option<String> {
        match (&self.user, &self.password) {
            (Some(user), Some(password)) => {
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{}:{}", user, password));
                Some(format!("Basic {}", encoded))
            }
            _ => None,
        }
    }
}

/// Sends one request and resolves to the response body.
///
/// Implementations must fail with [`Error::Status`] on any non-2xx response.
/// Timeouts and retries are the implementation's business.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the response body.
    async fn send(&self, request: Request) -> Result<String>;
}

/// [`Transport`] over a `reqwest::Client`.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Create a transport with a custom reqwest client.
    ///
    /// This allows you to configure proxies, TLS settings, etc.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<String> {
        let mut builder = self.http.request(request.method.into(), &request.url);
        if let Some(auth) = request.authorization() {
            builder = builder.header("Authorization", auth);
        }
        if request.accept_json {
            builder = builder.header("Accept", "application/json");
        }
        if let Some(body) = request.body {
            builder = builder.header("Content-Type", "text/plain").body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
