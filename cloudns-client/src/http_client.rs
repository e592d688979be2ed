//! HTTP transport
//!
//! The client turns every API call into an [`HttpRequest`] and hands it to an
//! [`HttpTransport`]. [`ReqwestTransport`] is the default; tests and callers
//! that need to intercept traffic can plug in their own implementation.
//!
//! Also hosts the parameter encoding shared by all requests: merged
//! parameters go to the query string for `HEAD`/`GET`/`DELETE` and to a JSON
//! body for every other method.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde_json::Value;

use crate::error::{ErrorKind, Result};

/// Request parameters, keyed by their API name.
///
/// Ordered so that query strings and bodies are deterministic.
pub type HttpParams = BTreeMap<String, Value>;

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// A fully prepared request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including the query string, if any.
    pub url: String,
    /// Headers to send.
    pub headers: HeaderMap,
    /// JSON body, for methods that carry one.
    pub body: Option<String>,
}

/// The raw response of a request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// Sends prepared requests.
///
/// Implementations report connection and I/O failures as
/// [`ErrorKind::HttpRequest`]. HTTP status codes are not errors at this level;
/// ClouDNS signals failures in the body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and read the full response body.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`HttpTransport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default connect and request timeouts.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ErrorKind::HttpRequest.wrap(e))?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client (custom proxy, TLS, timeouts, ...).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                log::warn!("Request timed out: {e}");
            }
            ErrorKind::HttpRequest.wrap(e)
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ErrorKind::HttpRequest.wrap(e))?;

        Ok(HttpResponse { status, body })
    }
}

/// Whether `method` carries its parameters in the query string.
pub(crate) fn uses_query(method: &Method) -> bool {
    matches!(*method, Method::HEAD | Method::GET | Method::DELETE)
}

/// Merge parameter sources; later sources win on key collisions.
pub(crate) fn merge_params<'a>(sources: impl IntoIterator<Item = &'a HttpParams>) -> HttpParams {
    let mut merged = HttpParams::new();
    for source in sources {
        merged.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

/// Stringify a parameter value for a query string.
///
/// Booleans become `1`/`0` like everywhere else in the API.
fn query_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => u8::from(*b).to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Encode parameters as a query string (without the leading `?`).
///
/// Arrays are sent as repeated `key[]` entries.
pub(crate) fn encode_query(params: &HttpParams) -> String {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        if let Value::Array(items) = value {
            let key = format!("{key}[]");
            for item in items {
                pairs.push(format!(
                    "{}={}",
                    urlencoding::encode(&key),
                    urlencoding::encode(&query_value(item))
                ));
            }
        } else {
            pairs.push(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&query_value(value))
            ));
        }
    }
    pairs.join("&")
}
