//! The API client and its request pipeline.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{Auth, Credentials};
use crate::error::{Error, ErrorKind, Result};
use crate::http_client::{
    HttpParams, HttpRequest, HttpTransport, ReqwestTransport, encode_query, merge_params,
    uses_query,
};
use crate::services::{AccountService, RecordService, ZoneService};
use crate::utils::log_sanitizer::{redact_params, truncate_for_log};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudns.net";
/// User agent sent unless overridden.
pub const DEFAULT_USER_AGENT: &str = "cloudns-client";

/// Status value the API uses to signal a failed call.
const STATUS_FAILED: &str = "Failed";

/// Client for the ClouDNS HTTP API.
///
/// Cheap to clone; clones share configuration and transport. Operations are
/// grouped into [`account`](Self::account), [`zones`](Self::zones) and
/// [`records`](Self::records).
///
/// Dropping the future of an operation cancels the in-flight request.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: String,
    user_agent: String,
    auth: Auth,
    headers: HeaderMap,
    params: HttpParams,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .field("user_agent", &self.inner.user_agent)
            .field("auth", &self.inner.auth)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Starts configuring a new client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Account operations.
    pub fn account(&self) -> AccountService<'_> {
        AccountService::new(self)
    }

    /// Zone operations.
    pub fn zones(&self) -> ZoneService<'_> {
        ZoneService::new(self)
    }

    /// Record operations.
    pub fn records(&self) -> RecordService<'_> {
        RecordService::new(self)
    }

    /// The configured credentials.
    pub fn auth(&self) -> &Auth {
        &self.inner.auth
    }

    /// Base URL every endpoint path is appended to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Calls `endpoint` and decodes the response body into `T`.
    ///
    /// Parameters are merged from the client defaults, the credentials and
    /// `params`, in that order of precedence. `headers` override the client
    /// headers.
    pub async fn request<T>(
        &self,
        method: Method,
        endpoint: &str,
        params: HttpParams,
        headers: Option<&HeaderMap>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = self.build_request(method, endpoint, &params, headers)?;
        let body = self.execute(request).await?;
        decode(&body)
    }

    /// `POST` shorthand used by the services.
    pub(crate) async fn post<T>(&self, endpoint: &str, params: HttpParams) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.request(Method::POST, endpoint, params, None).await
    }

    /// Build the outgoing request without sending it.
    pub(crate) fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        params: &HttpParams,
        headers: Option<&HeaderMap>,
    ) -> Result<HttpRequest> {
        let inner = &self.inner;

        let mut merged_headers = inner.headers.clone();
        if let Some(headers) = headers {
            for (name, value) in headers {
                merged_headers.insert(name.clone(), value.clone());
            }
        }
        merged_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        merged_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&inner.user_agent).map_err(|e| ErrorKind::HttpRequest.wrap(e))?,
        );

        let auth_params = inner.auth.params();
        let merged = merge_params([&inner.params, &auth_params, params]);
        log::debug!("{method} {endpoint} params={}", redact_params(&merged));

        let mut url = format!("{}{endpoint}", inner.base_url);
        let body = if uses_query(&method) {
            let query = encode_query(&merged);
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
            None
        } else {
            merged_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Some(serde_json::to_string(&merged).map_err(|e| ErrorKind::HttpRequest.wrap(e))?)
        };

        Ok(HttpRequest {
            method,
            url,
            headers: merged_headers,
            body,
        })
    }

    /// Send a request and return the body once it passed the status check.
    async fn execute(&self, request: HttpRequest) -> Result<String> {
        let method = request.method.clone();
        let endpoint = request
            .url
            .strip_prefix(&self.inner.base_url)
            .unwrap_or(&request.url)
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string();

        let response = self.inner.transport.send(request).await.inspect_err(|e| {
            log::error!("{method} {endpoint} failed: {e}");
        })?;

        log::debug!("{method} {endpoint} Response Status: {}", response.status);
        log::debug!("Response Body: {}", truncate_for_log(&response.body));

        check_status(&response.body, self.inner.auth.is_none())?;
        Ok(response.body)
    }
}

#[derive(Deserialize)]
struct StatusEnvelope {
    #[serde(default)]
    status: Value,
    #[serde(default, rename = "statusDescription")]
    status_description: Option<String>,
    #[serde(default, rename = "statusMessage")]
    status_message: Option<String>,
}

/// Turn a `status: "Failed"` envelope into an [`ErrorKind::ApiInvocation`] error.
///
/// Bodies that are not JSON objects are left to the caller's decoder.
pub(crate) fn check_status(body: &str, without_credentials: bool) -> Result<()> {
    // JSON whitespace per RFC 8259
    let trimmed = body.trim_start_matches([' ', '\t', '\r', '\n']);
    if !trimmed.starts_with('{') {
        return Ok(());
    }

    let envelope: StatusEnvelope =
        serde_json::from_str(trimmed).map_err(|e| ErrorKind::ApiInvocation.wrap(e))?;
    if envelope.status.as_str() != Some(STATUS_FAILED) {
        return Ok(());
    }

    let message = envelope
        .status_description
        .filter(|s| !s.is_empty())
        .or_else(|| envelope.status_message.filter(|s| !s.is_empty()))
        .unwrap_or_else(|| body.to_string());
    log::warn!("API reported failure: {message}");

    Err(classify_failure(message, without_credentials))
}

/// Wrap a provider failure message, adding the kind it implies.
fn classify_failure(message: String, without_credentials: bool) -> Error {
    let lowered = message.to_lowercase();
    if without_credentials {
        ErrorKind::ApiInvocation.wrap(ErrorKind::MissingCredentials.wrap(message))
    } else if lowered.contains("privilege") || lowered.contains("permission") {
        ErrorKind::ApiInvocation.wrap(ErrorKind::InsufficientPrivileges.wrap(message))
    } else {
        ErrorKind::ApiInvocation.wrap(message)
    }
}

/// Decode a successful response body.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        log::error!("JSON parse failed: {e}");
        log::error!("Raw response: {}", truncate_for_log(body));
        ErrorKind::HttpRequest.wrap(e)
    })
}

/// Configures and builds a [`Client`].
///
/// Option errors are collected and reported by [`build`](Self::build) as
/// [`ErrorKind::InvalidOptions`] wrapping the first failure.
///
/// ```rust,no_run
/// # async fn example() -> cloudns_client::Result<()> {
/// let client = cloudns_client::Client::builder()
///     .auth_user_id(1234, "secret")
///     .user_agent("my-app/1.0")
///     .build()?;
/// let zones = client.zones().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    auth: Auth,
    headers: HeaderMap,
    params: HttpParams,
    transport: Option<Arc<dyn HttpTransport>>,
    error: Option<Error>,
}

impl ClientBuilder {
    fn fail(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Override the API base URL. A trailing `/` is removed.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Add a header to every request. Request-specific headers override it.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        let name = HeaderName::from_bytes(name.as_bytes());
        let value = HeaderValue::from_str(value);
        match (name, value) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            (Err(e), _) => self.fail(ErrorKind::IllegalArgument.wrap(e)),
            (_, Err(e)) => self.fail(ErrorKind::IllegalArgument.wrap(e)),
        }
        self
    }

    /// Add a set of headers to every request.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        for (name, value) in &headers {
            self.headers.insert(name.clone(), value.clone());
        }
        self
    }

    /// Add a parameter to every request.
    ///
    /// Credentials and call-specific parameters override it.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a set of parameters to every request.
    #[must_use]
    pub fn params(mut self, params: HttpParams) -> Self {
        self.params.extend(params);
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Send requests through a custom transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Configure credentials. Only one set may be configured.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        if let Err(e) = self.auth.set(credentials) {
            self.fail(e);
        }
        self
    }

    /// Authenticate as the main account user.
    #[must_use]
    pub fn auth_user_id(self, id: u64, password: impl Into<String>) -> Self {
        self.credentials(Credentials::UserId {
            id,
            password: password.into(),
        })
    }

    /// Authenticate as a sub-user identified by id.
    #[must_use]
    pub fn auth_sub_user_id(self, id: u64, password: impl Into<String>) -> Self {
        self.credentials(Credentials::SubUserId {
            id,
            password: password.into(),
        })
    }

    /// Authenticate as a sub-user identified by name.
    #[must_use]
    pub fn auth_sub_user_name(self, name: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials(Credentials::SubUserName {
            name: name.into(),
            password: password.into(),
        })
    }

    /// Validate the options and build the client.
    pub fn build(self) -> Result<Client> {
        if let Some(err) = self.error {
            return Err(ErrorKind::InvalidOptions.wrap(err));
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = reqwest::Url::parse(&base_url).map_err(|e| {
            ErrorKind::InvalidOptions.wrap(ErrorKind::IllegalArgument.wrap(format!(
                "base url {base_url:?}: {e}"
            )))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ErrorKind::InvalidOptions.wrap(ErrorKind::IllegalArgument.wrap(
                format!("base url {base_url:?} must use http or https"),
            )));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        if let Err(e) = HeaderValue::from_str(&user_agent) {
            return Err(ErrorKind::InvalidOptions.wrap(ErrorKind::IllegalArgument.wrap(e)));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::new().map_err(|e| ErrorKind::InvalidOptions.wrap(e))?,
            ),
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                base_url,
                user_agent,
                auth: self.auth,
                headers: self.headers,
                params: self.params,
                transport,
            }),
        })
    }
}
