//! HTTP session and request dispatch.
//!
//! [`RestSession`] owns one reqwest client (with its cookie jar), the
//! normalized server URL, and the default header set including the
//! credential. Every endpoint binding funnels through [`RestSession::dispatch`]
//! with a [`RequestSpec`] describing the call as plain data, so error
//! classification and response decoding live in exactly one place.

mod decode;

pub use decode::check_embedded_status;

use crate::auth::Credential;
use crate::config::ThoughtSpotConfig;
use crate::errors::{ApiError, ThoughtSpotError, ThoughtSpotResult};
use bytes::Bytes;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// DELETE request.
    Delete,
}

impl HttpMethod {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// How the response body should be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expect {
    /// Parse the body as JSON; empty bodies (204) decode to
    /// [`ResponsePayload::Empty`].
    #[default]
    Json,
    /// Return the body as text.
    Text,
    /// Return the body byte-for-byte.
    Bytes,
}

/// Request body variants.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body.
    None,
    /// JSON body.
    Json(Value),
    /// URL-encoded form fields.
    Form(Vec<(String, String)>),
    /// Multipart form-data fields.
    Multipart(Vec<MultipartField>),
}

/// One field of a multipart request, described as plain data.
#[derive(Debug, Clone)]
pub struct MultipartField {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: String,
    /// File name, for file-like fields.
    pub filename: Option<String>,
    /// Content type, for file-like fields.
    pub content_type: Option<String>,
}

impl MultipartField {
    /// Plain text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            filename: None,
            content_type: None,
        }
    }

    /// File-like field with a filename and content type.
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            filename: Some(filename.into()),
            content_type: Some(content_type.into()),
        }
    }
}

/// One request, described as plain data and discarded after use.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the server root (no leading slash needed).
    pub path: String,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
    /// Response decoding mode.
    pub expect: Expect,
    /// `Accept` header override. When absent the header is derived from
    /// `expect` (the TML endpoints want `text/plain` yet answer JSON).
    pub accept: Option<String>,
    /// Per-request timeout override.
    pub timeout: Option<Duration>,
}

impl RequestSpec {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::None,
            expect: Expect::Json,
            accept: None,
            timeout: None,
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends a query parameter when the value is present.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Sets a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Sets a form-encoded body.
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    /// Sets a multipart body.
    pub fn multipart(mut self, fields: Vec<MultipartField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    /// Sets the response decoding mode.
    pub fn expect(mut self, expect: Expect) -> Self {
        self.expect = expect;
        self
    }

    /// Overrides the `Accept` header.
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Decoded response, tagged by what the binding expected.
#[derive(Debug, Clone)]
pub enum ResponsePayload {
    /// Parsed JSON value (object or list).
    Json(Value),
    /// Text body.
    Text(String),
    /// Raw bytes.
    Bytes(Bytes),
    /// Empty body (204, or a 200 with no content).
    Empty,
}

impl ResponsePayload {
    /// Extracts the JSON value; an empty body becomes `Value::Null`.
    pub fn into_json(self) -> ThoughtSpotResult<Value> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Empty => Ok(Value::Null),
            other => Err(ThoughtSpotError::decode(format!(
                "expected a JSON body, got {}",
                other.kind()
            ))),
        }
    }

    /// Extracts the text body.
    pub fn into_text(self) -> ThoughtSpotResult<String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Empty => Ok(String::new()),
            other => Err(ThoughtSpotError::decode(format!(
                "expected a text body, got {}",
                other.kind()
            ))),
        }
    }

    /// Extracts the raw bytes.
    pub fn into_bytes(self) -> ThoughtSpotResult<Bytes> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            Self::Empty => Ok(Bytes::new()),
            other => Err(ThoughtSpotError::decode(format!(
                "expected a binary body, got {}",
                other.kind()
            ))),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Empty => "empty",
        }
    }
}

/// One persistent HTTP session against one deployment.
///
/// Holds the cookie jar, the normalized server URL, and the default header
/// set. The only mutable state is the credential/header pair, changed by
/// [`RestSession::install_credential`]; every dispatch is otherwise
/// independent. A session is not meant to serve multiple identities at
/// once — construct one client per identity or org context.
pub struct RestSession {
    http: Client,
    server_url: String,
    headers: RwLock<HeaderMap>,
    credential: RwLock<Option<Credential>>,
}

impl RestSession {
    /// Builds a session from a validated configuration.
    pub fn new(config: &ThoughtSpotConfig) -> ThoughtSpotResult<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .cookie_store(true)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool.max_idle_per_host)
            .pool_idle_timeout(config.pool.idle_timeout);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(keepalive) = config.tcp_keepalive {
            builder = builder.tcp_keepalive(keepalive);
        }
        let http = builder
            .build()
            .map_err(|e| ThoughtSpotError::config(format!("failed to build HTTP client: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Requested-By",
            HeaderValue::from_str(&config.requested_by)
                .map_err(|_| ThoughtSpotError::config("X-Requested-By value is not a valid header"))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(ref language) = config.accept_language {
            headers.insert(
                ACCEPT_LANGUAGE,
                HeaderValue::from_str(language)
                    .map_err(|_| ThoughtSpotError::config("Accept-Language value is not a valid header"))?,
            );
        }

        Ok(Self {
            http,
            server_url: config.server_url.trim_end_matches('/').to_string(),
            headers: RwLock::new(headers),
            credential: RwLock::new(None),
        })
    }

    /// The normalized server root URL (no trailing slash).
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Installs a credential. A bearer credential merges an
    /// `Authorization` header into the default header set so it applies to
    /// every subsequent call; a cookie credential leaves header state
    /// untouched and relies on the jar.
    pub fn install_credential(&self, credential: Credential) -> ThoughtSpotResult<()> {
        if let Some(value) = credential.authorization_value() {
            let header = HeaderValue::from_str(&value)
                .map_err(|_| ThoughtSpotError::config("bearer token is not a valid header value"))?;
            self.headers.write().insert(AUTHORIZATION, header);
        }
        *self.credential.write() = Some(credential);
        Ok(())
    }

    /// Drops the current credential and its `Authorization` header. Cookies
    /// already in the jar are only invalidated by a logout call server-side.
    pub fn clear_credential(&self) {
        self.headers.write().remove(AUTHORIZATION);
        *self.credential.write() = None;
    }

    /// The currently installed credential, if any.
    pub fn credential(&self) -> Option<Credential> {
        self.credential.read().clone()
    }

    /// Sends one request and decodes the response.
    ///
    /// Failure surface is uniform for every binding: transport failures
    /// become [`ThoughtSpotError::Transport`], any status outside 2xx
    /// becomes [`ThoughtSpotError::Api`] with the raw body attached, and a
    /// body that does not match the expected content type becomes
    /// [`ThoughtSpotError::Decode`]. No retries.
    pub async fn dispatch(&self, spec: RequestSpec) -> ThoughtSpotResult<ResponsePayload> {
        let url = format!("{}/{}", self.server_url, spec.path.trim_start_matches('/'));
        debug!(method = ?spec.method, %url, "dispatching request");

        // Clone the default headers and override Accept in place, so the
        // request carries exactly one Accept value.
        let mut headers = self.headers.read().clone();
        let accept = spec.accept.as_deref().unwrap_or(match spec.expect {
            Expect::Json => "application/json",
            Expect::Text => "text/plain",
            Expect::Bytes => "application/octet-stream",
        });
        let accept = HeaderValue::from_str(accept)
            .map_err(|_| ThoughtSpotError::config("Accept override is not a valid header"))?;
        headers.insert(ACCEPT, accept);

        let mut request = self
            .http
            .request(spec.method.as_reqwest(), &url)
            .headers(headers);

        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }

        request = match spec.body {
            RequestBody::None => request,
            RequestBody::Json(ref body) => request.json(body),
            RequestBody::Form(ref fields) => request.form(fields),
            RequestBody::Multipart(fields) => {
                let mut form = reqwest::multipart::Form::new();
                for field in fields {
                    let mut part = reqwest::multipart::Part::text(field.value);
                    if let Some(filename) = field.filename {
                        part = part.file_name(filename);
                    }
                    if let Some(content_type) = field.content_type {
                        part = part.mime_str(&content_type).map_err(|e| {
                            ThoughtSpotError::config(format!(
                                "invalid multipart content type: {e}"
                            ))
                        })?;
                    }
                    form = form.part(field.name, part);
                }
                request.multipart(form)
            }
        };

        if let Some(timeout) = spec.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %url, "request failed");
            return Err(ApiError::from_status(status.as_u16(), body).into());
        }

        match spec.expect {
            Expect::Bytes => Ok(ResponsePayload::Bytes(response.bytes().await?)),
            Expect::Text => {
                let text = response.text().await?;
                if text.is_empty() {
                    Ok(ResponsePayload::Empty)
                } else {
                    Ok(ResponsePayload::Text(text))
                }
            }
            Expect::Json => {
                let text = response.text().await?;
                if text.is_empty() {
                    return Ok(ResponsePayload::Empty);
                }
                serde_json::from_str(&text)
                    .map(ResponsePayload::Json)
                    .map_err(|e| {
                        ThoughtSpotError::decode(format!("response is not valid JSON: {e}"))
                    })
            }
        }
    }
}

impl std::fmt::Debug for RestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestSession")
            .field("server_url", &self.server_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_spec_builder() {
        let spec = RequestSpec::post("callosum/v1/tspublic/v1/session/login")
            .form(vec![("username".to_string(), "alice".to_string())])
            .query("batchsize", -1)
            .query_opt("pattern", None::<String>);

        assert_eq!(spec.method, HttpMethod::Post);
        assert_eq!(spec.query, vec![("batchsize".to_string(), "-1".to_string())]);
        assert!(matches!(spec.body, RequestBody::Form(_)));
        assert_eq!(spec.expect, Expect::Json);
    }

    #[test]
    fn payload_mismatch_is_a_decode_error() {
        let payload = ResponsePayload::Text("hello".to_string());
        assert!(payload.into_json().is_err());

        let payload = ResponsePayload::Empty;
        assert_eq!(payload.into_json().unwrap(), Value::Null);
    }

    #[test]
    fn empty_payload_decodes_to_empty_text_and_bytes() {
        assert_eq!(ResponsePayload::Empty.into_text().unwrap(), "");
        assert!(ResponsePayload::Empty.into_bytes().unwrap().is_empty());
    }
}
