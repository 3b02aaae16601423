//! The authenticated request primitives every resource wrapper goes through.
//!
//! [`Transport`] performs exactly one HTTP exchange per call and returns the
//! raw response body. It injects the bearer credential and protocol version,
//! encodes the request body for one of three envelopes (none, JSON, multipart)
//! and drains the response before returning. It never inspects the HTTP status
//! or the body: Dialogflow reports failures inside the JSON payload, so a 404
//! body comes back as `Ok` just like a 200 body.

use super::common::{
    BASE_URL, JSON_CONTENT_TYPE, PROTOCOL_VERSION, VERSION_PARAM, bearer, construct_url,
};
use super::loud_wire;
use crate::errors::DialogflowError;
use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

/// Content type of every uploaded file part.
const FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// HTTP methods that carry a JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMethod {
    Post,
    Put,
    Delete,
}

impl MutationMethod {
    const fn as_method(self) -> Method {
        match self {
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }
}

/// Source of a file part in a multipart upload.
///
/// Either a filesystem path, opened when the request is assembled, or an
/// already-open handle. Untyped values (for example from a JSON config) can be
/// converted with `TryFrom<serde_json::Value>`, which accepts only strings.
#[derive(Debug)]
pub enum FileSource {
    /// A path on disk; the part's file name is the path's base name.
    Path(PathBuf),
    /// An open file; std handles carry no name, so one must be supplied.
    Handle {
        file: std::fs::File,
        file_name: String,
    },
}

impl FileSource {
    /// Wraps an already-open file.
    pub fn handle(file: std::fs::File, file_name: impl Into<String>) -> Self {
        Self::Handle {
            file,
            file_name: file_name.into(),
        }
    }

    /// Opens (if needed) and stats the file, returning a streaming part.
    ///
    /// Returns the part together with a short description for wire tracing.
    async fn into_part(self) -> Result<(Part, String), DialogflowError> {
        let (file, file_name, origin) = match self {
            Self::Path(path) => {
                let file = tokio::fs::File::open(&path).await.map_err(|source| {
                    DialogflowError::Filesystem {
                        path: path.clone(),
                        source,
                    }
                })?;
                let file_name = path.file_name().map_or_else(
                    || path.to_string_lossy().into_owned(),
                    |name| name.to_string_lossy().into_owned(),
                );
                (file, file_name, path)
            }
            Self::Handle { file, file_name } => {
                let origin = PathBuf::from(&file_name);
                (tokio::fs::File::from_std(file), file_name, origin)
            }
        };

        let metadata = file
            .metadata()
            .await
            .map_err(|source| DialogflowError::Filesystem {
                path: origin.clone(),
                source,
            })?;
        if metadata.is_dir() {
            return Err(DialogflowError::Filesystem {
                path: origin,
                source: std::io::Error::other("is a directory"),
            });
        }

        let length = metadata.len();
        let description = format!("<file {file_name}, {length} bytes>");
        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
        let part = Part::stream_with_length(body, length).file_name(file_name);
        Ok((with_content_type(part, FILE_CONTENT_TYPE)?, description))
    }
}

/// Sets a part's content type. Nothing has been sent yet, so a bad value is a
/// header error rather than a connection error.
fn with_content_type(part: Part, content_type: &str) -> Result<Part, DialogflowError> {
    part.mime_str(content_type)
        .map_err(|e| DialogflowError::InvalidHeader(format!("Content-Type {content_type}: {e}")))
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for FileSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for FileSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<String> for FileSource {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl TryFrom<serde_json::Value> for FileSource {
    type Error = DialogflowError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let kind = match value {
            serde_json::Value::String(path) => return Ok(Self::Path(PathBuf::from(path))),
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        };
        Err(DialogflowError::UnsupportedFileSource(format!(
            "expected an open file or a path string, got {kind}"
        )))
    }
}

/// Authenticated HTTP transport for the Dialogflow v1 API.
///
/// Cheap to clone; clones share the underlying connection pool. The only
/// mutable setting is the verbose flag, which requires `&mut self`, so a
/// shared `Transport` can be used from many tasks without locking.
#[derive(Debug, Clone)]
pub struct Transport {
    http_client: ReqwestClient,
    access_token: String,
    base_url: String,
    verbose: bool,
}

impl Transport {
    /// Creates a transport against the public endpoint with a default HTTP client.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::from_parts(ReqwestClient::new(), access_token.into(), BASE_URL.to_string(), false)
    }

    pub(crate) const fn from_parts(
        http_client: ReqwestClient,
        access_token: String,
        base_url: String,
        verbose: bool,
    ) -> Self {
        Self {
            http_client,
            access_token,
            base_url,
            verbose,
        }
    }

    /// Points the transport at another origin (a proxy or a mock server).
    ///
    /// The URL must include the `/v1` prefix, e.g. `http://127.0.0.1:8080/v1`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Enables or disables wire tracing to stderr.
    pub const fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Sends a GET request and returns the raw response body.
    ///
    /// Caller headers are applied after `Authorization`, so they win on a key
    /// collision. The body is returned unchanged, including for binary
    /// responses (TTS audio) and non-2xx statuses.
    ///
    /// # Errors
    ///
    /// Returns [`DialogflowError::Connection`] if the request fails on the
    /// network or the body cannot be read, and [`DialogflowError::InvalidHeader`]
    /// for a malformed caller header.
    pub async fn get(
        &self,
        path: &str,
        headers: &[(&str, &str)],
        params: &[(&str, &str)],
    ) -> Result<Bytes, DialogflowError> {
        let request_id = loud_wire::next_request_id();
        let (builder, url) = self.request(Method::GET, path, params);
        if self.verbose {
            loud_wire::log_request(request_id, "GET", &url, headers, params, None);
        }

        let builder = builder.headers(caller_headers(headers)?);
        self.execute(request_id, builder).await
    }

    /// Sends a POST, PUT or DELETE request with an optional JSON body.
    ///
    /// The payload is encoded with `serde_json` and sent with
    /// `Content-Type: application/json;charset=utf-8`. With `None` no body
    /// and no content type are sent.
    ///
    /// # Errors
    ///
    /// Returns [`DialogflowError::Serialization`] if the payload cannot be
    /// encoded (no request is issued in that case), and
    /// [`DialogflowError::Connection`] for network failures.
    pub async fn mutate<T>(
        &self,
        method: MutationMethod,
        path: &str,
        headers: &[(&str, &str)],
        params: &[(&str, &str)],
        payload: Option<&T>,
    ) -> Result<Bytes, DialogflowError>
    where
        T: Serialize + ?Sized,
    {
        let body = payload
            .map(serde_json::to_vec)
            .transpose()
            .map_err(DialogflowError::Serialization)?;

        let request_id = loud_wire::next_request_id();
        let http_method = method.as_method();
        let (mut builder, url) = self.request(http_method.clone(), path, params);
        if self.verbose {
            loud_wire::log_request(
                request_id,
                http_method.as_str(),
                &url,
                headers,
                params,
                body.as_deref(),
            );
        }

        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }
        let builder = builder.headers(caller_headers(headers)?);
        self.execute(request_id, builder).await
    }

    /// Sends a multipart/form-data POST.
    ///
    /// Each field is written as a text part containing the *JSON encoding* of
    /// its value, so a string field is sent quoted. Each file is streamed as a
    /// file part named by its key. Every file is opened and stat'ed before the
    /// request is issued: if any of them fails, nothing is sent and handles
    /// opened so far are closed.
    ///
    /// # Errors
    ///
    /// Returns [`DialogflowError::Filesystem`] if a file cannot be opened or
    /// stat'ed, [`DialogflowError::Serialization`] if a field cannot be
    /// encoded, and [`DialogflowError::Connection`] for network failures.
    pub async fn post_multipart(
        &self,
        path: &str,
        headers: &[(&str, &str)],
        fields: &[(&str, serde_json::Value)],
        files: Vec<(&str, FileSource)>,
    ) -> Result<Bytes, DialogflowError> {
        let request_id = loud_wire::next_request_id();
        let mut form = Form::new();
        let mut descriptions = Vec::with_capacity(fields.len() + files.len());

        for (name, value) in fields {
            let encoded = serde_json::to_string(value).map_err(DialogflowError::Serialization)?;
            descriptions.push((name.to_string(), encoded.clone()));
            form = form.text(name.to_string(), encoded);
        }
        for (name, source) in files {
            let (part, description) = source.into_part().await?;
            descriptions.push((name.to_string(), description));
            form = form.part(name.to_string(), part);
        }

        let (builder, url) = self.request(Method::POST, path, &[]);
        if self.verbose {
            loud_wire::log_request(request_id, "POST (multipart)", &url, headers, &[], None);
            for (name, description) in &descriptions {
                loud_wire::log_multipart_part(request_id, name, description);
            }
        }

        let builder = builder.multipart(form).headers(caller_headers(headers)?);
        self.execute(request_id, builder).await
    }

    /// Builds the URL, protocol version query and bearer header shared by all calls.
    fn request(&self, method: Method, path: &str, params: &[(&str, &str)]) -> (RequestBuilder, String) {
        let url = construct_url(&self.base_url, path);
        debug!("Dialogflow request: {} {}", method, url);

        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        query.push((VERSION_PARAM, PROTOCOL_VERSION));
        for &(key, value) in params {
            if key == VERSION_PARAM {
                warn!(
                    "Ignoring caller-supplied '{}={}' query parameter; protocol version is fixed at {}",
                    key, value, PROTOCOL_VERSION
                );
                continue;
            }
            query.push((key, value));
        }

        let builder = self
            .http_client
            .request(method, &url)
            .query(&query)
            .header(AUTHORIZATION, bearer(&self.access_token));
        (builder, url)
    }

    /// Sends the request and drains the whole body.
    async fn execute(
        &self,
        request_id: usize,
        builder: RequestBuilder,
    ) -> Result<Bytes, DialogflowError> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Dialogflow request failed: {}", e);
                if self.verbose {
                    loud_wire::log_error(request_id, &e);
                }
                return Err(DialogflowError::Connection(e));
            }
        };

        let status = response.status().as_u16();
        if self.verbose {
            loud_wire::log_response_status(request_id, status);
        }

        let body = response.bytes().await.inspect_err(|e| {
            if self.verbose {
                loud_wire::log_error(request_id, e);
            }
        })?;
        debug!(
            "Dialogflow response: status={}, {} bytes",
            status,
            body.len()
        );
        if self.verbose {
            loud_wire::log_response_body(request_id, &body);
        }

        Ok(body)
    }
}

/// Parses caller headers; later duplicates replace earlier ones.
fn caller_headers(headers: &[(&str, &str)]) -> Result<HeaderMap, DialogflowError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for &(name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| DialogflowError::InvalidHeader(format!("{name}: {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| DialogflowError::InvalidHeader(format!("{name}: {e}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
