use crate::errors::DialogflowError;
use crate::http::common::BASE_URL;
use crate::http::transport::Transport;
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Maximum characters of a response body quoted in decode errors.
const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

/// The main client for the Dialogflow v1 API.
///
/// Construct it once with an access token and reuse it; it is cheap to clone
/// and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) transport: Transport,
}

/// Builder for `Client` instances.
///
/// # Example
///
/// ```
/// use dialogflow::Client;
/// use std::time::Duration;
///
/// let client = Client::builder("access_token")
///     .timeout(Duration::from_secs(30))
///     .connect_timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    access_token: String,
    base_url: String,
    verbose: bool,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Sets the total request timeout.
    ///
    /// This is the maximum time a request can take from start to finish,
    /// including connection time, sending the request, and reading the body.
    /// A request that exceeds it fails with [`DialogflowError::Connection`].
    ///
    /// If not set, uses reqwest's default (no timeout).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// If not set, uses reqwest's default.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Prints every request and response to stderr.
    ///
    /// Off by default so production use stays silent. The bearer token is
    /// masked in the output.
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Overrides the API origin, e.g. for a proxy or a mock server.
    ///
    /// Include the version prefix: `http://127.0.0.1:8080/v1`.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the `Client`.
    ///
    /// # Errors
    ///
    /// Returns [`DialogflowError::ClientBuild`] if the HTTP client cannot be
    /// initialized (for example, the TLS backend fails to load).
    pub fn build(self) -> Result<Client, DialogflowError> {
        let mut builder = ReqwestClient::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| DialogflowError::ClientBuild(e.to_string()))?;

        Ok(Client {
            transport: Transport::from_parts(
                http_client,
                self.access_token,
                self.base_url,
                self.verbose,
            ),
        })
    }
}

impl Client {
    /// Creates a new builder for `Client` instances.
    ///
    /// # Arguments
    ///
    /// * `access_token` - The agent's client or developer access token.
    #[must_use]
    pub fn builder(access_token: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            access_token: access_token.into(),
            base_url: BASE_URL.to_string(),
            verbose: false,
            timeout: None,
            connect_timeout: None,
        }
    }

    /// Creates a new client with default settings.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            transport: Transport::new(access_token),
        }
    }

    /// The underlying transport, for endpoints without a typed wrapper.
    #[must_use]
    pub const fn transport(&self) -> &Transport {
        &self.transport
    }

    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.transport.is_verbose()
    }

    /// Enables or disables wire tracing for this client.
    pub const fn set_verbose(&mut self, verbose: bool) {
        self.transport.set_verbose(verbose);
    }
}

/// Decodes a response body, quoting a preview of it on failure.
pub(crate) fn decode_response<T: DeserializeOwned>(
    body: &[u8],
    context: &str,
) -> Result<T, DialogflowError> {
    serde_json::from_slice(body).map_err(|e| {
        let text = String::from_utf8_lossy(body);
        DialogflowError::MalformedResponse(format!(
            "{context}: {e} | Body: {}",
            truncate_for_context(&text, ERROR_BODY_PREVIEW_LENGTH)
        ))
    })
}

/// Truncates at a character boundary, adding "..." if truncated.
fn truncate_for_context(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let truncate_at = s
            .char_indices()
            .take_while(|(i, c)| i + c.len_utf8() <= max_len)
            .last()
            .map_or(0, |(i, c)| i + c.len_utf8());
        format!("{}...", &s[..truncate_at])
    }
}
