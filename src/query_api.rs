//! Query endpoint (`/query`): text, event and voice queries.

use crate::client::{Client, decode_response};
use crate::errors::DialogflowError;
use crate::http::transport::{FileSource, MutationMethod};
use crate::models::{QueryRequest, QueryResponse};
use tracing::debug;

impl Client {
    /// Sends a text or event query.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dialogflow::{Client, QueryRequest};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::new("client-access-token");
    /// let response = client
    ///     .query_text(&QueryRequest::new("session-1", "hello"))
    ///     .await?;
    /// println!("{}", response.result.fulfillment.speech);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn query_text(&self, query: &QueryRequest) -> Result<QueryResponse, DialogflowError> {
        let body = self
            .transport
            .mutate(MutationMethod::Post, "query", &[], &[], Some(query))
            .await?;
        let response: QueryResponse = decode_response(&body, "QueryResponse")?;
        debug!(
            "Query resolved: action={:?}, score={}",
            response.result.action, response.result.score
        );
        Ok(response)
    }

    /// Sends a voice query: 16 kHz, signed 16-bit PCM, mono WAV audio.
    ///
    /// The query is sent as the multipart field `request` and the audio as
    /// the file part `voiceData`. Voice queries require a paid plan.
    ///
    /// # Errors
    ///
    /// Returns [`DialogflowError::Filesystem`] if the audio file cannot be
    /// opened (no request is sent), or an error if the request fails or the
    /// body cannot be decoded.
    pub async fn query_voice(
        &self,
        query: &QueryRequest,
        audio: impl Into<FileSource>,
    ) -> Result<QueryResponse, DialogflowError> {
        let request = serde_json::to_value(query).map_err(DialogflowError::Serialization)?;
        let body = self
            .transport
            .post_multipart("query", &[], &[("request", request)], vec![("voiceData", audio.into())])
            .await?;
        decode_response(&body, "QueryResponse from voice query")
    }
}
