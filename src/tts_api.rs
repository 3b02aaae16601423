//! Text-to-speech endpoint (`/tts`).

use crate::client::Client;
use crate::errors::DialogflowError;
use crate::models::LanguageTag;
use bytes::Bytes;

impl Client {
    /// Synthesizes `text` and returns the WAV audio bytes unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails. The body is not interpreted, so
    /// an error response from the service is returned as-is.
    pub async fn tts(&self, text: &str, language: &LanguageTag) -> Result<Bytes, DialogflowError> {
        self.transport
            .get("tts", &[("Accept-language", language.as_str())], &[("text", text)])
            .await
    }
}
