//! Intent endpoints (`/intents`).

use crate::client::{Client, decode_response};
use crate::errors::DialogflowError;
use crate::http::common::path_segment;
use crate::http::transport::MutationMethod;
use crate::models::{ApiResponse, IntentObject, IntentSummary};
use tracing::debug;

impl Client {
    /// Lists all intents of the agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn intents(&self) -> Result<Vec<IntentSummary>, DialogflowError> {
        let body = self.transport.get("intents", &[], &[]).await?;
        let intents: Vec<IntentSummary> = decode_response(&body, "intent list")?;
        debug!("Retrieved {} intents", intents.len());
        Ok(intents)
    }

    /// Retrieves a single intent by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    /// A missing intent is reported through the returned object's `status`.
    pub async fn intent(&self, intent_id: &str) -> Result<IntentObject, DialogflowError> {
        let path = format!("intents/{}", path_segment(intent_id));
        let body = self.transport.get(&path, &[], &[]).await?;
        decode_response(&body, "IntentObject")
    }

    /// Creates an intent. Leave `id` unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn create_intent(&self, intent: &IntentObject) -> Result<ApiResponse, DialogflowError> {
        let body = self
            .transport
            .mutate(MutationMethod::Post, "intents", &[], &[], Some(intent))
            .await?;
        decode_response(&body, "ApiResponse from create_intent")
    }

    /// Replaces an existing intent.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn update_intent(
        &self,
        intent_id: &str,
        intent: &IntentObject,
    ) -> Result<ApiResponse, DialogflowError> {
        let path = format!("intents/{}", path_segment(intent_id));
        let body = self
            .transport
            .mutate(MutationMethod::Put, &path, &[], &[], Some(intent))
            .await?;
        decode_response(&body, "ApiResponse from update_intent")
    }

    /// Deletes an intent.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn delete_intent(&self, intent_id: &str) -> Result<ApiResponse, DialogflowError> {
        let path = format!("intents/{}", path_segment(intent_id));
        let body = self
            .transport
            .mutate::<()>(MutationMethod::Delete, &path, &[], &[], None)
            .await?;
        decode_response(&body, "ApiResponse from delete_intent")
    }
}
