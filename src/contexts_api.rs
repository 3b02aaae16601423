//! Context endpoints (`/contexts`). Every call is scoped to a session.

use crate::client::{Client, decode_response};
use crate::errors::DialogflowError;
use crate::http::common::path_segment;
use crate::http::transport::MutationMethod;
use crate::models::{ApiResponse, ContextObject, ContextsCreated, ContextsDeleted};

const SESSION_PARAM: &str = "sessionId";

impl Client {
    /// Lists the active contexts of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn contexts(&self, session_id: &str) -> Result<Vec<ContextObject>, DialogflowError> {
        let body = self
            .transport
            .get("contexts", &[], &[(SESSION_PARAM, session_id)])
            .await?;
        decode_response(&body, "context list")
    }

    /// Retrieves one context of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn context(
        &self,
        session_id: &str,
        name: &str,
    ) -> Result<ContextObject, DialogflowError> {
        let path = format!("contexts/{}", path_segment(name));
        let body = self
            .transport
            .get(&path, &[], &[(SESSION_PARAM, session_id)])
            .await?;
        decode_response(&body, "ContextObject")
    }

    /// Adds contexts to a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn create_contexts(
        &self,
        session_id: &str,
        contexts: &[ContextObject],
    ) -> Result<ContextsCreated, DialogflowError> {
        let body = self
            .transport
            .mutate(
                MutationMethod::Post,
                "contexts",
                &[],
                &[(SESSION_PARAM, session_id)],
                Some(contexts),
            )
            .await?;
        decode_response(&body, "ContextsCreated")
    }

    /// Clears every context of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn delete_contexts(&self, session_id: &str) -> Result<ContextsDeleted, DialogflowError> {
        let body = self
            .transport
            .mutate::<()>(
                MutationMethod::Delete,
                "contexts",
                &[],
                &[(SESSION_PARAM, session_id)],
                None,
            )
            .await?;
        decode_response(&body, "ContextsDeleted")
    }

    /// Removes one context from a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn delete_context(
        &self,
        session_id: &str,
        name: &str,
    ) -> Result<ApiResponse, DialogflowError> {
        let path = format!("contexts/{}", path_segment(name));
        let body = self
            .transport
            .mutate::<()>(
                MutationMethod::Delete,
                &path,
                &[],
                &[(SESSION_PARAM, session_id)],
                None,
            )
            .await?;
        decode_response(&body, "ApiResponse from delete_context")
    }
}
