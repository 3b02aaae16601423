//! Session-scoped entity endpoints (`/userEntities`).

use crate::client::{Client, decode_response};
use crate::errors::DialogflowError;
use crate::http::common::path_segment;
use crate::http::transport::MutationMethod;
use crate::models::{ApiResponse, NewUserEntities, UserEntityObject};

fn user_entity_path(name: &str) -> String {
    format!("userEntities/{}", path_segment(name))
}

impl Client {
    /// Creates user entities for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn create_user_entities(
        &self,
        session_id: &str,
        entities: &[UserEntityObject],
    ) -> Result<ApiResponse, DialogflowError> {
        let payload = NewUserEntities {
            session_id,
            entities,
        };
        let body = self
            .transport
            .mutate(MutationMethod::Post, "userEntities", &[], &[], Some(&payload))
            .await?;
        decode_response(&body, "ApiResponse from create_user_entities")
    }

    /// Replaces a user entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn update_user_entity(
        &self,
        name: &str,
        entity: &UserEntityObject,
    ) -> Result<ApiResponse, DialogflowError> {
        let body = self
            .transport
            .mutate(MutationMethod::Put, &user_entity_path(name), &[], &[], Some(entity))
            .await?;
        decode_response(&body, "ApiResponse from update_user_entity")
    }

    /// Retrieves a user entity by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    /// A missing user entity is reported through the returned object's `status`.
    pub async fn user_entity(&self, name: &str) -> Result<UserEntityObject, DialogflowError> {
        let body = self.transport.get(&user_entity_path(name), &[], &[]).await?;
        decode_response(&body, "UserEntityObject")
    }

    /// Deletes a user entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn delete_user_entity(&self, name: &str) -> Result<ApiResponse, DialogflowError> {
        let body = self
            .transport
            .mutate::<()>(MutationMethod::Delete, &user_entity_path(name), &[], &[], None)
            .await?;
        decode_response(&body, "ApiResponse from delete_user_entity")
    }
}
