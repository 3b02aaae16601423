//! Developer entity endpoints (`/entities`).

use crate::client::{Client, decode_response};
use crate::errors::DialogflowError;
use crate::http::common::path_segment;
use crate::http::transport::MutationMethod;
use crate::models::{ApiResponse, EntityEntry, EntityObject, EntitySummary};

fn entity_path(id_or_name: &str) -> String {
    format!("entities/{}", path_segment(id_or_name))
}

fn entries_path(id_or_name: &str) -> String {
    format!("entities/{}/entries", path_segment(id_or_name))
}

impl Client {
    /// Lists all developer entities.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn entities(&self) -> Result<Vec<EntitySummary>, DialogflowError> {
        let body = self.transport.get("entities", &[], &[]).await?;
        decode_response(&body, "entity list")
    }

    /// Retrieves an entity by id or name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    /// A missing entity is reported through the returned object's `status`.
    pub async fn entity(&self, id_or_name: &str) -> Result<EntityObject, DialogflowError> {
        let body = self.transport.get(&entity_path(id_or_name), &[], &[]).await?;
        decode_response(&body, "EntityObject")
    }

    /// Creates an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn create_entity(&self, entity: &EntityObject) -> Result<ApiResponse, DialogflowError> {
        let body = self
            .transport
            .mutate(MutationMethod::Post, "entities", &[], &[], Some(entity))
            .await?;
        decode_response(&body, "ApiResponse from create_entity")
    }

    /// Adds entries to an existing entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn add_entity_entries(
        &self,
        id_or_name: &str,
        entries: &[EntityEntry],
    ) -> Result<ApiResponse, DialogflowError> {
        let body = self
            .transport
            .mutate(MutationMethod::Post, &entries_path(id_or_name), &[], &[], Some(entries))
            .await?;
        decode_response(&body, "ApiResponse from add_entity_entries")
    }

    /// Creates or updates several entities at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn create_or_update_entities(
        &self,
        entities: &[EntityObject],
    ) -> Result<ApiResponse, DialogflowError> {
        let body = self
            .transport
            .mutate(MutationMethod::Put, "entities", &[], &[], Some(entities))
            .await?;
        decode_response(&body, "ApiResponse from create_or_update_entities")
    }

    /// Replaces an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn update_entity(
        &self,
        id_or_name: &str,
        entity: &EntityObject,
    ) -> Result<ApiResponse, DialogflowError> {
        let body = self
            .transport
            .mutate(MutationMethod::Put, &entity_path(id_or_name), &[], &[], Some(entity))
            .await?;
        decode_response(&body, "ApiResponse from update_entity")
    }

    /// Replaces the entries of an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn update_entity_entries(
        &self,
        id_or_name: &str,
        entries: &[EntityEntry],
    ) -> Result<ApiResponse, DialogflowError> {
        let body = self
            .transport
            .mutate(MutationMethod::Put, &entries_path(id_or_name), &[], &[], Some(entries))
            .await?;
        decode_response(&body, "ApiResponse from update_entity_entries")
    }

    /// Deletes an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn delete_entity(&self, id_or_name: &str) -> Result<ApiResponse, DialogflowError> {
        let body = self
            .transport
            .mutate::<()>(MutationMethod::Delete, &entity_path(id_or_name), &[], &[], None)
            .await?;
        decode_response(&body, "ApiResponse from delete_entity")
    }

    /// Deletes entries, identified by reference value, from an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn delete_entity_entries(
        &self,
        id_or_name: &str,
        values: &[&str],
    ) -> Result<ApiResponse, DialogflowError> {
        let body = self
            .transport
            .mutate(MutationMethod::Delete, &entries_path(id_or_name), &[], &[], Some(values))
            .await?;
        decode_response(&body, "ApiResponse from delete_entity_entries")
    }
}
