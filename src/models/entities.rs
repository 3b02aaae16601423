//! Developer and user entities.

use super::common::Status;
use serde::{Deserialize, Serialize};

/// Entry returned by the entity listing endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub preview: String,
}

/// A developer entity.
///
/// Leave `id`, `status`, `is_enum` and `automated_expansion` unset when
/// creating an entity; the service fills them in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entries: Vec<EntityEntry>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_enum: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub automated_expansion: bool,
}

/// A reference value and its synonyms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityEntry {
    pub value: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl EntityEntry {
    pub fn new(value: impl Into<String>, synonyms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            value: value.into(),
            synonyms: synonyms.into_iter().map(Into::into).collect(),
        }
    }
}

/// A session-scoped entity.
///
/// When `extend` is true the entries are added to the developer entity of
/// the same name instead of replacing it for the session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntityObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub extend: bool,
    #[serde(default)]
    pub entries: Vec<EntityEntry>,
}

/// Request body for creating user entities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewUserEntities<'a> {
    pub session_id: &'a str,
    pub entities: &'a [UserEntityObject],
}
