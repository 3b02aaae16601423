//! Conversation contexts.

use super::common::Status;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextObject {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, serde_json::Value>,
}

impl ContextObject {
    /// Creates a context that lives for `lifespan` requests.
    pub fn new(name: impl Into<String>, lifespan: u32) -> Self {
        Self {
            name: name.into(),
            lifespan: Some(lifespan),
            parameters: BTreeMap::new(),
        }
    }
}

/// Response of the create-contexts endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextsCreated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub names: Vec<String>,
}

/// Response of the delete-all-contexts endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextsDeleted {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub deleted: Vec<String>,
}
