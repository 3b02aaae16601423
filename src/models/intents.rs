//! Intent definitions.

use super::common::Status;
use super::messages::Message;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entry returned by the intent listing endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub context_in: Vec<String>,
    #[serde(default)]
    pub context_out: Vec<AffectedContext>,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<IntentParameter>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub fallback_intent: bool,
}

/// A full intent.
///
/// Leave `id` and `status` unset when creating an intent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub auto: bool,
    #[serde(default)]
    pub contexts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<String>,
    #[serde(default)]
    pub user_says: Vec<UserSays>,
    #[serde(default)]
    pub responses: Vec<IntentResponse>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub webhook_used: bool,
    #[serde(default)]
    pub webhook_for_slot_filling: bool,
    #[serde(default)]
    pub fallback_intent: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<IntentEvent>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentEvent {
    pub name: String,
}

/// A training phrase.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSays {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub data: Vec<UserSaysData>,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub count: u32,
}

/// One fragment of a training phrase; annotated fragments carry `meta`/`alias`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSaysData {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub user_defined: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default)]
    pub reset_contexts: bool,
    #[serde(default)]
    pub affected_contexts: Vec<AffectedContext>,
    #[serde(default)]
    pub parameters: Vec<IntentParameter>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_response_platforms: Vec<String>,
}

/// Context set (or consumed) by an intent, with its lifespan in requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedContext {
    pub name: String,
    #[serde(default)]
    pub lifespan: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentParameter {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub prompts: Vec<String>,
    #[serde(default)]
    pub is_list: bool,
}
