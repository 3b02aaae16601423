//! Query (detect intent) requests and responses.

use super::common::{LanguageTag, Status};
use super::contexts::ContextObject;
use super::entities::EntityObject;
use super::messages::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A natural language (or event) query.
///
/// # Example
///
/// ```
/// use dialogflow::{LanguageTag, QueryRequest};
///
/// let request = QueryRequest::new("session-1", "what's the weather in Paris?")
///     .with_lang(LanguageTag::English)
///     .with_timezone("Europe/Paris");
/// assert_eq!(request.query, vec!["what's the weather in Paris?".to_string()]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<QueryEvent>,
    pub session_id: String,
    pub lang: LanguageTag,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<ContextObject>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reset_contexts: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<EntityObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_request: Option<OriginalRequest>,
}

impl QueryRequest {
    /// Creates a text query for the given session.
    pub fn new(session_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            query: vec![query.into()],
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    /// Creates an event query for the given session.
    pub fn event(session_id: impl Into<String>, event: QueryEvent) -> Self {
        Self {
            event: Some(event),
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_lang(mut self, lang: LanguageTag) -> Self {
        self.lang = lang;
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: ContextObject) -> Self {
        self.contexts.push(context);
        self
    }

    #[must_use]
    pub const fn with_reset_contexts(mut self, reset: bool) -> Self {
        self.reset_contexts = reset;
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    #[must_use]
    pub const fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(Location {
            latitude,
            longitude,
        });
        self
    }
}

/// Triggers an intent by event name instead of text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryEvent {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw request from an integration platform, forwarded to the webhook.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginalRequest {
    pub source: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<LanguageTag>,
    #[serde(default)]
    pub result: QueryResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub session_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub resolved_query: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub action_incomplete: bool,
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub contexts: Vec<ContextObject>,
    #[serde(default)]
    pub fulfillment: Fulfillment,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fulfillment {
    #[serde(default)]
    pub speech: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Matched intent and webhook details.
///
/// The webhook flags arrive as the strings `"true"`/`"false"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_for_slot_filling_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_response_time: Option<u64>,
}

impl Metadata {
    #[must_use]
    pub fn webhook_used(&self) -> bool {
        self.webhook_used.as_deref() == Some("true")
    }
}
