//! Rich response messages.
//!
//! Dialogflow returns fulfillment messages as JSON objects discriminated by a
//! numeric `type` field. [`Message`] decodes that discriminator at the boundary
//! into one variant per message kind. Kinds this crate doesn't model (for
//! example platform-specific Actions on Google messages, which use string
//! types) are preserved in [`Message::Unknown`] rather than rejected.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

const TEXT_TYPE: i64 = 0;
const CARD_TYPE: i64 = 1;
const QUICK_REPLIES_TYPE: i64 = 2;
const IMAGE_TYPE: i64 = 3;
const CUSTOM_PAYLOAD_TYPE: i64 = 4;

/// Plain text response. Speech may be a single string or a list of variants.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub speech: Vec<String>,
}

/// Card with an optional image and postback buttons.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub buttons: Vec<CardButton>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardButton {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickRepliesMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub replies: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default)]
    pub image_url: String,
}

/// Arbitrary JSON payload forwarded to the integration platform.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPayloadMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default)]
    pub payload: Value,
}

/// A fulfillment message, decoded by its `type` discriminator.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Message {
    /// `type: 0`
    Text(TextMessage),
    /// `type: 1`
    Card(CardMessage),
    /// `type: 2`
    QuickReplies(QuickRepliesMessage),
    /// `type: 3`
    Image(ImageMessage),
    /// `type: 4`
    CustomPayload(CustomPayloadMessage),
    /// Any other message kind.
    ///
    /// `message_type` holds the discriminator as it appeared on the wire (or
    /// `<missing>`), and `data` the complete original object so it can be
    /// re-serialized unchanged.
    Unknown { message_type: String, data: Value },
}

impl Message {
    /// Creates a text message with a single speech variant.
    pub fn text(speech: impl Into<String>) -> Self {
        Self::Text(TextMessage {
            platform: None,
            speech: vec![speech.into()],
        })
    }

    /// Returns the numeric discriminator, or `None` for unknown kinds.
    #[must_use]
    pub const fn type_code(&self) -> Option<i64> {
        match self {
            Self::Text(_) => Some(TEXT_TYPE),
            Self::Card(_) => Some(CARD_TYPE),
            Self::QuickReplies(_) => Some(QUICK_REPLIES_TYPE),
            Self::Image(_) => Some(IMAGE_TYPE),
            Self::CustomPayload(_) => Some(CUSTOM_PAYLOAD_TYPE),
            Self::Unknown { .. } => None,
        }
    }

    /// Returns the target platform, if the message is platform-specific.
    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        match self {
            Self::Text(m) => m.platform.as_deref(),
            Self::Card(m) => m.platform.as_deref(),
            Self::QuickReplies(m) => m.platform.as_deref(),
            Self::Image(m) => m.platform.as_deref(),
            Self::CustomPayload(m) => m.platform.as_deref(),
            Self::Unknown { data, .. } => data.get("platform").and_then(Value::as_str),
        }
    }

    /// Returns the speech variants if this is a text message.
    #[must_use]
    pub fn as_speech(&self) -> Option<&[String]> {
        match self {
            Self::Text(m) => Some(&m.speech),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }
}

/// Reads the discriminator, accepting both `0` and `"0"`.
fn type_code_of(value: &Value) -> Option<i64> {
    match value.get("type")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn with_type<T: Serialize, S: Serializer>(
    message: &T,
    code: i64,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut value = serde_json::to_value(message).map_err(serde::ser::Error::custom)?;
    if let Value::Object(map) = &mut value {
        map.insert("type".to_string(), Value::from(code));
    }
    value.serialize(serializer)
}

impl Serialize for Message {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text(m) => with_type(m, TEXT_TYPE, serializer),
            Self::Card(m) => with_type(m, CARD_TYPE, serializer),
            Self::QuickReplies(m) => with_type(m, QUICK_REPLIES_TYPE, serializer),
            Self::Image(m) => with_type(m, IMAGE_TYPE, serializer),
            Self::CustomPayload(m) => with_type(m, CUSTOM_PAYLOAD_TYPE, serializer),
            Self::Unknown { data, .. } => data.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Err(D::Error::custom(format!(
                "expected a message object, got {value}"
            )));
        }

        let decoded = match type_code_of(&value) {
            Some(TEXT_TYPE) => serde_json::from_value(value).map(Self::Text),
            Some(CARD_TYPE) => serde_json::from_value(value).map(Self::Card),
            Some(QUICK_REPLIES_TYPE) => serde_json::from_value(value).map(Self::QuickReplies),
            Some(IMAGE_TYPE) => serde_json::from_value(value).map(Self::Image),
            Some(CUSTOM_PAYLOAD_TYPE) => serde_json::from_value(value).map(Self::CustomPayload),
            _ => {
                let message_type = match value.get("type") {
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                    None => "<missing>".to_string(),
                };
                tracing::debug!(
                    "Preserving message with unrecognized type '{}' in Message::Unknown",
                    message_type
                );
                return Ok(Self::Unknown {
                    message_type,
                    data: value,
                });
            }
        };
        decoded.map_err(D::Error::custom)
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}
