//! Shared wire types: language tags, status objects and the generic API response.

use crate::errors::DialogflowError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages supported by the agent.
///
/// Tags this crate doesn't know about are preserved in [`LanguageTag::Other`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LanguageTag {
    BrazilianPortuguese,
    ChineseCantonese,
    ChineseSimplified,
    ChineseTraditional,
    Dutch,
    #[default]
    English,
    French,
    German,
    Italian,
    Japanese,
    Korean,
    Portuguese,
    Russian,
    Spanish,
    Ukrainian,
    /// Any other language tag, kept verbatim.
    Other(String),
}

impl LanguageTag {
    /// Returns the BCP-47 style tag sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BrazilianPortuguese => "pt-BR",
            Self::ChineseCantonese => "zh-HK",
            Self::ChineseSimplified => "zh-CN",
            Self::ChineseTraditional => "zh-TW",
            Self::Dutch => "nl",
            Self::English => "en",
            Self::French => "fr",
            Self::German => "de",
            Self::Italian => "it",
            Self::Japanese => "ja",
            Self::Korean => "ko",
            Self::Portuguese => "pt",
            Self::Russian => "ru",
            Self::Spanish => "es",
            Self::Ukrainian => "uk",
            Self::Other(tag) => tag,
        }
    }

    /// Parses a wire tag. Matching is case-insensitive; unknown tags map to `Other`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "pt-br" => Self::BrazilianPortuguese,
            "zh-hk" => Self::ChineseCantonese,
            "zh-cn" => Self::ChineseSimplified,
            "zh-tw" => Self::ChineseTraditional,
            "nl" => Self::Dutch,
            "en" => Self::English,
            "fr" => Self::French,
            "de" => Self::German,
            "it" => Self::Italian,
            "ja" => Self::Japanese,
            "ko" => Self::Korean,
            "pt" => Self::Portuguese,
            "ru" => Self::Russian,
            "es" => Self::Spanish,
            "uk" => Self::Ukrainian,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LanguageTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LanguageTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// Error type reported inside a [`Status`] object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorType {
    #[default]
    Success,
    Deprecated,
    BadRequest,
    Unauthorized,
    NotFound,
    NotAllowed,
    NotAcceptable,
    Conflict,
    TooManyRequests,
    /// Unrecognized error type, preserved verbatim.
    Unknown(String),
}

impl ErrorType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Deprecated => "deprecated",
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::NotAllowed => "not_allowed",
            Self::NotAcceptable => "not_acceptable",
            Self::Conflict => "conflict",
            Self::TooManyRequests => "too_many_requests",
            Self::Unknown(other) => other,
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "success" => Self::Success,
            "deprecated" => Self::Deprecated,
            "bad_request" => Self::BadRequest,
            "unauthorized" => Self::Unauthorized,
            "not_found" => Self::NotFound,
            "not_allowed" => Self::NotAllowed,
            "not_acceptable" => Self::NotAcceptable,
            "conflict" => Self::Conflict,
            "too_many_requests" => Self::TooManyRequests,
            _ => {
                tracing::warn!(
                    "Encountered unknown errorType '{}'. Preserving it in ErrorType::Unknown.",
                    value
                );
                Self::Unknown(value)
            }
        })
    }
}

/// The status object Dialogflow embeds in response bodies.
///
/// Dialogflow reports application-level failures here rather than (only) in
/// the HTTP status line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// HTTP-like status code (e.g. 200, 404)
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub error_type: ErrorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl Status {
    /// Returns true if the status reports success.
    ///
    /// `deprecated` arrives with a 2xx code on requests that were served, so
    /// it counts as success; see [`is_deprecated`](Self::is_deprecated).
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.error_type, ErrorType::Success | ErrorType::Deprecated)
            && (200..300).contains(&self.code)
    }

    /// Returns true if the request was served through a deprecated feature.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.error_type == ErrorType::Deprecated
    }

    /// Converts a failure status into [`DialogflowError::Api`].
    ///
    /// # Errors
    ///
    /// Returns `DialogflowError::Api` carrying a copy of this status when
    /// [`is_success`](Self::is_success) is false.
    pub fn check(&self) -> Result<(), DialogflowError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(DialogflowError::Api(self.clone()))
        }
    }
}

/// Generic response returned by mutating endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl ApiResponse {
    /// Returns the response if its status object is absent or successful.
    ///
    /// # Errors
    ///
    /// Returns `DialogflowError::Api` if the embedded status reports a failure.
    pub fn check(self) -> Result<Self, DialogflowError> {
        if let Some(status) = &self.status {
            status.check()?;
        }
        Ok(self)
    }
}
