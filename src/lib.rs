//! # dialogflow
//!
//! A Rust client library for the Dialogflow (formerly api.ai) v1 REST API.
//!
//! Every operation maps one method call to one REST endpoint. All of them go
//! through a single [`Transport`], which injects the bearer token and the
//! protocol version (`v=20150910`), encodes the body (none, JSON or
//! multipart) and returns the raw response bytes. Typed wrappers on
//! [`Client`] decode those bytes into the structures in this crate.
//!
//! Dialogflow reports application errors inside the response body rather
//! than (only) through the HTTP status, so a response is returned even for a
//! 4xx/5xx status. Inspect the embedded [`Status`] or call
//! [`ApiResponse::check`] / [`Status::check`] to turn it into an error.
//!
//! # Example
//!
//! ```no_run
//! use dialogflow::{Client, ContextObject, LanguageTag, QueryRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::builder("developer-access-token").build()?;
//!
//! client
//!     .create_contexts("session-1", &[ContextObject::new("weather", 5)])
//!     .await?;
//!
//! let response = client
//!     .query_text(&QueryRequest::new("session-1", "will it rain?").with_lang(LanguageTag::English))
//!     .await?;
//! if let Some(status) = &response.status {
//!     status.check()?;
//! }
//! println!("{}", response.result.fulfillment.speech);
//! # Ok(())
//! # }
//! ```
//!
//! # Debugging
//!
//! `Client::builder(token).verbose(true)` prints every request and response
//! to stderr. Library-level events are emitted through `tracing` and are
//! silent unless the application installs a subscriber.

mod client;
mod contexts_api;
mod entities_api;
mod errors;
pub(crate) mod http;
mod intents_api;
pub mod models;
mod query_api;
mod tts_api;
mod user_entities_api;

pub use client::{Client, ClientBuilder};
pub use errors::DialogflowError;
pub use http::common::{BASE_URL, PROTOCOL_VERSION};
pub use http::transport::{FileSource, MutationMethod, Transport};
pub use models::{
    AffectedContext, ApiResponse, CardButton, CardMessage, ContextObject, ContextsCreated,
    ContextsDeleted, CustomPayloadMessage, EntityEntry, EntityObject, EntitySummary, ErrorType,
    Fulfillment, ImageMessage, IntentEvent, IntentObject, IntentParameter, IntentResponse,
    IntentSummary, LanguageTag, Location, Message, Metadata, OriginalRequest, QueryEvent,
    QueryRequest, QueryResponse, QueryResult, QuickRepliesMessage, Status, TextMessage,
    UserEntityObject, UserSays, UserSaysData,
};
