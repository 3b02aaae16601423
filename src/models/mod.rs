//! Data-transfer types for the Dialogflow v1 resources.

mod common;
mod contexts;
mod entities;
mod intents;
mod messages;
mod query;

pub use common::{ApiResponse, ErrorType, LanguageTag, Status};
pub use contexts::{ContextObject, ContextsCreated, ContextsDeleted};
pub(crate) use entities::NewUserEntities;
pub use entities::{EntityEntry, EntityObject, EntitySummary, UserEntityObject};
pub use intents::{
    AffectedContext, IntentEvent, IntentObject, IntentParameter, IntentResponse, IntentSummary,
    UserSays, UserSaysData,
};
pub use messages::{
    CardButton, CardMessage, CustomPayloadMessage, ImageMessage, Message, QuickRepliesMessage,
    TextMessage,
};
pub use query::{
    Fulfillment, Location, Metadata, OriginalRequest, QueryEvent, QueryRequest, QueryResponse,
    QueryResult,
};
