//! HTTP layer for Dialogflow API communication.

pub(crate) mod common;
pub(crate) mod loud_wire;
pub(crate) mod transport;
