//! JSON record format for persisted collections.
//!
//! Payload shape: `[{"id": 1, "content": "buy milk", "isFinish": false}, ...]`.

use crate::model::collection::TodoCollection;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid todo payload: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

pub fn encode_todos(collection: &TodoCollection) -> Result<String, CodecError> {
    Ok(serde_json::to_string(collection)?)
}

/// Decodes a stored payload.
///
/// # Errors
/// - Malformed JSON, blank content, or duplicate ids.
pub fn decode_todos(payload: &str) -> Result<TodoCollection, CodecError> {
    Ok(serde_json::from_str(payload)?)
}
