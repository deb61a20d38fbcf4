use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::constants::{CMD_FIELD, Command};

/// Errors from decoding an inbound frame.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("frame is not a JSON object")]
    NotAnObject,

    #[error("frame has no `cmd` tag")]
    MissingCommand,
}

/// One decoded inbound frame.
///
/// The command tag is parsed into a [`Command`]; every field (the tag
/// included) is kept verbatim in an ordered map so fields the client does
/// not know about survive untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    command: Command,
    fields: Map<String, Value>,
}

impl InboundMessage {
    /// Decodes a text frame.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Builds a message from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let Value::Object(fields) = value else {
            return Err(DecodeError::NotAnObject);
        };
        let command = match fields.get(CMD_FIELD) {
            Some(Value::String(tag)) => Command::from_tag(tag),
            _ => return Err(DecodeError::MissingCommand),
        };
        Ok(Self { command, fields })
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Returns the raw value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the string representation of a field; absent fields are empty.
    pub fn field_str(&self, name: &str) -> Cow<'_, str> {
        self.fields.get(name).map_or(Cow::Borrowed(""), field_to_string)
    }

    /// All fields in wire order, the `cmd` tag included.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Deserializes the fields into a typed view.
    pub fn parse_fields<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.fields.clone()))
    }
}

/// String representation of a field value.
///
/// Strings render without quotes, `null` renders empty, anything else
/// renders as compact JSON.
pub fn field_to_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

impl Serialize for InboundMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InboundMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
