use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::ConnectDescriptor;

// ---------------------------------------------------------------------------
// Outbound commands
// ---------------------------------------------------------------------------

/// A command sent from the client to the broadcaster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum Outbound {
    #[serde(rename = "stream-environment")]
    Handshake(Handshake),
    #[serde(rename = "enable")]
    Subscribe(Subscribe),
}

impl Outbound {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Signed authentication for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handshake {
    pub site: String,
    pub env: String,
    pub t: u64,
    /// Signed credential.
    pub d: String,
}

impl From<&ConnectDescriptor> for Handshake {
    fn from(info: &ConnectDescriptor) -> Self {
        Self {
            site: info.site.clone(),
            env: info.environment.clone(),
            t: info.t,
            d: info.hmac.clone(),
        }
    }
}

/// Subscription to one stream type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscribe {
    #[serde(rename = "type")]
    pub stream_type: String,
    /// Server that advertised the stream, echoed back verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<Value>,
}

// ---------------------------------------------------------------------------
// Inbound views
// ---------------------------------------------------------------------------

/// Fields of an `available` frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Offer {
    #[serde(rename = "type", default)]
    pub stream_type: Option<String>,
    #[serde(default)]
    pub server: Option<Value>,
}

/// Fields of a `success` frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub code: Option<Value>,
}
