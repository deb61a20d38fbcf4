use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum inbound text frame size in bytes (16 MB).
pub const WS_MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Time allowed for queued frames and the close frame to flush on shutdown.
pub const WS_WRITE_WAIT: Duration = Duration::from_secs(5);

/// Name of the field carrying the command tag in every frame.
pub const CMD_FIELD: &str = "cmd";

/// Outbound command tag for the signed handshake.
pub const CMD_STREAM_ENVIRONMENT: &str = "stream-environment";

/// Outbound command tag for a stream subscription.
pub const CMD_ENABLE: &str = "enable";

/// Stream types the broadcaster is known to offer.
pub const KNOWN_STREAM_TYPES: &[&str] = &[
    "bal-access",
    "apache-request",
    "apache-error",
    "php-error",
    "drupal-watchdog",
    "varnish-request",
    "mysql-slow",
];

/// Inbound command tag.
///
/// Tags the client does not recognise are preserved in [`Command::Unknown`]
/// so newer servers never break older clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// The server is ready to receive the handshake (`connected`).
    Ready,
    /// Acknowledgement of a prior command (`success`).
    Ack,
    /// Server-reported application error (`error`).
    Fault,
    /// A stream type is available for subscription (`available`).
    Offer,
    /// One log line (`line`).
    Record,
    Unknown(String),
}

impl Command {
    /// Parses a wire tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "connected" => Self::Ready,
            "success" => Self::Ack,
            "error" => Self::Fault,
            "available" => Self::Offer,
            "line" => Self::Record,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Returns the wire tag.
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Ready => "connected",
            Self::Ack => "success",
            Self::Fault => "error",
            Self::Offer => "available",
            Self::Record => "line",
            Self::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}
