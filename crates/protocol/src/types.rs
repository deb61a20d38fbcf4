use serde::{Deserialize, Serialize};

/// Identifies and authorises the environment whose logs are streamed.
///
/// Produced by the caller (usually from a cloud API response); the client
/// copies it verbatim into the handshake and never inspects the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectDescriptor {
    pub site: String,
    pub environment: String,
    /// Unix timestamp the credential was issued at.
    pub t: u64,
    /// Signed credential over the other fields.
    pub hmac: String,
}
