pub mod constants;
pub mod envelope;
pub mod messages;
pub mod types;

// Re-export primary types for convenience.
pub use constants::Command;
pub use envelope::{DecodeError, InboundMessage, field_to_string};
pub use messages::{Ack, Handshake, Offer, Outbound, Subscribe};
pub use types::ConnectDescriptor;
