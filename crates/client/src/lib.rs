//! Client for a remote log-broadcasting endpoint.
//!
//! Authenticates one environment with a signed descriptor, subscribes to
//! the stream types it is allowed to see, and renders the incoming records
//! as filtered, optionally colored, column-aligned lines.

pub mod client;
pub mod color;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod format;
pub mod printer;
mod pumps;
pub mod session;

pub use client::LogStreamClient;
pub use color::{Color, ColorEntry, ColorResolver, ColorTable};
pub use config::ClientConfig;
pub use dispatch::{Dispatcher, Flow};
pub use error::{ClientError, ConfigError};
pub use filter::{Filter, PatternSet};
pub use format::{Column, ColumnSpec, Template};
pub use session::{Session, SessionState};

pub use logstream_protocol::ConnectDescriptor;
