//! Connection session state machine.

use std::collections::BTreeSet;
use std::io::Write;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite;
use tracing::debug;

use logstream_protocol::{ConnectDescriptor, Handshake, Outbound, Subscribe};

use crate::error::ClientError;
use crate::printer::Printer;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Socket not yet open.
    Connecting,
    /// Socket open, waiting for the server to say it is ready.
    AwaitingHello,
    /// Handshake sent.
    Authenticated,
    Closed,
}

/// One connection attempt to the broadcaster.
///
/// Created per attempt and never reused. Outbound frames go to the write
/// pump through `write_tx`.
#[derive(Debug)]
pub struct Session {
    descriptor: ConnectDescriptor,
    state: SessionState,
    authenticated: bool,
    enabled_types: BTreeSet<String>,
    write_tx: mpsc::UnboundedSender<tungstenite::Message>,
}

impl Session {
    pub fn new(
        descriptor: ConnectDescriptor,
        write_tx: mpsc::UnboundedSender<tungstenite::Message>,
    ) -> Self {
        Self {
            descriptor,
            state: SessionState::Connecting,
            authenticated: false,
            enabled_types: BTreeSet::new(),
            write_tx,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Stream types subscribed to so far.
    pub fn enabled_types(&self) -> &BTreeSet<String> {
        &self.enabled_types
    }

    pub fn descriptor(&self) -> &ConnectDescriptor {
        &self.descriptor
    }

    /// The socket is open; wait for the server's ready notification.
    pub fn opened(&mut self) {
        if self.state == SessionState::Connecting {
            self.state = SessionState::AwaitingHello;
        }
    }

    /// Handles the server's ready notification.
    ///
    /// The handshake is sent only the first time; later notifications
    /// change nothing.
    pub fn on_ready<W: Write>(&mut self, printer: &mut Printer<W>) -> Result<(), ClientError> {
        if self.is_closed() {
            return Err(ClientError::Closed);
        }
        if !self.authenticated {
            let handshake = Outbound::Handshake(Handshake::from(&self.descriptor));
            self.send(&handshake, printer)?;
            debug!(site = %self.descriptor.site, env = %self.descriptor.environment, "handshake sent");
        }
        self.authenticated = true;
        self.state = SessionState::Authenticated;
        Ok(())
    }

    /// Subscribes to a stream type the server offered.
    pub fn subscribe<W: Write>(
        &mut self,
        stream_type: String,
        server: Option<Value>,
        printer: &mut Printer<W>,
    ) -> Result<(), ClientError> {
        let request = Outbound::Subscribe(Subscribe {
            stream_type: stream_type.clone(),
            server,
        });
        self.send(&request, printer)?;
        debug!(%stream_type, "subscribed");
        self.enabled_types.insert(stream_type);
        Ok(())
    }

    /// Serializes and queues a command, tracing it first.
    pub fn send<W: Write>(
        &self,
        command: &Outbound,
        printer: &mut Printer<W>,
    ) -> Result<(), ClientError> {
        let json = command.to_json()?;
        printer.debug_send(&json)?;
        self.transmit(tungstenite::Message::Text(json.into()))
    }

    pub(crate) fn transmit(&self, msg: tungstenite::Message) -> Result<(), ClientError> {
        if self.is_closed() {
            return Err(ClientError::Closed);
        }
        self.write_tx.send(msg).map_err(|_| ClientError::Closed)
    }

    /// Closes the socket if it is not closed already.
    pub fn close(&mut self) {
        if self.is_closed() {
            return;
        }
        self.state = SessionState::Closed;
        // The write pump may already be gone after a write error.
        let _ = self.write_tx.send(tungstenite::Message::Close(None));
    }
}
