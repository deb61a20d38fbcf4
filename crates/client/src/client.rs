//! WebSocket client for streaming one environment's logs.
//!
//! Waits for the broadcaster to announce readiness, authenticates with the
//! caller's signed descriptor, subscribes to the offered stream types that
//! are allowed and prints every record that passes the filter.

use std::io::Write;

use futures_util::{Sink, Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use logstream_protocol::ConnectDescriptor;
use logstream_protocol::constants::{WS_MAX_MESSAGE_SIZE, WS_WRITE_WAIT};

use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::error::ClientError;
use crate::pumps::read::read_pump;
use crate::pumps::write::write_pump;
use crate::session::Session;

/// Log stream client writing rendered records to `W`.
pub struct LogStreamClient<W: Write> {
    dispatcher: Dispatcher<W>,
}

impl<W: Write> LogStreamClient<W> {
    pub fn new(config: ClientConfig, out: W) -> Self {
        Self {
            dispatcher: Dispatcher::new(config, out),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    pub fn output(&self) -> &W {
        self.dispatcher.output()
    }

    /// Connects to `url` and streams until the connection ends.
    ///
    /// Cancelling `shutdown` ends the session cleanly and returns `Ok`.
    /// A failed connect is logged at the configured prefix like any other
    /// transport error and also returns `Ok`.
    pub async fn run(
        &mut self,
        url: &str,
        descriptor: ConnectDescriptor,
        shutdown: &CancellationToken,
    ) -> Result<(), ClientError> {
        self.dispatcher
            .printer_mut()
            .debug_send(&format!("connect to {url}"))?;

        let mut ws_config = tungstenite::protocol::WebSocketConfig::default();
        ws_config.max_message_size = Some(WS_MAX_MESSAGE_SIZE);
        ws_config.max_frame_size = Some(WS_MAX_MESSAGE_SIZE);
        let connect = tokio_tungstenite::connect_async_with_config(url, Some(ws_config), false);

        let ws_stream = tokio::select! {
            biased;
            () = shutdown.cancelled() => {
                debug!("shutdown requested while connecting");
                return Ok(());
            }
            result = connect => match result {
                Ok((ws_stream, _)) => ws_stream,
                Err(e) => {
                    info!("{}: error: {e}", self.config().log_prefix);
                    return Ok(());
                }
            },
        };
        let (write, read) = ws_stream.split();

        self.run_with_stream(read, write, descriptor, shutdown).await
    }

    /// Runs one session over an already-open socket.
    pub async fn run_with_stream<R, S>(
        &mut self,
        read: R,
        write: S,
        descriptor: ConnectDescriptor,
        shutdown: &CancellationToken,
    ) -> Result<(), ClientError>
    where
        R: Stream<Item = Result<tungstenite::Message, tungstenite::Error>> + Unpin,
        S: Sink<tungstenite::Message, Error = tungstenite::Error> + Unpin + Send + 'static,
    {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let mut write_handle = tokio::spawn(write_pump(write, write_rx));

        let mut session = Session::new(descriptor, write_tx);
        session.opened();
        debug!(site = %session.descriptor().site, "socket open, waiting for server");

        let result = read_pump(read, &mut self.dispatcher, &mut session, shutdown).await;

        // Dropping the session closes the queue so the pump can finish.
        drop(session);
        if tokio::time::timeout(WS_WRITE_WAIT, &mut write_handle)
            .await
            .is_err()
        {
            warn!("write pump did not finish in time, aborting");
            write_handle.abort();
        }

        result
    }
}
