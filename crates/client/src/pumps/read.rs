//! WebSocket read pump: decodes frames and drives the dispatcher.

use std::io::Write;

use futures_util::StreamExt;
use tokio_tungstenite::tungstenite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use logstream_protocol::InboundMessage;

use crate::dispatch::{Dispatcher, Flow};
use crate::error::ClientError;
use crate::session::Session;

/// Reads frames until the peer closes, the transport fails, a fault
/// arrives or `shutdown` fires. The session is closed on every exit.
///
/// Transport failures, including frames over the socket's size limit, are
/// logged and end the loop normally; undecodable frames and output failures
/// are returned as errors.
pub(crate) async fn read_pump<S, W>(
    read: S,
    dispatcher: &mut Dispatcher<W>,
    session: &mut Session,
    shutdown: &CancellationToken,
) -> Result<(), ClientError>
where
    S: StreamExt<Item = Result<tungstenite::Message, tungstenite::Error>> + Unpin,
    W: Write,
{
    let result = pump(read, dispatcher, session, shutdown).await;
    session.close();
    result
}

async fn pump<S, W>(
    mut read: S,
    dispatcher: &mut Dispatcher<W>,
    session: &mut Session,
    shutdown: &CancellationToken,
) -> Result<(), ClientError>
where
    S: StreamExt<Item = Result<tungstenite::Message, tungstenite::Error>> + Unpin,
    W: Write,
{
    let prefix = dispatcher.config().log_prefix.clone();

    loop {
        tokio::select! {
            () = shutdown.cancelled() => {
                debug!("shutdown requested");
                return Ok(());
            }

            msg = read.next() => {
                match msg {
                    Some(Ok(tungstenite::Message::Text(text))) => {
                        match handle_text(text.as_str(), dispatcher, session) {
                            Ok(Flow::Continue) => {}
                            Ok(Flow::Close) => return Ok(()),
                            Err(ClientError::Closed) => {
                                info!("{prefix}: connection closed");
                                return Ok(());
                            }
                            Err(e) => return Err(e),
                        }
                    }
                    Some(Ok(tungstenite::Message::Ping(data))) => {
                        trace!("received ping, sending pong");
                        if session.transmit(tungstenite::Message::Pong(data)).is_err() {
                            info!("{prefix}: connection closed");
                            return Ok(());
                        }
                    }
                    Some(Ok(tungstenite::Message::Pong(_))) => {
                        trace!("received pong");
                    }
                    Some(Ok(tungstenite::Message::Close(frame))) => {
                        debug!(?frame, "received close frame");
                        info!("{prefix}: connection closed");
                        return Ok(());
                    }
                    Some(Ok(_)) => {} // Binary and raw frames are ignored.
                    Some(Err(e)) => {
                        info!("{prefix}: error: {e}");
                        return Ok(());
                    }
                    None => {
                        info!("{prefix}: connection closed");
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Handles one text frame.
fn handle_text<W: Write>(
    text: &str,
    dispatcher: &mut Dispatcher<W>,
    session: &mut Session,
) -> Result<Flow, ClientError> {
    dispatcher.printer_mut().debug_recv(text)?;
    let msg = InboundMessage::decode(text)?;
    trace!(cmd = %msg.command(), "received message");
    dispatcher.dispatch(session, &msg)
}
