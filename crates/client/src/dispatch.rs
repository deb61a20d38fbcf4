//! Per-frame command dispatch.

use std::io::Write;

use tracing::{debug, trace, warn};

use logstream_protocol::{Ack, Command, InboundMessage, Offer};

use crate::color::{ColorResolver, ColorTable, ERROR_CATEGORY};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::format::{CATEGORY_FIELD, STATUS_FIELD};
use crate::printer::Printer;
use crate::session::Session;

/// What the read loop should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The session was closed; stop reading.
    Close,
}

/// Interprets decoded frames against the session, filter and printer.
pub struct Dispatcher<W: Write> {
    config: ClientConfig,
    printer: Printer<W>,
}

impl<W: Write> Dispatcher<W> {
    pub fn new(config: ClientConfig, out: W) -> Self {
        let colors = ColorResolver::new(ColorTable::builtin(), config.no_color);
        let printer = Printer::new(out, colors, config.debug);
        Self { config, printer }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn printer_mut(&mut self) -> &mut Printer<W> {
        &mut self.printer
    }

    pub fn output(&self) -> &W {
        self.printer.get_ref()
    }

    pub fn dispatch(
        &mut self,
        session: &mut Session,
        msg: &InboundMessage,
    ) -> Result<Flow, ClientError> {
        match msg.command() {
            Command::Ready => {
                session.on_ready(&mut self.printer)?;
                Ok(Flow::Continue)
            }
            Command::Ack => {
                let ack: Ack = msg.parse_fields()?;
                let color = self
                    .printer
                    .colors()
                    .resolve(ERROR_CATEGORY, ack.code.as_ref());
                trace!(code = ?ack.code, ?color, "command acknowledged");
                Ok(Flow::Continue)
            }
            Command::Fault => {
                let body = serde_json::to_string(msg)?;
                self.printer
                    .print_line(ERROR_CATEGORY, msg.get("code"), &body)?;
                session.close();
                Ok(Flow::Close)
            }
            Command::Offer => {
                self.handle_offer(session, msg)?;
                Ok(Flow::Continue)
            }
            Command::Record => {
                if self.config.filter.accepts(msg) {
                    let line = self.config.columns.render(msg);
                    self.printer.print_line(
                        &msg.field_str(CATEGORY_FIELD),
                        msg.get(STATUS_FIELD),
                        &line,
                    )?;
                }
                Ok(Flow::Continue)
            }
            Command::Unknown(tag) => {
                trace!(cmd = %tag, "ignoring unrecognised command");
                Ok(Flow::Continue)
            }
        }
    }

    fn handle_offer(&mut self, session: &mut Session, msg: &InboundMessage) -> Result<(), ClientError> {
        let offer: Offer = match msg.parse_fields() {
            Ok(offer) => offer,
            Err(e) => {
                warn!("ignoring malformed offer: {e}");
                return Ok(());
            }
        };
        match offer.stream_type {
            Some(stream_type) if self.config.allows(&stream_type) => {
                session.subscribe(stream_type, offer.server, &mut self.printer)
            }
            other => {
                debug!(stream_type = ?other, "stream type not allowed, skipping");
                Ok(())
            }
        }
    }
}
