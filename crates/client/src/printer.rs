//! Output sink for rendered lines and debug traces.

use std::io::{self, Write};

use serde_json::Value;

use crate::color::{ColorResolver, DEBUG_CATEGORY, Painted};

/// Writes colored lines to the output sink.
pub struct Printer<W: Write> {
    out: W,
    colors: ColorResolver<'static>,
    debug: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, colors: ColorResolver<'static>, debug: bool) -> Self {
        Self { out, colors, debug }
    }

    pub fn colors(&self) -> &ColorResolver<'static> {
        &self.colors
    }

    /// Writes one line colored for `category`/`status`.
    ///
    /// The terminator follows the color reset.
    pub fn print_line(&mut self, category: &str, status: Option<&Value>, line: &str) -> io::Result<()> {
        let color = self.colors.resolve(category, status);
        let mut painted = Painted::begin(&mut self.out, color)?;
        painted.write_all(line.as_bytes())?;
        painted.finish()?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    /// Traces a message when debugging is enabled.
    pub fn debug(&mut self, msg: &str) -> io::Result<()> {
        if !self.debug {
            return Ok(());
        }
        self.print_line(DEBUG_CATEGORY, None, msg)
    }

    pub fn debug_send(&mut self, msg: &str) -> io::Result<()> {
        if !self.debug {
            return Ok(());
        }
        self.debug(&format!("-> {msg}"))
    }

    pub fn debug_recv(&mut self, msg: &str) -> io::Result<()> {
        if !self.debug {
            return Ok(());
        }
        self.debug(&format!("<- {msg}"))
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
