//! Category colors and scoped ANSI painting.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::LazyLock;

use logstream_protocol::field_to_string;
use regex::Regex;
use serde_json::Value;

/// Reserved category for client-side error output.
pub const ERROR_CATEGORY: &str = "logtailor-error";

/// Reserved category for debug tracing.
pub const DEBUG_CATEGORY: &str = "logtailor-debug";

const RESET: &[u8] = b"\x1b[0m";

/// SGR parameters of one terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(&'static str);

impl Color {
    pub const GREEN: Self = Self("32;1");
    pub const RED: Self = Self("31;1");
    pub const YELLOW: Self = Self("33;1");
    pub const BLUE: Self = Self("34;1");
    /// White on cyan.
    pub const CYAN: Self = Self("46;37;1");

    pub fn code(self) -> &'static str {
        self.0
    }
}

/// Color rule for one category.
#[derive(Debug, Clone)]
pub enum ColorEntry {
    Fixed(Color),
    /// Status patterns tried in order; the first match wins.
    ByStatus(Vec<(Regex, Color)>),
}

impl ColorEntry {
    fn resolve(&self, status: Option<&Value>) -> Option<Color> {
        match self {
            Self::Fixed(color) => Some(*color),
            Self::ByStatus(rules) => {
                let status = status.map(field_to_string).unwrap_or_default();
                rules
                    .iter()
                    .find(|(pattern, _)| pattern.is_match(&status))
                    .map(|(_, color)| *color)
            }
        }
    }
}

/// Mapping from record category to color rule.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    entries: HashMap<String, ColorEntry>,
}

static BUILTIN: LazyLock<ColorTable> = LazyLock::new(|| {
    let http_status = || {
        ColorEntry::ByStatus(vec![
            (status_pattern("^5"), Color::RED),
            (status_pattern("^4"), Color::YELLOW),
            (status_pattern("^[123]"), Color::GREEN),
        ])
    };

    let mut table = ColorTable::new();
    table.insert("apache-request", http_status());
    table.insert("bal-access", http_status());
    table.insert("apache-error", ColorEntry::Fixed(Color::RED));
    table.insert("php-error", ColorEntry::Fixed(Color::RED));
    table.insert("drupal-watchdog", ColorEntry::Fixed(Color::BLUE));
    table.insert(ERROR_CATEGORY, ColorEntry::Fixed(Color::RED));
    table.insert(DEBUG_CATEGORY, ColorEntry::Fixed(Color::CYAN));
    table
});

fn status_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in status patterns are constants and must be valid")
}

impl ColorTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table for the categories the broadcaster emits.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn insert(&mut self, category: impl Into<String>, entry: ColorEntry) {
        self.entries.insert(category.into(), entry);
    }

    /// Looks up a color. Unknown categories and unmatched statuses yield `None`.
    pub fn lookup(&self, category: &str, status: Option<&Value>) -> Option<Color> {
        self.entries.get(category)?.resolve(status)
    }
}

/// Resolves colors against a table, honouring the no-color setting.
#[derive(Debug, Clone, Copy)]
pub struct ColorResolver<'a> {
    table: &'a ColorTable,
    no_color: bool,
}

impl<'a> ColorResolver<'a> {
    pub fn new(table: &'a ColorTable, no_color: bool) -> Self {
        Self { table, no_color }
    }

    pub fn resolve(&self, category: &str, status: Option<&Value>) -> Option<Color> {
        if self.no_color {
            return None;
        }
        self.table.lookup(category, status)
    }
}

/// A writer wrapped in a color scope.
///
/// The opening sequence is written by [`Painted::begin`]; the reset is
/// written by [`Painted::finish`] or, failing that, on drop. Nothing is
/// written for either side when no color was resolved.
pub struct Painted<'w, W: Write> {
    out: &'w mut W,
    color: Option<Color>,
}

impl<'w, W: Write> Painted<'w, W> {
    pub fn begin(out: &'w mut W, color: Option<Color>) -> io::Result<Self> {
        if let Some(color) = color {
            write!(out, "\x1b[{}m", color.code())?;
        }
        Ok(Self { out, color })
    }

    /// Closes the scope, reporting a failed reset write.
    pub fn finish(mut self) -> io::Result<()> {
        match self.color.take() {
            Some(_) => self.out.write_all(RESET),
            None => Ok(()),
        }
    }
}

impl<W: Write> Write for Painted<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Drop for Painted<'_, W> {
    fn drop(&mut self) {
        if self.color.is_some() {
            let _ = self.out.write_all(RESET);
        }
    }
}
