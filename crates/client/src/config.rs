//! Client configuration.

use std::collections::BTreeSet;

use crate::error::ConfigError;
use crate::filter::Filter;
use crate::format::ColumnSpec;

/// Settings for one stream session.
///
/// Defaults are applied once by [`ClientConfig::new`]; the `with_*`
/// methods override them before the session starts.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Prefix for connection-level log messages.
    pub log_prefix: String,
    pub filter: Filter,
    pub columns: ColumnSpec,
    /// Never emit color escape sequences.
    pub no_color: bool,
    /// Trace every frame sent and received to the output.
    pub debug: bool,
    /// Stream types to subscribe to when the server offers them.
    pub allowed_types: BTreeSet<String>,
}

impl ClientConfig {
    pub fn new<I, S>(allowed_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            log_prefix: String::new(),
            filter: Filter::default(),
            columns: ColumnSpec::default(),
            no_color: false,
            debug: false,
            allowed_types: allowed_types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_prefix = prefix.into();
        self
    }

    /// Adds a show pattern: records whose `field` does not match are dropped.
    pub fn with_show(mut self, field: impl Into<String>, pattern: &str) -> Result<Self, ConfigError> {
        self.filter.shows.insert(field, pattern)?;
        Ok(self)
    }

    /// Adds a hide pattern: records whose `field` matches are dropped.
    pub fn with_hide(mut self, field: impl Into<String>, pattern: &str) -> Result<Self, ConfigError> {
        self.filter.hides.insert(field, pattern)?;
        Ok(self)
    }

    pub fn with_columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = ColumnSpec::new(names);
        self
    }

    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Whether offers of `stream_type` should be subscribed to.
    pub fn allows(&self, stream_type: &str) -> bool {
        self.allowed_types.contains(stream_type)
    }
}
