//! Show/hide predicates over record fields.

use std::collections::BTreeMap;

use logstream_protocol::{InboundMessage, field_to_string};
use regex::Regex;

use crate::error::ConfigError;

/// Field name to pattern mapping.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: BTreeMap<String, Regex>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `pattern` and registers it for `field`, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, pattern: &str) -> Result<(), ConfigError> {
        let field = field.into();
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            field: field.clone(),
            source,
        })?;
        self.patterns.insert(field, regex);
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&Regex> {
        self.patterns.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Record filter built from show and hide pattern sets.
///
/// Only fields present in a record are tested. A show pattern for a field
/// the record lacks constrains nothing; a hide pattern for it hides nothing.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub shows: PatternSet,
    pub hides: PatternSet,
}

impl Filter {
    pub fn new(shows: PatternSet, hides: PatternSet) -> Self {
        Self { shows, hides }
    }

    /// Every present field with a show pattern matches it.
    pub fn shown(&self, record: &InboundMessage) -> bool {
        record.fields().iter().all(|(name, value)| {
            self.shows
                .get(name)
                .is_none_or(|pattern| pattern.is_match(&field_to_string(value)))
        })
    }

    /// Some present field with a hide pattern matches it.
    pub fn hidden(&self, record: &InboundMessage) -> bool {
        record.fields().iter().any(|(name, value)| {
            self.hides
                .get(name)
                .is_some_and(|pattern| pattern.is_match(&field_to_string(value)))
        })
    }

    pub fn accepts(&self, record: &InboundMessage) -> bool {
        self.shown(record) && !self.hidden(record)
    }
}
