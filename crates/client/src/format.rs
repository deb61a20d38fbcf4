//! Column-based rendering of log records.

use logstream_protocol::InboundMessage;

/// Field holding a record's category.
pub const CATEGORY_FIELD: &str = "log_type";

/// Field holding a record's HTTP-like status.
pub const STATUS_FIELD: &str = "http_status";

/// Column name used when none are configured.
pub const DEFAULT_COLUMN: &str = "text";

/// How one column value is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Plain,
    /// Left-aligned and padded with spaces to at least this many characters.
    LeftAligned(usize),
}

impl Template {
    /// Built-in template for a column name; unknown names render plain.
    pub fn for_column(name: &str) -> Self {
        match name {
            "type" => Self::LeftAligned(15),
            "server" => Self::LeftAligned(8),
            _ => Self::Plain,
        }
    }

    fn render_into(self, value: &str, line: &mut String) {
        match self {
            Self::Plain => line.push_str(value),
            Self::LeftAligned(width) => line.push_str(&format!("{value:<width$}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub template: Template,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let template = Template::for_column(&name);
        Self { name, template }
    }
}

/// Ordered columns of an output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    columns: Vec<Column>,
}

impl ColumnSpec {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names.into_iter().map(Column::new).collect(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Renders the configured fields of `record`, separated by single spaces.
    ///
    /// Absent fields render as empty strings, still padded to their width.
    pub fn render(&self, record: &InboundMessage) -> String {
        let mut line = String::new();
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            column
                .template
                .render_into(&record.field_str(&column.name), &mut line);
        }
        line
    }
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self::new([DEFAULT_COLUMN])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> InboundMessage {
        InboundMessage::decode(json).unwrap()
    }

    #[test]
    fn builtin_templates() {
        assert_eq!(Template::for_column("type"), Template::LeftAligned(15));
        assert_eq!(Template::for_column("server"), Template::LeftAligned(8));
        assert_eq!(Template::for_column("disp_time"), Template::Plain);
        assert_eq!(Template::for_column("text"), Template::Plain);
        assert_eq!(Template::for_column("http_status"), Template::Plain);
    }

    #[test]
    fn default_spec_renders_text_only() {
        let spec = ColumnSpec::default();
        let line = spec.render(&record(r#"{"cmd":"line","type":"x","text":"hello"}"#));
        assert_eq!(line, "hello");
    }

    #[test]
    fn type_column_is_padded() {
        let spec = ColumnSpec::new(["type", "text"]);
        let line = spec.render(&record(r#"{"cmd":"line","type":"x","text":"hello"}"#));
        assert_eq!(line, format!("{:<15} hello", "x"));
        assert_eq!(line.len(), 15 + 1 + 5);
    }

    #[test]
    fn columns_keep_configured_order() {
        let spec = ColumnSpec::new(["text", "server", "disp_time"]);
        let line = spec.render(&record(
            r#"{"cmd":"line","disp_time":"12:00","server":"web-1","text":"GET /"}"#,
        ));
        assert_eq!(line, "GET / web-1    12:00");
    }

    #[test]
    fn absent_field_renders_empty_but_padded() {
        let spec = ColumnSpec::new(["server", "text"]);
        let line = spec.render(&record(r#"{"cmd":"line","text":"t"}"#));
        assert_eq!(line, "         t");
    }

    #[test]
    fn long_values_are_not_truncated() {
        let spec = ColumnSpec::new(["server"]);
        let line = spec.render(&record(r#"{"cmd":"line","server":"staging-web-1234"}"#));
        assert_eq!(line, "staging-web-1234");
    }

    #[test]
    fn non_string_fields_render_as_json() {
        let spec = ColumnSpec::new(["http_status", "extra"]);
        let line = spec.render(&record(r#"{"cmd":"line","http_status":502,"extra":{"a":1}}"#));
        assert_eq!(line, r#"502 {"a":1}"#);
    }
}
