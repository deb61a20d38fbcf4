//! Optional configuration file.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/logstream/config.toml`, falling back
//! to `~/.config/logstream/config.toml`. Command-line flags override it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use logstream_client::{ClientConfig, ConfigError};
use logstream_protocol::constants::KNOWN_STREAM_TYPES;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// File-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Stream types to subscribe to.
    #[serde(default = "default_types")]
    pub types: Vec<String>,

    /// Fields to print, in order.
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,

    /// Field name to pattern; records must match all.
    #[serde(default)]
    pub shows: BTreeMap<String, String>,

    /// Field name to pattern; records matching any are hidden.
    #[serde(default)]
    pub hides: BTreeMap<String, String>,

    #[serde(default)]
    pub no_color: bool,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub log_prefix: String,
}

fn default_types() -> Vec<String> {
    KNOWN_STREAM_TYPES.iter().map(|t| (*t).to_owned()).collect()
}

fn default_columns() -> Vec<String> {
    vec!["text".into()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            types: default_types(),
            columns: default_columns(),
            shows: BTreeMap::new(),
            hides: BTreeMap::new(),
            no_color: false,
            debug: false,
            log_prefix: String::new(),
        }
    }
}

impl Settings {
    /// Loads `explicit` if given, else the default file if it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(settings)
    }

    /// Applies command-line overrides.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if !cli.types.is_empty() {
            self.types = cli.types.clone();
        }
        if !cli.columns.is_empty() {
            self.columns = cli.columns.clone();
        }
        self.shows.extend(cli.show.iter().cloned());
        self.hides.extend(cli.hide.iter().cloned());
        self.no_color |= cli.no_color;
        self.debug |= cli.debug;
        if let Some(prefix) = &cli.log_prefix {
            self.log_prefix = prefix.clone();
        }
        self
    }

    /// Compiles patterns and builds the client configuration.
    pub fn into_client_config(self) -> Result<ClientConfig, ConfigError> {
        let mut config = ClientConfig::new(self.types)
            .with_log_prefix(self.log_prefix)
            .with_columns(self.columns)
            .with_no_color(self.no_color)
            .with_debug(self.debug);
        for (field, pattern) in &self.shows {
            config = config.with_show(field.as_str(), pattern)?;
        }
        for (field, pattern) in &self.hides {
            config = config.with_hide(field.as_str(), pattern)?;
        }
        Ok(config)
    }
}

/// Returns the default configuration file path, if a home can be found.
fn config_path() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(std::env::var_os("HOME")?).join(".config"),
    };
    Some(base.join("logstream").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.types.len(), KNOWN_STREAM_TYPES.len());
        assert_eq!(settings.columns, ["text"]);
        assert!(settings.shows.is_empty());
        assert!(settings.hides.is_empty());
        assert!(!settings.no_color);
        assert!(!settings.debug);
        assert!(settings.log_prefix.is_empty());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(r#"columns = ["type", "text"]"#).unwrap();
        assert_eq!(settings.columns, ["type", "text"]);
        assert_eq!(settings.types, default_types());
    }

    #[test]
    fn settings_roundtrip_toml() {
        let mut settings = Settings::default();
        settings.types = vec!["php-error".into()];
        settings.hides.insert("text".into(), "favicon".into());
        settings.no_color = true;

        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "types = [\"apache-request\"]\nno_color = true\n\n[shows]\nhttp_status = \"^5\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.types, ["apache-request"]);
        assert!(settings.no_color);
        assert_eq!(settings.shows.get("http_status").unwrap(), "^5");
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(tmp.path().join("nope.toml").as_path())).is_err());
    }

    #[test]
    fn cli_overrides_file() {
        let cli = Cli::try_parse_from([
            "logstream",
            "ws://localhost/",
            "-t",
            "bal-access",
            "--show",
            "server=^web",
            "--debug",
            "--log-prefix",
            "mine",
        ])
        .unwrap();

        let mut file = Settings::default();
        file.shows.insert("server".into(), "^bal".into());
        file.columns = vec!["server".into(), "text".into()];

        let merged = file.merge_cli(&cli);
        assert_eq!(merged.types, ["bal-access"]);
        assert_eq!(merged.shows.get("server").unwrap(), "^web");
        assert_eq!(merged.columns, ["server", "text"]);
        assert!(merged.debug);
        assert_eq!(merged.log_prefix, "mine");
    }

    #[test]
    fn into_client_config_compiles_patterns() {
        let mut settings = Settings::default();
        settings.shows.insert("log_type".into(), "^apache".into());
        let config = settings.into_client_config().unwrap();
        assert!(config.allows("php-error"));
        assert!(config.filter.shows.get("log_type").is_some());

        let mut bad = Settings::default();
        bad.hides.insert("text".into(), "(".into());
        assert!(bad.into_client_config().is_err());
    }

    #[test]
    fn config_path_names_logstream() {
        if let Some(path) = config_path() {
            assert!(path.ends_with("logstream/config.toml"));
        }
    }
}
