//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use logstream_protocol::ConnectDescriptor;

/// Stream live logs from a hosted environment
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// WebSocket endpoint of the log broadcaster
    #[arg(env = "LOGSTREAM_URL")]
    pub url: String,

    /// JSON file holding the signed connect descriptor (site, environment, t, hmac);
    /// takes precedence over the individual flags
    #[arg(long, value_name = "PATH")]
    pub descriptor: Option<PathBuf>,

    /// Site identifier
    #[arg(long, env = "LOGSTREAM_SITE")]
    pub site: Option<String>,

    /// Environment identifier
    #[arg(long = "env", env = "LOGSTREAM_ENV")]
    pub environment: Option<String>,

    /// Time the credential was issued (Unix seconds)
    #[arg(long, env = "LOGSTREAM_TIME")]
    pub time: Option<u64>,

    /// Signed credential
    #[arg(long, env = "LOGSTREAM_HMAC", hide_env_values = true)]
    pub hmac: Option<String>,

    /// Stream type to subscribe to (repeatable; default: all known types)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Only show records whose FIELD matches REGEX (repeatable)
    #[arg(long, value_name = "FIELD=REGEX", value_parser = parse_field_pattern)]
    pub show: Vec<(String, String)>,

    /// Hide records whose FIELD matches REGEX (repeatable)
    #[arg(long, value_name = "FIELD=REGEX", value_parser = parse_field_pattern)]
    pub hide: Vec<(String, String)>,

    /// Field to print, in order (repeatable; default: text)
    #[arg(short, long = "column", value_name = "FIELD")]
    pub columns: Vec<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Trace every frame sent and received
    #[arg(long)]
    pub debug: bool,

    /// Prefix for connection messages
    #[arg(long, value_name = "PREFIX")]
    pub log_prefix: Option<String>,

    /// Configuration file (default: ~/.config/logstream/config.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Builds the connect descriptor from `--descriptor` or the individual flags.
    pub fn descriptor(&self) -> anyhow::Result<ConnectDescriptor> {
        if let Some(path) = &self.descriptor {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            return serde_json::from_str(&data)
                .with_context(|| format!("invalid descriptor in {}", path.display()));
        }

        match (&self.site, &self.environment, self.time, &self.hmac) {
            (Some(site), Some(environment), Some(t), Some(hmac)) => Ok(ConnectDescriptor {
                site: site.clone(),
                environment: environment.clone(),
                t,
                hmac: hmac.clone(),
            }),
            _ => bail!("either --descriptor or all of --site, --env, --time and --hmac are required"),
        }
    }
}

fn parse_field_pattern(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, pattern)) if !field.is_empty() => Ok((field.to_owned(), pattern.to_owned())),
        _ => Err(format!("expected FIELD=REGEX, got `{s}`")),
    }
}
