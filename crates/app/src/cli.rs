//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use stencil_application::RecordSource;
use stencil_domain::delimiter::DelimiterSpec;
use stencil_domain::error::DomainResult;

/// Substitute placeholders in text.
#[derive(Debug, Parser)]
#[command(name = "stencil", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a template to stdout.
    Render(RenderArgs),

    /// List the placeholder keys found in a template.
    Keys(KeysArgs),
}

/// Placeholder syntax shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct DelimiterArgs {
    /// Token opening a placeholder.
    #[arg(long, env = "STENCIL_OPEN", default_value = "${")]
    pub open: String,

    /// Token closing a placeholder.
    #[arg(long, env = "STENCIL_CLOSE", default_value = "}")]
    pub close: String,

    /// Only placeholders whose key starts with this prefix are substituted.
    #[arg(long, env = "STENCIL_SCOPE", default_value = "")]
    pub scope: String,
}

impl DelimiterArgs {
    /// Builds the delimiter spec, rejecting empty tokens.
    pub fn to_spec(&self) -> DomainResult<DelimiterSpec> {
        DelimiterSpec::new(self.open.as_str(), self.close.as_str(), self.scope.as_str())
    }
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template file; stdin when omitted.
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub delimiters: DelimiterArgs,

    /// JSON or YAML variable file; later files override earlier ones.
    #[arg(long = "vars", value_name = "FILE")]
    pub variable_files: Vec<PathBuf>,

    /// Record addressed by key prefix, e.g. `.input=request.json`.
    #[arg(long = "record", value_name = "SCOPE=FILE", value_parser = parse_record)]
    pub records: Vec<RecordSource>,

    /// Explicit value, highest priority.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<(String, String)>,

    /// Expose environment variables carrying this prefix, prefix stripped.
    #[arg(long, env = "STENCIL_ENV_PREFIX")]
    pub env_prefix: Option<String>,

    /// Fail when a placeholder has neither a value nor a default.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct KeysArgs {
    /// Template file; stdin when omitted.
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub delimiters: DelimiterArgs,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

fn parse_record(raw: &str) -> Result<RecordSource, String> {
    match raw.split_once('=') {
        Some((scope, path)) if !path.is_empty() => Ok(RecordSource::new(scope, path)),
        _ => Err(format!("expected SCOPE=FILE, got `{raw}`")),
    }
}
