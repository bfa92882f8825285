//! Subcommand handlers.

use std::path::Path;

use anyhow::Context;
use stencil_application::substitutor::extract_keys;
use stencil_application::{RenderInput, RenderTemplate};
use stencil_domain::placeholder::ResolvedKey;
use stencil_domain::store::VariableMap;
use stencil_infrastructure::{FileStoreRepository, ProcessEnvLookup, TokioFileSystem};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};

use crate::cli::{KeysArgs, RenderArgs};

/// Renders a template to stdout.
pub async fn render(args: RenderArgs) -> anyhow::Result<()> {
    let spec = args.delimiters.to_spec().context("invalid delimiters")?;
    let text = read_input(args.file.as_deref()).await?;

    let environment = args
        .env_prefix
        .as_deref()
        .map_or_else(VariableMap::new, |prefix| ProcessEnvLookup::new(prefix).snapshot());
    debug!(count = environment.len(), "environment variables collected");

    let input = RenderInput {
        spec,
        variable_files: args.variable_files,
        records: args.records,
        environment,
        overrides: args.overrides,
        strict: args.strict,
    };

    let use_case = RenderTemplate::new(FileStoreRepository::new(TokioFileSystem::new()));
    let output = use_case.execute(&input, &text).await?;

    info!(
        resolved = output.report.resolved_count(),
        unresolved = output.report.unresolved_count(),
        escaped = output.report.escaped,
        "template rendered"
    );

    let mut stdout = tokio::io::stdout();
    stdout.write_all(output.text().as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

/// Prints the keys of the in-scope placeholders, one per line.
pub async fn keys(args: KeysArgs) -> anyhow::Result<()> {
    let spec = args.delimiters.to_spec().context("invalid delimiters")?;
    let text = read_input(args.file.as_deref()).await?;

    let mut listing = String::new();
    for raw_key in extract_keys(&spec, &text) {
        if ResolvedKey::parse(&raw_key, spec.scope()).is_some() {
            listing.push_str(&raw_key);
            listing.push('\n');
        }
    }

    let mut stdout = tokio::io::stdout();
    stdout.write_all(listing.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

async fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
