//! Subcommand handlers.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::AsyncReadExt;
use validata::engine::Validator;
use validata::schema::RecordSchema;

use crate::settings::Settings;

/// Arguments for `validata check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Record schema (`.json` or `.toml`).
    #[arg(long, short)]
    pub schema: PathBuf,

    /// JSON payload to validate; `-` reads standard input.
    #[arg(long, short, default_value = "-")]
    pub input: PathBuf,

    /// Message locale; defaults to the configured `default_locale`.
    #[arg(long, short)]
    pub locale: Option<String>,

    /// Treat unknown directives and bad parameters as faults.
    #[arg(long)]
    pub strict: bool,
}

/// How a `check` run ended when no fault occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
}

impl Verdict {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Passed => 0,
            Self::Failed => 1,
        }
    }
}

/// Validates the payload and writes the error map (or `null`) as pretty JSON.
pub async fn run_check(args: &CheckArgs, settings: &Settings, out: &mut impl Write) -> Result<Verdict> {
    let schema = RecordSchema::load(&args.schema)
        .with_context(|| format!("loading schema {}", args.schema.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&read_input(&args.input).await?)
        .with_context(|| format!("parsing payload {}", args.input.display()))?;

    let mut config = settings.validator_config();
    config.strict_rules |= args.strict;
    let validator = Validator::builder()
        .config(config)
        .build()
        .context("building validator")?;

    let result = validator
        .validate_json(&schema, &payload, args.locale.as_deref())
        .await?;
    tracing::info!(
        failures = result.as_ref().map_or(0, |r| r.error_count()),
        "payload checked"
    );

    serde_json::to_writer_pretty(&mut *out, &result)?;
    writeln!(out)?;

    Ok(if result.is_some() { Verdict::Failed } else { Verdict::Passed })
}

/// Lists registered locale tags, marking the default.
pub fn run_locales(settings: &Settings, out: &mut impl Write) -> Result<()> {
    let config = settings.validator_config();
    let locales = config.locales()?.with_default(&config.default_locale);
    for tag in locales.tags() {
        if tag == locales.default_tag() {
            writeln!(out, "{tag} (default)")?;
        } else {
            writeln!(out, "{tag}")?;
        }
    }
    Ok(())
}

async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("reading standard input")?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}
