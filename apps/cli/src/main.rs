//! # validata CLI
//!
//! `validata check` validates a JSON payload against a record schema and
//! prints the error map; `validata locales` lists the message tables.
//!
//! Exit codes: 0 when the payload passes, 1 when a field fails, 2 on any
//! fault (unreadable input, bad schema, misconfigured rules).

mod commands;
mod settings;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, run_check, run_locales};
use settings::{Overrides, Settings};

const FAULT: u8 = 2;

/// Declarative rule-chain validation for JSON payloads.
#[derive(Parser, Debug)]
#[command(name = "validata", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file; defaults to `validata.toml` in the working directory.
    #[arg(long, global = true, env = "VALIDATA_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a JSON payload against a record schema.
    Check(CheckArgs),

    /// List available message locales.
    Locales,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let strict = matches!(&self.command, Commands::Check(args) if args.strict);
        Overrides {
            strict_rules: strict.then_some(true),
            json_logs: self.json_logs.then_some(true),
        }
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref(), &cli.overrides()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("validata: invalid configuration: {e}");
            return ExitCode::from(FAULT);
        }
    };
    init_tracing(cli.verbose, settings.json_logs);
    tracing::debug!(?settings, "configuration loaded");

    let mut stdout = io::stdout().lock();
    let result = match &cli.command {
        Commands::Check(args) => run_check(args, &settings, &mut stdout)
            .await
            .map(|verdict| verdict.exit_code()),
        Commands::Locales => run_locales(&settings, &mut stdout).map(|()| 0),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("validata: {e:#}");
            ExitCode::from(FAULT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_check_with_defaults() {
        let cli = Cli::try_parse_from(["validata", "check", "--schema", "signup.json"]).unwrap();
        let Commands::Check(args) = &cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.schema, PathBuf::from("signup.json"));
        assert_eq!(args.input, PathBuf::from("-"));
        assert_eq!(args.locale, None);
        assert!(!args.strict);
        assert_eq!(cli.overrides().strict_rules, None);
    }

    #[test]
    fn parse_check_with_flags() {
        let cli = Cli::try_parse_from([
            "validata", "-vv", "check", "-s", "s.toml", "-i", "p.json", "--locale", "fr", "--strict",
            "--json-logs",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.json_logs);
        let overrides = cli.overrides();
        assert_eq!(overrides.strict_rules, Some(true));
        assert_eq!(overrides.json_logs, Some(true));
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.locale.as_deref(), Some("fr"));
        assert_eq!(args.input, PathBuf::from("p.json"));
    }

    #[test]
    fn parse_locales() {
        let cli = Cli::try_parse_from(["validata", "locales"]).unwrap();
        assert!(matches!(cli.command, Commands::Locales));
    }

    #[test]
    fn check_requires_a_schema() {
        assert!(Cli::try_parse_from(["validata", "check"]).is_err());
    }
}
