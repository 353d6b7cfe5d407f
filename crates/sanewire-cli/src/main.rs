use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use glob::glob;
use sanewire_core::{
    DecodeError, DecodeFileError, DecodeOptions, DecodeReport, NullPointerPolicy, ResponseKind,
};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("SANEWIRE_BUILD_COMMIT"),
    ", built ",
    env!("SANEWIRE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "sanewire")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode captured SANE network daemon responses into JSON reports.",
    long_about = None,
    after_help = "Examples:\n  sanewire decode device-list reply.bin -o report.json\n  sanewire decode parameters reply.bin --stdout --pretty"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one response from a file of raw reply bytes.
    #[command(
        after_help = "Examples:\n  sanewire decode device-list reply.bin -o report.json\n  sanewire decode string 'captures/*.bin' --stdout"
    )]
    Decode {
        /// Response layout expected at the start of the input
        #[arg(value_enum)]
        kind: KindArg,

        /// Path (or glob matching one file) holding raw response bytes
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if bytes remain after the response
        #[arg(long)]
        strict: bool,

        /// Fail on null device pointers instead of decoding the record anyway
        #[arg(long)]
        reject_null_pointers: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Word,
    String,
    Status,
    DeviceList,
    Parameters,
}

impl From<KindArg> for ResponseKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Word => ResponseKind::Word,
            KindArg::String => ResponseKind::String,
            KindArg::Status => ResponseKind::Status,
            KindArg::DeviceList => ResponseKind::DeviceList,
            KindArg::Parameters => ResponseKind::Parameters,
        }
    }
}

struct DecodeArgs {
    kind: ResponseKind,
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    options: DecodeOptions,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            kind,
            input,
            report,
            stdout,
            pretty,
            compact,
            quiet,
            strict,
            reject_null_pointers,
        } => {
            init_logging(cli.verbose, quiet);
            let policy = if reject_null_pointers {
                NullPointerPolicy::Reject
            } else {
                NullPointerPolicy::Decode
            };
            cmd_decode(DecodeArgs {
                kind: kind.into(),
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                options: DecodeOptions::default().with_null_pointer(policy),
            })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<DecodeFileError> for CliError {
    fn from(err: DecodeFileError) -> Self {
        let hint = match &err {
            DecodeFileError::Decode {
                source: DecodeError::Truncated { .. },
                ..
            } => Some("input ends inside the response; check the response kind".to_string()),
            DecodeFileError::Decode {
                source: DecodeError::ProtocolConsistency { .. },
                ..
            } => Some("drop --reject-null-pointers to decode past null pointers".to_string()),
            _ => None,
        };
        CliError::new(format!("response decoding failed: {err}"), hint)
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    tracing::debug!(input = %resolved_input.display(), kind = %args.kind, "resolved input");
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report = if args.stdout {
        None
    } else {
        Some(args.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        // A directory that does not exist yet cannot hold the input.
        let report_abs = match report_path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Some(fs::canonicalize(".")),
            Some(parent) if parent.exists() => Some(fs::canonicalize(parent)),
            _ => None,
        }
        .transpose()
        .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
        if let Some(report_dir) = report_abs {
            let report_target = report_dir.join(
                report_path
                    .file_name()
                    .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?,
            );
            if report_target == input_abs {
                return Err(CliError::new(
                    format!(
                        "report path must differ from input: {}",
                        report_path.display()
                    ),
                    Some("choose a different output path".to_string()),
                ));
            }
        }
    }

    let rep = sanewire_core::decode_file(&resolved_input, args.kind, args.options)?;
    let json = serialize_report(&rep, args.pretty, args.compact)?;

    match report {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }

            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;

            if !args.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if args.strict && !rep.fully_consumed() {
        return Err(CliError::new(
            format!(
                "{} unconsumed bytes after {} response",
                rep.unconsumed_bytes, args.kind
            ),
            Some("check the response kind or drop --strict".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &DecodeReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a file holding raw response bytes".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a file holding raw response bytes".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single response file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>();
        message.push_str("; matches: ");
        message.push_str(&listed.join(", "));
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
