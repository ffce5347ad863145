//! `vouch` — verify text artifacts against the pattern library and the
//! configured verification methods.
//!
//! Exit codes: 0 accept, 1 reject, 2 uncertain or error, so automation can
//! branch on the verification result without parsing output.

mod report;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vouch_core::config::{CliOverrides, VouchConfig};
use vouch_core::errors::{VerifyError, VouchErrorCode};
use vouch_core::types::{ArtifactDomain, Decision, Verdict};
use vouch_engine::verdict::force_downgrade;
use vouch_engine::{PatternLibrary, VerificationEngine, VerifyContext};

use report::OutputFormat;

#[derive(Parser)]
#[command(name = "vouch", about = "Artifact verification engine", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify an artifact and report a verdict
    Verify(VerifyArgs),
    /// Inspect the loaded pattern library
    Rules(RulesArgs),
}

#[derive(Parser)]
struct VerifyArgs {
    /// Artifact file, or `-` to read from stdin
    input: String,

    /// Additional rule files or directories (loaded after configured ones)
    #[arg(long)]
    rules: Vec<PathBuf>,

    /// Skip automatic classification and use exactly these domains
    #[arg(long = "domain")]
    domains: Vec<String>,

    /// Restrict the run to these method ids
    #[arg(long = "method")]
    methods: Vec<String>,

    /// Language hint for classification (e.g. rust, sql)
    #[arg(long)]
    language: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Downgrade an ERROR-only REJECT to UNCERTAIN (critical rejects are
    /// hard blocks this cannot bypass)
    #[arg(long)]
    force: bool,

    /// Overall verification budget in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Matcher confidence threshold (0.0-1.0)
    #[arg(long)]
    threshold: Option<f32>,

    /// Do not load the built-in rule set
    #[arg(long)]
    no_builtin: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Parser)]
struct RulesArgs {
    #[command(subcommand)]
    command: RulesCommand,
}

#[derive(Subcommand)]
enum RulesCommand {
    /// List all loaded patterns
    List(RulesListArgs),
}

#[derive(Parser)]
struct RulesListArgs {
    /// Additional rule files or directories
    #[arg(long)]
    rules: Vec<PathBuf>,

    /// Do not load the built-in rule set
    #[arg(long)]
    no_builtin: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env("VOUCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Verify(args) => run_verify(args),
        Command::Rules(args) => match args.command {
            RulesCommand::List(args) => run_rules_list(args),
        },
    }
}

fn run_verify(args: VerifyArgs) -> ExitCode {
    let overrides = CliOverrides {
        timeout_secs: args.timeout,
        confidence_threshold: args.threshold,
        enabled_methods: None,
    };
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match VouchConfig::load(&root, Some(&overrides)) {
        Ok(config) => config,
        Err(e) => return fail(&e, e.error_code()),
    };

    let library = match build_library(&config, &args.rules, args.no_builtin) {
        Ok(library) => library,
        Err(code) => return code,
    };

    let domain_override = match parse_domains(&args.domains) {
        Ok(domains) => domains,
        Err(code) => return code,
    };

    let engine = match VerificationEngine::builder().config(&config) {
        Ok(builder) => builder.library(Arc::new(library)).build(),
        Err(e) => return fail(&e, e.error_code()),
    };

    let artifact = match read_artifact(&args.input) {
        Ok(artifact) => artifact,
        Err(message) => {
            eprintln!("vouch: {message}");
            return ExitCode::from(2);
        }
    };

    let context = VerifyContext {
        file_path: (args.input != "-").then(|| args.input.clone()),
        language: args.language.clone().or_else(|| infer_language(&args.input)),
        domain_override,
        method_allow_list: (!args.methods.is_empty()).then(|| args.methods.clone()),
    };
    let timeout = Duration::from_secs(config.engine.timeout_secs());

    match engine.verify(&artifact, &context, timeout) {
        Ok(mut verdict) => {
            if args.force {
                force_downgrade(&mut verdict);
            }
            print_verdict(&verdict, args.format, !args.no_color);
            decision_exit(verdict.decision)
        }
        Err(VerifyError::Timeout { timeout_ms, partial }) => {
            eprintln!("vouch: verification timed out after {timeout_ms}ms");
            if let Some(mut verdict) = partial.map(|b| *b) {
                if args.force {
                    force_downgrade(&mut verdict);
                }
                eprintln!("vouch: reporting partial verdict");
                print_verdict(&verdict, args.format, !args.no_color);
            }
            ExitCode::from(2)
        }
        Err(e) => fail(&e, e.error_code()),
    }
}

fn run_rules_list(args: RulesListArgs) -> ExitCode {
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match VouchConfig::load(&root, None) {
        Ok(config) => config,
        Err(e) => return fail(&e, e.error_code()),
    };
    let library = match build_library(&config, &args.rules, args.no_builtin) {
        Ok(library) => library,
        Err(code) => return code,
    };

    for pattern in library.get_patterns(&[]) {
        let description = pattern.description.as_deref().unwrap_or("");
        println!(
            "{}  {:8}  {:14}  {} signal(s)  {}",
            pattern.id,
            pattern.severity.name(),
            pattern.domain.name(),
            pattern.signals.len(),
            description
        );
    }
    println!("{} pattern(s) loaded", library.len());
    ExitCode::SUCCESS
}

/// Builtin rules (unless disabled), then configured paths, then CLI paths;
/// later sources override earlier ones on duplicate ids.
fn build_library(
    config: &VouchConfig,
    cli_rules: &[PathBuf],
    no_builtin: bool,
) -> Result<PatternLibrary, ExitCode> {
    let mut library = if !no_builtin && config.rules.include_builtin() {
        PatternLibrary::builtin()
    } else {
        PatternLibrary::new()
    };
    if let Err(e) = library.load_sources(&config.rules.paths) {
        return Err(fail(&e, e.error_code()));
    }
    if let Err(e) = library.load_sources(cli_rules) {
        return Err(fail(&e, e.error_code()));
    }
    Ok(library)
}

fn parse_domains(names: &[String]) -> Result<Option<Vec<ArtifactDomain>>, ExitCode> {
    if names.is_empty() {
        return Ok(None);
    }
    let mut domains = Vec::with_capacity(names.len());
    for name in names {
        match ArtifactDomain::parse_str(name) {
            Some(domain) => domains.push(domain),
            None => {
                let valid: Vec<&str> =
                    ArtifactDomain::all().iter().map(|d| d.name()).collect();
                eprintln!(
                    "vouch: unknown domain '{name}' (expected one of: {})",
                    valid.join(", ")
                );
                return Err(ExitCode::from(2));
            }
        }
    }
    Ok(Some(domains))
}

fn read_artifact(input: &str) -> Result<String, String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("failed to read stdin: {e}"))?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).map_err(|e| format!("failed to read {input}: {e}"))
    }
}

fn infer_language(input: &str) -> Option<String> {
    let ext = std::path::Path::new(input).extension()?.to_str()?;
    let language = match ext {
        "rs" => "rust",
        "py" => "python",
        "ts" => "typescript",
        "js" => "javascript",
        "go" => "go",
        "java" => "java",
        "sql" => "sql",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        _ => return None,
    };
    Some(language.to_string())
}

fn print_verdict(verdict: &Verdict, format: OutputFormat, use_color: bool) {
    match format {
        OutputFormat::Text => print!("{}", report::render_text(verdict, use_color)),
        OutputFormat::Json => match report::render_json(verdict) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("vouch: failed to serialize verdict: {e}"),
        },
    }
}

fn decision_exit(decision: Decision) -> ExitCode {
    match decision {
        Decision::Accept => ExitCode::SUCCESS,
        Decision::Reject => ExitCode::from(1),
        Decision::Uncertain => ExitCode::from(2),
    }
}

fn fail(error: &dyn std::fmt::Display, code: &str) -> ExitCode {
    eprintln!("vouch: [{code}] {error}");
    ExitCode::from(2)
}
