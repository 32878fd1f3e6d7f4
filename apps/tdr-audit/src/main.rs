//! TDR index audit binary
//!
//! Runs the index engine on an already-extracted text file and prints the
//! audit as JSON or as a plain-text report.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use index_engine::{requirements_from_json, DocumentAudit, EngineConfig, IndexEngine, MatchPolicy};
use serde::Serialize;
use shared_types::Requirement;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "tdr-audit")]
#[command(
    version,
    about = "Audit a submission's index against its TDR requirements"
)]
struct Args {
    /// Plain text extracted from the submission
    #[arg(short, long)]
    text: PathBuf,

    /// JSON array of requirements (name, description, isObligatory)
    #[arg(short, long)]
    requirements: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// How titles are matched
    #[arg(long, value_enum, default_value = "containment")]
    policy: PolicyArg,

    /// Minimum similarity for the similarity policy
    #[arg(long, default_value = "0.8")]
    threshold: f64,

    /// Report optional requirements that were not found
    #[arg(long)]
    record_optional_misses: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Containment,
    Similarity,
}

/// JSON output wrapper
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuditEnvelope<'a> {
    source: String,
    generated_at: String,
    audit: &'a DocumentAudit,
}

fn engine_config(args: &Args) -> EngineConfig {
    let match_policy = match args.policy {
        PolicyArg::Containment => MatchPolicy::Containment,
        PolicyArg::Similarity => MatchPolicy::SimilarityThreshold(args.threshold),
    };
    EngineConfig {
        match_policy,
        record_optional_misses: args.record_optional_misses,
    }
}

fn load_requirements(path: Option<&Path>) -> Result<Vec<Requirement>> {
    let Some(path) = path else {
        tracing::warn!("no requirements file given, only the index comparison is meaningful");
        return Ok(Vec::new());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading requirements from {}", path.display()))?;
    let requirements = requirements_from_json(&json)
        .with_context(|| format!("parsing requirements in {}", path.display()))?;
    tracing::info!("Loaded {} requirements", requirements.len());
    Ok(requirements)
}

fn render(audit: &DocumentAudit, source: &Path, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(audit.to_text()),
        OutputFormat::Json => {
            let envelope = AuditEnvelope {
                source: source.display().to_string(),
                generated_at: chrono::Utc::now().to_rfc3339(),
                audit,
            };
            Ok(serde_json::to_string_pretty(&envelope)?)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Report goes to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting TDR audit v{}", env!("CARGO_PKG_VERSION"));

    let engine = IndexEngine::with_config(engine_config(&args))?;
    let text = std::fs::read_to_string(&args.text)
        .with_context(|| format!("reading text from {}", args.text.display()))?;
    let requirements = load_requirements(args.requirements.as_deref())?;

    let audit = engine.audit(&text, &requirements)?;
    println!("{}", render(&audit, &args.text, args.format)?);

    Ok(())
}
