use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dialoguer::Input;
use resonance_registry::{seal_document, stamp_document, Registry, StampRequest};
use std::path::PathBuf;

mod interactive;

#[derive(Parser)]
#[command(name = "resonance")]
#[command(about = "Score artefacts, stamp documents, seal them into a registry", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Catalog file (JSON)
    #[arg(long, global = true, default_value = "registry/catalog.json")]
    catalog: PathBuf,

    /// Registry file (append-only JSONL)
    #[arg(long, global = true, default_value = "registry/sealed.jsonl")]
    registry: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive catalog, field, and phi manager
    Manage,

    /// Compute phi for an artefact and stamp it, with a body digest, into a document
    Stamp(StampArgs),

    /// Verify a stamped document and append an immutable record to the registry
    Seal(SealArgs),
}

#[derive(Args)]
struct StampArgs {
    /// Document to stamp
    path: PathBuf,

    /// Artefact id from the catalog (prompted when omitted)
    #[arg(long)]
    id: Option<String>,

    /// Session identifier (prompted when omitted)
    #[arg(long)]
    session: Option<String>,

    /// Field identifier
    #[arg(long, default_value = "S01")]
    field_id: String,

    /// Artefact kind
    #[arg(long, default_value = "text")]
    kind: String,
}

#[derive(Args)]
struct SealArgs {
    /// Document to seal
    path: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let result = match &cli.command {
        Commands::Manage => interactive::run(&cli.catalog),
        Commands::Stamp(args) => run_stamp(&cli, args),
        Commands::Seal(args) => run_seal(&cli, args),
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run_stamp(cli: &Cli, args: &StampArgs) -> Result<()> {
    let catalog = resonance_catalog::store::load(&cli.catalog)?;

    let artefact_id = match &args.id {
        Some(id) => id.clone(),
        None => Input::new()
            .with_prompt("Artefact id (e.g. e3)")
            .interact_text()?,
    };
    let session_id = match &args.session {
        Some(session) => session.clone(),
        None => Input::new()
            .with_prompt("Session id (e.g. 2026-01-05_session-001)")
            .interact_text()?,
    };

    let request = StampRequest {
        artefact_id,
        session_id,
        field_id: args.field_id.clone(),
        kind: args.kind.clone(),
    };
    let outcome = stamp_document(&catalog, &args.path, &request)
        .with_context(|| format!("Failed to stamp {}", args.path.display()))?;

    eprintln!("Stamped {}", args.path.display());
    eprintln!("phi({}) = {:.4}", request.artefact_id, outcome.phi);
    eprintln!("hash10 (body) = {}", outcome.hash10);
    Ok(())
}

fn run_seal(cli: &Cli, args: &SealArgs) -> Result<()> {
    let catalog = resonance_catalog::store::load(&cli.catalog)?;
    let registry = Registry::new(&cli.registry);

    let record = seal_document(&catalog, &args.path, &registry)
        .with_context(|| format!("Failed to seal {}", args.path.display()))?;

    eprintln!("Sealed into {}:", registry.path().display());
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
