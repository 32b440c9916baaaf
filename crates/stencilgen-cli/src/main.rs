// crates/stencilgen-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

mod profile;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use stencilgen_core::{
    read_artifact_file, read_record_json, render_artifact, write_artifact_file,
    write_record_json, DefinitionRecord, GenParams, WEIGHT_SUM_TOLERANCE,
};
use stencilgen_sample::generator::generate_definition;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::profile::{default_artifact_path, Profile};

#[derive(Parser, Debug)]
#[command(
    name = "stencilgen",
    about = "Random stencil definition generator",
    long_about = "Random stencil definition generator.\n\nEmits `Stencil::new(...)` source text with unique random offsets and weights summing to one, for fuzzing and benchmarking stencil solvers.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    /// More log output (-v debug, -vv trace). Ignored when RUST_LOG is set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors. Ignored when RUST_LOG is set.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Generate one stencil definition and write it as an artifact.
    Generate(GenerateArgs),

    /// Parse an artifact and check its invariants.
    Check {
        /// Artifact path
        artifact: PathBuf,
    },

    /// Print the artifact text for a JSON definition sidecar.
    Show {
        /// JSON sidecar written by `generate --definition-out`
        definition: PathBuf,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TOML profile with `[params]` and `[output]` tables
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Components per offset (D >= 1)
    #[arg(short, long)]
    dimension: Option<usize>,

    /// Exclusive upper bound on the number of offsets (at most 65536)
    #[arg(long)]
    max_count: Option<usize>,

    /// Coordinates are drawn from [-max_distance, max_distance)
    #[arg(long, allow_hyphen_values = true)]
    max_distance: Option<i32>,

    /// Fix the number of offsets instead of drawing it
    #[arg(long)]
    count: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Rejected draws tolerated per offset before giving up
    #[arg(long)]
    max_attempts: Option<u64>,

    /// Artifact path (default: gen_<D>d.stencil)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Also write the definition, seed and parameters as JSON
    #[arg(long)]
    definition_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.cmd {
        Cmd::Generate(args) => generate(args),
        Cmd::Check { artifact } => check(artifact),
        Cmd::Show { definition } => show(definition),
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let fallback = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Profile values first, then any flags given on the command line.
fn resolve(args: &GenerateArgs) -> Result<(GenParams, PathBuf, Option<PathBuf>)> {
    let profile = match &args.profile {
        Some(path) => Profile::load(path)?,
        None => Profile::default(),
    };

    let mut params = profile.params;
    if let Some(v) = args.dimension {
        params.dimension = v;
    }
    if let Some(v) = args.max_count {
        params.max_count = v;
    }
    if let Some(v) = args.max_distance {
        params.max_distance = v;
    }
    if let Some(v) = args.count {
        params.count = Some(v);
    }
    if let Some(v) = args.seed {
        params.seed = Some(v);
    }
    if let Some(v) = args.max_attempts {
        params.max_attempts = v;
    }

    let artifact = args
        .out
        .clone()
        .or(profile.output.artifact)
        .unwrap_or_else(|| default_artifact_path(params.dimension));
    let definition = args.definition_out.clone().or(profile.output.definition);
    Ok((params, artifact, definition))
}

fn generate(args: GenerateArgs) -> Result<()> {
    let (params, out, definition_out) = resolve(&args)?;

    let generated = generate_definition(&params).context("generating stencil definition")?;
    let def = &generated.definition;

    // Sidecar first, artifact last: a failed run leaves neither behind.
    let sidecar = definition_out.map(|path| {
        let rec = DefinitionRecord {
            seed: generated.seed,
            params,
            definition: def.clone(),
        };
        (path, rec)
    });
    if let Some((path, rec)) = &sidecar {
        write_record_json(path, rec)
            .with_context(|| format!("writing definition to {}", path.display()))?;
        info!(path = %path.display(), "definition written");
    }

    if let Err(e) = write_artifact_file(&out, def) {
        if let Some((path, _)) = &sidecar {
            if let Err(rm) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %rm, "could not remove definition");
            }
        }
        return Err(anyhow::Error::new(e)
            .context(format!("writing artifact to {}", out.display())));
    }
    info!(path = %out.display(), offsets = def.len(), seed = generated.seed, "artifact written");

    println!(
        "Generated {}D stencil with {} offsets (seed {}) → {}",
        def.dimension(),
        def.len(),
        generated.seed,
        out.display()
    );
    Ok(())
}

fn check(artifact: PathBuf) -> Result<()> {
    info!(path = %artifact.display(), "checking artifact");
    let def = read_artifact_file(&artifact)
        .with_context(|| format!("checking {}", artifact.display()))?;

    let reach: Vec<String> = def
        .slopes()
        .iter()
        .map(|r| format!("-{}..+{}", r.negative, r.positive))
        .collect();
    println!(
        "OK: {}: {}D, {} offsets, weight sum {} (tolerance {WEIGHT_SUM_TOLERANCE:e}), reach [{}]",
        artifact.display(),
        def.dimension(),
        def.len(),
        def.weight_sum(),
        reach.join(", ")
    );
    Ok(())
}

fn show(definition: PathBuf) -> Result<()> {
    let rec = read_record_json(&definition)
        .with_context(|| format!("reading definition {}", definition.display()))?;
    info!(seed = rec.seed, offsets = rec.definition.len(), "rendering definition");
    print!("{}", render_artifact(&rec.definition));
    Ok(())
}
