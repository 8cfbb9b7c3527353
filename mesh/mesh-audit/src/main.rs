//! Command-line driver for mesh audits.
//!
//! Prints the audit report as JSON on stdout. Logs go to stderr.
//!
//! ```text
//! mesh-audit crate.glb --tier indie --usage prop --out crate_checked.ply
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use mesh_audit::{AuditParams, PaintMode, audit_file};
use mesh_budget::BudgetTable;
use mesh_io::{MeshFormat, save_colored_obj, save_colored_ply};
use mesh_paint::FacePalette;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Audit a mesh asset against a polygon budget and check face winding.
#[derive(Parser)]
#[command(name = "mesh-audit")]
#[command(about = "Polygon budget and inversion audit for mesh assets", long_about = None)]
#[command(version)]
struct Cli {
    /// Asset to audit (stl, obj, ply, gltf, glb)
    #[arg(name = "PATH")]
    path: PathBuf,

    /// Fidelity tier (e.g. "indie", "aaa")
    #[arg(long)]
    tier: String,

    /// Usage class ("background", "prop" or "hero")
    #[arg(long)]
    usage: String,

    /// Budget table JSON replacing the standard table
    #[arg(long)]
    budgets: Option<PathBuf>,

    /// Audit params JSON; missing fields keep their defaults
    #[arg(long)]
    params: Option<PathBuf>,

    /// Refuse meshes with more faces than this
    #[arg(long)]
    max_faces_ceiling: Option<usize>,

    /// Write the painted, repaired mesh here (ply or obj)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Colouring for --out
    #[arg(long, value_enum, default_value_t = Paint::Inversions)]
    paint: Paint,

    /// Include metrics and repair counters in the output
    #[arg(long)]
    details: bool,

    /// Exit with status 1 if the asset is over budget
    #[arg(long)]
    fail_over_budget: bool,

    /// More log output (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Paint {
    /// Inverted faces red, the rest gray
    Inversions,
    /// Faces ramped by relative area
    Heatmap,
    /// Every face red
    Uniform,
}

impl From<Paint> for PaintMode {
    fn from(paint: Paint) -> Self {
        match paint {
            Paint::Inversions => Self::Inversions,
            Paint::Heatmap => Self::AreaHeatmap,
            Paint::Uniform => Self::Uniform,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_budgets(path: Option<&Path>) -> Result<BudgetTable> {
    let Some(path) = path else {
        return Ok(BudgetTable::standard());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read budget table {}", path.display()))?;
    BudgetTable::from_json(&json)
        .with_context(|| format!("invalid budget table {}", path.display()))
}

fn load_params(path: Option<&Path>) -> Result<AuditParams> {
    let Some(path) = path else {
        return Ok(AuditParams::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read params {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid params {}", path.display()))
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let table = load_budgets(cli.budgets.as_deref())?;
    let mut params = load_params(cli.params.as_deref())?;
    if let Some(ceiling) = cli.max_faces_ceiling {
        params = params.with_max_faces_ceiling(ceiling);
    }

    let outcome = audit_file(&cli.path, &table, &cli.tier, &cli.usage, &params)
        .with_context(|| format!("audit of {} failed", cli.path.display()))?;

    if let Some(out) = &cli.out {
        let painted = outcome.paint(cli.paint.into(), &FacePalette::default())?;
        match MeshFormat::from_path(out) {
            Some(MeshFormat::Ply) => save_colored_ply(&painted, out, true),
            Some(MeshFormat::Obj) => save_colored_obj(&painted, out),
            _ => bail!("--out must end in .ply or .obj: {}", out.display()),
        }
        .with_context(|| format!("failed to write {}", out.display()))?;
        info!(path = %out.display(), "wrote painted mesh");
    }

    let json = if cli.details {
        serde_json::to_string_pretty(&outcome.summary())?
    } else {
        serde_json::to_string_pretty(&outcome.report)?
    };
    println!("{json}");

    if cli.fail_over_budget && !outcome.report.is_within_budget() {
        eprintln!("over budget: {}", outcome.report);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}
