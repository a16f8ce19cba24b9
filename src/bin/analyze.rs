//! Tensile Analyzer command line tool
//!
//! Analyzes a stress-strain data file (or a synthetic example curve), prints
//! the report, and optionally writes the chart PNG.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use tensile_analyzer::config;
use tensile_analyzer::prelude::*;
use tensile_analyzer::session::{CurveSource, EXAMPLE_POINTS};

#[derive(Debug, Parser)]
#[command(name = "tensile-analyze", version, about = "Stress-strain curve analysis")]
struct Cli {
    /// Data file with strain and stress columns; omit for a synthetic curve
    input: Option<PathBuf>,

    /// Material label (selects the synthetic profile and titles)
    #[arg(short, long, default_value = "steel")]
    material: String,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the chart PNG here
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Write the text report here instead of stdout
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Samples in the synthetic curve
    #[arg(long, default_value_t = EXAMPLE_POINTS)]
    points: usize,

    /// Uniform stress noise (MPa) added to the synthetic curve
    #[arg(long, default_value_t = 0.0)]
    noise: f64,

    /// Seed of the synthetic noise
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    let mut session = AnalysisSession::new(
        AnalysisEngine::new(cfg.analysis),
        ChartRenderer::new(cfg.chart),
    );
    let label = MaterialLabel::new(&cli.material);

    match &cli.input {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let parsed = session.load_data(&filename, &text, label)?;
            for skipped in parsed.rejected() {
                log::warn!("Line {} ignored: {:?}", skipped.line, skipped.reason);
            }
        }
        None => {
            if cli.points < 2 {
                bail!("--points must be at least 2");
            }
            let curve = MaterialProfile::for_label(&label)
                .generate_noisy(cli.points, cli.noise, cli.seed)
                .context("invalid --noise")?;
            session.load_curve(curve, label, CurveSource::Example);
        }
    }

    let output = session.analyze()?;

    if let Some(path) = &cli.chart {
        fs::write(path, &output.chart)
            .with_context(|| format!("failed to write chart {}", path.display()))?;
        println!("Chart written to {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output.result)?);
    }

    match &cli.report {
        Some(path) => {
            fs::write(path, &output.report)
                .with_context(|| format!("failed to write report {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None if !cli.json => print!("{}", output.report),
        None => {}
    }

    Ok(())
}
