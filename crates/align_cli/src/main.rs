//! portal-align CLI
//!
//! Finds every portal position and tick count that lands exactly on a
//! displayed target position.

use align_cli::prompt::{
    given_or_prompt, parse_leniency, parse_speed, parse_target, parse_ticks_per_second,
};
use align_cli::{load_config, logging, render_report, write_csv, ConfigOverrides};
use align_core::{
    Precision, PrecisionRunner, SearchConfig, SearchParams, SearchReport, VerifyStrategy,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;

/// Ticks examined between progress updates.
const PROGRESS_BATCH: usize = 2_048;

#[derive(Parser)]
#[command(name = "portal-align")]
#[command(about = "Find portal positions whose fixed-step motion lands exactly on a target", long_about = None)]
struct Cli {
    /// Target position as displayed, e.g. 100.000000 (prompted for when omitted or invalid)
    #[arg(long, allow_hyphen_values = true)]
    target: Option<String>,

    /// Simulation ticks per second (prompted for when omitted or invalid)
    #[arg(long, allow_hyphen_values = true)]
    tps: Option<String>,

    /// Speed preset: 0.5x, 1x, 2x, 3x or 4x (prompted for when omitted or invalid)
    #[arg(long)]
    speed: Option<String>,

    /// Tolerance added on both sides of each portal position
    #[arg(long, allow_hyphen_values = true)]
    leniency: Option<String>,

    /// JSON search config; the flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Highest tick count to search
    #[arg(long)]
    tick_ceiling: Option<usize>,

    /// Stop after this many alignments
    #[arg(long)]
    result_cap: Option<usize>,

    /// Float width to simulate at
    #[arg(long, value_enum)]
    precision: Option<PrecisionArg>,

    /// How candidates are replayed
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Rows shown in the terminal table
    #[arg(long, default_value_t = 20)]
    rows: usize,

    /// Write alignments to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Export only the rows shown in the table
    #[arg(long, default_value = "false")]
    sampled: bool,

    /// Print the full report as JSON instead of a table
    #[arg(long, default_value = "false")]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PrecisionArg {
    Single,
    Double,
}

impl From<PrecisionArg> for Precision {
    fn from(value: PrecisionArg) -> Self {
        match value {
            PrecisionArg::Single => Precision::Single,
            PrecisionArg::Double => Precision::Double,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Resimulate,
    Memoized,
}

impl From<StrategyArg> for VerifyStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Resimulate => VerifyStrategy::Resimulate,
            StrategyArg::Memoized => VerifyStrategy::Memoized,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = build_config(&cli)?;
    let params = collect_params(&cli, config.precision)?;
    let report = run_with_progress(&params, config, !cli.json)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report, cli.rows));
    }

    if let Some(path) = &cli.csv {
        let rows = if cli.sampled {
            align_cli::downsample(&report.alignments, cli.rows)
        } else {
            report.alignments.clone()
        };
        write_csv(path, &rows)?;
        if !cli.json {
            println!("\nWrote {} rows to {}", rows.len(), path.display());
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<SearchConfig> {
    let base = match &cli.config {
        Some(path) => load_config(path)?,
        None => SearchConfig::default(),
    };
    let overrides = ConfigOverrides {
        tick_ceiling: cli.tick_ceiling,
        result_cap: cli.result_cap,
        precision: cli.precision.map(Precision::from),
        strategy: cli.strategy.map(VerifyStrategy::from),
    };
    Ok(overrides.apply(base))
}

fn collect_params(cli: &Cli, precision: Precision) -> Result<SearchParams> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();

    let target = given_or_prompt(
        &mut reader,
        &mut writer,
        "Target position",
        cli.target.as_deref(),
        |text| parse_target(text, precision),
    )?;
    let tps = given_or_prompt(
        &mut reader,
        &mut writer,
        "Ticks per second",
        cli.tps.as_deref(),
        parse_ticks_per_second,
    )?;
    let speed = given_or_prompt(
        &mut reader,
        &mut writer,
        "Speed (0.5x/1x/2x/3x/4x)",
        cli.speed.as_deref(),
        parse_speed,
    )?;
    // Leniency is only asked for in a fully interactive session.
    let leniency_given = match (&cli.leniency, &cli.target) {
        (Some(text), _) => Some(text.as_str()),
        (None, Some(_)) => Some(""),
        (None, None) => None,
    };
    let leniency = given_or_prompt(
        &mut reader,
        &mut writer,
        "Leniency (blank for 0)",
        leniency_given,
        parse_leniency,
    )?;

    Ok(SearchParams::new(target, tps, speed).with_leniency(leniency))
}

fn run_with_progress(
    params: &SearchParams,
    config: SearchConfig,
    show: bool,
) -> Result<SearchReport> {
    let mut runner = PrecisionRunner::new(params, config).context("Search could not start")?;
    let mut stderr = io::stderr();

    while !runner.is_done() {
        let progress = runner.run_ticks(PROGRESS_BATCH);
        if show {
            let _ = write!(
                stderr,
                "\rSearching... {:>5.1}% ({} alignments)",
                progress.fraction() * 100.0,
                progress.alignments_found
            );
            let _ = stderr.flush();
        }
    }
    if show {
        let _ = writeln!(stderr);
    }

    Ok(runner.finish())
}
