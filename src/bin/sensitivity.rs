//! Sensitivity matrix: post-tax IRR across interest rate and capital growth
//!
//! Usage: cargo run --bin sensitivity -- [--rates 4,5,6,7,8] [--growth 3,4,5,6,7] [--json]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use property_returns::params::ScenarioArgs;
use property_returns::sensitivity::{DEFAULT_GROWTH_RATES, DEFAULT_INTEREST_RATES};
use property_returns::{Assumptions, SensitivityMatrix, SensitivityRunner};

#[derive(Parser)]
#[command(name = "sensitivity", about = "Post-tax IRR across interest rate and capital growth")]
struct Cli {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Interest rates down the rows (%), comma separated
    #[arg(long, value_delimiter = ',', value_name = "PCT,...")]
    rates: Vec<f64>,

    /// Capital growth rates across the columns (%), comma separated
    #[arg(long = "growth-axis", value_delimiter = ',', value_name = "PCT,...")]
    growth_axis: Vec<f64>,

    /// Model assumptions JSON (costs, depreciation, CGT discount)
    #[arg(long, value_name = "FILE")]
    assumptions: Option<PathBuf>,

    /// Evaluate cells one at a time instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Print the matrix as JSON
    #[arg(long)]
    json: bool,

    /// Write the matrix to a CSV file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

fn axis(percentages: &[f64], default: &[f64]) -> Vec<f64> {
    if percentages.is_empty() {
        default.to_vec()
    } else {
        percentages.iter().map(|pct| pct / 100.0).collect()
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let base = cli.scenario.to_parameters().context("invalid scenario")?;
    let assumptions = match &cli.assumptions {
        Some(path) => Assumptions::from_json_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => Assumptions::standard(),
    };

    let interest_rates = axis(&cli.rates, &DEFAULT_INTEREST_RATES);
    let growth_rates = axis(&cli.growth_axis, &DEFAULT_GROWTH_RATES);

    let runner = SensitivityRunner::with_assumptions(assumptions);
    let start = Instant::now();
    let matrix = if cli.sequential {
        runner.sweep_sequential(&base, &interest_rates, &growth_rates)?
    } else {
        runner.sweep(&base, &interest_rates, &growth_rates)?
    };
    log::info!("Sweep complete in {:?}", start.elapsed());

    if let Some(path) = &cli.csv {
        write_matrix(path, &matrix).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Matrix written to {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&matrix)?);
    } else {
        print_matrix(&matrix);
    }
    Ok(())
}

fn format_cell(irr: Option<f64>) -> String {
    irr.map(|r| format!("{:.2}%", r * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

fn write_matrix(path: &Path, matrix: &SensitivityMatrix) -> property_returns::Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);

    let mut header = vec![String::new()];
    header.extend(matrix.column_labels());
    writer.write_record(&header)?;

    for (label, row) in matrix.row_labels().into_iter().zip(&matrix.cells) {
        let mut record = vec![label];
        record.extend(row.iter().map(|irr| irr.map(|r| r.to_string()).unwrap_or_default()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn print_matrix(matrix: &SensitivityMatrix) {
    println!("Sensitivity Analysis: Interest Rate vs. Capital Growth (post-tax IRR)\n");

    print!("{:>12}", "");
    for label in matrix.column_labels() {
        print!(" {:>14}", label);
    }
    println!();

    for (label, row) in matrix.row_labels().iter().zip(&matrix.cells) {
        print!("{:>12}", label);
        for irr in row {
            print!(" {:>14}", format_cell(*irr));
        }
        println!();
    }

    if let (Some(best), Some(worst)) = (matrix.best(), matrix.worst()) {
        println!();
        println!(
            "  Best:  {:.2}% ({}, {})",
            best.2 * 100.0,
            matrix.row_labels()[best.0],
            matrix.column_labels()[best.1]
        );
        println!(
            "  Worst: {:.2}% ({}, {})",
            worst.2 * 100.0,
            matrix.row_labels()[worst.0],
            matrix.column_labels()[worst.1]
        );
    }
}
