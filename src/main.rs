//! Property Returns CLI
//!
//! Projects a single scenario and prints the ledger and headline metrics

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use property_returns::{params::ScenarioArgs, Assumptions, ProjectionEngine, ScenarioResult};

#[derive(Parser)]
#[command(name = "property_returns", about = "Project returns on a leveraged property investment")]
struct Cli {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Model assumptions JSON (costs, depreciation, CGT discount)
    #[arg(long, value_name = "FILE")]
    assumptions: Option<PathBuf>,

    /// Print the full result as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Write the year-by-year ledger to a CSV file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let params = cli.scenario.to_parameters().context("invalid scenario")?;
    let assumptions = match &cli.assumptions {
        Some(path) => Assumptions::from_json_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => Assumptions::standard(),
    };

    let engine = ProjectionEngine::new(assumptions);
    let result = engine.project(&params)?;

    if let Some(path) = &cli.csv {
        write_ledger(path, &result).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Ledger written to {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_summary(&result);
    print_ledger(&result);
    Ok(())
}

fn write_ledger(path: &Path, result: &ScenarioResult) -> property_returns::Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    for record in &result.years {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn format_irr(irr: Option<f64>) -> String {
    irr.map(|r| format!("{:.2}%", r * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

fn print_summary(result: &ScenarioResult) {
    println!("Property Returns");
    println!("================\n");
    println!("  IRR (post-tax):          {}", format_irr(result.irr_post_tax()));
    println!("  IRR (pre-tax):           {}", format_irr(result.irr_pre_tax()));
    println!("  Cash outlay multiple:    {:.2}x", result.cash_on_cash());
    println!("  Projected net profit:    ${:.0}", result.net_profit());
    println!("  Weekly cash flow (yr 1): ${:.0}", result.weekly_cash_flow_year_one());
    println!();
    println!("  Initial equity:          ${:.0}", result.acquisition.initial_equity);
    println!("  Sale price:              ${:.0}", result.sale.sale_price);
    println!("  Capital gains tax:       ${:.0}", result.sale.capital_gains_tax);
    println!("  Net proceeds (post-tax): ${:.0}", result.sale.net_proceeds_post_tax);
    println!();
}

fn print_ledger(result: &ScenarioResult) {
    println!(
        "{:>4} {:>12} {:>12} {:>10} {:>9} {:>10} {:>10} {:>10} {:>10} {:>11} {:>11} {:>12}",
        "Year", "Value", "Loan", "Rent", "Opex", "NOI", "Interest", "Principal", "Tax",
        "Pre-Tax CF", "Post-Tax CF", "Equity"
    );
    println!("{}", "-".repeat(130));

    for row in &result.years {
        println!(
            "{:>4} {:>12.0} {:>12.0} {:>10.0} {:>9.0} {:>10.0} {:>10.0} {:>10.0} {:>10.0} {:>11.0} {:>11.0} {:>12.0}",
            row.year,
            row.property_value,
            row.loan_balance,
            row.rent,
            row.opex,
            row.noi,
            row.interest_paid,
            row.principal_paid,
            row.tax_payable,
            row.pre_tax_cash_flow,
            row.post_tax_cash_flow,
            row.equity(),
        );
    }
}
