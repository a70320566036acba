//! Run every scenario in a data file and compare their balance trajectories
//!
//! Usage: cargo run --bin compare_scenarios -- --data scenarios.json --output comparison.csv

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use scenario_planner::export::write_comparison_csv;
use scenario_planner::model::load_app_data;
use scenario_planner::model::loader::DEFAULT_DATA_PATH;
use scenario_planner::ScenarioRunner;

#[derive(Debug, Parser)]
#[command(about = "Simulate all scenarios side by side")]
struct Args {
    /// Planner data file
    #[arg(long, env = "SCENARIO_PLANNER_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Comparison table output
    #[arg(long, default_value = "scenario_comparison.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let data = load_app_data(&args.data)
        .with_context(|| format!("failed to load {}", args.data.display()))?;
    println!(
        "Loaded {} scenarios and {} situations in {:?}",
        data.scenarios.len(),
        data.situations.len(),
        start.elapsed()
    );

    let runner = ScenarioRunner::from_app_data(&data);
    let run_start = Instant::now();
    let projections = runner.run_all(&data.scenarios);
    println!("Simulations complete in {:?}", run_start.elapsed());

    println!(
        "\n{:<24} {:>16} {:>16} {:>10} {:>12}",
        "Scenario", "Final Balance", "Lowest", "Lowest In", "Sustainable"
    );
    println!("{}", "-".repeat(82));
    for projection in &projections {
        let summary = &projection.summary;
        println!(
            "{:<24} {:>16.2} {:>16.2} {:>10} {:>12}",
            projection.name,
            summary.final_balance,
            summary.lowest_balance,
            summary.lowest_month.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string()),
            if summary.sustainable { "yes" } else { "no" },
        );
    }

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    write_comparison_csv(file, &projections)?;
    println!("\nComparison written to: {}", args.output.display());

    Ok(())
}
