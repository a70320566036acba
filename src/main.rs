//! Scenario Planner CLI
//!
//! Command-line interface for simulating and editing scenarios stored in a
//! JSON data file.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use scenario_planner::export::write_ledger_csv;
use scenario_planner::model::loader::DEFAULT_DATA_PATH;
use scenario_planner::model::{load_app_data, save_app_data, AppData};
use scenario_planner::simulation::{month_breakdown, savings_checkpoints, SituationContribution};
use scenario_planner::{
    Error, Gesture, Month, PaintCommit, PaintMode, PaintTarget, MonthRange, ScenarioRunner,
};

#[derive(Debug, Parser)]
#[command(name = "scenario_planner", version, about = "Monthly cash-flow scenario planner")]
struct Cli {
    /// Planner data file (situations + scenarios)
    #[arg(long, env = "SCENARIO_PLANNER_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List situations and scenarios
    List,

    /// Simulate a scenario and print its ledger
    Simulate {
        #[arg(long)]
        scenario: String,

        /// Also write the full ledger to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show which effects contribute in one month
    Breakdown {
        #[arg(long)]
        scenario: String,

        /// Defaults to the current month
        #[arg(long)]
        month: Option<Month>,
    },

    /// Paint a situation's active months and save the result
    PaintSituation {
        #[arg(long)]
        scenario: String,

        #[arg(long)]
        situation: String,

        #[arg(long)]
        from: Month,

        /// Defaults to --from
        #[arg(long)]
        to: Option<Month>,

        #[arg(long, value_enum, default_value_t = ModeArg::Toggle)]
        mode: ModeArg,
    },

    /// Paint one effect's enabled months and save the result
    PaintEffect {
        #[arg(long)]
        scenario: String,

        #[arg(long)]
        situation: String,

        #[arg(long)]
        effect: String,

        #[arg(long)]
        from: Month,

        /// Defaults to --from
        #[arg(long)]
        to: Option<Month>,

        #[arg(long, value_enum, default_value_t = ModeArg::Toggle)]
        mode: ModeArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Add,
    Remove,
    /// Decide from the current state of the --from month
    Toggle,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut data = load_app_data(&cli.data)
        .with_context(|| format!("failed to load {}", cli.data.display()))?;

    match cli.command {
        Command::List => list(&data),
        Command::Simulate { scenario, csv } => simulate(&data, &scenario, csv)?,
        Command::Breakdown { scenario, month } => {
            let month = match month {
                Some(month) => month,
                None => Month::from_date(Utc::now().date_naive())
                    .context("current date has no YYYY-MM month")?,
            };
            breakdown(&data, &scenario, month)?
        }
        Command::PaintSituation {
            scenario,
            situation,
            from,
            to,
            mode,
        } => {
            data.situation(&situation)?;
            let target = PaintTarget::situation(situation);
            paint(&mut data, &scenario, target, from, to.unwrap_or(from), mode)?;
            save_app_data(&cli.data, &data)
                .with_context(|| format!("failed to save {}", cli.data.display()))?;
        }
        Command::PaintEffect {
            scenario,
            situation,
            effect,
            from,
            to,
            mode,
        } => {
            if data.situation(&situation)?.effect(&effect).is_none() {
                return Err(Error::UnknownEffect {
                    situation_id: situation,
                    effect_id: effect,
                }
                .into());
            }
            let target = PaintTarget::effect(situation, effect);
            paint(&mut data, &scenario, target, from, to.unwrap_or(from), mode)?;
            save_app_data(&cli.data, &data)
                .with_context(|| format!("failed to save {}", cli.data.display()))?;
        }
    }

    Ok(())
}

fn list(data: &AppData) {
    println!("Situations:");
    for situation in &data.situations {
        println!("  {:<20} {:<24} {} effects", situation.id, situation.name, situation.effects.len());
    }
    println!("\nScenarios:");
    for scenario in &data.scenarios {
        let axis = scenario.axis();
        println!(
            "  {:<20} {:<24} {}..{}  start ${:.2}",
            scenario.id, scenario.name, axis.start, axis.end, scenario.initial_balance
        );
    }
}

fn simulate(data: &AppData, scenario_id: &str, csv: Option<PathBuf>) -> Result<()> {
    let scenario = data.scenario(scenario_id)?;
    let runner = ScenarioRunner::from_app_data(data);
    let projection = runner.run(scenario);

    println!("Scenario: {} ({})", scenario.name, scenario.id);
    println!(
        "{:>7} {:>14} {:>12} {:>12} {:>12} {:>14} {:>14}",
        "Month", "Balance", "Income", "Expenses", "Net", "Min", "Max"
    );
    println!("{}", "-".repeat(91));
    for row in &projection.rows {
        println!(
            "{:>7} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2} {:>14.2}",
            row.month, row.balance, row.income, row.expenses, row.net, row.balance_min, row.balance_max
        );
    }

    let summary = &projection.summary;
    println!("\nSummary:");
    println!("  Months: {}", summary.total_months);
    println!("  Total Income: ${:.2}", summary.total_income);
    println!("  Total Expenses: ${:.2}", summary.total_expenses);
    println!("  Final Balance: ${:.2}", summary.final_balance);
    if let Some(month) = summary.lowest_month {
        println!("  Lowest Balance: ${:.2} in {}", summary.lowest_balance, month);
    }
    if let Some(month) = summary.first_negative_month {
        println!("  Balance goes negative in {}", month);
    }
    if let Some(goal) = scenario.goal_balance {
        match summary.goal_reached_month {
            Some(month) => println!("  Goal ${:.2} reached in {}", goal, month),
            None => println!("  Goal ${:.2} not reached", goal),
        }
    }
    println!(
        "  Average Recurring Net: ${:.2} ({})",
        summary.average_recurring_net,
        if summary.sustainable { "sustainable" } else { "not sustainable" }
    );

    let checkpoints = savings_checkpoints(scenario, &projection.rows);
    if !checkpoints.is_empty() {
        println!("\nRecorded savings vs projection:");
        for c in &checkpoints {
            println!(
                "  {}  recorded ${:.2}  projected ${:.2}  diff {:+.2}",
                c.month, c.recorded, c.projected, c.difference
            );
        }
    }

    if let Some(path) = csv {
        let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        write_ledger_csv(file, &projection.rows)?;
        println!("\nFull ledger written to: {}", path.display());
    }

    Ok(())
}

fn print_side(title: &str, groups: &[SituationContribution], total: f64) {
    println!("{} (${:.2}):", title, total);
    for group in groups {
        println!("  {} ${:.2}", group.name, group.total);
        for effect in &group.effects {
            println!("    {:<24} ${:.2}", effect.label, effect.amount);
        }
    }
}

fn breakdown(data: &AppData, scenario_id: &str, month: Month) -> Result<()> {
    let scenario = data.scenario(scenario_id)?;
    let view = month_breakdown(scenario, &data.situations, month);

    println!("{} - {}", scenario.name, month);
    print_side("Income", &view.income, view.total_income);
    print_side("Expenses", &view.expenses, view.total_expenses);
    println!("Net: ${:.2}", view.net());
    Ok(())
}

fn paint(
    data: &mut AppData,
    scenario_id: &str,
    target: PaintTarget,
    from: Month,
    to: Month,
    mode: ModeArg,
) -> Result<()> {
    let scenario = data.scenario_mut(scenario_id)?;

    let commit: Option<PaintCommit> = match mode {
        ModeArg::Toggle => {
            let mut gesture = Gesture::default();
            gesture.begin(scenario, target, from)?;
            gesture.hover(to);
            gesture.release(scenario)
        }
        ModeArg::Add | ModeArg::Remove => {
            let mode = if mode == ModeArg::Add { PaintMode::Add } else { PaintMode::Remove };
            Some(target.commit(scenario, MonthRange::spanning(from, to), mode))
        }
    };

    if let Some(commit) = commit {
        commit.apply(scenario);
    }
    info!(
        "scenario {} now has {} entries and {} effect overrides",
        scenario.id,
        scenario.entries.len(),
        scenario.effect_entries.len()
    );
    Ok(())
}
