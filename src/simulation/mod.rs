//! Simulation engine: monthly ledger, single-month breakdown and summaries

mod state;
mod engine;
mod ledger;
mod breakdown;

pub use state::{BalanceState, MonthFlows};
pub use engine::simulate_scenario;
pub use ledger::{savings_checkpoints, LedgerSummary, MonthlyBalance, SavingsCheckpoint};
pub use breakdown::{month_breakdown, EffectContribution, MonthBreakdown, SituationContribution};
