//! Ledger output structures for simulations

use serde::{Deserialize, Serialize};

use crate::model::Scenario;
use crate::month::Month;

/// A single row of simulation output for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBalance {
    pub month: Month,

    /// Closing balance after this month's net
    pub balance: f64,

    pub income: f64,
    pub expenses: f64,

    /// income - expenses
    pub net: f64,

    /// Net from recurring effects only
    pub recurring_net: f64,

    // Variance band
    pub balance_min: f64,
    pub balance_max: f64,
}

/// Recorded savings compared against the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsCheckpoint {
    pub month: Month,
    pub recorded: f64,
    pub projected: f64,
    /// recorded - projected
    pub difference: f64,
}

/// Summary statistics for a simulated ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total_months: u32,
    pub total_income: f64,
    pub total_expenses: f64,
    pub final_balance: f64,
    pub lowest_balance: f64,
    pub lowest_month: Option<Month>,
    /// First month the balance drops below zero
    pub first_negative_month: Option<Month>,
    /// First month the balance reaches the scenario's goal
    pub goal_reached_month: Option<Month>,
    pub average_recurring_net: f64,
    /// Recurring flows alone keep the balance from shrinking in the last month
    pub sustainable: bool,
}

impl LedgerSummary {
    pub fn from_rows(scenario: &Scenario, rows: &[MonthlyBalance]) -> Self {
        let total_income: f64 = rows.iter().map(|r| r.income).sum();
        let total_expenses: f64 = rows.iter().map(|r| r.expenses).sum();

        let final_balance = rows.last().map(|r| r.balance).unwrap_or(scenario.initial_balance);

        let lowest = rows
            .iter()
            .min_by(|a, b| a.balance.total_cmp(&b.balance));

        let first_negative_month = rows.iter().find(|r| r.balance < 0.0).map(|r| r.month);

        let goal_reached_month = scenario
            .goal_balance
            .and_then(|goal| rows.iter().find(|r| r.balance >= goal))
            .map(|r| r.month);

        let average_recurring_net = if rows.is_empty() {
            0.0
        } else {
            rows.iter().map(|r| r.recurring_net).sum::<f64>() / rows.len() as f64
        };

        Self {
            total_months: rows.len() as u32,
            total_income,
            total_expenses,
            final_balance,
            lowest_balance: lowest.map(|r| r.balance).unwrap_or(scenario.initial_balance),
            lowest_month: lowest.map(|r| r.month),
            first_negative_month,
            goal_reached_month,
            average_recurring_net,
            sustainable: rows.last().map(|r| r.recurring_net >= 0.0).unwrap_or(true),
        }
    }
}

/// Compare each recorded savings point on the axis with the projected balance
pub fn savings_checkpoints(scenario: &Scenario, rows: &[MonthlyBalance]) -> Vec<SavingsCheckpoint> {
    let mut checkpoints: Vec<SavingsCheckpoint> = scenario
        .savings_balance_points
        .iter()
        .filter_map(|point| {
            let row = rows.iter().find(|r| r.month == point.month)?;
            Some(SavingsCheckpoint {
                month: point.month,
                recorded: point.balance,
                projected: row.balance,
                difference: point.balance - row.balance,
            })
        })
        .collect();
    checkpoints.sort_by_key(|c| c.month);
    checkpoints
}
