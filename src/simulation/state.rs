//! Running balance state and per-month accumulators

use crate::model::{Category, Effect};
use crate::month::Month;

use super::ledger::MonthlyBalance;

/// Balances carried from one month to the next
#[derive(Debug, Clone)]
pub struct BalanceState {
    pub balance: f64,
    /// Pessimistic track
    pub balance_min: f64,
    /// Optimistic track
    pub balance_max: f64,
}

impl BalanceState {
    pub fn new(initial_balance: f64) -> Self {
        Self {
            balance: initial_balance,
            balance_min: initial_balance,
            balance_max: initial_balance,
        }
    }

    /// Apply a month's flows and produce its ledger row
    pub fn close_month(&mut self, flows: &MonthFlows) -> MonthlyBalance {
        let net = flows.net();
        self.balance += net;
        self.balance_min += flows.net_min;
        self.balance_max += flows.net_max;

        MonthlyBalance {
            month: flows.month,
            balance: self.balance,
            income: flows.income,
            expenses: flows.expenses,
            net,
            recurring_net: flows.recurring_income - flows.recurring_expenses,
            balance_min: self.balance_min,
            balance_max: self.balance_max,
        }
    }
}

/// Flows accumulated within a single month
#[derive(Debug, Clone)]
pub struct MonthFlows {
    pub month: Month,
    pub income: f64,
    pub expenses: f64,
    pub recurring_income: f64,
    pub recurring_expenses: f64,
    pub net_min: f64,
    pub net_max: f64,
}

impl MonthFlows {
    pub fn new(month: Month) -> Self {
        Self {
            month,
            income: 0.0,
            expenses: 0.0,
            recurring_income: 0.0,
            recurring_expenses: 0.0,
            net_min: 0.0,
            net_max: 0.0,
        }
    }

    pub fn add(&mut self, effect: &Effect) {
        match effect.category {
            Category::Income => {
                self.income += effect.amount;
                if effect.is_recurring() {
                    self.recurring_income += effect.amount;
                }
            }
            Category::Expense => {
                self.expenses += effect.amount;
                if effect.is_recurring() {
                    self.recurring_expenses += effect.amount;
                }
            }
        }

        let (low, high) = effect.signed_band();
        self.net_min += low;
        self.net_max += high;
    }

    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}
