//! Drill-down view of a single month's contributions

use serde::{Deserialize, Serialize};

use crate::model::{Category, EffectKind, Scenario, Situation};
use crate::month::Month;

use super::engine::Timeline;

/// One effect's contribution in the month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectContribution {
    pub effect_id: String,
    pub label: String,
    pub kind: EffectKind,
    /// Unsigned amount
    pub amount: f64,
}

/// A situation's effects on one side of the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SituationContribution {
    pub situation_id: String,
    pub name: String,
    pub color: String,
    pub total: f64,
    pub effects: Vec<EffectContribution>,
}

/// Contributions for one month grouped by situation, income and expenses apart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBreakdown {
    pub month: Month,
    pub income: Vec<SituationContribution>,
    pub expenses: Vec<SituationContribution>,
    pub total_income: f64,
    pub total_expenses: f64,
}

impl MonthBreakdown {
    pub fn net(&self) -> f64 {
        self.total_income - self.total_expenses
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }
}

fn push_contribution(groups: &mut Vec<SituationContribution>, situation: &Situation, contribution: EffectContribution) {
    let index = match groups.iter().position(|g| g.situation_id == situation.id) {
        Some(index) => index,
        None => {
            groups.push(SituationContribution {
                situation_id: situation.id.clone(),
                name: situation.name.clone(),
                color: situation.color.clone(),
                total: 0.0,
                effects: Vec::new(),
            });
            groups.len() - 1
        }
    };
    let group = &mut groups[index];
    group.total += contribution.amount;
    group.effects.push(contribution);
}

/// Break down which effects contribute in `month`.
///
/// Uses the same activity, override and one-time rules as
/// [`simulate_scenario`](super::simulate_scenario). Situations appear in the
/// order their entries are stored; months off the axis yield an empty view.
pub fn month_breakdown(scenario: &Scenario, situations: &[Situation], month: Month) -> MonthBreakdown {
    let timeline = Timeline::new(scenario, situations);
    let mut income = Vec::new();
    let mut expenses = Vec::new();

    for (situation, effect) in timeline.firing(month) {
        let contribution = EffectContribution {
            effect_id: effect.id.clone(),
            label: effect.label.clone(),
            kind: effect.kind,
            amount: effect.amount,
        };
        match effect.category {
            Category::Income => push_contribution(&mut income, situation, contribution),
            Category::Expense => push_contribution(&mut expenses, situation, contribution),
        }
    }

    let total_income: f64 = income.iter().map(|g| g.total).sum();
    let total_expenses: f64 = expenses.iter().map(|g| g.total).sum();

    MonthBreakdown {
        month,
        income,
        expenses,
        total_income,
        total_expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::MonthRange;
    use crate::model::{Effect, ScenarioEffectEntry, ScenarioEntry};
    use crate::simulation::simulate_scenario;
    use approx::assert_relative_eq;

    fn m(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn situations() -> Vec<Situation> {
        vec![
            Situation::new("job", "Job")
                .with_effect(Effect::new("salary", "Salary", EffectKind::Recurring, Category::Income, 3000.0))
                .with_effect(Effect::new("signing", "Signing bonus", EffectKind::OneTime, Category::Income, 1000.0))
                .with_effect(Effect::new("lunch", "Lunches", EffectKind::Recurring, Category::Expense, 150.0)),
            Situation::new("flat", "Flat")
                .with_effect(Effect::new("rent", "Rent", EffectKind::Recurring, Category::Expense, 1200.0)),
        ]
    }

    fn scenario() -> Scenario {
        let mut scenario = Scenario::new("s", "Breakdown", 0.0, m("2024-01"), 6);
        scenario
            .entries
            .push(ScenarioEntry::new("job", MonthRange::new(m("2024-02"), m("2024-06"))));
        scenario
            .entries
            .push(ScenarioEntry::new("flat", MonthRange::new(m("2024-01"), m("2024-06"))));
        scenario
            .effect_entries
            .push(ScenarioEffectEntry::new("job", "lunch", MonthRange::single(m("2024-04"))));
        scenario
    }

    #[test]
    fn test_breakdown_groups_by_situation_and_side() {
        let breakdown = month_breakdown(&scenario(), &situations(), m("2024-02"));

        assert_eq!(breakdown.income.len(), 1);
        let job_income = &breakdown.income[0];
        assert_eq!(job_income.situation_id, "job");
        assert_eq!(job_income.effects.len(), 2);
        assert_relative_eq!(job_income.total, 4000.0);

        assert_eq!(breakdown.expenses.len(), 2);
        assert_eq!(breakdown.expenses[0].situation_id, "job");
        assert_eq!(breakdown.expenses[1].situation_id, "flat");
        assert_relative_eq!(breakdown.total_expenses, 1350.0);
        assert_relative_eq!(breakdown.net(), 2650.0);
    }

    #[test]
    fn test_breakdown_applies_overrides_and_one_time_rule() {
        let breakdown = month_breakdown(&scenario(), &situations(), m("2024-04"));
        assert_relative_eq!(breakdown.total_income, 3000.0);
        assert_eq!(breakdown.expenses.len(), 1);
        assert_eq!(breakdown.expenses[0].situation_id, "flat");
    }

    #[test]
    fn test_breakdown_matches_simulation() {
        let scenario = scenario();
        let situations = situations();
        let rows = simulate_scenario(&scenario, &situations);
        for row in &rows {
            let breakdown = month_breakdown(&scenario, &situations, row.month);
            assert_relative_eq!(breakdown.total_income, row.income);
            assert_relative_eq!(breakdown.total_expenses, row.expenses);
        }
    }

    #[test]
    fn test_breakdown_off_axis_is_empty() {
        let breakdown = month_breakdown(&scenario(), &situations(), m("2024-07"));
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.net(), 0.0);
    }
}
