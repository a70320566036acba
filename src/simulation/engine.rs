//! Monthly cash-flow simulation over a scenario's axis

use std::collections::HashMap;

use log::debug;

use crate::interval::{MonthRange, MonthSet};
use crate::model::{Effect, Scenario, ScenarioEntry, Situation};
use crate::month::Month;

use super::ledger::MonthlyBalance;
use super::state::{BalanceState, MonthFlows};

/// Resolved view of a scenario's timeline: entries joined to their situations
/// and per-effect disabled months clipped to the axis
pub(crate) struct Timeline<'a> {
    axis: MonthRange,
    entries: Vec<(&'a ScenarioEntry, &'a Situation)>,
    /// situation id -> effect id -> disabled months
    disabled: HashMap<&'a str, HashMap<&'a str, MonthSet>>,
}

impl<'a> Timeline<'a> {
    pub(crate) fn new(scenario: &'a Scenario, situations: &'a [Situation]) -> Self {
        let axis = scenario.axis();
        let by_id: HashMap<&str, &Situation> = situations.iter().map(|s| (s.id.as_str(), s)).collect();

        let entries = scenario
            .entries
            .iter()
            .filter_map(|entry| match by_id.get(entry.situation_id.as_str()) {
                Some(situation) => Some((entry, *situation)),
                None => {
                    debug!(
                        "scenario {}: skipping entry {} for unknown situation {}",
                        scenario.id, entry.id, entry.situation_id
                    );
                    None
                }
            })
            .collect();

        let mut disabled: HashMap<&str, HashMap<&str, MonthSet>> = HashMap::new();
        for override_row in &scenario.effect_entries {
            if let Some(range) = override_row.range().clip(&axis) {
                disabled
                    .entry(override_row.situation_id.as_str())
                    .or_default()
                    .entry(override_row.effect_id.as_str())
                    .or_default()
                    .extend(range.months());
            }
        }

        Self {
            axis,
            entries,
            disabled,
        }
    }

    pub(crate) fn axis(&self) -> MonthRange {
        self.axis
    }

    fn is_disabled(&self, situation_id: &str, effect_id: &str, month: Month) -> bool {
        self.disabled
            .get(situation_id)
            .and_then(|by_effect| by_effect.get(effect_id))
            .is_some_and(|months| months.contains(&month))
    }

    /// Effects that apply at `month`, with the situation they belong to.
    ///
    /// One-time effects fire only in the first month of each entry, so a
    /// situation with several disjoint ranges fires them once per range.
    pub(crate) fn firing(&self, month: Month) -> impl Iterator<Item = (&'a Situation, &'a Effect)> + '_ {
        let on_axis = self.axis.contains(month);
        self.entries
            .iter()
            .filter(move |(entry, _)| on_axis && entry.is_active(month))
            .flat_map(move |&(entry, situation)| {
                situation
                    .effects
                    .iter()
                    .filter(move |effect| {
                        !self.is_disabled(&situation.id, &effect.id, month)
                            && (effect.is_recurring() || month == entry.start_month)
                    })
                    .map(move |effect| (situation, effect))
            })
    }
}

/// Simulate a scenario month by month.
///
/// Returns one row per axis month, in order. Entries referring to unknown
/// situations are skipped and overrides for unknown effects have no effect.
/// Neither argument is modified.
pub fn simulate_scenario(scenario: &Scenario, situations: &[Situation]) -> Vec<MonthlyBalance> {
    let timeline = Timeline::new(scenario, situations);
    let mut state = BalanceState::new(scenario.initial_balance);
    let mut rows = Vec::with_capacity(timeline.axis().len());

    for month in timeline.axis().months() {
        let mut flows = MonthFlows::new(month);
        for (_, effect) in timeline.firing(month) {
            flows.add(effect);
        }
        rows.push(state.close_month(&flows));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, EffectKind, ScenarioEffectEntry, VarianceDirection};
    use approx::assert_relative_eq;

    fn m(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn range(start: &str, end: &str) -> MonthRange {
        MonthRange::new(m(start), m(end))
    }

    fn job() -> Situation {
        Situation::new("job", "Job")
            .with_effect(Effect::new("salary", "Salary", EffectKind::Recurring, Category::Income, 500.0))
            .with_effect(Effect::new("commute", "Commute", EffectKind::Recurring, Category::Expense, 200.0))
    }

    fn balances(rows: &[MonthlyBalance]) -> Vec<f64> {
        rows.iter().map(|r| r.balance).collect()
    }

    #[test]
    fn test_basic_recurring_flow() {
        let mut scenario = Scenario::new("s", "Basic", 1000.0, m("2024-01"), 3);
        scenario.entries.push(ScenarioEntry::new("job", range("2024-01", "2024-03")));

        let rows = simulate_scenario(&scenario, &[job()]);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].month, m("2024-01"));
        assert_eq!(rows[2].month, m("2024-03"));
        assert_eq!(balances(&rows), vec![1300.0, 1600.0, 1900.0]);
        assert_eq!(rows[0].income, 500.0);
        assert_eq!(rows[0].expenses, 200.0);
        assert_eq!(rows[0].net, 300.0);
        assert_eq!(rows[0].recurring_net, 300.0);
    }

    #[test]
    fn test_one_time_effect_fires_at_entry_start() {
        let car = Situation::new("car", "Car").with_effect(Effect::new(
            "purchase",
            "Purchase",
            EffectKind::OneTime,
            Category::Expense,
            900.0,
        ));
        let mut scenario = Scenario::new("s", "One-time", 1000.0, m("2024-01"), 3);
        scenario.entries.push(ScenarioEntry::new("car", range("2024-01", "2024-03")));

        let rows = simulate_scenario(&scenario, &[car]);

        assert_eq!(balances(&rows), vec![100.0, 100.0, 100.0]);
        assert_eq!(rows[0].expenses, 900.0);
        // one-off shocks do not count towards the sustainable net
        assert_eq!(rows[0].recurring_net, 0.0);
    }

    #[test]
    fn test_one_time_effect_fires_once_per_range() {
        let gift = Situation::new("gift", "Gift").with_effect(Effect::new(
            "cash",
            "Cash",
            EffectKind::OneTime,
            Category::Income,
            100.0,
        ));
        let mut scenario = Scenario::new("s", "Ranges", 0.0, m("2024-01"), 6);
        scenario.entries.push(ScenarioEntry::new("gift", range("2024-01", "2024-02")));
        scenario.entries.push(ScenarioEntry::new("gift", range("2024-05", "2024-06")));

        let rows = simulate_scenario(&scenario, &[gift]);
        assert_eq!(balances(&rows), vec![100.0, 100.0, 100.0, 100.0, 200.0, 200.0]);
    }

    #[test]
    fn test_no_entries_is_flat() {
        let scenario = Scenario::new("s", "Empty", 250.0, m("2024-11"), 4);
        let rows = simulate_scenario(&scenario, &[]);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].month, m("2025-02"));
        for row in &rows {
            assert_eq!(row.balance, 250.0);
            assert_eq!(row.balance_min, 250.0);
            assert_eq!(row.balance_max, 250.0);
            assert_eq!(row.net, 0.0);
        }
    }

    #[test]
    fn test_unknown_situation_skipped() {
        let mut scenario = Scenario::new("s", "Dangling", 1000.0, m("2024-01"), 3);
        scenario.entries.push(ScenarioEntry::new("ghost", range("2024-01", "2024-03")));
        scenario.entries.push(ScenarioEntry::new("job", range("2024-02", "2024-02")));

        let rows = simulate_scenario(&scenario, &[job()]);
        assert_eq!(balances(&rows), vec![1000.0, 1300.0, 1300.0]);
    }

    #[test]
    fn test_overrides_disable_effect() {
        let mut scenario = Scenario::new("s", "Override", 0.0, m("2024-01"), 3);
        scenario.entries.push(ScenarioEntry::new("job", range("2024-01", "2024-03")));
        scenario
            .effect_entries
            .push(ScenarioEffectEntry::new("job", "commute", range("2024-02", "2024-03")));
        // unknown effect id: inert
        scenario
            .effect_entries
            .push(ScenarioEffectEntry::new("job", "missing", range("2024-01", "2024-03")));

        let rows = simulate_scenario(&scenario, &[job()]);
        assert_eq!(balances(&rows), vec![300.0, 800.0, 1300.0]);
        assert_eq!(rows[1].expenses, 0.0);
    }

    #[test]
    fn test_out_of_axis_entries_ignored() {
        let mut scenario = Scenario::new("s", "Clipped", 0.0, m("2024-01"), 2);
        scenario.entries.push(ScenarioEntry::new("job", range("2023-06", "2024-01")));
        scenario.entries.push(ScenarioEntry::new("job", range("2024-05", "2024-09")));

        let rows = simulate_scenario(&scenario, &[job()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(balances(&rows), vec![300.0, 300.0]);
    }

    #[test]
    fn test_axis_cut_off_at_last_year() {
        let mut scenario = Scenario::new("s", "Late", 0.0, m("9999-11"), 4);
        scenario.entries.push(ScenarioEntry::new("job", range("9999-11", "9999-12")));

        let rows = simulate_scenario(&scenario, &[job()]);

        let tokens: Vec<String> = rows.iter().map(|r| r.month.to_string()).collect();
        assert_eq!(tokens, vec!["9999-11", "9999-12"]);
        for token in &tokens {
            assert!(token.parse::<Month>().is_ok());
        }
        assert_relative_eq!(rows[1].balance, 600.0);
    }

    #[test]
    fn test_huge_duration_runs_to_last_month() {
        let scenario = Scenario::new("s", "Huge", 10.0, m("9990-01"), 1 << 31);
        let rows = simulate_scenario(&scenario, &[]);
        assert_eq!(rows.len(), 120);
        assert_eq!(rows.last().unwrap().month, Month::MAX);
        assert_relative_eq!(rows.last().unwrap().balance, 10.0);
    }

    #[test]
    fn test_balance_recursion() {
        let bonus = Situation::new("bonus", "Bonus").with_effect(
            Effect::new("b", "Bonus", EffectKind::OneTime, Category::Income, 1234.5)
                .with_variance(10.0, VarianceDirection::Both),
        );
        let mut scenario = Scenario::new("s", "Mixed", -50.0, m("2023-10"), 9);
        scenario.entries.push(ScenarioEntry::new("job", range("2023-11", "2024-04")));
        scenario.entries.push(ScenarioEntry::new("bonus", range("2024-01", "2024-01")));
        scenario.entries.push(ScenarioEntry::new("bonus", range("2024-03", "2024-06")));

        let rows = simulate_scenario(&scenario, &[job(), bonus]);
        for (i, row) in rows.iter().enumerate() {
            let previous = if i == 0 { scenario.initial_balance } else { rows[i - 1].balance };
            assert_relative_eq!(row.balance, previous + row.net);
            assert_relative_eq!(row.net, row.income - row.expenses);
        }
    }

    #[test]
    fn test_simulation_is_pure() {
        let mut scenario = Scenario::new("s", "Pure", 10.0, m("2024-01"), 12);
        scenario.entries.push(ScenarioEntry::new("job", range("2024-03", "2024-09")));
        let situations = vec![job()];
        let scenario_before = scenario.clone();
        let situations_before = situations.clone();

        let first = simulate_scenario(&scenario, &situations);
        let second = simulate_scenario(&scenario, &situations);

        assert_eq!(first, second);
        assert_eq!(scenario, scenario_before);
        assert_eq!(situations, situations_before);
    }

    #[test]
    fn test_variance_band() {
        let freelance = Situation::new("freelance", "Freelance")
            .with_effect(
                Effect::new("fees", "Fees", EffectKind::Recurring, Category::Income, 1000.0)
                    .with_variance(20.0, VarianceDirection::Both),
            )
            .with_effect(
                Effect::new("tools", "Tools", EffectKind::Recurring, Category::Expense, 100.0)
                    .with_variance(50.0, VarianceDirection::Up),
            );
        let mut scenario = Scenario::new("s", "Band", 0.0, m("2024-01"), 2);
        scenario.entries.push(ScenarioEntry::new("freelance", range("2024-01", "2024-02")));

        let rows = simulate_scenario(&scenario, &[freelance]);

        // min: 800 income - 150 expense; max: 1200 income - 100 expense
        assert_relative_eq!(rows[0].balance, 900.0);
        assert_relative_eq!(rows[0].balance_min, 650.0);
        assert_relative_eq!(rows[0].balance_max, 1100.0);
        assert_relative_eq!(rows[1].balance_min, 1300.0);
        assert_relative_eq!(rows[1].balance_max, 2200.0);
    }
}
