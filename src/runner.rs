//! Scenario runner for side-by-side projections
//!
//! Holds the situation library once and simulates any number of scenarios
//! against it. Scenarios are independent, so batches run in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::{AppData, Scenario, Situation};
use crate::simulation::{simulate_scenario, LedgerSummary, MonthlyBalance};

/// Simulation output for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    pub scenario_id: String,
    pub name: String,
    pub rows: Vec<MonthlyBalance>,
    pub summary: LedgerSummary,
}

/// Pre-loaded runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(data.situations.clone());
/// let projections = runner.run_all(&data.scenarios);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    situations: Vec<Situation>,
}

impl ScenarioRunner {
    /// Create runner over a situation library
    pub fn new(situations: Vec<Situation>) -> Self {
        Self { situations }
    }

    /// Create runner from loaded planner data
    pub fn from_app_data(data: &AppData) -> Self {
        Self::new(data.situations.clone())
    }

    /// Run a single scenario
    pub fn run(&self, scenario: &Scenario) -> ScenarioProjection {
        let rows = simulate_scenario(scenario, &self.situations);
        let summary = LedgerSummary::from_rows(scenario, &rows);
        ScenarioProjection {
            scenario_id: scenario.id.clone(),
            name: scenario.name.clone(),
            rows,
            summary,
        }
    }

    /// Run every scenario in parallel; results keep the input order
    pub fn run_all(&self, scenarios: &[Scenario]) -> Vec<ScenarioProjection> {
        scenarios.par_iter().map(|scenario| self.run(scenario)).collect()
    }

    pub fn situations(&self) -> &[Situation] {
        &self.situations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::MonthRange;
    use crate::model::{Category, Effect, EffectKind, ScenarioEntry};
    use crate::month::Month;

    fn m(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn situations() -> Vec<Situation> {
        vec![Situation::new("job", "Job")
            .with_effect(Effect::new("salary", "Salary", EffectKind::Recurring, Category::Income, 2000.0))]
    }

    fn scenario_with_job(id: &str, months: u32) -> Scenario {
        let mut scenario = Scenario::new(id, id, 0.0, m("2024-01"), 12);
        scenario.entries.push(ScenarioEntry::new(
            "job",
            MonthRange::from_duration(m("2024-01"), months),
        ));
        scenario
    }

    #[test]
    fn test_run_all_matches_individual_runs() {
        let runner = ScenarioRunner::new(situations());
        let scenarios: Vec<Scenario> = (1..=8).map(|n| scenario_with_job(&format!("s{n}"), n)).collect();

        let batch = runner.run_all(&scenarios);
        assert_eq!(batch.len(), scenarios.len());

        for (projection, scenario) in batch.iter().zip(&scenarios) {
            assert_eq!(projection.scenario_id, scenario.id);
            assert_eq!(projection, &runner.run(scenario));
        }

        // More months employed means a higher final balance
        assert!(batch[7].summary.final_balance > batch[0].summary.final_balance);
        assert_eq!(batch[2].summary.final_balance, 6000.0);
    }

    #[test]
    fn test_from_app_data() {
        let data = AppData {
            situations: situations(),
            scenarios: vec![scenario_with_job("only", 3)],
        };
        let runner = ScenarioRunner::from_app_data(&data);
        assert_eq!(runner.situations().len(), 1);
        let projection = runner.run(&data.scenarios[0]);
        assert_eq!(projection.rows.len(), 12);
    }
}
