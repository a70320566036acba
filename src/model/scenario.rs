//! Scenario structures: timeline entries, effect overrides and the month axis

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interval::{expand_ranges, MonthRange, MonthSet};
use crate::month::Month;

/// Fresh identifier for regenerated entries
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Interval during which a situation is active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioEntry {
    pub id: String,
    pub situation_id: String,
    pub start_month: Month,
    pub end_month: Month,
}

impl ScenarioEntry {
    pub fn new(situation_id: impl Into<String>, range: MonthRange) -> Self {
        Self {
            id: new_id(),
            situation_id: situation_id.into(),
            start_month: range.start,
            end_month: range.end,
        }
    }

    pub fn range(&self) -> MonthRange {
        MonthRange::new(self.start_month, self.end_month)
    }

    pub fn is_active(&self, month: Month) -> bool {
        self.range().contains(month)
    }
}

/// Interval during which one effect of an active situation is disabled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioEffectEntry {
    pub id: String,
    pub situation_id: String,
    pub effect_id: String,
    pub start_month: Month,
    pub end_month: Month,
}

impl ScenarioEffectEntry {
    pub fn new(situation_id: impl Into<String>, effect_id: impl Into<String>, range: MonthRange) -> Self {
        Self {
            id: new_id(),
            situation_id: situation_id.into(),
            effect_id: effect_id.into(),
            start_month: range.start,
            end_month: range.end,
        }
    }

    pub fn range(&self) -> MonthRange {
        MonthRange::new(self.start_month, self.end_month)
    }

    pub fn targets(&self, situation_id: &str, effect_id: &str) -> bool {
        self.situation_id == situation_id && self.effect_id == effect_id
    }
}

/// A balance the user actually recorded at a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsBalancePoint {
    pub month: Month,
    pub balance: f64,
}

/// Free-text note pinned to a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: String,
    pub month: Month,
    pub text: String,
}

/// One simulated financial future
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub color: String,

    pub initial_balance: f64,

    pub start_month: Month,

    /// Length of the axis, at least 1
    pub duration_months: u32,

    #[serde(default)]
    pub entries: Vec<ScenarioEntry>,

    #[serde(default)]
    pub effect_entries: Vec<ScenarioEffectEntry>,

    #[serde(default)]
    pub savings_balance_points: Vec<SavingsBalancePoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_balance: Option<f64>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Scenario {
    /// Empty scenario with the given axis
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        initial_balance: f64,
        start_month: Month,
        duration_months: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: String::new(),
            initial_balance,
            start_month,
            duration_months,
            entries: Vec::new(),
            effect_entries: Vec::new(),
            savings_balance_points: Vec::new(),
            goal_balance: None,
            annotations: Vec::new(),
        }
    }

    /// True when the last axis month is still a four-digit-year month
    pub fn axis_fits(&self) -> bool {
        self.duration_months == 0
            || self
                .start_month
                .add_months(i64::from(self.duration_months) - 1)
                .is_some()
    }

    /// Valid months: `[start_month, start_month + duration_months - 1]`,
    /// cut off at `9999-12` when the duration runs past it
    pub fn axis(&self) -> MonthRange {
        MonthRange::from_duration(self.start_month, self.duration_months)
    }

    pub fn end_month(&self) -> Month {
        self.axis().end
    }

    pub fn entries_for<'a>(&'a self, situation_id: &'a str) -> impl Iterator<Item = &'a ScenarioEntry> + 'a {
        self.entries.iter().filter(move |e| e.situation_id == situation_id)
    }

    /// Union of every month the situation's entries cover (not clipped)
    pub fn active_months(&self, situation_id: &str) -> MonthSet {
        let ranges: Vec<MonthRange> = self.entries_for(situation_id).map(|e| e.range()).collect();
        expand_ranges(&ranges)
    }

    /// Whether any entry of the situation covers `month`
    pub fn is_situation_active(&self, situation_id: &str, month: Month) -> bool {
        self.entries_for(situation_id).any(|e| e.is_active(month))
    }

    /// Union of every month the effect is disabled (not clipped)
    pub fn disabled_months(&self, situation_id: &str, effect_id: &str) -> MonthSet {
        let ranges: Vec<MonthRange> = self
            .effect_entries
            .iter()
            .filter(|o| o.targets(situation_id, effect_id))
            .map(|o| o.range())
            .collect();
        expand_ranges(&ranges)
    }

    pub fn is_effect_disabled(&self, situation_id: &str, effect_id: &str, month: Month) -> bool {
        self.effect_entries
            .iter()
            .any(|o| o.targets(situation_id, effect_id) && o.range().contains(month))
    }

    /// Effect applies at `month`: situation active and effect not overridden
    pub fn is_effect_active(&self, situation_id: &str, effect_id: &str, month: Month) -> bool {
        self.is_situation_active(situation_id, month) && !self.is_effect_disabled(situation_id, effect_id, month)
    }
}
