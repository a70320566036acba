//! Commit a painted month range into a scenario's entries or overrides
//!
//! Every commit is a full replacement: the target's rows are discarded and
//! regenerated (with fresh ids) from the canonical month set, so entries for
//! one situation never overlap or touch after a commit.

use std::collections::BTreeMap;

use log::debug;

use crate::interval::{clip_to_axis, months_to_ranges, MonthSet};
use crate::model::{Scenario, ScenarioEffectEntry, ScenarioEntry};

/// What a paint gesture does to the months it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    /// Make the months active
    Add,
    /// Make the months inactive
    Remove,
}

/// Replacement entry and override collections for one scenario
#[derive(Debug, Clone, PartialEq)]
pub struct PaintCommit {
    pub entries: Vec<ScenarioEntry>,
    pub effect_entries: Vec<ScenarioEffectEntry>,
}

impl PaintCommit {
    /// Install the replacement collections
    pub fn apply(self, scenario: &mut Scenario) {
        scenario.entries = self.entries;
        scenario.effect_entries = self.effect_entries;
    }

    /// Copy of `scenario` with the replacement collections installed
    pub fn applied_to(self, scenario: &Scenario) -> Scenario {
        let mut updated = scenario.clone();
        self.apply(&mut updated);
        updated
    }
}

/// Add or remove `painted` months from a situation's active timeline.
///
/// The result is clipped to the scenario axis, and every override of the
/// situation is pruned to the new active months.
pub fn paint_situation(
    scenario: &Scenario,
    situation_id: &str,
    painted: &MonthSet,
    mode: PaintMode,
) -> PaintCommit {
    let axis = scenario.axis();
    let mut active = scenario.active_months(situation_id);

    match mode {
        PaintMode::Add => active.extend(painted.iter().copied()),
        PaintMode::Remove => active.retain(|m| !painted.contains(m)),
    }
    let active = clip_to_axis(&active, &axis);

    let ranges = months_to_ranges(active.iter().copied());
    debug!(
        "paint situation {} ({:?}): {} active months in {} ranges",
        situation_id,
        mode,
        active.len(),
        ranges.len()
    );

    let mut entries: Vec<ScenarioEntry> = scenario
        .entries
        .iter()
        .filter(|e| e.situation_id != situation_id)
        .cloned()
        .collect();
    entries.extend(ranges.into_iter().map(|r| ScenarioEntry::new(situation_id, r)));

    // Disabled months per effect, ordered by effect id
    let mut disabled: BTreeMap<&str, MonthSet> = BTreeMap::new();
    for override_row in scenario.effect_entries.iter().filter(|o| o.situation_id == situation_id) {
        disabled
            .entry(override_row.effect_id.as_str())
            .or_default()
            .extend(override_row.range().months());
    }

    let mut effect_entries: Vec<ScenarioEffectEntry> = scenario
        .effect_entries
        .iter()
        .filter(|o| o.situation_id != situation_id)
        .cloned()
        .collect();

    for (effect_id, months) in disabled {
        let pruned: MonthSet = months.intersection(&active).copied().collect();
        if pruned.len() != months.len() {
            debug!(
                "pruned {} disabled months from effect {} of {}",
                months.len() - pruned.len(),
                effect_id,
                situation_id
            );
        }
        effect_entries.extend(
            months_to_ranges(pruned)
                .into_iter()
                .map(|r| ScenarioEffectEntry::new(situation_id, effect_id, r)),
        );
    }

    PaintCommit {
        entries,
        effect_entries,
    }
}

/// Enable (`Add`) or disable (`Remove`) one effect over `painted` months.
///
/// Only months where the situation is active on the axis can be painted;
/// anything else in `painted` is ignored. Situation entries are unchanged.
pub fn paint_effect(
    scenario: &Scenario,
    situation_id: &str,
    effect_id: &str,
    painted: &MonthSet,
    mode: PaintMode,
) -> PaintCommit {
    let axis = scenario.axis();
    let active = clip_to_axis(&scenario.active_months(situation_id), &axis);
    let paintable: MonthSet = painted.intersection(&active).copied().collect();

    let mut disabled = scenario.disabled_months(situation_id, effect_id);
    match mode {
        PaintMode::Add => disabled.retain(|m| !paintable.contains(m)),
        PaintMode::Remove => disabled.extend(paintable.iter().copied()),
    }
    let disabled: MonthSet = disabled.intersection(&active).copied().collect();

    let ranges = months_to_ranges(disabled.iter().copied());
    debug!(
        "paint effect {}/{} ({:?}): {} disabled months in {} ranges",
        situation_id,
        effect_id,
        mode,
        disabled.len(),
        ranges.len()
    );

    let mut effect_entries: Vec<ScenarioEffectEntry> = scenario
        .effect_entries
        .iter()
        .filter(|o| !o.targets(situation_id, effect_id))
        .cloned()
        .collect();
    effect_entries.extend(
        ranges
            .into_iter()
            .map(|r| ScenarioEffectEntry::new(situation_id, effect_id, r)),
    );

    PaintCommit {
        entries: scenario.entries.clone(),
        effect_entries,
    }
}
