//! Two-phase paint gesture: live preview while painting, one commit on release

use crate::error::{Error, Result};
use crate::interval::{range_to_months, MonthRange};
use crate::model::Scenario;
use crate::month::Month;

use super::commit::{paint_effect, paint_situation, PaintCommit, PaintMode};

/// What a gesture paints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintTarget {
    /// A situation's active months
    Situation { situation_id: String },
    /// One effect's enabled months within its situation
    Effect { situation_id: String, effect_id: String },
}

impl PaintTarget {
    pub fn situation(situation_id: impl Into<String>) -> Self {
        PaintTarget::Situation {
            situation_id: situation_id.into(),
        }
    }

    pub fn effect(situation_id: impl Into<String>, effect_id: impl Into<String>) -> Self {
        PaintTarget::Effect {
            situation_id: situation_id.into(),
            effect_id: effect_id.into(),
        }
    }

    /// Whether `month` is currently committed-active for this target
    pub fn is_active(&self, scenario: &Scenario, month: Month) -> bool {
        match self {
            PaintTarget::Situation { situation_id } => scenario.is_situation_active(situation_id, month),
            PaintTarget::Effect { situation_id, effect_id } => {
                scenario.is_effect_active(situation_id, effect_id, month)
            }
        }
    }

    /// Commit every month of `range` to the target
    pub fn commit(&self, scenario: &Scenario, range: MonthRange, mode: PaintMode) -> PaintCommit {
        let months = range_to_months(range.start, range.end);
        match self {
            PaintTarget::Situation { situation_id } => paint_situation(scenario, situation_id, &months, mode),
            PaintTarget::Effect { situation_id, effect_id } => {
                paint_effect(scenario, situation_id, effect_id, &months, mode)
            }
        }
    }
}

/// An in-progress gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stroke {
    pub target: PaintTarget,
    pub anchor: Month,
    pub current: Month,
    /// Fixed when the gesture starts
    pub mode: PaintMode,
}

impl Stroke {
    /// Months covered so far, in either drag direction
    pub fn range(&self) -> MonthRange {
        MonthRange::spanning(self.anchor, self.current)
    }
}

/// Paint gesture state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    Idle,
    Painting(Stroke),
}

impl Gesture {
    pub fn is_painting(&self) -> bool {
        matches!(self, Gesture::Painting(_))
    }

    /// Start painting at `anchor`.
    ///
    /// The mode is decided here and kept for the whole gesture: an active
    /// anchor means the gesture removes, an inactive one means it adds.
    pub fn begin(&mut self, scenario: &Scenario, target: PaintTarget, anchor: Month) -> Result<PaintMode> {
        if self.is_painting() {
            return Err(Error::GestureInProgress);
        }
        let mode = if target.is_active(scenario, anchor) {
            PaintMode::Remove
        } else {
            PaintMode::Add
        };
        *self = Gesture::Painting(Stroke {
            target,
            anchor,
            current: anchor,
            mode,
        });
        Ok(mode)
    }

    /// Move the live end of the gesture; ignored while idle
    pub fn hover(&mut self, month: Month) {
        if let Gesture::Painting(stroke) = self {
            stroke.current = month;
        }
    }

    /// Range and mode to draw as a preview; nothing is committed
    pub fn preview(&self) -> Option<(MonthRange, PaintMode)> {
        match self {
            Gesture::Idle => None,
            Gesture::Painting(stroke) => Some((stroke.range(), stroke.mode)),
        }
    }

    /// Finish the gesture, returning the commit for the painted range
    pub fn release(&mut self, scenario: &Scenario) -> Option<PaintCommit> {
        match std::mem::take(self) {
            Gesture::Idle => None,
            Gesture::Painting(stroke) => Some(stroke.target.commit(scenario, stroke.range(), stroke.mode)),
        }
    }

    /// Abandon the gesture without committing, e.g. when the scenario is
    /// replaced by a remote update mid-gesture
    pub fn cancel(&mut self) {
        *self = Gesture::Idle;
    }
}
