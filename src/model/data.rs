//! Situation and effect data structures matching the stored JSON format

use serde::{Deserialize, Serialize};

/// How often an effect applies while its situation is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    /// Every active month
    Recurring,
    /// Once, at the first month of each active range
    OneTime,
}

/// Which side of the ledger an effect lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Income,
    Expense,
}

impl Category {
    /// +1 for income, -1 for expenses
    pub fn sign(&self) -> f64 {
        match self {
            Category::Income => 1.0,
            Category::Expense => -1.0,
        }
    }
}

/// Which way the stated amount may deviate
///
/// Directions apply to the amount, not the balance: `-` on an expense only
/// lowers the cost, so it never worsens the pessimistic balance track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VarianceDirection {
    /// Amount may come in higher
    #[serde(rename = "+")]
    Up,
    /// Amount may come in lower
    #[serde(rename = "-")]
    Down,
    /// Either way
    #[default]
    #[serde(rename = "±")]
    Both,
}

impl VarianceDirection {
    pub fn allows_up(&self) -> bool {
        matches!(self, VarianceDirection::Up | VarianceDirection::Both)
    }

    pub fn allows_down(&self) -> bool {
        matches!(self, VarianceDirection::Down | VarianceDirection::Both)
    }
}

/// A single income or expense line of a situation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    pub id: String,

    pub label: String,

    pub kind: EffectKind,

    pub category: Category,

    /// Unsigned monthly (or one-off) amount
    pub amount: f64,

    /// Uncertainty band in percent, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance_percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance_direction: Option<VarianceDirection>,
}

impl Effect {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: EffectKind,
        category: Category,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            category,
            amount,
            variance_percent: None,
            variance_direction: None,
        }
    }

    /// Attach a variance band
    pub fn with_variance(mut self, percent: f64, direction: VarianceDirection) -> Self {
        self.variance_percent = Some(percent);
        self.variance_direction = Some(direction);
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.kind == EffectKind::Recurring
    }

    /// Variance as a fraction, clamped to [0, 1]
    pub fn variance_fraction(&self) -> f64 {
        self.variance_percent.unwrap_or(0.0).clamp(0.0, 100.0) / 100.0
    }

    pub fn direction(&self) -> VarianceDirection {
        self.variance_direction.unwrap_or_default()
    }

    /// Signed contribution at the stated amount
    pub fn signed_amount(&self) -> f64 {
        self.category.sign() * self.amount
    }

    /// Signed contributions on the (pessimistic, optimistic) balance tracks
    ///
    /// Income shrinks on the pessimistic track and grows on the optimistic one;
    /// expenses do the reverse. A side only moves when the direction allows
    /// the amount to deviate that way.
    pub fn signed_band(&self) -> (f64, f64) {
        let v = self.variance_fraction();
        let dir = self.direction();
        let lower = if dir.allows_down() { self.amount * (1.0 - v) } else { self.amount };
        let upper = if dir.allows_up() { self.amount * (1.0 + v) } else { self.amount };

        match self.category {
            Category::Income => (lower, upper),
            Category::Expense => (-upper, -lower),
        }
    }
}

/// A named, reusable bundle of effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Situation {
    pub id: String,

    pub name: String,

    /// Free-form grouping label (e.g. "housing", "work")
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl Situation {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            color: String::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn effect(&self, effect_id: &str) -> Option<&Effect> {
        self.effects.iter().find(|e| e.id == effect_id)
    }
}
