//! Scenario Planner - monthly cash-flow projections for what-if financial futures
//!
//! This library provides:
//! - A `YYYY-MM` month token and interval algebra over month sets
//! - Situations, effects and scenarios with their JSON data contract
//! - Paint commits that rewrite a scenario's timeline from a brush gesture
//! - A pure month-by-month balance simulation with variance bands
//! - Parallel multi-scenario comparison and CSV export

pub mod error;
pub mod month;
pub mod interval;
pub mod model;
pub mod paint;
pub mod simulation;
pub mod runner;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use month::Month;
pub use interval::{months_to_ranges, MonthRange, MonthSet};
pub use model::{AppData, Effect, Scenario, ScenarioEffectEntry, ScenarioEntry, Situation};
pub use paint::{paint_effect, paint_situation, Gesture, PaintCommit, PaintMode, PaintTarget};
pub use simulation::{month_breakdown, simulate_scenario, MonthlyBalance};
pub use runner::{ScenarioProjection, ScenarioRunner};
