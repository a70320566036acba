//! Situation, effect and scenario data structures plus JSON loading

mod data;
mod scenario;
pub mod loader;

pub use data::{Category, Effect, EffectKind, Situation, VarianceDirection};
pub use scenario::{
    new_id, Annotation, SavingsBalancePoint, Scenario, ScenarioEffectEntry, ScenarioEntry,
};
pub use loader::{load_app_data, load_app_data_from_reader, load_app_data_from_str, save_app_data, AppData, Snapshot};
