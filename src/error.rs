//! Crate error type

use thiserror::Error;

/// Errors raised at the edges of the planner (parsing, loading, commands).
///
/// The simulation and paint engines themselves never fail on well-formed
/// data; these variants cover malformed tokens, structurally invalid
/// imports and lookups made by callers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid month token {0:?}: expected YYYY-MM")]
    InvalidMonth(String),

    #[error("imported data is missing the {0:?} collection")]
    MissingCollection(&'static str),

    #[error("imported {0:?} collection is not an array")]
    NotAnArray(&'static str),

    #[error("scenario not found: {0}")]
    UnknownScenario(String),

    #[error("situation not found: {0}")]
    UnknownSituation(String),

    #[error("effect {effect_id} not found on situation {situation_id}")]
    UnknownEffect {
        situation_id: String,
        effect_id: String,
    },

    #[error("scenario {scenario_id}: {duration_months} months from {start_month} runs past 9999-12")]
    AxisOutOfRange {
        scenario_id: String,
        start_month: String,
        duration_months: u32,
    },

    #[error("a paint gesture is already in progress")]
    GestureInProgress,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
