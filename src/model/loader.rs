//! Load and save planner data from JSON
//!
//! Imports are checked for the top-level `situations` and `scenarios` arrays
//! before typed deserialization; the engines assume well-formed data.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Scenario, Situation};
use crate::error::{Error, Result};

/// Default data file used by the CLI
pub const DEFAULT_DATA_PATH: &str = "scenarios.json";

/// Everything the planner stores: the situation library and the scenarios
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub situations: Vec<Situation>,
    pub scenarios: Vec<Scenario>,
}

impl AppData {
    pub fn scenario(&self, id: &str) -> Result<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::UnknownScenario(id.to_string()))
    }

    pub fn scenario_mut(&mut self, id: &str) -> Result<&mut Scenario> {
        self.scenarios
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::UnknownScenario(id.to_string()))
    }

    pub fn situation(&self, id: &str) -> Result<&Situation> {
        self.situations
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::UnknownSituation(id.to_string()))
    }
}

/// Versioned whole-state snapshot exchanged with the sync service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u64,
    pub updated_at: DateTime<Utc>,
    /// Originating client, echoed back on broadcast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub data: AppData,
}

impl Snapshot {
    pub fn new(version: u64, data: AppData) -> Self {
        Self {
            version,
            updated_at: Utc::now(),
            client_id: None,
            data,
        }
    }

    /// Last-writer-wins at whole-snapshot granularity: a higher version wins,
    /// ties go to the later timestamp.
    pub fn supersedes(&self, other: &Snapshot) -> bool {
        (self.version, self.updated_at) > (other.version, other.updated_at)
    }

    /// True when this broadcast originated from `client_id`
    pub fn is_echo_of(&self, client_id: &str) -> bool {
        self.client_id.as_deref() == Some(client_id)
    }
}

/// Reject imports whose top-level collections are missing or not arrays
pub fn validate_import(value: &Value) -> Result<()> {
    for key in ["situations", "scenarios"] {
        match value.get(key) {
            None => return Err(Error::MissingCollection(key)),
            Some(v) if !v.is_array() => return Err(Error::NotAnArray(key)),
            Some(_) => {}
        }
    }
    Ok(())
}

/// Parse planner data from a JSON value after structural validation
pub fn app_data_from_value(value: Value) -> Result<AppData> {
    validate_import(&value)?;
    let data: AppData = serde_json::from_value(value)?;

    for scenario in &data.scenarios {
        if !scenario.axis_fits() {
            return Err(Error::AxisOutOfRange {
                scenario_id: scenario.id.clone(),
                start_month: scenario.start_month.to_string(),
                duration_months: scenario.duration_months,
            });
        }
        if scenario.duration_months == 0 {
            warn!("scenario {} has an empty axis (durationMonths = 0)", scenario.id);
        }
    }

    info!(
        "Loaded {} situations and {} scenarios",
        data.situations.len(),
        data.scenarios.len()
    );
    Ok(data)
}

/// Load planner data from any reader
pub fn load_app_data_from_reader<R: Read>(reader: R) -> Result<AppData> {
    let value: Value = serde_json::from_reader(reader)?;
    app_data_from_value(value)
}

/// Load planner data from a JSON string
pub fn load_app_data_from_str(json: &str) -> Result<AppData> {
    let value: Value = serde_json::from_str(json)?;
    app_data_from_value(value)
}

/// Load planner data from a file
pub fn load_app_data<P: AsRef<Path>>(path: P) -> Result<AppData> {
    let file = File::open(path.as_ref())?;
    load_app_data_from_reader(BufReader::new(file))
}

/// Write planner data as pretty-printed JSON
pub fn save_app_data<P: AsRef<Path>>(path: P, data: &AppData) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}
