//! Load scenario parameters from JSON
//!
//! Missing fields fall back to [`ScenarioParameters::default`], so a file only
//! needs to name the inputs that differ from the standard scenario.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::ScenarioParameters;
use crate::error::Result;

/// Parse and validate scenario parameters from any JSON reader
pub fn load_scenario_from_reader<R: Read>(reader: R) -> Result<ScenarioParameters> {
    let params: ScenarioParameters = serde_json::from_reader(reader)?;
    params.validate()?;
    Ok(params)
}

/// Parse and validate scenario parameters from a JSON file
pub fn load_scenario(path: &Path) -> Result<ScenarioParameters> {
    let file = File::open(path)?;
    let params = load_scenario_from_reader(BufReader::new(file))?;
    log::debug!("Loaded scenario from {}", path.display());
    Ok(params)
}

impl ScenarioParameters {
    /// Load parameters from a JSON file, see [`load_scenario`]
    pub fn from_json_path(path: &Path) -> Result<Self> {
        load_scenario(path)
    }
}
