//! JSON model files.
//!
//! ```json
//! {
//!   "states": ["coding", "non_coding"],
//!   "symbols": ["A", "C", "G", "T"],
//!   "initial": {"coding": 0.5, "non_coding": 0.5},
//!   "transition": {
//!     "coding": {"coding": 0.9, "non_coding": 0.1},
//!     "non_coding": {"coding": 0.1, "non_coding": 0.9}
//!   },
//!   "emission": {
//!     "coding": {"A": 0.27, "C": 0.01, "G": 0.45, "T": 0.27},
//!     "non_coding": {"A": 0.27, "C": 0.45, "G": 0.01, "T": 0.27}
//!   },
//!   "coding_states": ["coding"]
//! }
//! ```
//!
//! Entries left out of the tables are zero, so an incomplete row fails model
//! validation instead of being silently renormalized.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use dnahmm_core::model::{HmmModel, ModelBuilder};
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelFile {
    pub states: Vec<String>,
    pub symbols: Vec<char>,
    pub initial: BTreeMap<String, f64>,
    pub transition: BTreeMap<String, BTreeMap<String, f64>>,
    pub emission: BTreeMap<String, BTreeMap<String, f64>>,
    /// States to report as coding unless overridden on the command line
    #[serde(default)]
    pub coding_states: Option<Vec<String>>,
}

impl ModelFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader).map_err(|e| {
            CliError::ParseError(format!("model file '{}': {e}", path.display()))
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CliError> {
        serde_json::from_str(json).map_err(|e| CliError::ParseError(format!("model file: {e}")))
    }

    /// Builds and validates the model described by the file.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::ParseError`] for an emission key that is not a
    /// single character, and [`CliError::Analysis`] for any model validation
    /// failure, including names that are not declared states or symbols.
    pub fn to_model(&self) -> Result<HmmModel, CliError> {
        let mut builder =
            ModelBuilder::new(self.states.iter().cloned(), self.symbols.iter().copied());

        for (state, &p) in &self.initial {
            builder = builder.initial(state, p);
        }
        for (from, row) in &self.transition {
            for (to, &p) in row {
                builder = builder.transition(from, to, p);
            }
        }
        for (state, row) in &self.emission {
            for (key, &p) in row {
                builder = builder.emission(state, single_char(key)?, p);
            }
        }

        Ok(builder.build()?)
    }
}

fn single_char(key: &str) -> Result<char, CliError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CliError::ParseError(format!(
            "emission symbol '{key}' must be a single character"
        ))),
    }
}
