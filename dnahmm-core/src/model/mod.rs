//! Validated, immutable Hidden Markov Model parameters.
//!
//! An [`HmmModel`] holds the ordered state identifiers, the symbol alphabet and
//! the three probability tables of a discrete HMM. Tables are stored flat and
//! row-major, indexed by integer state and symbol codes; names only matter at
//! the boundary, where [`HmmModel::state_index`] and [`HmmModel::encode`]
//! translate them.
//!
//! ## Modules
//!
//! - [`builder`]: name-keyed construction of a model
//! - [`presets`]: ready-made models
//!
//! ## Examples
//!
//! ```rust
//! use dnahmm_core::model::HmmModel;
//!
//! let model = HmmModel::new(
//!     vec!["coding".to_string(), "non_coding".to_string()],
//!     vec!['A', 'C', 'G', 'T'],
//!     vec![0.5, 0.5],
//!     vec![0.9, 0.1, 0.1, 0.9],
//!     vec![
//!         0.2, 0.3, 0.3, 0.2, // coding
//!         0.3, 0.2, 0.2, 0.3, // non_coding
//!     ],
//! )?;
//!
//! assert_eq!(model.n_states(), 2);
//! assert_eq!(model.encode(b"GATTACA")?.len(), 7);
//! # Ok::<(), dnahmm_core::types::DnaHmmError>(())
//! ```

use std::collections::HashSet;

use crate::constants::{PROBABILITY_TOLERANCE, SYMBOL_TABLE_SIZE};
use crate::types::{DnaHmmError, Result};

pub mod builder;
pub mod presets;

pub use builder::ModelBuilder;

/// A discrete Hidden Markov Model over single-character symbols.
///
/// Parameters are kept in probability space for inspection, with natural-log
/// copies precomputed at construction for the inference passes. The model is
/// never mutated after [`HmmModel::new`] returns, so it can be shared across
/// threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct HmmModel {
    /// Ordered, distinct state identifiers
    states: Vec<String>,
    /// Ordered, distinct ASCII symbols
    symbols: Vec<char>,
    /// Byte value -> symbol index
    symbol_lookup: [Option<usize>; SYMBOL_TABLE_SIZE],
    /// pi\[s\], length `n_states`
    initial: Vec<f64>,
    /// A\[s\]\[s'\] stored row-major, length `n_states * n_states`
    transition: Vec<f64>,
    /// B\[s\]\[k\] stored row-major, length `n_states * n_symbols`
    emission: Vec<f64>,
    log_initial: Vec<f64>,
    log_transition: Vec<f64>,
    log_emission: Vec<f64>,
}

impl HmmModel {
    /// Creates a model after validating identifiers and probability tables.
    ///
    /// # Arguments
    ///
    /// * `states` - State identifiers, in the order used to index the tables
    /// * `symbols` - Observation alphabet, one ASCII character per symbol
    /// * `initial` - Starting probability of each state
    /// * `transition` - Row-major `[from][to]` transition matrix
    /// * `emission` - Row-major `[state][symbol]` emission matrix
    ///
    /// # Errors
    ///
    /// Returns [`DnaHmmError::InvalidModel`] if:
    /// - `states` or `symbols` is empty, contains duplicates, or contains an
    ///   empty state name or a non-ASCII symbol
    /// - a table length does not match the declared dimensions
    /// - a probability is negative, greater than 1 or not finite
    /// - a row sums to something other than 1.0 (tolerance 1e-6)
    pub fn new(
        states: Vec<String>,
        symbols: Vec<char>,
        initial: Vec<f64>,
        transition: Vec<f64>,
        emission: Vec<f64>,
    ) -> Result<Self> {
        validate_states(&states)?;
        let symbol_lookup = build_symbol_lookup(&symbols)?;

        let n_states = states.len();
        let n_symbols = symbols.len();
        check_length("initial", &initial, n_states)?;
        check_length("transition", &transition, n_states * n_states)?;
        check_length("emission", &emission, n_states * n_symbols)?;

        check_row(&initial, "initial probabilities")?;
        for (s, row) in transition.chunks(n_states).enumerate() {
            check_row(row, &format!("transition row '{}'", states[s]))?;
        }
        for (s, row) in emission.chunks(n_symbols).enumerate() {
            check_row(row, &format!("emission row '{}'", states[s]))?;
        }

        let ln = |table: &[f64]| table.iter().map(|p| p.ln()).collect::<Vec<_>>();

        Ok(Self {
            log_initial: ln(&initial),
            log_transition: ln(&transition),
            log_emission: ln(&emission),
            states,
            symbols,
            symbol_lookup,
            initial,
            transition,
            emission,
        })
    }

    /// Number of hidden states.
    #[must_use]
    pub fn n_states(&self) -> usize {
        self.states.len()
    }

    /// Number of observable symbols.
    #[must_use]
    pub fn n_symbols(&self) -> usize {
        self.symbols.len()
    }

    /// State identifiers in index order.
    #[must_use]
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Symbol alphabet in index order.
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Identifier of the state at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_states()`.
    #[must_use]
    pub fn state_name(&self, index: usize) -> &str {
        &self.states[index]
    }

    /// Index of the state called `name`, if the model has one.
    #[must_use]
    pub fn state_index(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|state| state == name)
    }

    /// Index of `symbol` in the alphabet, if it belongs to it.
    #[must_use]
    pub fn symbol_index(&self, symbol: char) -> Option<usize> {
        if symbol.is_ascii() {
            self.symbol_lookup[symbol as usize]
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_valid_symbol(&self, symbol: char) -> bool {
        self.symbol_index(symbol).is_some()
    }

    /// Probability of starting in `state`.
    #[must_use]
    pub fn initial(&self, state: usize) -> f64 {
        self.initial[state]
    }

    /// Probability of moving from state `from` to state `to`.
    #[must_use]
    pub fn transition(&self, from: usize, to: usize) -> f64 {
        self.transition[from * self.n_states() + to]
    }

    /// Probability of `state` emitting the symbol at index `symbol`.
    #[must_use]
    pub fn emission(&self, state: usize, symbol: usize) -> f64 {
        self.emission[state * self.n_symbols() + symbol]
    }

    #[must_use]
    pub fn initial_by_name(&self, state: &str) -> Option<f64> {
        Some(self.initial(self.state_index(state)?))
    }

    #[must_use]
    pub fn transition_by_name(&self, from: &str, to: &str) -> Option<f64> {
        Some(self.transition(self.state_index(from)?, self.state_index(to)?))
    }

    #[must_use]
    pub fn emission_by_name(&self, state: &str, symbol: char) -> Option<f64> {
        Some(self.emission(self.state_index(state)?, self.symbol_index(symbol)?))
    }

    pub(crate) fn log_initial(&self, state: usize) -> f64 {
        self.log_initial[state]
    }

    pub(crate) fn log_transition(&self, from: usize, to: usize) -> f64 {
        self.log_transition[from * self.n_states() + to]
    }

    pub(crate) fn log_emission(&self, state: usize, symbol: usize) -> f64 {
        self.log_emission[state * self.n_symbols() + symbol]
    }

    /// Maps every byte of `sequence` to its symbol index.
    ///
    /// # Errors
    ///
    /// Returns [`DnaHmmError::InvalidSequence`] naming the first byte that is
    /// not part of the alphabet and its 0-based position.
    pub fn encode(&self, sequence: &[u8]) -> Result<Vec<usize>> {
        sequence
            .iter()
            .enumerate()
            .map(|(position, &byte)| {
                self.symbol_lookup[usize::from(byte)].ok_or_else(|| {
                    DnaHmmError::InvalidSequence(format!(
                        "symbol {:?} at position {} is not in the model alphabet ({})",
                        char::from(byte),
                        position,
                        self.symbols.iter().collect::<String>()
                    ))
                })
            })
            .collect()
    }
}

fn validate_states(states: &[String]) -> Result<()> {
    if states.is_empty() {
        return Err(DnaHmmError::InvalidModel(
            "model must have at least one state".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(states.len());
    for state in states {
        if state.is_empty() {
            return Err(DnaHmmError::InvalidModel(
                "state identifiers must not be empty".to_string(),
            ));
        }
        if !seen.insert(state.as_str()) {
            return Err(DnaHmmError::InvalidModel(format!(
                "duplicate state identifier '{state}'"
            )));
        }
    }
    Ok(())
}

fn build_symbol_lookup(symbols: &[char]) -> Result<[Option<usize>; SYMBOL_TABLE_SIZE]> {
    if symbols.is_empty() {
        return Err(DnaHmmError::InvalidModel(
            "model must have at least one symbol".to_string(),
        ));
    }
    let mut lookup = [None; SYMBOL_TABLE_SIZE];
    for (index, &symbol) in symbols.iter().enumerate() {
        if !symbol.is_ascii() {
            return Err(DnaHmmError::InvalidModel(format!(
                "symbol {symbol:?} is not a single ASCII character"
            )));
        }
        let slot = &mut lookup[symbol as usize];
        if slot.is_some() {
            return Err(DnaHmmError::InvalidModel(format!(
                "duplicate symbol {symbol:?}"
            )));
        }
        *slot = Some(index);
    }
    Ok(lookup)
}

fn check_length(table: &str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(DnaHmmError::InvalidModel(format!(
            "{table} table has {} entries, expected {expected}",
            values.len()
        )));
    }
    Ok(())
}

/// Checks that every entry of `row` is a probability and that they sum to 1.
fn check_row(row: &[f64], label: &str) -> Result<()> {
    if let Some(p) = row
        .iter()
        .find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0)
    {
        return Err(DnaHmmError::InvalidModel(format!(
            "{label} contains {p}, probabilities must lie in [0, 1]"
        )));
    }
    let sum: f64 = row.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(DnaHmmError::InvalidModel(format!(
            "{label} sums to {sum}, expected 1.0"
        )));
    }
    Ok(())
}
