use crate::model::HmmModel;
use crate::types::{DnaHmmError, Result};

/// Name-keyed construction of an [`HmmModel`].
///
/// Probabilities are addressed by state identifier and symbol instead of by
/// table index, which is how model descriptions are usually written down.
/// Entries that are never set stay at 0.0. The first unknown state or symbol
/// is remembered and reported by [`ModelBuilder::build`], so calls can be
/// chained without intermediate error handling.
///
/// # Examples
///
/// ```rust
/// use dnahmm_core::model::ModelBuilder;
///
/// let model = ModelBuilder::new(["exon", "intron"], ['A', 'C', 'G', 'T'])
///     .initial("exon", 0.5)
///     .initial("intron", 0.5)
///     .transition("exon", "exon", 0.9)
///     .transition("exon", "intron", 0.1)
///     .transition("intron", "exon", 0.1)
///     .transition("intron", "intron", 0.9)
///     .emissions("exon", [('A', 0.2), ('C', 0.3), ('G', 0.3), ('T', 0.2)])
///     .emissions("intron", [('A', 0.3), ('C', 0.2), ('G', 0.2), ('T', 0.3)])
///     .build()?;
///
/// assert_eq!(model.transition_by_name("exon", "intron"), Some(0.1));
/// # Ok::<(), dnahmm_core::types::DnaHmmError>(())
/// ```
#[derive(Debug)]
pub struct ModelBuilder {
    states: Vec<String>,
    symbols: Vec<char>,
    initial: Vec<f64>,
    transition: Vec<f64>,
    emission: Vec<f64>,
    error: Option<DnaHmmError>,
}

impl ModelBuilder {
    /// Starts a model with the given states and alphabet and all-zero tables.
    pub fn new<S, I, C>(states: I, symbols: C) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
        C: IntoIterator<Item = char>,
    {
        let states: Vec<String> = states.into_iter().map(Into::into).collect();
        let symbols: Vec<char> = symbols.into_iter().collect();
        let n_states = states.len();
        let n_symbols = symbols.len();
        Self {
            initial: vec![0.0; n_states],
            transition: vec![0.0; n_states * n_states],
            emission: vec![0.0; n_states * n_symbols],
            states,
            symbols,
            error: None,
        }
    }

    /// Sets the probability of starting in `state`.
    #[must_use]
    pub fn initial(mut self, state: &str, probability: f64) -> Self {
        if let Some(s) = self.state(state) {
            self.initial[s] = probability;
        }
        self
    }

    /// Sets the probability of moving from `from` to `to`.
    #[must_use]
    pub fn transition(mut self, from: &str, to: &str, probability: f64) -> Self {
        if let (Some(f), Some(t)) = (self.state(from), self.state(to)) {
            let n_states = self.states.len();
            self.transition[f * n_states + t] = probability;
        }
        self
    }

    /// Sets the probability of `state` emitting `symbol`.
    #[must_use]
    pub fn emission(mut self, state: &str, symbol: char, probability: f64) -> Self {
        if let (Some(s), Some(k)) = (self.state(state), self.symbol(symbol)) {
            let n_symbols = self.symbols.len();
            self.emission[s * n_symbols + k] = probability;
        }
        self
    }

    /// Sets a whole emission row at once.
    #[must_use]
    pub fn emissions<E>(self, state: &str, row: E) -> Self
    where
        E: IntoIterator<Item = (char, f64)>,
    {
        row.into_iter()
            .fold(self, |builder, (symbol, p)| builder.emission(state, symbol, p))
    }

    /// Validates the collected tables and builds the model.
    ///
    /// # Errors
    ///
    /// Returns [`DnaHmmError::InvalidModel`] for the first unknown state or
    /// symbol passed to a setter, or for any check of [`HmmModel::new`].
    pub fn build(self) -> Result<HmmModel> {
        if let Some(error) = self.error {
            return Err(error);
        }
        HmmModel::new(
            self.states,
            self.symbols,
            self.initial,
            self.transition,
            self.emission,
        )
    }

    fn state(&mut self, name: &str) -> Option<usize> {
        let index = self.states.iter().position(|state| state == name);
        if index.is_none() {
            self.record(format!("unknown state '{name}'"));
        }
        index
    }

    fn symbol(&mut self, symbol: char) -> Option<usize> {
        let index = self.symbols.iter().position(|&s| s == symbol);
        if index.is_none() {
            self.record(format!("unknown symbol {symbol:?}"));
        }
        index
    }

    fn record(&mut self, message: String) {
        if self.error.is_none() {
            self.error = Some(DnaHmmError::InvalidModel(message));
        }
    }
}
