use crate::constants::GC_PRESET_CODING_STATES;

/// Configuration settings for a [`DnaHmmAnalyzer`](crate::DnaHmmAnalyzer).
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use dnahmm_core::config::AnalyzerConfig;
///
/// let config = AnalyzerConfig::default();
/// assert_eq!(config.coding_states, ["H"]);
/// ```
///
/// ## Custom coding states with batch threads
///
/// ```rust
/// use dnahmm_core::config::AnalyzerConfig;
///
/// let config = AnalyzerConfig {
///     coding_states: vec!["exon".to_string()],
///     num_threads: Some(4),
///     quiet: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Identifiers of the states whose positions count as coding.
    ///
    /// Every other state of the model is non-coding. Each name must be a
    /// state of the model the analyzer is built over.
    ///
    /// **Default**: `["H"]`, the high-GC state of the preset model
    pub coding_states: Vec<String>,

    /// Uppercase input sequences before validation.
    ///
    /// When `false`, lowercase bases are rejected as symbols outside the
    /// alphabet.
    ///
    /// **Default**: `false`
    pub ignore_case: bool,

    /// Suppress informational output during processing.
    ///
    /// When `true`, prevents progress messages from being printed to stderr.
    ///
    /// **Default**: `false`
    pub quiet: bool,

    /// Number of threads to use for batch analysis.
    ///
    /// When set, batch analysis runs on a dedicated Rayon pool of this size.
    /// Set to `None` to use the global pool.
    ///
    /// **Default**: `None` (use all available cores)
    pub num_threads: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            coding_states: GC_PRESET_CODING_STATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignore_case: false,
            quiet: false,
            num_threads: None,
        }
    }
}
