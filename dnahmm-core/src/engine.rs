use std::borrow::Cow;
use std::sync::Arc;

use rayon::prelude::*;

use crate::algorithms::forward::forward_encoded;
use crate::algorithms::viterbi::decode_encoded;
use crate::config::AnalyzerConfig;
use crate::model::{presets, HmmModel};
use crate::results::AnalysisResult;
use crate::segmentation::{segment, CodingStates};
use crate::types::{DnaHmmError, Recognition, Result, StatePath};

/// High-level interface for analyzing DNA sequences against an HMM.
///
/// The analyzer combines the Viterbi decoder, the forward evaluator and the
/// region segmenter behind string-based operations. It holds the model
/// behind an [`Arc`] and never mutates it, so one analyzer can serve any
/// number of threads, and several analyzers can share one model.
///
/// # Examples
///
/// ## Basic usage
///
/// ```rust
/// use dnahmm_core::DnaHmmAnalyzer;
///
/// let analyzer = DnaHmmAnalyzer::default();
/// let result = analyzer.analyze_regions("ATGCAT")?;
///
/// for region in result.regions() {
///     println!("{region}");
/// }
/// # Ok::<(), dnahmm_core::types::DnaHmmError>(())
/// ```
///
/// ## With a custom model
///
/// ```rust
/// use dnahmm_core::{config::AnalyzerConfig, model::ModelBuilder, DnaHmmAnalyzer};
///
/// let model = ModelBuilder::new(["coding", "non_coding"], ['A', 'C', 'G', 'T'])
///     .initial("coding", 0.5)
///     .initial("non_coding", 0.5)
///     .transition("coding", "coding", 0.9)
///     .transition("coding", "non_coding", 0.1)
///     .transition("non_coding", "coding", 0.1)
///     .transition("non_coding", "non_coding", 0.9)
///     .emissions("coding", [('A', 0.27), ('C', 0.01), ('G', 0.45), ('T', 0.27)])
///     .emissions("non_coding", [('A', 0.27), ('C', 0.45), ('G', 0.01), ('T', 0.27)])
///     .build()?;
///
/// let config = AnalyzerConfig {
///     coding_states: vec!["coding".to_string()],
///     ..Default::default()
/// };
/// let analyzer = DnaHmmAnalyzer::new(model, config)?;
///
/// let result = analyzer.analyze_regions("ATGCAT")?;
/// assert_eq!(result.coding_regions[0].subsequence, "ATG");
/// assert_eq!(result.non_coding_regions[0].subsequence, "CAT");
/// # Ok::<(), dnahmm_core::types::DnaHmmError>(())
/// ```
#[derive(Debug)]
pub struct DnaHmmAnalyzer {
    config: AnalyzerConfig,
    model: Arc<HmmModel>,
    coding: CodingStates,
    /// Dedicated pool for batch analysis when `num_threads` is set
    pool: Option<rayon::ThreadPool>,
}

impl DnaHmmAnalyzer {
    /// Creates an analyzer that owns `model`.
    ///
    /// # Arguments
    ///
    /// * `model` - Validated model to run inference with
    /// * `config` - Coding states, input handling and batch threading
    ///
    /// # Errors
    ///
    /// Returns [`DnaHmmError::InvalidConfig`] if a coding state is not a
    /// state of `model`, or if the batch thread pool cannot be built.
    pub fn new(model: HmmModel, config: AnalyzerConfig) -> Result<Self> {
        Self::with_shared_model(Arc::new(model), config)
    }

    /// Creates an analyzer over a model that may be shared with other
    /// analyzers.
    ///
    /// # Errors
    ///
    /// Same as [`DnaHmmAnalyzer::new`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use dnahmm_core::{config::AnalyzerConfig, model::presets, DnaHmmAnalyzer};
    ///
    /// let model = Arc::new(presets::gc_content()?);
    /// let everything_coding = AnalyzerConfig {
    ///     coding_states: vec!["H".to_string(), "L".to_string()],
    ///     ..Default::default()
    /// };
    ///
    /// let default =
    ///     DnaHmmAnalyzer::with_shared_model(Arc::clone(&model), AnalyzerConfig::default())?;
    /// let all = DnaHmmAnalyzer::with_shared_model(model, everything_coding)?;
    ///
    /// assert_eq!(all.analyze_regions("ATGCAT")?.coding_count, 1);
    /// assert_eq!(default.analyze_regions("ATGCAT")?.coding_count, 1);
    /// # Ok::<(), dnahmm_core::types::DnaHmmError>(())
    /// ```
    pub fn with_shared_model(model: Arc<HmmModel>, config: AnalyzerConfig) -> Result<Self> {
        let coding = CodingStates::from_names(&model, &config.coding_states)?;

        let pool = match config.num_threads {
            Some(num_threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| {
                        DnaHmmError::InvalidConfig(format!(
                            "Failed to configure thread pool: {e}"
                        ))
                    })?,
            ),
            None => None,
        };

        Ok(Self {
            config,
            model,
            coding,
            pool,
        })
    }

    /// Analyzer over the GC-content preset with `H` as the coding state.
    ///
    /// # Errors
    ///
    /// Propagates any error from building the preset.
    pub fn gc_content() -> Result<Self> {
        Self::new(presets::gc_content()?, AnalyzerConfig::default())
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn model(&self) -> &Arc<HmmModel> {
        &self.model
    }

    pub fn coding_states(&self) -> &CodingStates {
        &self.coding
    }

    /// Decodes the most probable state at each position.
    ///
    /// # Returns
    ///
    /// A [`Recognition`] with one state identifier and one confidence per
    /// position; both are empty for an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns [`DnaHmmError::InvalidSequence`] if the sequence contains a
    /// symbol outside the model alphabet.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dnahmm_core::DnaHmmAnalyzer;
    ///
    /// let analyzer = DnaHmmAnalyzer::default();
    /// let recognition = analyzer.recognize("ATGCAT")?;
    /// assert_eq!(recognition.states, ["L", "L", "H", "H", "L", "L"]);
    /// # Ok::<(), dnahmm_core::types::DnaHmmError>(())
    /// ```
    pub fn recognize(&self, sequence: &str) -> Result<Recognition> {
        let path = self.decode(sequence.as_bytes())?;
        Ok(Recognition {
            states: self.labels(&path),
            confidences: path.confidences,
        })
    }

    /// Buffer-filling form of [`recognize`](Self::recognize).
    ///
    /// Both buffers are cleared first and then filled with the same values
    /// `recognize` returns. On error they are left empty.
    ///
    /// # Errors
    ///
    /// Same as [`recognize`](Self::recognize).
    pub fn recognize_into(
        &self,
        sequence: &str,
        states: &mut Vec<String>,
        confidences: &mut Vec<f64>,
    ) -> Result<()> {
        states.clear();
        confidences.clear();

        let path = self.decode(sequence.as_bytes())?;
        states.extend(
            path.states
                .iter()
                .map(|&s| self.model.state_name(s).to_string()),
        );
        confidences.extend_from_slice(&path.confidences);
        Ok(())
    }

    /// Probability of the sequence under the model; 1.0 for an empty
    /// sequence.
    ///
    /// Underflows to 0.0 for long sequences; see
    /// [`log_likelihood`](Self::log_likelihood).
    ///
    /// # Errors
    ///
    /// Returns [`DnaHmmError::InvalidSequence`] for symbols outside the
    /// alphabet and [`DnaHmmError::NumericInstability`] if the forward pass
    /// produces a NaN.
    pub fn evaluate(&self, sequence: &str) -> Result<f64> {
        Ok(self.log_likelihood(sequence)?.exp())
    }

    /// Natural log of the probability of the sequence; 0.0 for an empty
    /// sequence.
    ///
    /// # Errors
    ///
    /// Same as [`evaluate`](Self::evaluate).
    pub fn log_likelihood(&self, sequence: &str) -> Result<f64> {
        let sequence = self.prepare(sequence.as_bytes());
        let observations = self.model.encode(&sequence)?;
        forward_encoded(&self.model, &observations)
    }

    /// Runs the full analysis of one sequence.
    ///
    /// Decodes the state path, evaluates the sequence likelihood and splits
    /// the decoded path into coding and non-coding regions.
    ///
    /// # Errors
    ///
    /// Returns [`DnaHmmError::InvalidSequence`] for symbols outside the
    /// alphabet and [`DnaHmmError::NumericInstability`] if either pass
    /// produces a NaN. No partial result is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dnahmm_core::DnaHmmAnalyzer;
    ///
    /// let analyzer = DnaHmmAnalyzer::default();
    /// let result = analyzer.analyze_regions("ATGCAT")?;
    ///
    /// let spans: Vec<(usize, usize)> =
    ///     result.regions().iter().map(|r| (r.start, r.end)).collect();
    /// assert_eq!(spans, [(0, 1), (2, 3), (4, 5)]);
    /// assert!(result.total_probability > 0.0);
    /// # Ok::<(), dnahmm_core::types::DnaHmmError>(())
    /// ```
    pub fn analyze_regions(&self, sequence: &str) -> Result<AnalysisResult> {
        let sequence = self.prepare(sequence.as_bytes());
        let observations = self.model.encode(&sequence)?;

        let path = decode_encoded(&self.model, &observations)?;
        let log_likelihood = forward_encoded(&self.model, &observations)?;
        let segmentation = segment(&sequence, &path.states, &self.coding)?;

        Ok(AnalysisResult {
            sequence: String::from_utf8_lossy(&sequence).into_owned(),
            state_sequence: self.labels(&path),
            confidences: path.confidences,
            coding_count: segmentation.coding_regions.len(),
            non_coding_count: segmentation.non_coding_regions.len(),
            coding_regions: segmentation.coding_regions,
            non_coding_regions: segmentation.non_coding_regions,
            total_probability: log_likelihood.exp(),
            log_likelihood,
        })
    }

    /// Analyzes many sequences in parallel against the same model.
    ///
    /// Results come back in input order. A sequence that fails does not stop
    /// the others; its slot holds the error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dnahmm_core::{config::AnalyzerConfig, model::presets, DnaHmmAnalyzer};
    ///
    /// let config = AnalyzerConfig { quiet: true, ..Default::default() };
    /// let analyzer = DnaHmmAnalyzer::new(presets::gc_content()?, config)?;
    ///
    /// let results = analyzer.analyze_batch(&["ATGCAT", "NNNN", "GCGC"]);
    /// assert!(results[0].is_ok());
    /// assert!(results[1].is_err());
    /// assert!(results[2].is_ok());
    /// # Ok::<(), dnahmm_core::types::DnaHmmError>(())
    /// ```
    pub fn analyze_batch<S>(&self, sequences: &[S]) -> Vec<Result<AnalysisResult>>
    where
        S: AsRef<str> + Sync,
    {
        if !self.config.quiet {
            eprintln!("Analyzing {} sequences...", sequences.len());
        }

        let run = || -> Vec<Result<AnalysisResult>> {
            sequences
                .par_iter()
                .map(|sequence| self.analyze_regions(sequence.as_ref()))
                .collect()
        };
        let results = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        if !self.config.quiet {
            let failed = results.iter().filter(|r| r.is_err()).count();
            eprintln!(
                "Batch complete: {} analyzed, {} failed",
                results.len() - failed,
                failed
            );
        }

        results
    }

    fn decode(&self, sequence: &[u8]) -> Result<StatePath> {
        let sequence = self.prepare(sequence);
        let observations = self.model.encode(&sequence)?;
        decode_encoded(&self.model, &observations)
    }

    fn prepare<'a>(&self, sequence: &'a [u8]) -> Cow<'a, [u8]> {
        if self.config.ignore_case && sequence.iter().any(u8::is_ascii_lowercase) {
            Cow::Owned(sequence.to_ascii_uppercase())
        } else {
            Cow::Borrowed(sequence)
        }
    }

    fn labels(&self, path: &StatePath) -> Vec<String> {
        path.states
            .iter()
            .map(|&s| self.model.state_name(s).to_string())
            .collect()
    }
}

impl Default for DnaHmmAnalyzer {
    /// Analyzer over the GC-content preset with `H` as the coding state.
    fn default() -> Self {
        Self::gc_content().expect("GC-content preset tables form a valid model")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelBuilder;
    use crate::types::RegionKind;
    use proptest::prelude::*;

    fn coding_switch_analyzer() -> DnaHmmAnalyzer {
        let model = ModelBuilder::new(["coding", "non_coding"], ['A', 'C', 'G', 'T'])
            .initial("coding", 0.5)
            .initial("non_coding", 0.5)
            .transition("coding", "coding", 0.9)
            .transition("coding", "non_coding", 0.1)
            .transition("non_coding", "coding", 0.1)
            .transition("non_coding", "non_coding", 0.9)
            .emissions("coding", [('A', 0.27), ('C', 0.01), ('G', 0.45), ('T', 0.27)])
            .emissions("non_coding", [('A', 0.27), ('C', 0.45), ('G', 0.01), ('T', 0.27)])
            .build()
            .unwrap();
        let config = AnalyzerConfig {
            coding_states: vec!["coding".to_string()],
            quiet: true,
            ..Default::default()
        };
        DnaHmmAnalyzer::new(model, config).unwrap()
    }

    fn quiet_gc_analyzer() -> DnaHmmAnalyzer {
        let config = AnalyzerConfig {
            quiet: true,
            ..Default::default()
        };
        DnaHmmAnalyzer::new(presets::gc_content().unwrap(), config).unwrap()
    }

    #[test]
    fn test_default_analyzer() {
        let analyzer = DnaHmmAnalyzer::default();
        assert_eq!(analyzer.model().states(), &["H", "L"]);
        assert_eq!(analyzer.config().coding_states, ["H"]);
        assert!(analyzer.coding_states().is_coding(0));
        assert!(!analyzer.coding_states().is_coding(1));
    }

    #[test]
    fn test_analyze_regions_gc_preset() {
        let result = DnaHmmAnalyzer::default().analyze_regions("ATGCAT").unwrap();

        assert_eq!(result.sequence, "ATGCAT");
        assert_eq!(result.state_sequence, ["L", "L", "H", "H", "L", "L"]);
        assert_eq!(result.coding_count, 1);
        assert_eq!(result.non_coding_count, 2);

        let coding = &result.coding_regions[0];
        assert_eq!((coding.start, coding.end, coding.subsequence.as_str()), (2, 3, "GC"));
        let non_coding: Vec<(usize, usize, &str)> = result
            .non_coding_regions
            .iter()
            .map(|r| (r.start, r.end, r.subsequence.as_str()))
            .collect();
        assert_eq!(non_coding, [(0, 1, "AT"), (4, 5, "AT")]);

        assert!((result.total_probability - result.log_likelihood.exp()).abs() < 1e-15);
        assert!(result.total_probability > 0.0 && result.total_probability < 1.0);
    }

    #[test]
    fn test_analyze_regions_coding_switch() {
        let result = coding_switch_analyzer().analyze_regions("ATGCAT").unwrap();
        assert_eq!(result.coding_count, 1);
        assert_eq!(result.non_coding_count, 1);

        let coding = &result.coding_regions[0];
        assert_eq!((coding.start, coding.end, coding.length), (0, 2, 3));
        let non_coding = &result.non_coding_regions[0];
        assert_eq!((non_coding.start, non_coding.end, non_coding.length), (3, 5, 3));
    }

    #[test]
    fn test_region_count_follows_transitions() {
        let analyzer = quiet_gc_analyzer();
        let sequence = "ATGCATGCATGCATGCAT";
        let result = analyzer.analyze_regions(sequence).unwrap();

        let total: usize = result.regions().iter().map(|r| r.length).sum();
        assert_eq!(total, 18);

        let kinds: Vec<RegionKind> = result
            .state_sequence
            .iter()
            .map(|s| RegionKind::from_coding(s == "H"))
            .collect();
        let transitions = kinds.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(result.coding_count + result.non_coding_count, transitions + 1);
    }

    #[test]
    fn test_recognize_into_matches_recognize() {
        let analyzer = quiet_gc_analyzer();
        let sequence = "GGGCGCAAAATTTTGCGCATATGGCC";
        let recognition = analyzer.recognize(sequence).unwrap();

        let mut states = vec!["stale".to_string()];
        let mut confidences = vec![0.123];
        analyzer
            .recognize_into(sequence, &mut states, &mut confidences)
            .unwrap();

        assert_eq!(states, recognition.states);
        assert_eq!(confidences, recognition.confidences);
    }

    #[test]
    fn test_recognize_into_clears_on_error() {
        let analyzer = quiet_gc_analyzer();
        let mut states = vec!["stale".to_string()];
        let mut confidences = vec![0.5];

        let result = analyzer.recognize_into("ACGN", &mut states, &mut confidences);
        assert!(matches!(result, Err(DnaHmmError::InvalidSequence(_))));
        assert!(states.is_empty());
        assert!(confidences.is_empty());
    }

    #[test]
    fn test_empty_sequence() {
        let analyzer = quiet_gc_analyzer();

        assert_eq!(analyzer.evaluate("").unwrap(), 1.0);
        assert_eq!(analyzer.log_likelihood("").unwrap(), 0.0);

        let recognition = analyzer.recognize("").unwrap();
        assert!(recognition.states.is_empty());
        assert!(recognition.confidences.is_empty());

        let result = analyzer.analyze_regions("").unwrap();
        assert!(result.is_empty());
        assert_eq!(result.coding_count, 0);
        assert_eq!(result.non_coding_count, 0);
        assert_eq!(result.total_probability, 1.0);
        assert_eq!(result.coding_fraction(), 0.0);
    }

    #[test]
    fn test_invalid_symbol_is_rejected_everywhere() {
        let analyzer = quiet_gc_analyzer();
        assert!(matches!(
            analyzer.recognize("ATGNAT"),
            Err(DnaHmmError::InvalidSequence(_))
        ));
        assert!(matches!(
            analyzer.evaluate("ATGNAT"),
            Err(DnaHmmError::InvalidSequence(_))
        ));
        assert!(matches!(
            analyzer.analyze_regions("ATGNAT"),
            Err(DnaHmmError::InvalidSequence(_))
        ));
    }

    #[test]
    fn test_ignore_case() {
        let strict = quiet_gc_analyzer();
        assert!(strict.recognize("atgcat").is_err());

        let config = AnalyzerConfig {
            ignore_case: true,
            quiet: true,
            ..Default::default()
        };
        let relaxed = DnaHmmAnalyzer::new(presets::gc_content().unwrap(), config).unwrap();
        let lower = relaxed.analyze_regions("atgCAT").unwrap();
        let upper = strict.analyze_regions("ATGCAT").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.sequence, "ATGCAT");
    }

    #[test]
    fn test_unknown_coding_state() {
        let config = AnalyzerConfig {
            coding_states: vec!["exon".to_string()],
            ..Default::default()
        };
        let result = DnaHmmAnalyzer::new(presets::gc_content().unwrap(), config);
        assert!(matches!(result, Err(DnaHmmError::InvalidConfig(_))));
    }

    #[test]
    fn test_evaluate_matches_log_likelihood() {
        let analyzer = quiet_gc_analyzer();
        let p = analyzer.evaluate("AT").unwrap();
        assert!((p - 0.064).abs() < 1e-12);
        let ll = analyzer.log_likelihood("AT").unwrap();
        assert!((ll - 0.064_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_analyze_batch_matches_sequential() {
        let analyzer = quiet_gc_analyzer();
        let sequences = vec![
            "ATGCAT".to_string(),
            "GGGCGCAAAATTTT".to_string(),
            String::new(),
            "ACGTX".to_string(),
            "GCGCGCGCATATATAT".repeat(10),
        ];

        let batch = analyzer.analyze_batch(&sequences);
        assert_eq!(batch.len(), sequences.len());
        for (sequence, result) in sequences.iter().zip(&batch) {
            match (analyzer.analyze_regions(sequence), result) {
                (Ok(expected), Ok(actual)) => assert_eq!(&expected, actual),
                (Err(_), Err(DnaHmmError::InvalidSequence(_))) => {}
                (expected, actual) => {
                    panic!("{sequence}: sequential {expected:?} vs batch {actual:?}")
                }
            }
        }
        assert!(batch[3].is_err());
    }

    #[test]
    fn test_analyze_batch_with_dedicated_pool() {
        let config = AnalyzerConfig {
            num_threads: Some(2),
            quiet: true,
            ..Default::default()
        };
        let analyzer = DnaHmmAnalyzer::new(presets::gc_content().unwrap(), config).unwrap();
        let sequences = ["ATGCAT"; 16];
        let results = analyzer.analyze_batch(&sequences);
        assert_eq!(results.len(), 16);
        for result in results {
            assert_eq!(result.unwrap().coding_count, 1);
        }
    }

    #[test]
    fn test_shared_model_between_analyzers() {
        let model = Arc::new(presets::gc_content().unwrap());
        let config = AnalyzerConfig {
            coding_states: vec!["L".to_string()],
            quiet: true,
            ..Default::default()
        };
        let flipped = DnaHmmAnalyzer::with_shared_model(Arc::clone(&model), config).unwrap();
        let default = DnaHmmAnalyzer::with_shared_model(model, AnalyzerConfig::default()).unwrap();
        assert!(Arc::ptr_eq(flipped.model(), default.model()));

        let result = flipped.analyze_regions("ATGCAT").unwrap();
        assert_eq!(result.coding_count, 2);
        assert_eq!(result.non_coding_count, 1);
    }

    #[test]
    fn test_mean_confidence_and_coding_fraction() {
        let result = DnaHmmAnalyzer::default().analyze_regions("ATGCAT").unwrap();
        let coding = &result.coding_regions[0];
        // (0.5 + 5/9) / 2
        assert!((result.mean_confidence(coding) - 19.0 / 36.0).abs() < 1e-9);
        assert!((result.coding_fraction() - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DnaHmmAnalyzer>();
    }

    fn dna() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![Just('A'), Just('C'), Just('G'), Just('T')],
            0..120,
        )
        .prop_map(|bases| bases.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_confidences_in_unit_interval(sequence in dna()) {
            let analyzer = quiet_gc_analyzer();
            let recognition = analyzer.recognize(&sequence).unwrap();
            prop_assert_eq!(recognition.states.len(), sequence.len());
            prop_assert_eq!(recognition.confidences.len(), sequence.len());
            for c in recognition.confidences {
                prop_assert!((0.0..=1.0).contains(&c));
            }
        }

        #[test]
        fn prop_analysis_regions_rebuild_sequence(sequence in dna()) {
            let result = quiet_gc_analyzer().analyze_regions(&sequence).unwrap();
            let rebuilt: String = result.regions().iter().map(|r| r.subsequence.as_str()).collect();
            prop_assert_eq!(rebuilt, sequence);
            prop_assert!(result.log_likelihood <= 0.0);
        }
    }
}
