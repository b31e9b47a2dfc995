use crate::types::Region;

/// Full analysis of one sequence.
///
/// Bundles the decoded path, the likelihood of the sequence and its
/// segmentation into coding and non-coding regions.
///
/// # Examples
///
/// ```rust
/// use dnahmm_core::DnaHmmAnalyzer;
///
/// let analyzer = DnaHmmAnalyzer::default();
/// let result = analyzer.analyze_regions("ATGCAT")?;
///
/// assert_eq!(result.state_sequence, ["L", "L", "H", "H", "L", "L"]);
/// assert_eq!(result.coding_count, 1);
/// assert_eq!(result.non_coding_count, 2);
/// assert_eq!(result.coding_regions[0].subsequence, "GC");
/// # Ok::<(), dnahmm_core::types::DnaHmmError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Sequence as analyzed, after any case folding.
    pub sequence: String,

    /// Decoded state identifier at each position.
    pub state_sequence: Vec<String>,

    /// Confidence of the decoded state at each position, in [0, 1].
    pub confidences: Vec<f64>,

    /// Coding regions in positional order.
    pub coding_regions: Vec<Region>,

    /// Non-coding regions in positional order.
    pub non_coding_regions: Vec<Region>,

    pub coding_count: usize,
    pub non_coding_count: usize,

    /// Probability of the sequence under the model (forward algorithm).
    ///
    /// Underflows to 0.0 for long sequences; use
    /// [`log_likelihood`](Self::log_likelihood) to compare those.
    pub total_probability: f64,

    /// Natural log of [`total_probability`](Self::total_probability).
    pub log_likelihood: f64,
}

impl AnalysisResult {
    /// All regions merged in positional order.
    #[must_use]
    pub fn regions(&self) -> Vec<&Region> {
        let mut all: Vec<&Region> = self
            .coding_regions
            .iter()
            .chain(self.non_coding_regions.iter())
            .collect();
        all.sort_unstable_by_key(|region| region.start);
        all
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Fraction of positions inside coding regions; 0.0 for an empty sequence.
    #[must_use]
    pub fn coding_fraction(&self) -> f64 {
        if self.sequence.is_empty() {
            return 0.0;
        }
        let coding: usize = self.coding_regions.iter().map(|r| r.length).sum();
        coding as f64 / self.sequence.len() as f64
    }

    /// Mean confidence over the positions of `region`.
    #[must_use]
    pub fn mean_confidence(&self, region: &Region) -> f64 {
        let Some(values) = self.confidences.get(region.start..=region.end) else {
            return 0.0;
        };
        values.iter().sum::<f64>() / values.len() as f64
    }
}
