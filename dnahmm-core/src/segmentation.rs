//! Partitioning of a decoded state path into coding and non-coding regions.

use crate::model::HmmModel;
use crate::types::{DnaHmmError, Region, RegionKind, Result};

/// Per-state coding flag, resolved from state names against one model.
///
/// # Examples
///
/// ```rust
/// use dnahmm_core::model::presets;
/// use dnahmm_core::segmentation::CodingStates;
///
/// let model = presets::gc_content()?;
/// let coding = CodingStates::from_names(&model, ["H"])?;
/// assert!(coding.is_coding(0));
/// assert!(!coding.is_coding(1));
/// # Ok::<(), dnahmm_core::types::DnaHmmError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodingStates {
    mask: Vec<bool>,
}

impl CodingStates {
    /// Marks the named states of `model` as coding.
    ///
    /// An empty list is allowed and makes every position non-coding.
    ///
    /// # Errors
    ///
    /// Returns [`DnaHmmError::InvalidConfig`] if a name is not a state of
    /// `model`.
    pub fn from_names<I, S>(model: &HmmModel, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mask = vec![false; model.n_states()];
        for name in names {
            let name = name.as_ref();
            let index = model.state_index(name).ok_or_else(|| {
                DnaHmmError::InvalidConfig(format!(
                    "coding state '{name}' is not a state of the model (states: {})",
                    model.states().join(", ")
                ))
            })?;
            mask[index] = true;
        }
        Ok(Self { mask })
    }

    /// Whether `state` is coding.
    ///
    /// States not named at construction, including indices outside the
    /// model, are non-coding.
    #[must_use]
    pub fn is_coding(&self, state: usize) -> bool {
        self.mask.get(state).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn kind(&self, state: usize) -> RegionKind {
        RegionKind::from_coding(self.is_coding(state))
    }

    /// Number of states marked as coding.
    #[must_use]
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&c| c).count()
    }
}

/// Regions of one sequence, split by kind, each list in positional order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
    pub coding_regions: Vec<Region>,
    pub non_coding_regions: Vec<Region>,
}

impl Segmentation {
    /// All regions merged back into positional order.
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
        self.coding_regions.len() + self.non_coding_regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits `sequence` into maximal runs whose decoded states share a kind.
///
/// A region starts at position 0 and wherever the kind of `path[t]` differs
/// from the kind of `path[t - 1]`. Adjacent positions in two different coding
/// states belong to the same coding region. The regions cover the sequence
/// exactly once without overlap.
///
/// # Errors
///
/// Returns [`DnaHmmError::InvalidSequence`] if `path` and `sequence` differ
/// in length.
///
/// # Examples
///
/// ```rust
/// use dnahmm_core::model::presets;
/// use dnahmm_core::segmentation::{segment, CodingStates};
///
/// let model = presets::gc_content()?;
/// let coding = CodingStates::from_names(&model, ["H"])?;
/// let segmentation = segment(b"ATGCAT", &[1, 1, 0, 0, 1, 1], &coding)?;
///
/// assert_eq!(segmentation.coding_regions.len(), 1);
/// assert_eq!(segmentation.coding_regions[0].subsequence, "GC");
/// assert_eq!(segmentation.non_coding_regions.len(), 2);
/// # Ok::<(), dnahmm_core::types::DnaHmmError>(())
/// ```
pub fn segment(sequence: &[u8], path: &[usize], coding: &CodingStates) -> Result<Segmentation> {
    if sequence.len() != path.len() {
        return Err(DnaHmmError::InvalidSequence(format!(
            "state path has {} positions but the sequence has {}",
            path.len(),
            sequence.len()
        )));
    }

    let mut segmentation = Segmentation::default();
    let Some(&first) = path.first() else {
        return Ok(segmentation);
    };

    let mut start = 0;
    let mut kind = coding.kind(first);
    for (t, &state) in path.iter().enumerate().skip(1) {
        let next = coding.kind(state);
        if next != kind {
            push_region(&mut segmentation, Region::new(sequence, start, t - 1, kind));
            start = t;
            kind = next;
        }
    }
    push_region(
        &mut segmentation,
        Region::new(sequence, start, path.len() - 1, kind),
    );

    Ok(segmentation)
}

fn push_region(segmentation: &mut Segmentation, region: Region) {
    match region.kind {
        RegionKind::Coding => segmentation.coding_regions.push(region),
        RegionKind::NonCoding => segmentation.non_coding_regions.push(region),
    }
}
