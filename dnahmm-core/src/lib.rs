//! # DNA HMM Analyzer
//!
//! Hidden Markov Model inference over DNA sequences: the most probable
//! hidden-state path with per-position confidences (Viterbi), the total
//! sequence likelihood (forward algorithm), and the segmentation of the
//! decoded path into coding and non-coding regions.
//!
//! ## Features
//!
//! - **Validated Models**: probability tables are checked once at construction
//!   and never change afterwards
//! - **Log-Space Inference**: sequences of any length decode without underflow
//! - **Deterministic Decoding**: ties always resolve to the lowest state index
//! - **Parallel Batches**: many sequences against one shared model using Rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use dnahmm_core::DnaHmmAnalyzer;
//!
//! // GC-content preset, state "H" is coding
//! let analyzer = DnaHmmAnalyzer::default();
//!
//! let result = analyzer.analyze_regions("ATGCAT")?;
//! println!("log-likelihood: {:.4}", result.log_likelihood);
//! for region in &result.coding_regions {
//!     println!("coding {}-{}: {}", region.start, region.end, region.subsequence);
//! }
//! # Ok::<(), dnahmm_core::types::DnaHmmError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`model`]: The validated model, a name-keyed builder and presets
//! - [`algorithms`]: Forward and Viterbi passes
//! - [`segmentation`]: Decoded path to coding / non-coding regions
//! - [`engine`]: The [`DnaHmmAnalyzer`] façade
//! - [`config`]: Analyzer configuration
//! - [`results`]: Full analysis result
//! - [`types`]: Regions, paths and the error type
//! - [`constants`]: Tolerances and preset tables
//!
//! ## Coordinates
//!
//! Region coordinates are 0-based and inclusive at both ends: a region with
//! `start == 2` and `end == 3` covers two bases.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, DnaHmmError>`](types::DnaHmmError),
//! reporting:
//!
//! - Malformed models (bad dimensions, probabilities, or row sums)
//! - Symbols outside the model alphabet, with their position
//! - Non-finite values from the dynamic-programming passes
//! - Coding states the model does not define

pub mod algorithms;
pub mod config;
pub mod constants;
pub mod engine;
pub mod model;
pub mod results;
pub mod segmentation;
pub mod types;

pub use engine::DnaHmmAnalyzer;
