//! Dynamic-programming inference over an [`HmmModel`](crate::model::HmmModel).
//!
//! ## Modules
//!
//! - [`forward`]: total sequence likelihood (forward algorithm)
//! - [`viterbi`]: most probable state path and per-position confidences
//! - [`log_space`]: log-sum-exp helpers shared by both passes
//!
//! ## Numerical Stability
//!
//! Both passes multiply one sub-1 probability per position, which underflows
//! an `f64` after a few hundred positions. Every table is therefore carried as
//! natural logarithms: products become sums and the forward sum becomes a
//! log-sum-exp.
//!
//! ```text
//! forward:  alpha[t][s] = log B[s][o_t] + logsumexp_s'(alpha[t-1][s'] + log A[s'][s])
//! viterbi:  delta[t][s] = log B[s][o_t] + max_s'(delta[t-1][s'] + log A[s'][s])
//! ```
//!
//! A zero probability maps to `f64::NEG_INFINITY`, which both recurrences
//! handle without special cases.
//!
//! The two passes only read the model and allocate their own tables, so they
//! can run on the same model from any number of threads at once.

pub mod forward;
pub mod log_space;
pub mod viterbi;

pub use forward::{evaluate, log_likelihood};
pub use viterbi::decode;
