use crate::algorithms::log_space::{log_sum_exp, log_sum_exp_slice};
use crate::model::HmmModel;
use crate::types::{DnaHmmError, Result};

/// Total probability that `model` generated `sequence`, summed over every
/// hidden-state path.
///
/// The empty sequence has probability 1.0. The value is `exp` of
/// [`log_likelihood`]; for long sequences the true probability drops below
/// the smallest `f64` and this returns 0.0, so callers comparing long
/// sequences should use the log form.
///
/// # Errors
///
/// Returns [`DnaHmmError::InvalidSequence`] if a symbol is not in the model
/// alphabet, and [`DnaHmmError::NumericInstability`] if the pass produces a
/// NaN.
///
/// # Examples
///
/// ```rust
/// use dnahmm_core::algorithms::evaluate;
/// use dnahmm_core::model::presets;
///
/// let model = presets::gc_content()?;
/// assert_eq!(evaluate(&model, b"")?, 1.0);
///
/// let p = evaluate(&model, b"ATGCAT")?;
/// assert!(p > 0.0 && p < 1.0);
/// # Ok::<(), dnahmm_core::types::DnaHmmError>(())
/// ```
pub fn evaluate(model: &HmmModel, sequence: &[u8]) -> Result<f64> {
    Ok(log_likelihood(model, sequence)?.exp())
}

/// Natural log of the total probability of `sequence` under `model`.
///
/// Returns 0.0 for the empty sequence and negative infinity when no path can
/// emit the sequence.
///
/// # Errors
///
/// Same as [`evaluate`].
pub fn log_likelihood(model: &HmmModel, sequence: &[u8]) -> Result<f64> {
    let observations = model.encode(sequence)?;
    forward_encoded(model, &observations)
}

/// Forward pass over already encoded observations, keeping two rows.
pub(crate) fn forward_encoded(model: &HmmModel, observations: &[usize]) -> Result<f64> {
    let Some((&first, rest)) = observations.split_first() else {
        return Ok(0.0);
    };

    let n = model.n_states();
    let mut previous: Vec<f64> = (0..n)
        .map(|s| model.log_initial(s) + model.log_emission(s, first))
        .collect();
    let mut current = vec![f64::NEG_INFINITY; n];

    for &symbol in rest {
        for (to, slot) in current.iter_mut().enumerate() {
            let incoming = previous
                .iter()
                .enumerate()
                .fold(f64::NEG_INFINITY, |acc, (from, &alpha)| {
                    log_sum_exp(acc, alpha + model.log_transition(from, to))
                });
            *slot = incoming + model.log_emission(to, symbol);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    let total = log_sum_exp_slice(&previous);
    if total.is_nan() || total == f64::INFINITY {
        return Err(DnaHmmError::NumericInstability(format!(
            "forward pass over {} symbols produced log-likelihood {total}",
            observations.len()
        )));
    }
    Ok(total)
}
