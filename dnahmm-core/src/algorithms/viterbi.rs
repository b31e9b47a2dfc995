use crate::algorithms::log_space::{argmax_lowest, log_sum_exp_slice};
use crate::constants::LOG_TIE_TOLERANCE;
use crate::model::HmmModel;
use crate::types::{DnaHmmError, Result, StatePath};

/// Most probable hidden-state path for `sequence`, with a confidence per
/// position.
///
/// Ties between predecessors, and between final states, go to the state with
/// the lowest index, so the same input always yields the same path.
///
/// The confidence at position `t` is the Viterbi score of the chosen state
/// normalized over all states at `t`:
///
/// ```text
/// confidence[t] = exp(delta[t][q_t] - logsumexp_s(delta[t][s]))
/// ```
///
/// A position where every state scores zero gets confidence 0.0.
///
/// # Errors
///
/// Returns [`DnaHmmError::InvalidSequence`] if a symbol is not in the model
/// alphabet, and [`DnaHmmError::NumericInstability`] if a score becomes NaN.
///
/// # Examples
///
/// ```rust
/// use dnahmm_core::algorithms::decode;
/// use dnahmm_core::model::presets;
///
/// let model = presets::gc_content()?;
/// let path = decode(&model, b"ATGCAT")?;
///
/// let labels: Vec<&str> = path.states.iter().map(|&s| model.state_name(s)).collect();
/// assert_eq!(labels, ["L", "L", "H", "H", "L", "L"]);
/// assert!(path.confidences.iter().all(|c| (0.0..=1.0).contains(c)));
/// # Ok::<(), dnahmm_core::types::DnaHmmError>(())
/// ```
pub fn decode(model: &HmmModel, sequence: &[u8]) -> Result<StatePath> {
    let observations = model.encode(sequence)?;
    decode_encoded(model, &observations)
}

pub(crate) fn decode_encoded(model: &HmmModel, observations: &[usize]) -> Result<StatePath> {
    let Some((&first, rest)) = observations.split_first() else {
        return Ok(StatePath::default());
    };

    let n = model.n_states();
    let length = observations.len();

    // delta[t * n + s]: best log score of any path ending in s at t
    // psi[t * n + s]:   predecessor of s on that path
    let mut delta = vec![f64::NEG_INFINITY; length * n];
    let mut psi = vec![0usize; length * n];
    let mut candidates = vec![f64::NEG_INFINITY; n];

    for s in 0..n {
        delta[s] = model.log_initial(s) + model.log_emission(s, first);
    }

    for (step, &symbol) in rest.iter().enumerate() {
        let t = step + 1;
        let (done, row) = delta.split_at_mut(t * n);
        let previous = &done[(t - 1) * n..];
        for to in 0..n {
            for (from, candidate) in candidates.iter_mut().enumerate() {
                *candidate = previous[from] + model.log_transition(from, to);
            }
            let (best_from, best) = argmax_lowest(&candidates, LOG_TIE_TOLERANCE);
            row[to] = best + model.log_emission(to, symbol);
            psi[t * n + to] = best_from;
        }
    }

    if let Some(t) = (0..length).find(|&t| delta[t * n..(t + 1) * n].iter().any(|x| x.is_nan())) {
        return Err(DnaHmmError::NumericInstability(format!(
            "Viterbi score at position {t} is NaN"
        )));
    }

    let (last, log_probability) = argmax_lowest(&delta[(length - 1) * n..], LOG_TIE_TOLERANCE);
    let mut states = vec![0usize; length];
    states[length - 1] = last;
    for t in (1..length).rev() {
        states[t - 1] = psi[t * n + states[t]];
    }

    let confidences = states
        .iter()
        .enumerate()
        .map(|(t, &state)| position_confidence(&delta[t * n..(t + 1) * n], state))
        .collect();

    Ok(StatePath {
        states,
        confidences,
        log_probability,
    })
}

fn position_confidence(row: &[f64], chosen: usize) -> f64 {
    let normalizer = log_sum_exp_slice(row);
    if normalizer == f64::NEG_INFINITY {
        return 0.0;
    }
    (row[chosen] - normalizer).exp().clamp(0.0, 1.0)
}
