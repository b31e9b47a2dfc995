/// Numerically stable `ln(exp(a) + exp(b))`.
///
/// Either argument may be negative infinity (a zero probability).
#[must_use]
pub fn log_sum_exp(a: f64, b: f64) -> f64 {
    if a == f64::NEG_INFINITY {
        return b;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    let max = a.max(b);
    max + ((a - max).exp() + (b - max).exp()).ln()
}

/// Log-sum-exp over a slice; negative infinity for an empty or all-zero row.
#[must_use]
pub fn log_sum_exp_slice(xs: &[f64]) -> f64 {
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = xs.iter().map(|&x| (x - max).exp()).sum();
    max + sum.ln()
}

/// Index of the largest value, preferring the lowest index on ties.
///
/// Values within `tolerance * max(1, |best|)` of the current best count as
/// ties. A row of negative infinities selects index 0.
#[must_use]
pub fn argmax_lowest(xs: &[f64], tolerance: f64) -> (usize, f64) {
    let mut best_index = 0;
    let mut best = f64::NEG_INFINITY;
    for (i, &x) in xs.iter().enumerate() {
        let margin = if best == f64::NEG_INFINITY {
            0.0
        } else {
            tolerance * best.abs().max(1.0)
        };
        if i == 0 || x > best + margin {
            best_index = i;
            best = x;
        }
    }
    (best_index, best)
}
