//! Numeric helpers shared by the dynamics and the analysis code

/// Calculate Shannon entropy from a probability distribution.
///
/// The Shannon entropy is calculated as: H = -Σ(p * ln(p)) for p > 0
///
/// # Examples
///
/// ```
/// use vagueness::utils::shannon_entropy;
///
/// let entropy = shannon_entropy(vec![0.5, 0.5]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 0.001);
///
/// let entropy = shannon_entropy(vec![1.0, 0.0, 0.0]);
/// assert!(entropy.abs() < 0.001);
/// ```
pub fn shannon_entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}

/// Normalize weights to probabilities that sum to 1.0.
///
/// A zero, negative or non-finite total yields the uniform distribution,
/// so an all-zero strategy row becomes uniform instead of NaN.
///
/// # Examples
///
/// ```
/// use vagueness::utils::make_distribution;
///
/// assert_eq!(make_distribution(&[1.0, 2.0, 1.0]), vec![0.25, 0.5, 0.25]);
/// assert_eq!(make_distribution(&[0.0, 0.0, 0.0]), vec![1.0 / 3.0; 3]);
/// ```
pub fn make_distribution(weights: &[f64]) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return vec![1.0 / weights.len() as f64; weights.len()];
    }
    weights.iter().map(|&w| w / sum).collect()
}

/// Softmax of `scale * values`.
///
/// The row maximum is subtracted before exponentiating, so arbitrarily
/// large `scale * value` products stay finite. The result is identical to
/// the unshifted formula wherever that one does not overflow.
///
/// # Examples
///
/// ```
/// use vagueness::utils::scaled_softmax;
///
/// let probs = scaled_softmax(&[1.0, 1.0], 5.0);
/// assert_eq!(probs, vec![0.5, 0.5]);
///
/// let probs = scaled_softmax(&[1.0, 0.0], 1e6);
/// assert_eq!(probs, vec![1.0, 0.0]);
/// ```
pub fn scaled_softmax(values: &[f64], scale: f64) -> Vec<f64> {
    let max = values
        .iter()
        .map(|&v| scale * v)
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return make_distribution(&vec![1.0; values.len()]);
    }
    let exps: Vec<f64> = values.iter().map(|&v| (scale * v - max).exp()).collect();
    make_distribution(&exps)
}

/// Indicator vector of the entries equal to the maximum.
///
/// Equality is exact; every tied maximum gets a 1.
pub fn argmax_indicator(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values
        .iter()
        .map(|&v| if v == max { 1.0 } else { 0.0 })
        .collect()
}

/// Indices of all entries equal to the maximum.
pub fn argmax_set(values: &[f64]) -> Vec<usize> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == max)
        .map(|(idx, _)| idx)
        .collect()
}
