//! Exact null distributions of the rank-sum and signed-rank statistics.
//!
//! Both are tabulated as integer frequencies over every attainable value,
//! which holds only when there are no ties. Tail probabilities follow the
//! same convention as [`crate::tails`]: greater is `P(S >= s)`, less is
//! `P(S <= s)`, and two-sided doubles the smaller of the two.

use hypo_model::TailType;

/// Mann-Whitney uses the exact distribution when the smaller sample has at
/// most this many values.
pub const EXACT_RANK_SUM_MAX: usize = 8;

/// Wilcoxon uses the exact distribution for at most this many nonzero
/// differences.
pub const EXACT_SIGNED_RANK_MAX: usize = 50;

/// Frequencies of `U = 0..=m*n` for independent samples of sizes `m` and `n`.
///
/// These are the coefficients of the Gaussian binomial `[m + n choose m]`,
/// built one factor at a time as `(1 - q^(n+i)) / (1 - q^i)`.
fn rank_sum_counts(m: usize, n: usize) -> Vec<f64> {
    let (m, n) = (m.min(n), m.max(n));
    let mut counts = vec![0.0; m * n + 1];
    counts[0] = 1.0;
    for i in 1..=m {
        for k in (n + i..counts.len()).rev() {
            counts[k] -= counts[k - n - i];
        }
        for k in i..counts.len() {
            counts[k] += counts[k - i];
        }
    }
    counts
}

/// Frequencies of `W+ = 0..=n(n+1)/2` for `n` nonzero differences.
///
/// Coefficients of `(1 + q)(1 + q^2)...(1 + q^n)`.
fn signed_rank_counts(n: usize) -> Vec<f64> {
    let max = n * (n + 1) / 2;
    let mut counts = vec![0.0; max + 1];
    counts[0] = 1.0;
    for i in 1..=n {
        for k in (i..=max).rev() {
            counts[k] += counts[k - i];
        }
    }
    counts
}

fn tail_probability(counts: &[f64], statistic: f64, tails: TailType) -> f64 {
    let total: f64 = counts.iter().sum();
    let k = (statistic.round().max(0.0) as usize).min(counts.len() - 1);
    let at_most = counts[..=k].iter().sum::<f64>() / total;
    let at_least = counts[k..].iter().sum::<f64>() / total;
    match tails {
        TailType::TwoTail => (2.0 * at_most.min(at_least)).min(1.0),
        TailType::OneTailGreater => at_least,
        TailType::OneTailLess => at_most,
    }
}

/// Exact p-value of `u` (U of the first sample) for sizes `m` and `n`.
pub fn rank_sum_p(u: f64, m: usize, n: usize, tails: TailType) -> f64 {
    tail_probability(&rank_sum_counts(m, n), u, tails)
}

/// Exact p-value of `w_plus` for `n` nonzero differences.
pub fn signed_rank_p(w_plus: f64, n: usize, tails: TailType) -> f64 {
    tail_probability(&signed_rank_counts(n), w_plus, tails)
}
