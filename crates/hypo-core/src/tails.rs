//! Reference distributions and the tail convention for p-values.
//!
//! For a statistic `S` with reference CDF `F`:
//!
//! | Tail | p-value |
//! |------|---------|
//! | greater | `1 - F(S)` (survival function) |
//! | less | `F(S)` |
//! | two-sided | `min(1, 2 * min(F(S), 1 - F(S)))` |
//!
//! A one-tailed p-value above 0.5 means the statistic points away from the
//! hypothesized direction; it is reported as is.

use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

use hypo_model::{HypoError, Result, TailType};

/// Wraps a distribution construction failure for `test`.
pub fn computation_error<E>(test: &str, err: E) -> HypoError
where
    E: std::error::Error + Send + Sync + 'static,
{
    HypoError::Computation {
        test: test.to_string(),
        source: Box::new(err),
    }
}

/// p-value of `statistic` under `dist` for the requested tail.
pub fn p_value<D>(dist: &D, statistic: f64, tails: TailType) -> f64
where
    D: ContinuousCDF<f64, f64>,
{
    let lower = dist.cdf(statistic);
    let upper = dist.sf(statistic);
    match tails {
        TailType::TwoTail => (2.0 * lower.min(upper)).min(1.0),
        TailType::OneTailGreater => upper,
        TailType::OneTailLess => lower,
    }
}

/// Normal-approximation p-value with a 0.5 continuity correction.
///
/// `deviation` is the statistic minus its null mean and `sigma` its null
/// standard deviation.
pub fn corrected_normal_p(deviation: f64, sigma: f64, tails: TailType) -> f64 {
    let normal = standard_normal();
    let greater = normal.sf((deviation - 0.5) / sigma);
    let less = normal.cdf((deviation + 0.5) / sigma);
    match tails {
        TailType::TwoTail => (2.0 * greater.min(less)).min(1.0),
        TailType::OneTailGreater => greater.min(1.0),
        TailType::OneTailLess => less.min(1.0),
    }
}

/// Upper-tail p-value for omnibus statistics (F, chi-squared).
pub fn upper_tail<D>(dist: &D, statistic: f64) -> f64
where
    D: ContinuousCDF<f64, f64>,
{
    dist.sf(statistic)
}

pub fn standard_normal() -> Normal {
    Normal::standard()
}

/// Student's t with `df` degrees of freedom.
pub fn students_t(test: &str, df: f64) -> Result<StudentsT> {
    StudentsT::new(0.0, 1.0, df).map_err(|e| computation_error(test, e))
}

/// F distribution with `(df1, df2)` degrees of freedom.
pub fn fisher_snedecor(test: &str, df1: f64, df2: f64) -> Result<FisherSnedecor> {
    FisherSnedecor::new(df1, df2).map_err(|e| computation_error(test, e))
}

/// Chi-squared distribution with `df` degrees of freedom.
pub fn chi_squared(test: &str, df: f64) -> Result<ChiSquared> {
    ChiSquared::new(df).map_err(|e| computation_error(test, e))
}
