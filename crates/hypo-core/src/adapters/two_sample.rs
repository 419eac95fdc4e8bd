//! Independent two-sample tests.

use polars::prelude::DataFrame;
use tracing::{debug, debug_span};

use hypo_model::{
    HypoError, Result, SampleCategory, TailType, TestFamily, TestOutcome, TestRequest, TestSpec,
};

use super::{finish, log_samples};
use crate::checks::{
    RANK_TEST_MIN_RELIABLE, Z_TEST_MIN_RELIABLE, missing_value_advisories, require_min,
    require_sample_count, small_sample_advisories, spread_advisories, validate_alpha,
};
use crate::exact::{EXACT_RANK_SUM_MAX, rank_sum_p};
use crate::ranks::rank_with_ties;
use crate::registry::HypothesisTest;
use crate::samples::{Sample, collect_samples};
use crate::tails::{corrected_normal_p, p_value, standard_normal, students_t};

const WELCH_SUGGESTION: &str = "consider Welch's t-test";

/// Validates the request and reads exactly two samples of at least `min` values.
fn two_samples(
    name: &'static str,
    request: &TestRequest,
    dataset: &DataFrame,
    min: usize,
) -> Result<Vec<Sample>> {
    validate_alpha(request.alpha)?;
    require_sample_count(name, &request.input, 2)?;
    let samples = collect_samples(&request.input, dataset)?;
    log_samples(name, &samples);
    require_min(&samples, min)?;
    Ok(samples)
}

/// Pooled-variance difference of means: `(statistic, degrees of freedom)`.
fn pooled_statistic(name: &'static str, a: &Sample, b: &Sample) -> Result<(f64, f64)> {
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let df = n1 + n2 - 2.0;
    let pooled = ((n1 - 1.0) * a.variance() + (n2 - 1.0) * b.variance()) / df;
    let std_err = (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();
    if std_err == 0.0 || !std_err.is_finite() {
        return Err(HypoError::DegenerateSample {
            test: name.to_string(),
            reason: "both samples have zero variance".to_string(),
        });
    }
    Ok(((a.mean() - b.mean()) / std_err, df))
}

/// Two-sample Student's t-test assuming equal variances.
#[derive(Debug, Clone, Copy)]
pub struct PooledT {
    tails: TailType,
}

impl PooledT {
    pub fn new(tails: TailType) -> Self {
        Self { tails }
    }
}

impl HypothesisTest for PooledT {
    fn name(&self) -> &'static str {
        "Two-Sample T-Test"
    }

    fn spec(&self) -> TestSpec {
        TestSpec::tailed(SampleCategory::TwoSample, TestFamily::T, self.tails)
    }

    fn run_test(&self, request: &TestRequest, dataset: &DataFrame) -> Result<TestOutcome> {
        let name = self.name();
        let _span = debug_span!("run_test", test = name, tails = %self.tails).entered();

        let samples = two_samples(name, request, dataset, 2)?;
        let (statistic, df) = pooled_statistic(name, &samples[0], &samples[1])?;
        let p = p_value(&students_t(name, df)?, statistic, self.tails);

        let mut warnings = missing_value_advisories(&samples);
        warnings.extend(spread_advisories(&samples, WELCH_SUGGESTION));
        Ok(finish(
            name,
            statistic,
            p,
            request.alpha,
            Some(self.tails),
            &samples,
            warnings,
        ))
    }
}

/// Welch's unequal-variance t-test.
#[derive(Debug, Clone, Copy)]
pub struct WelchT {
    tails: TailType,
}

impl WelchT {
    pub fn new(tails: TailType) -> Self {
        Self { tails }
    }
}

impl HypothesisTest for WelchT {
    fn name(&self) -> &'static str {
        "Welch's T-Test"
    }

    fn spec(&self) -> TestSpec {
        TestSpec::tailed(SampleCategory::TwoSample, TestFamily::WelchT, self.tails)
    }

    fn run_test(&self, request: &TestRequest, dataset: &DataFrame) -> Result<TestOutcome> {
        let name = self.name();
        let _span = debug_span!("run_test", test = name, tails = %self.tails).entered();

        let samples = two_samples(name, request, dataset, 2)?;
        let (a, b) = (&samples[0], &samples[1]);
        let se1 = a.variance() / a.len() as f64;
        let se2 = b.variance() / b.len() as f64;
        let std_err = (se1 + se2).sqrt();
        if std_err == 0.0 || !std_err.is_finite() {
            return Err(HypoError::DegenerateSample {
                test: name.to_string(),
                reason: "both samples have zero variance".to_string(),
            });
        }
        let statistic = (a.mean() - b.mean()) / std_err;
        // Welch-Satterthwaite
        let df = (se1 + se2).powi(2)
            / (se1.powi(2) / (a.len() as f64 - 1.0) + se2.powi(2) / (b.len() as f64 - 1.0));
        let p = p_value(&students_t(name, df)?, statistic, self.tails);

        let warnings = missing_value_advisories(&samples);
        Ok(finish(
            name,
            statistic,
            p,
            request.alpha,
            Some(self.tails),
            &samples,
            warnings,
        ))
    }
}

/// Two-sample z-test with pooled variance.
#[derive(Debug, Clone, Copy)]
pub struct TwoSampleZ {
    tails: TailType,
}

impl TwoSampleZ {
    pub fn new(tails: TailType) -> Self {
        Self { tails }
    }
}

impl HypothesisTest for TwoSampleZ {
    fn name(&self) -> &'static str {
        "Two-Sample Z-Test"
    }

    fn spec(&self) -> TestSpec {
        TestSpec::tailed(SampleCategory::TwoSample, TestFamily::Z, self.tails)
    }

    fn run_test(&self, request: &TestRequest, dataset: &DataFrame) -> Result<TestOutcome> {
        let name = self.name();
        let _span = debug_span!("run_test", test = name, tails = %self.tails).entered();

        let samples = two_samples(name, request, dataset, 2)?;
        let (statistic, _) = pooled_statistic(name, &samples[0], &samples[1])?;
        let p = p_value(&standard_normal(), statistic, self.tails);

        let mut warnings = missing_value_advisories(&samples);
        warnings.extend(spread_advisories(&samples, WELCH_SUGGESTION));
        warnings.extend(small_sample_advisories(
            &samples,
            Z_TEST_MIN_RELIABLE,
            "consider the two-sample t-test",
        ));
        Ok(finish(
            name,
            statistic,
            p,
            request.alpha,
            Some(self.tails),
            &samples,
            warnings,
        ))
    }
}

/// Mann-Whitney U test (Wilcoxon rank-sum).
///
/// Reports U of the first sample. Without ties and with a smaller sample of
/// at most eight values the p-value is exact; otherwise it comes from the
/// tie-corrected normal approximation with a 0.5 continuity correction.
#[derive(Debug, Clone, Copy)]
pub struct MannWhitney {
    tails: TailType,
}

impl MannWhitney {
    pub fn new(tails: TailType) -> Self {
        Self { tails }
    }
}

impl HypothesisTest for MannWhitney {
    fn name(&self) -> &'static str {
        "Mann-Whitney U Test"
    }

    fn spec(&self) -> TestSpec {
        TestSpec::tailed(SampleCategory::TwoSample, TestFamily::MannWhitney, self.tails)
    }

    fn run_test(&self, request: &TestRequest, dataset: &DataFrame) -> Result<TestOutcome> {
        let name = self.name();
        let _span = debug_span!("run_test", test = name, tails = %self.tails).entered();

        let samples = two_samples(name, request, dataset, 3)?;
        let (a, b) = (&samples[0], &samples[1]);
        let (n1, n2) = (a.len() as f64, b.len() as f64);
        let n = n1 + n2;

        let combined: Vec<f64> = a.values.iter().chain(&b.values).copied().collect();
        let ranking = rank_with_ties(&combined);
        if ranking.all_tied() {
            return Err(HypoError::DegenerateSample {
                test: name.to_string(),
                reason: "all values are tied".to_string(),
            });
        }
        let rank_sum: f64 = ranking.ranks[..a.len()].iter().sum();
        let statistic = rank_sum - n1 * (n1 + 1.0) / 2.0;

        let exact = !ranking.has_ties() && a.len().min(b.len()) <= EXACT_RANK_SUM_MAX;
        let p = if exact {
            rank_sum_p(statistic, a.len(), b.len(), self.tails)
        } else {
            let mean = n1 * n2 / 2.0;
            let sigma =
                (n1 * n2 / 12.0 * ((n + 1.0) - ranking.tie_term / (n * (n - 1.0)))).sqrt();
            corrected_normal_p(statistic - mean, sigma, self.tails)
        };
        debug!(u = statistic, exact, "rank sum");

        let mut warnings = missing_value_advisories(&samples);
        if !exact {
            warnings.extend(small_sample_advisories(
                &samples,
                RANK_TEST_MIN_RELIABLE,
                "the normal approximation may be inaccurate at this size",
            ));
        }
        Ok(finish(
            name,
            statistic,
            p,
            request.alpha,
            Some(self.tails),
            &samples,
            warnings,
        ))
    }
}
