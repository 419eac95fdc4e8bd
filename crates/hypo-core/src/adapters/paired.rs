//! Paired two-sample tests on row-wise differences.

use polars::prelude::DataFrame;
use tracing::{debug, debug_span};

use hypo_model::{
    Advisory, HypoError, Result, SampleCategory, SampleInput, TailType, TestFamily, TestOutcome,
    TestRequest, TestSpec,
};

use super::one_sample::location_statistic;
use super::{finish, log_samples};
use crate::checks::{
    RANK_TEST_MIN_RELIABLE, missing_value_advisories, require_min, require_paired,
    require_sample_count, small_sample_advisories, validate_alpha,
};
use crate::exact::{EXACT_SIGNED_RANK_MAX, signed_rank_p};
use crate::ranks::rank_with_ties;
use crate::registry::HypothesisTest;
use crate::samples::{Sample, collect_samples, paired_columns};
use crate::tails::{p_value, standard_normal, students_t};

const MIN_PAIRS: usize = 2;

/// Reads two equal-length samples.
///
/// Two columns are paired row by row; grouped or pre-split samples must
/// already have equal lengths after dropping missing values.
fn paired_samples(
    name: &'static str,
    request: &TestRequest,
    dataset: &DataFrame,
) -> Result<Vec<Sample>> {
    validate_alpha(request.alpha)?;
    require_sample_count(name, &request.input, 2)?;

    let samples = if let SampleInput::Columns { columns } = &request.input
        && let [first, second] = columns.as_slice()
    {
        let (a, b) = paired_columns(dataset, first, second)?;
        vec![a, b]
    } else {
        let samples = collect_samples(&request.input, dataset)?;
        require_paired(&samples[0], &samples[1])?;
        samples
    };

    log_samples(name, &samples);
    require_min(&samples, MIN_PAIRS)?;
    Ok(samples)
}

/// First minus second, row by row.
fn differences(samples: &[Sample]) -> Sample {
    let values = samples[0]
        .values
        .iter()
        .zip(&samples[1].values)
        .map(|(a, b)| a - b)
        .collect();
    Sample::new(
        format!("{} - {}", samples[0].label, samples[1].label),
        values,
    )
}

/// Paired Student's t-test: one-sample t on the differences against zero.
#[derive(Debug, Clone, Copy)]
pub struct PairedT {
    tails: TailType,
}

impl PairedT {
    pub fn new(tails: TailType) -> Self {
        Self { tails }
    }
}

impl HypothesisTest for PairedT {
    fn name(&self) -> &'static str {
        "Paired T-Test"
    }

    fn spec(&self) -> TestSpec {
        TestSpec::tailed(SampleCategory::TwoSample, TestFamily::PairedT, self.tails)
    }

    fn run_test(&self, request: &TestRequest, dataset: &DataFrame) -> Result<TestOutcome> {
        let name = self.name();
        let _span = debug_span!("run_test", test = name, tails = %self.tails).entered();

        let samples = paired_samples(name, request, dataset)?;
        let diffs = differences(&samples);
        let statistic = location_statistic(name, &diffs, 0.0)?;
        let dist = students_t(name, diffs.len() as f64 - 1.0)?;
        let p = p_value(&dist, statistic, self.tails);

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

/// Wilcoxon signed-rank test.
///
/// Zero differences are dropped before ranking. Two-tailed runs report
/// `min(W+, W-)`; one-tailed runs report `W+`. With no zero differences, no
/// ties and at most 50 pairs the p-value of `W+` is exact; otherwise it
/// comes from the tie-corrected normal approximation.
#[derive(Debug, Clone, Copy)]
pub struct Wilcoxon {
    tails: TailType,
}

impl Wilcoxon {
    pub fn new(tails: TailType) -> Self {
        Self { tails }
    }
}

impl HypothesisTest for Wilcoxon {
    fn name(&self) -> &'static str {
        "Wilcoxon Signed-Rank Test"
    }

    fn spec(&self) -> TestSpec {
        TestSpec::tailed(SampleCategory::TwoSample, TestFamily::Wilcoxon, self.tails)
    }

    fn run_test(&self, request: &TestRequest, dataset: &DataFrame) -> Result<TestOutcome> {
        let name = self.name();
        let _span = debug_span!("run_test", test = name, tails = %self.tails).entered();

        let samples = paired_samples(name, request, dataset)?;
        let diffs = differences(&samples);
        let nonzero: Vec<f64> = diffs.values.iter().copied().filter(|d| *d != 0.0).collect();
        let zeros = diffs.len() - nonzero.len();
        if nonzero.is_empty() {
            return Err(HypoError::DegenerateSample {
                test: name.to_string(),
                reason: "all paired differences are zero".to_string(),
            });
        }

        let magnitudes: Vec<f64> = nonzero.iter().map(|d| d.abs()).collect();
        let ranking = rank_with_ties(&magnitudes);
        let w_plus: f64 = nonzero
            .iter()
            .zip(&ranking.ranks)
            .filter(|(d, _)| **d > 0.0)
            .map(|(_, rank)| rank)
            .sum();
        let n = nonzero.len() as f64;
        let w_minus = n * (n + 1.0) / 2.0 - w_plus;
        let exact =
            zeros == 0 && !ranking.has_ties() && nonzero.len() <= EXACT_SIGNED_RANK_MAX;
        debug!(w_plus, w_minus, zeros, exact, "signed ranks");

        let p = if exact {
            signed_rank_p(w_plus, nonzero.len(), self.tails)
        } else {
            let mean = n * (n + 1.0) / 4.0;
            let variance = n * (n + 1.0) * (2.0 * n + 1.0) / 24.0 - ranking.tie_term / 48.0;
            let z = (w_plus - mean) / variance.sqrt();
            p_value(&standard_normal(), z, self.tails)
        };
        let statistic = match self.tails {
            TailType::TwoTail => w_plus.min(w_minus),
            TailType::OneTailGreater | TailType::OneTailLess => w_plus,
        };

        let mut warnings = missing_value_advisories(&samples);
        if zeros > 0 {
            warnings.push(Advisory::ZeroDifferencesDropped { dropped: zeros });
        }
        if !exact {
            warnings.extend(small_sample_advisories(
                &[Sample::new(diffs.label, nonzero)],
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
