//! One-sample location tests against a target value.

use polars::prelude::DataFrame;
use tracing::debug_span;

use hypo_model::{
    HypoError, Result, SampleCategory, SampleInput, TailType, TestFamily, TestOutcome,
    TestRequest, TestSpec,
};

use super::{finish, log_samples};
use crate::checks::{
    Z_TEST_MIN_RELIABLE, missing_value_advisories, require_min, small_sample_advisories,
    validate_alpha,
};
use crate::registry::HypothesisTest;
use crate::samples::{Sample, column_sample};
use crate::tails::{p_value, standard_normal, students_t};

const MIN_OBSERVATIONS: usize = 2;

/// Reads the target column after validating alpha and the request shape.
fn target_sample(
    name: &'static str,
    request: &TestRequest,
    dataset: &DataFrame,
) -> Result<(Sample, f64)> {
    validate_alpha(request.alpha)?;
    let SampleInput::Target { column, target } = &request.input else {
        return Err(HypoError::InvalidParameters {
            test: name.to_string(),
            message: format!(
                "one-sample tests need a column and a target value, got a {}",
                request.input.kind()
            ),
        });
    };
    if !target.is_finite() {
        return Err(HypoError::InvalidParameters {
            test: name.to_string(),
            message: format!("target value must be finite, got {target}"),
        });
    }

    let sample = column_sample(dataset, column)?;
    log_samples(name, std::slice::from_ref(&sample));
    require_min(std::slice::from_ref(&sample), MIN_OBSERVATIONS)?;
    Ok((sample, *target))
}

/// `(mean - target) / (s / sqrt(n))`, the shared one-sample statistic.
///
/// Used by the paired tests on the row-wise differences as well.
pub(super) fn location_statistic(name: &'static str, sample: &Sample, target: f64) -> Result<f64> {
    let n = sample.len() as f64;
    let std_dev = sample.variance().sqrt();
    if std_dev == 0.0 || !std_dev.is_finite() {
        return Err(HypoError::DegenerateSample {
            test: name.to_string(),
            reason: format!("sample '{}' has zero variance", sample.label),
        });
    }
    Ok((sample.mean() - target) / (std_dev / n.sqrt()))
}

/// One-sample Student's t-test.
#[derive(Debug, Clone, Copy)]
pub struct OneSampleT {
    tails: TailType,
}

impl OneSampleT {
    pub fn new(tails: TailType) -> Self {
        Self { tails }
    }
}

impl HypothesisTest for OneSampleT {
    fn name(&self) -> &'static str {
        "One-Sample T-Test"
    }

    fn spec(&self) -> TestSpec {
        TestSpec::tailed(SampleCategory::OneSample, TestFamily::T, self.tails)
    }

    fn run_test(&self, request: &TestRequest, dataset: &DataFrame) -> Result<TestOutcome> {
        let name = self.name();
        let _span = debug_span!("run_test", test = name, tails = %self.tails).entered();

        let (sample, target) = target_sample(name, request, dataset)?;
        let statistic = location_statistic(name, &sample, target)?;
        let dist = students_t(name, sample.len() as f64 - 1.0)?;
        let p = p_value(&dist, statistic, self.tails);

        let samples = [sample];
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

/// One-sample z-test using the sample standard deviation.
#[derive(Debug, Clone, Copy)]
pub struct OneSampleZ {
    tails: TailType,
}

impl OneSampleZ {
    pub fn new(tails: TailType) -> Self {
        Self { tails }
    }
}

impl HypothesisTest for OneSampleZ {
    fn name(&self) -> &'static str {
        "One-Sample Z-Test"
    }

    fn spec(&self) -> TestSpec {
        TestSpec::tailed(SampleCategory::OneSample, TestFamily::Z, self.tails)
    }

    fn run_test(&self, request: &TestRequest, dataset: &DataFrame) -> Result<TestOutcome> {
        let name = self.name();
        let _span = debug_span!("run_test", test = name, tails = %self.tails).entered();

        let (sample, target) = target_sample(name, request, dataset)?;
        let statistic = location_statistic(name, &sample, target)?;
        let p = p_value(&standard_normal(), statistic, self.tails);

        let samples = [sample];
        let mut warnings = missing_value_advisories(&samples);
        warnings.extend(small_sample_advisories(
            &samples,
            Z_TEST_MIN_RELIABLE,
            "consider the one-sample t-test",
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
