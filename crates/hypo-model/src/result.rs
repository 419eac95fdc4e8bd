//! Test result contract.

use serde::Serialize;
use std::fmt;

use crate::advisory::Advisory;
use crate::enums::TailType;

/// Outcome of a single hypothesis test.
///
/// Fields are private so the rejection decision can only come from
/// [`TestResult::new`], where it is derived as `p_value <= alpha`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    test_name: String,
    statistic: f64,
    p_value: f64,
    alpha: f64,
    alternative: Option<TailType>,
    sample_sizes: Vec<usize>,
    null_rejected: bool,
}

impl TestResult {
    /// Build a result. `p_value` is clamped to [0, 1].
    pub fn new(
        test_name: impl Into<String>,
        statistic: f64,
        p_value: f64,
        alpha: f64,
        alternative: Option<TailType>,
        sample_sizes: Vec<usize>,
    ) -> Self {
        let p_value = p_value.clamp(0.0, 1.0);
        Self {
            test_name: test_name.into(),
            statistic,
            p_value,
            alpha,
            alternative,
            sample_sizes,
            null_rejected: p_value <= alpha,
        }
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Tested alternative; `None` for omnibus tests.
    pub fn alternative(&self) -> Option<TailType> {
        self.alternative
    }

    /// Sizes of the samples after missing values were dropped.
    pub fn sample_sizes(&self) -> &[usize] {
        &self.sample_sizes
    }

    /// True when the null hypothesis is rejected at `alpha`.
    pub fn is_significant(&self) -> bool {
        self.null_rejected
    }

    /// Verdict label for display.
    pub fn decision(&self) -> &'static str {
        if self.null_rejected {
            "Reject H0"
        } else {
            "Fail to reject H0"
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: statistic={:.4}, p-value={:.4}, alpha={}, result={}",
            self.test_name,
            self.statistic,
            self.p_value,
            self.alpha,
            self.decision()
        )
    }
}

/// Descriptive summary of one sample as used by a test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    pub label: String,
    /// Observations remaining after missing values were dropped.
    pub size: usize,
    pub dropped: usize,
    pub mean: Option<f64>,
}

/// Result of `run_test`: the numeric result plus everything the caller
/// should show alongside it.
#[derive(Debug, Clone, Serialize)]
pub struct TestOutcome {
    pub result: TestResult,
    pub samples: Vec<SampleSummary>,
    pub warnings: Vec<Advisory>,
}

impl TestOutcome {
    /// Advisory warnings rendered as strings.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(Advisory::message).collect()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
