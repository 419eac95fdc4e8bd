//! Test adapters, one per statistical family.
//!
//! Adapters are unit-like structs holding only their tail direction. Each
//! `run_test` validates alpha and the request shape, reads its samples,
//! checks sizes, then computes the statistic and p-value.

mod multi_sample;
mod one_sample;
mod paired;
mod two_sample;

pub use multi_sample::{Anova, KruskalWallis, MoodMedian};
pub use one_sample::{OneSampleT, OneSampleZ};
pub use paired::{PairedT, Wilcoxon};
pub use two_sample::{MannWhitney, PooledT, TwoSampleZ, WelchT};

use hypo_model::{Advisory, TailType, TestOutcome, TestResult};
use tracing::{debug, warn};

use crate::samples::Sample;

/// Builds the outcome and logs the statistic and every advisory.
fn finish(
    name: &'static str,
    statistic: f64,
    p_value: f64,
    alpha: f64,
    tails: Option<TailType>,
    samples: &[Sample],
    warnings: Vec<Advisory>,
) -> TestOutcome {
    let result = TestResult::new(
        name,
        statistic,
        p_value,
        alpha,
        tails,
        samples.iter().map(Sample::len).collect(),
    );
    debug!(
        test = name,
        statistic,
        p_value = result.p_value(),
        significant = result.is_significant(),
        "test completed"
    );
    for advisory in &warnings {
        warn!(test = name, "{advisory}");
    }

    TestOutcome {
        result,
        samples: samples.iter().map(Sample::summary).collect(),
        warnings,
    }
}

/// Logs the sizes of the samples a test is about to use.
fn log_samples(name: &'static str, samples: &[Sample]) {
    for sample in samples {
        debug!(
            test = name,
            sample = %sample.label,
            size = sample.len(),
            dropped = sample.dropped,
            "sample extracted"
        );
    }
}
