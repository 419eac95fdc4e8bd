//! Omnibus tests across three or more groups.

use polars::prelude::DataFrame;
use statrs::statistics::{Data, Median};
use tracing::{debug, debug_span};

use hypo_model::{Advisory, HypoError, Result, TestFamily, TestOutcome, TestRequest, TestSpec};

use super::{finish, log_samples};
use crate::checks::{
    KRUSKAL_MIN_RELIABLE, MIN_EXPECTED_COUNT, missing_value_advisories, require_min,
    require_omnibus_groups, small_sample_advisories, spread_advisories, validate_alpha,
};
use crate::ranks::rank_with_ties;
use crate::registry::HypothesisTest;
use crate::samples::{Sample, collect_samples};
use crate::tails::{chi_squared, fisher_snedecor, upper_tail};

/// Validates the request and reads every group, each with at least `min` values.
fn groups(
    name: &'static str,
    request: &TestRequest,
    dataset: &DataFrame,
    min: usize,
) -> Result<Vec<Sample>> {
    validate_alpha(request.alpha)?;
    require_omnibus_groups(name, &request.input)?;
    let samples = collect_samples(&request.input, dataset)?;
    log_samples(name, &samples);
    require_min(&samples, min)?;
    Ok(samples)
}

fn pooled_values(samples: &[Sample]) -> Vec<f64> {
    samples
        .iter()
        .flat_map(|sample| sample.values.iter().copied())
        .collect()
}

/// One-way analysis of variance.
#[derive(Debug, Clone, Copy)]
pub struct Anova;

impl HypothesisTest for Anova {
    fn name(&self) -> &'static str {
        "One-Way ANOVA"
    }

    fn spec(&self) -> TestSpec {
        TestSpec::omnibus(TestFamily::Anova)
    }

    fn run_test(&self, request: &TestRequest, dataset: &DataFrame) -> Result<TestOutcome> {
        let name = self.name();
        let _span = debug_span!("run_test", test = name).entered();

        let samples = groups(name, request, dataset, 2)?;
        let k = samples.len() as f64;
        let total: usize = samples.iter().map(Sample::len).sum();
        let n = total as f64;
        let grand_mean = pooled_values(&samples).iter().sum::<f64>() / n;

        let mut between = 0.0;
        let mut within = 0.0;
        for sample in &samples {
            let mean = sample.mean();
            between += sample.len() as f64 * (mean - grand_mean).powi(2);
            within += sample.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        }
        let (df_between, df_within) = (k - 1.0, n - k);
        let ms_within = within / df_within;
        if ms_within == 0.0 {
            return Err(HypoError::DegenerateSample {
                test: name.to_string(),
                reason: "every group has zero variance".to_string(),
            });
        }
        let statistic = (between / df_between) / ms_within;
        debug!(between, within, df_between, df_within, "sums of squares");
        let p = upper_tail(&fisher_snedecor(name, df_between, df_within)?, statistic);

        let mut warnings = missing_value_advisories(&samples);
        warnings.extend(spread_advisories(
            &samples,
            "consider the Kruskal-Wallis test",
        ));
        Ok(finish(
            name,
            statistic,
            p,
            request.alpha,
            None,
            &samples,
            warnings,
        ))
    }
}

/// Kruskal-Wallis H test with tie correction.
#[derive(Debug, Clone, Copy)]
pub struct KruskalWallis;

impl HypothesisTest for KruskalWallis {
    fn name(&self) -> &'static str {
        "Kruskal-Wallis H Test"
    }

    fn spec(&self) -> TestSpec {
        TestSpec::omnibus(TestFamily::Kruskal)
    }

    fn run_test(&self, request: &TestRequest, dataset: &DataFrame) -> Result<TestOutcome> {
        let name = self.name();
        let _span = debug_span!("run_test", test = name).entered();

        let samples = groups(name, request, dataset, 1)?;
        let ranking = rank_with_ties(&pooled_values(&samples));
        if ranking.all_tied() {
            return Err(HypoError::DegenerateSample {
                test: name.to_string(),
                reason: "all values are tied".to_string(),
            });
        }

        let n = ranking.ranks.len() as f64;
        let mut offset = 0;
        let mut rank_term = 0.0;
        for sample in &samples {
            let rank_sum: f64 = ranking.ranks[offset..offset + sample.len()].iter().sum();
            rank_term += rank_sum.powi(2) / sample.len() as f64;
            offset += sample.len();
        }
        let h = 12.0 / (n * (n + 1.0)) * rank_term - 3.0 * (n + 1.0);
        let correction = 1.0 - ranking.tie_term / (n.powi(3) - n);
        let statistic = h / correction;
        let p = upper_tail(&chi_squared(name, samples.len() as f64 - 1.0)?, statistic);

        let mut warnings = missing_value_advisories(&samples);
        warnings.extend(small_sample_advisories(
            &samples,
            KRUSKAL_MIN_RELIABLE,
            "the chi-squared approximation may be inaccurate for small groups",
        ));
        Ok(finish(
            name,
            statistic,
            p,
            request.alpha,
            None,
            &samples,
            warnings,
        ))
    }
}

/// Mood's median test.
///
/// Counts values above and at-or-below the grand median in each group and
/// runs Pearson's chi-squared test on the resulting 2 x k table.
#[derive(Debug, Clone, Copy)]
pub struct MoodMedian;

impl HypothesisTest for MoodMedian {
    fn name(&self) -> &'static str {
        "Mood's Median Test"
    }

    fn spec(&self) -> TestSpec {
        TestSpec::omnibus(TestFamily::Mood)
    }

    fn run_test(&self, request: &TestRequest, dataset: &DataFrame) -> Result<TestOutcome> {
        let name = self.name();
        let _span = debug_span!("run_test", test = name).entered();

        let samples = groups(name, request, dataset, 2)?;
        let grand_median = Data::new(pooled_values(&samples)).median();

        let above: Vec<f64> = samples
            .iter()
            .map(|sample| sample.values.iter().filter(|v| **v > grand_median).count() as f64)
            .collect();
        let sizes: Vec<f64> = samples.iter().map(|sample| sample.len() as f64).collect();
        let n: f64 = sizes.iter().sum();
        let above_total: f64 = above.iter().sum();
        let below_total = n - above_total;
        if above_total == 0.0 || below_total == 0.0 {
            return Err(HypoError::DegenerateSample {
                test: name.to_string(),
                reason: format!("no values fall above the grand median {grand_median}"),
            });
        }

        let mut statistic = 0.0;
        let mut min_expected = f64::INFINITY;
        for (observed_above, size) in above.iter().zip(&sizes) {
            let observed_below = size - observed_above;
            let expected_above = size * above_total / n;
            let expected_below = size * below_total / n;
            statistic += (observed_above - expected_above).powi(2) / expected_above;
            statistic += (observed_below - expected_below).powi(2) / expected_below;
            min_expected = min_expected.min(expected_above).min(expected_below);
        }
        debug!(grand_median, above_total, below_total, "median split");
        let p = upper_tail(&chi_squared(name, samples.len() as f64 - 1.0)?, statistic);

        let mut warnings = missing_value_advisories(&samples);
        if min_expected < MIN_EXPECTED_COUNT {
            warnings.push(Advisory::LowExpectedCounts { min_expected });
        }
        Ok(finish(
            name,
            statistic,
            p,
            request.alpha,
            None,
            &samples,
            warnings,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grand_median_of_pooled_groups() {
        let odd = vec![Sample::new("a", vec![3.0, 1.0]), Sample::new("b", vec![2.0])];
        assert_eq!(Data::new(pooled_values(&odd)).median(), 2.0);

        let even = vec![Sample::new("a", vec![4.0, 1.0]), Sample::new("b", vec![3.0, 2.0])];
        assert_eq!(Data::new(pooled_values(&even)).median(), 2.5);
    }
}
