//! Precondition checks and advisory findings shared by the adapters.
//!
//! Hard failures return a [`HypoError`] before anything is computed;
//! advisories are collected and returned next to the result.

use hypo_model::{Advisory, HypoError, Result, SampleInput};

use crate::samples::Sample;

/// Group-size ratio above which pooled-variance tests are flagged.
pub const GROUP_SIZE_RATIO: f64 = 1.5;

/// Variance ratio above which pooled-variance tests are flagged.
pub const VARIANCE_RATIO: f64 = 4.0;

/// Sample size below which z-tests are flagged.
pub const Z_TEST_MIN_RELIABLE: usize = 30;

/// Sample size below which rank-test normal approximations are flagged.
pub const RANK_TEST_MIN_RELIABLE: usize = 20;

/// Group size below which the Kruskal-Wallis chi-squared approximation is flagged.
pub const KRUSKAL_MIN_RELIABLE: usize = 5;

/// Expected cell count below which Mood's median test is flagged.
pub const MIN_EXPECTED_COUNT: f64 = 5.0;

/// Fewest groups an omnibus test accepts.
pub const MIN_OMNIBUS_GROUPS: usize = 3;

/// Rejects a significance level outside (0, 1], including NaN.
pub fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(())
    } else {
        Err(HypoError::InvalidAlpha { alpha })
    }
}

/// Fails unless `input` describes exactly `expected` samples.
pub fn require_sample_count(test: &str, input: &SampleInput, expected: usize) -> Result<()> {
    if matches!(input, SampleInput::Target { .. }) {
        return Err(HypoError::InvalidParameters {
            test: test.to_string(),
            message: format!("expected {expected} samples, got a target value"),
        });
    }
    let actual = input.sample_count();
    if actual != expected {
        return Err(HypoError::InvalidParameters {
            test: test.to_string(),
            message: format!(
                "expected {expected} samples from the {}, got {actual}",
                input.kind()
            ),
        });
    }
    Ok(())
}

/// Fails unless `input` describes at least three groups.
pub fn require_omnibus_groups(test: &str, input: &SampleInput) -> Result<()> {
    if matches!(input, SampleInput::Target { .. }) {
        return Err(HypoError::InvalidParameters {
            test: test.to_string(),
            message: "omnibus tests compare groups, not a target value".to_string(),
        });
    }
    let actual = input.sample_count();
    if actual < MIN_OMNIBUS_GROUPS {
        return Err(HypoError::InsufficientGroups {
            required: MIN_OMNIBUS_GROUPS,
            actual,
        });
    }
    Ok(())
}

/// Fails on the first sample with fewer than `required` observations.
pub fn require_min(samples: &[Sample], required: usize) -> Result<()> {
    match samples.iter().find(|sample| sample.len() < required) {
        Some(sample) => Err(HypoError::InsufficientData {
            sample: sample.label.clone(),
            required,
            actual: sample.len(),
        }),
        None => Ok(()),
    }
}

/// Fails unless paired samples have the same length.
pub fn require_paired(first: &Sample, second: &Sample) -> Result<()> {
    if first.len() != second.len() {
        return Err(HypoError::UnpairedData {
            first: first.label.clone(),
            first_len: first.len(),
            second: second.label.clone(),
            second_len: second.len(),
        });
    }
    Ok(())
}

/// One advisory per sample that had missing values removed.
pub fn missing_value_advisories(samples: &[Sample]) -> Vec<Advisory> {
    samples
        .iter()
        .filter(|sample| sample.dropped > 0)
        .map(|sample| Advisory::MissingValuesDropped {
            sample: sample.label.clone(),
            dropped: sample.dropped,
        })
        .collect()
}

/// One advisory per sample smaller than `recommended`.
pub fn small_sample_advisories(
    samples: &[Sample],
    recommended: usize,
    suggestion: &str,
) -> Vec<Advisory> {
    samples
        .iter()
        .filter(|sample| sample.len() < recommended)
        .map(|sample| Advisory::SmallSample {
            sample: sample.label.clone(),
            size: sample.len(),
            recommended,
            suggestion: suggestion.to_string(),
        })
        .collect()
}

/// Flags markedly unequal group sizes and variances for equal-variance tests.
pub fn spread_advisories(samples: &[Sample], suggestion: &str) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    let sizes = samples.iter().map(Sample::len);
    let smallest = sizes.clone().min().unwrap_or(0);
    let largest = sizes.max().unwrap_or(0);
    if smallest > 0 && largest as f64 / smallest as f64 > GROUP_SIZE_RATIO {
        advisories.push(Advisory::UnequalGroupSizes {
            smallest,
            largest,
            suggestion: suggestion.to_string(),
        });
    }

    let variances: Vec<f64> = samples
        .iter()
        .map(Sample::variance)
        .filter(|v| v.is_finite())
        .collect();
    let min_var = variances.iter().copied().fold(f64::INFINITY, f64::min);
    let max_var = variances.iter().copied().fold(0.0, f64::max);
    if min_var > 0.0 && min_var.is_finite() && max_var / min_var > VARIANCE_RATIO {
        advisories.push(Advisory::UnequalVariances {
            ratio: max_var / min_var,
            suggestion: suggestion.to_string(),
        });
    }

    advisories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_alpha() {
        assert!(validate_alpha(0.05).is_ok());
        assert!(validate_alpha(1.0).is_ok());
        for alpha in [0.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                validate_alpha(alpha),
                Err(HypoError::InvalidAlpha { .. })
            ));
        }
    }

    #[test]
    fn test_require_min_reports_first_short_sample() {
        let samples = vec![
            Sample::new("a", vec![1.0, 2.0]),
            Sample::new("b", vec![1.0]),
        ];
        match require_min(&samples, 2) {
            Err(HypoError::InsufficientData {
                sample,
                required,
                actual,
            }) => {
                assert_eq!(sample, "b");
                assert_eq!(required, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_require_sample_count() {
        let input = SampleInput::Columns {
            columns: vec!["a".to_string()],
        };
        assert!(matches!(
            require_sample_count("t", &input, 2),
            Err(HypoError::InvalidParameters { .. })
        ));
        let input = SampleInput::Target {
            column: "a".to_string(),
            target: 0.0,
        };
        assert!(matches!(
            require_sample_count("t", &input, 2),
            Err(HypoError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn test_spread_advisories() {
        let samples = vec![
            Sample::new("a", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            Sample::new("b", vec![10.0, 20.0, 30.0]),
        ];
        let advisories = spread_advisories(&samples, "use Welch's t-test");
        assert_eq!(advisories.len(), 2);
        assert!(matches!(
            advisories[0],
            Advisory::UnequalGroupSizes {
                smallest: 3,
                largest: 6,
                ..
            }
        ));
        assert!(matches!(advisories[1], Advisory::UnequalVariances { .. }));
    }

    #[test]
    fn test_spread_advisories_balanced() {
        let samples = vec![
            Sample::new("a", vec![1.0, 2.0, 3.0]),
            Sample::new("b", vec![4.0, 5.0, 6.0]),
        ];
        assert!(spread_advisories(&samples, "").is_empty());
    }
}
