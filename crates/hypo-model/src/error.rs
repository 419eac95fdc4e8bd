//! Error taxonomy for test selection and execution.

use thiserror::Error;

/// Errors raised while selecting or running a hypothesis test.
///
/// Every precondition failure is detected before the statistic is
/// computed and carries enough context to fix the input.
#[derive(Debug, Error)]
pub enum HypoError {
    // === Selection ===
    /// No adapter is registered under the requested key.
    #[error("unknown test configuration: {key}")]
    UnknownTest { key: String },

    /// Two adapters were registered under the same key.
    #[error("a test is already registered for {key}")]
    DuplicateTest { key: String },

    /// An adapter's key can never be selected.
    #[error("invalid registration for {key}: {reason}")]
    InvalidRegistration { key: String, reason: String },

    // === Input validation ===
    /// Referenced column is absent from the dataset.
    #[error("column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Referenced column does not hold numeric data.
    #[error("column '{column}' must contain numeric data, found {found}")]
    TypeMismatch { column: String, found: String },

    /// Too few observations remain after dropping missing values.
    #[error("sample '{sample}' has {actual} observation(s); at least {required} required")]
    InsufficientData {
        sample: String,
        required: usize,
        actual: usize,
    },

    /// Significance level outside (0, 1].
    #[error("alpha must be in (0, 1], got {alpha}")]
    InvalidAlpha { alpha: f64 },

    /// Paired samples differ in length.
    #[error(
        "paired samples must have equal length: '{first}' has {first_len}, \
         '{second}' has {second_len}"
    )]
    UnpairedData {
        first: String,
        first_len: usize,
        second: String,
        second_len: usize,
    },

    /// The statistic is undefined for the given data.
    #[error("{test}: {reason}")]
    DegenerateSample { test: String, reason: String },

    /// An omnibus test received too few groups.
    #[error(
        "omnibus tests need at least {required} groups, got {actual}; \
         use a two-sample test to compare two groups"
    )]
    InsufficientGroups { required: usize, actual: usize },

    /// The request shape does not fit the selected test.
    #[error("{test}: {message}")]
    InvalidParameters { test: String, message: String },

    // === Computation ===
    /// The reference distribution could not be evaluated.
    #[error("{test}: computation failed: {source}")]
    Computation {
        test: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Dataset access failed.
    #[error("dataset error: {0}")]
    Dataset(#[from] polars::prelude::PolarsError),
}

/// Result type for hypothesis test operations.
pub type Result<T> = std::result::Result<T, HypoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HypoError::InsufficientData {
            sample: "A".to_string(),
            required: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "sample 'A' has 1 observation(s); at least 2 required"
        );

        let err = HypoError::InsufficientGroups {
            required: 3,
            actual: 2,
        };
        assert!(err.to_string().contains("two-sample"));
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("x".into());
        let err: HypoError = polars_err.into();
        assert!(matches!(err, HypoError::Dataset(_)));
    }
}
