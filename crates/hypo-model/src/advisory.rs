//! Advisory (non-fatal) findings raised while running a test.
//!
//! Each variant carries only the data it needs; [`Advisory::message`]
//! renders the warning string shown to the user.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-fatal finding returned next to a successful result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Missing values were removed from a sample before computing.
    MissingValuesDropped { sample: String, dropped: usize },
    /// Zero paired differences were removed before ranking.
    ZeroDifferencesDropped { dropped: usize },
    /// Group sizes differ enough to weaken an equal-variance test.
    UnequalGroupSizes {
        smallest: usize,
        largest: usize,
        suggestion: String,
    },
    /// Sample variances differ enough to weaken an equal-variance test.
    UnequalVariances { ratio: f64, suggestion: String },
    /// A sample is below the size where the approximation is reliable.
    SmallSample {
        sample: String,
        size: usize,
        recommended: usize,
        suggestion: String,
    },
    /// Expected contingency counts are too low for the chi-squared approximation.
    LowExpectedCounts { min_expected: f64 },
}

impl Advisory {
    /// Human-readable warning text.
    pub fn message(&self) -> String {
        match self {
            Advisory::MissingValuesDropped { sample, dropped } => {
                format!("{dropped} missing value(s) dropped from '{sample}'")
            }
            Advisory::ZeroDifferencesDropped { dropped } => {
                format!("{dropped} zero difference(s) dropped before ranking")
            }
            Advisory::UnequalGroupSizes {
                smallest,
                largest,
                suggestion,
            } => format!(
                "group sizes are markedly unequal ({smallest} vs {largest}); {suggestion}"
            ),
            Advisory::UnequalVariances { ratio, suggestion } => {
                format!("sample variances differ by a factor of {ratio:.2}; {suggestion}")
            }
            Advisory::SmallSample {
                sample,
                size,
                recommended,
                suggestion,
            } => format!(
                "sample '{sample}' has {size} observation(s), fewer than the {recommended} \
                 recommended; {suggestion}"
            ),
            Advisory::LowExpectedCounts { min_expected } => format!(
                "smallest expected cell count is {min_expected:.2} (below 5); \
                 the chi-squared approximation may be unreliable"
            ),
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
