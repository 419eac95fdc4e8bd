//! Type-safe enumerations for test selection.
//!
//! These enums replace the loosely-typed strings a front end collects
//! (sample category, test family, tail direction). Parsing is
//! case-insensitive and ignores punctuation so that `"Welch t"`,
//! `"welch-t"` and `"WELCHT"` all resolve to the same family.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowercase a selection name and strip everything but ASCII alphanumerics.
fn normalize_name(s: &str) -> String {
    s.trim()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Sample-arity category of a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SampleCategory {
    /// A single sample compared against a target value.
    OneSample,
    /// Two samples, either independent or paired.
    TwoSample,
    /// Three or more samples compared by an omnibus test.
    MoreThanTwoSample,
}

impl SampleCategory {
    pub const ALL: [SampleCategory; 3] = [
        SampleCategory::OneSample,
        SampleCategory::TwoSample,
        SampleCategory::MoreThanTwoSample,
    ];

    /// Returns the canonical selection key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleCategory::OneSample => "oneSample",
            SampleCategory::TwoSample => "twoSample",
            SampleCategory::MoreThanTwoSample => "moreThanTwoSample",
        }
    }

    /// Returns true if tests in this category take a tail direction.
    ///
    /// Omnibus tests are one-directional by construction and never do.
    pub fn is_tailed(&self) -> bool {
        !matches!(self, SampleCategory::MoreThanTwoSample)
    }
}

impl fmt::Display for SampleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SampleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "onesample" | "one" | "1" => Ok(SampleCategory::OneSample),
            "twosample" | "two" | "2" => Ok(SampleCategory::TwoSample),
            "morethantwosample" | "multisample" | "multi" | "many" => {
                Ok(SampleCategory::MoreThanTwoSample)
            }
            _ => Err(format!("Unknown sample category: {s}")),
        }
    }
}

/// Statistical test family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFamily {
    /// Student's t (one-sample, or pooled-variance two-sample).
    T,
    /// z-test against the standard normal.
    Z,
    /// Welch's unequal-variance t-test.
    WelchT,
    /// Paired-samples t-test.
    PairedT,
    /// Wilcoxon signed-rank test.
    Wilcoxon,
    /// Mann-Whitney U test.
    MannWhitney,
    /// One-way analysis of variance.
    Anova,
    /// Kruskal-Wallis H test.
    Kruskal,
    /// Mood's median test.
    Mood,
}

impl TestFamily {
    /// Returns the canonical selection key.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestFamily::T => "t",
            TestFamily::Z => "z",
            TestFamily::WelchT => "welcht",
            TestFamily::PairedT => "pairedt",
            TestFamily::Wilcoxon => "wilcoxon",
            TestFamily::MannWhitney => "mannwhitney",
            TestFamily::Anova => "anova",
            TestFamily::Kruskal => "kruskal",
            TestFamily::Mood => "mood",
        }
    }

    /// Returns the categories this family can be registered under.
    pub fn categories(&self) -> &'static [SampleCategory] {
        match self {
            TestFamily::T | TestFamily::Z => {
                &[SampleCategory::OneSample, SampleCategory::TwoSample]
            }
            TestFamily::WelchT
            | TestFamily::PairedT
            | TestFamily::Wilcoxon
            | TestFamily::MannWhitney => &[SampleCategory::TwoSample],
            TestFamily::Anova | TestFamily::Kruskal | TestFamily::Mood => {
                &[SampleCategory::MoreThanTwoSample]
            }
        }
    }

    /// Returns true if this family belongs to the given category.
    pub fn belongs_to(&self, category: SampleCategory) -> bool {
        self.categories().contains(&category)
    }
}

impl fmt::Display for TestFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TestFamily {
    type Err = String;

    /// Parse a family name, accepting the historical misspellings
    /// (`wilcoxan`, `mannwitney`) older front ends still send.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "t" | "ttest" | "student" => Ok(TestFamily::T),
            "z" | "ztest" => Ok(TestFamily::Z),
            "welcht" | "welch" => Ok(TestFamily::WelchT),
            "pairedt" | "paired" => Ok(TestFamily::PairedT),
            "wilcoxon" | "wilcoxan" | "signedrank" => Ok(TestFamily::Wilcoxon),
            "mannwhitney" | "mannwitney" | "mannwhitneyu" | "ranksum" => {
                Ok(TestFamily::MannWhitney)
            }
            "anova" | "oneway" => Ok(TestFamily::Anova),
            "kruskal" | "kruskalwallis" => Ok(TestFamily::Kruskal),
            "mood" | "moods" | "median" => Ok(TestFamily::Mood),
            _ => Err(format!("Unknown test family: {s}")),
        }
    }
}

/// Direction of the alternative hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TailType {
    /// Two-sided alternative.
    TwoTail,
    /// One-sided alternative: the location is greater.
    OneTailGreater,
    /// One-sided alternative: the location is less.
    OneTailLess,
}

impl TailType {
    pub const ALL: [TailType; 3] = [
        TailType::TwoTail,
        TailType::OneTailGreater,
        TailType::OneTailLess,
    ];

    /// Returns the canonical selection key.
    pub fn as_str(&self) -> &'static str {
        match self {
            TailType::TwoTail => "twoTail",
            TailType::OneTailGreater => "oneTailG",
            TailType::OneTailLess => "oneTailL",
        }
    }

    /// Human-readable label for the alternative hypothesis.
    pub fn label(&self) -> &'static str {
        match self {
            TailType::TwoTail => "two-sided",
            TailType::OneTailGreater => "greater",
            TailType::OneTailLess => "less",
        }
    }
}

impl fmt::Display for TailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TailType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "twotail" | "two" | "twosided" | "both" => Ok(TailType::TwoTail),
            "onetailg" | "onetailgreater" | "greater" | "upper" => Ok(TailType::OneTailGreater),
            "onetaill" | "onetailless" | "less" | "lower" => Ok(TailType::OneTailLess),
            _ => Err(format!("Unknown tail type: {s}")),
        }
    }
}
