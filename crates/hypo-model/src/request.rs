//! Per-run test parameters.

use polars::prelude::DataFrame;

/// Where the samples of a test come from.
#[derive(Debug, Clone)]
pub enum SampleInput {
    /// One numeric column compared against a hypothesized location.
    Target { column: String, target: f64 },
    /// One numeric column split into samples by matching `group_column`
    /// against each label, in label order.
    Grouped {
        column: String,
        group_column: String,
        labels: Vec<String>,
    },
    /// Each named column is one sample.
    Columns { columns: Vec<String> },
    /// Pre-split frames; `column` is read from each frame in order.
    Subsets {
        column: String,
        subsets: Vec<DataFrame>,
    },
}

impl SampleInput {
    /// Number of samples this input describes.
    pub fn sample_count(&self) -> usize {
        match self {
            SampleInput::Target { .. } => 1,
            SampleInput::Grouped { labels, .. } => labels.len(),
            SampleInput::Columns { columns } => columns.len(),
            SampleInput::Subsets { subsets, .. } => subsets.len(),
        }
    }

    /// Short description used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SampleInput::Target { .. } => "target value",
            SampleInput::Grouped { .. } => "grouped column",
            SampleInput::Columns { .. } => "column list",
            SampleInput::Subsets { .. } => "pre-split frames",
        }
    }
}

/// Parameters for a single `run_test` call.
#[derive(Debug, Clone)]
pub struct TestRequest {
    /// Significance level, valid in (0, 1].
    pub alpha: f64,
    pub input: SampleInput,
}

impl TestRequest {
    pub fn new(input: SampleInput, alpha: f64) -> Self {
        Self { alpha, input }
    }

    /// One-sample request: `column` against `target`.
    pub fn one_sample(column: impl Into<String>, target: f64, alpha: f64) -> Self {
        Self::new(
            SampleInput::Target {
                column: column.into(),
                target,
            },
            alpha,
        )
    }

    /// Split `column` by the values of `group_column`.
    pub fn grouped<I, S>(
        column: impl Into<String>,
        group_column: impl Into<String>,
        labels: I,
        alpha: f64,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            SampleInput::Grouped {
                column: column.into(),
                group_column: group_column.into(),
                labels: labels.into_iter().map(Into::into).collect(),
            },
            alpha,
        )
    }

    /// One sample per named column.
    pub fn columns<I, S>(columns: I, alpha: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            SampleInput::Columns {
                columns: columns.into_iter().map(Into::into).collect(),
            },
            alpha,
        )
    }

    /// One sample per pre-split frame.
    pub fn subsets(column: impl Into<String>, subsets: Vec<DataFrame>, alpha: f64) -> Self {
        Self::new(
            SampleInput::Subsets {
                column: column.into(),
                subsets,
            },
            alpha,
        )
    }
}
