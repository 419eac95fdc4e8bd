//! Sample extraction from datasets.
//!
//! Every adapter reads its samples through these functions so the column
//! checks (existence, numeric dtype) and missing-value handling are the
//! same for all tests.

use polars::prelude::{Column, DataFrame};
use statrs::statistics::Statistics;

use hypo_common::{dtype_name, is_numeric_dtype, label_value, numeric_value};
use hypo_model::{HypoError, Result, SampleInput, SampleSummary};

/// One numeric sample with missing values removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub label: String,
    pub values: Vec<f64>,
    /// Null or NaN cells removed while reading.
    pub dropped: usize,
}

impl Sample {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            dropped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean; NaN when empty.
    pub fn mean(&self) -> f64 {
        self.values.iter().mean()
    }

    /// Unbiased sample variance; NaN with fewer than two values.
    pub fn variance(&self) -> f64 {
        self.values.iter().variance()
    }

    pub fn summary(&self) -> SampleSummary {
        SampleSummary {
            label: self.label.clone(),
            size: self.len(),
            dropped: self.dropped,
            mean: if self.is_empty() {
                None
            } else {
                Some(self.mean())
            },
        }
    }
}

/// Looks up a column and checks that it holds numbers.
pub fn numeric_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    let column = df.column(name).map_err(|_| HypoError::ColumnNotFound {
        column: name.to_string(),
    })?;
    if !is_numeric_dtype(column.dtype()) {
        return Err(HypoError::TypeMismatch {
            column: name.to_string(),
            found: dtype_name(column.dtype()),
        });
    }
    Ok(column)
}

/// Reads every row of a numeric column, dropping null and NaN.
pub fn column_sample(df: &DataFrame, name: &str) -> Result<Sample> {
    let column = numeric_column(df, name)?;
    let mut sample = Sample::new(name, Vec::with_capacity(column.len()));
    for idx in 0..column.len() {
        match numeric_value(column.get(idx)?) {
            Some(value) => sample.values.push(value),
            None => sample.dropped += 1,
        }
    }
    Ok(sample)
}

/// Splits `column` into one sample per label by matching `group_column`.
///
/// Rows whose group value matches none of `labels` are ignored. A label
/// that matches no rows yields an empty sample.
pub fn grouped_samples(
    df: &DataFrame,
    column: &str,
    group_column: &str,
    labels: &[String],
) -> Result<Vec<Sample>> {
    let values = numeric_column(df, column)?;
    let groups = df
        .column(group_column)
        .map_err(|_| HypoError::ColumnNotFound {
            column: group_column.to_string(),
        })?;

    let wanted: Vec<&str> = labels.iter().map(|label| label.trim()).collect();
    let mut samples: Vec<Sample> = labels
        .iter()
        .map(|label| Sample::new(label.trim(), Vec::new()))
        .collect();

    for idx in 0..values.len() {
        let group = label_value(groups.get(idx)?);
        let Some(slot) = wanted.iter().position(|label| *label == group) else {
            continue;
        };
        match numeric_value(values.get(idx)?) {
            Some(value) => samples[slot].values.push(value),
            None => samples[slot].dropped += 1,
        }
    }
    Ok(samples)
}

/// One sample per pre-split frame, each read from `column`.
pub fn subset_samples(column: &str, subsets: &[DataFrame]) -> Result<Vec<Sample>> {
    subsets
        .iter()
        .enumerate()
        .map(|(idx, frame)| {
            let mut sample = column_sample(frame, column)?;
            sample.label = format!("{column} #{}", idx + 1);
            Ok(sample)
        })
        .collect()
}

/// Reads the samples described by `input`, one per label, column, or frame.
///
/// A target input yields its single column.
pub fn collect_samples(input: &SampleInput, df: &DataFrame) -> Result<Vec<Sample>> {
    match input {
        SampleInput::Target { column, .. } => Ok(vec![column_sample(df, column)?]),
        SampleInput::Grouped {
            column,
            group_column,
            labels,
        } => grouped_samples(df, column, group_column, labels),
        SampleInput::Columns { columns } => columns
            .iter()
            .map(|name| column_sample(df, name))
            .collect(),
        SampleInput::Subsets { column, subsets } => subset_samples(column, subsets),
    }
}

/// Reads two columns row by row, dropping any row missing either value.
///
/// Both returned samples report the same number of dropped rows.
pub fn paired_columns(df: &DataFrame, first: &str, second: &str) -> Result<(Sample, Sample)> {
    let left = numeric_column(df, first)?;
    let right = numeric_column(df, second)?;

    let mut a = Sample::new(first, Vec::with_capacity(left.len()));
    let mut b = Sample::new(second, Vec::with_capacity(right.len()));
    for idx in 0..left.len() {
        match (numeric_value(left.get(idx)?), numeric_value(right.get(idx)?)) {
            (Some(x), Some(y)) => {
                a.values.push(x);
                b.values.push(y);
            }
            _ => {
                a.dropped += 1;
                b.dropped += 1;
            }
        }
    }
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn sample_df() -> DataFrame {
        DataFrame::new(vec![
            Series::new("score".into(), &[Some(1.0), Some(2.0), None, Some(4.0), Some(f64::NAN)])
                .into_column(),
            Series::new("arm".into(), &["A", "B", "A", "B", "A"]).into_column(),
            Series::new("other".into(), &[Some(5i32), None, Some(7), Some(8), Some(9)])
                .into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_column_sample_drops_null_and_nan() {
        let sample = column_sample(&sample_df(), "score").unwrap();
        assert_eq!(sample.values, vec![1.0, 2.0, 4.0]);
        assert_eq!(sample.dropped, 2);
        let mean = sample.summary().mean.unwrap();
        assert!((mean - 7.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_column_sample_errors() {
        let df = sample_df();
        assert!(matches!(
            column_sample(&df, "missing"),
            Err(HypoError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            column_sample(&df, "arm"),
            Err(HypoError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_grouped_samples() {
        let labels = vec!["A".to_string(), " B".to_string(), "C".to_string()];
        let samples = grouped_samples(&sample_df(), "score", "arm", &labels).unwrap();

        assert_eq!(samples[0].label, "A");
        assert_eq!(samples[0].values, vec![1.0]);
        assert_eq!(samples[0].dropped, 2);
        assert_eq!(samples[1].label, "B");
        assert_eq!(samples[1].values, vec![2.0, 4.0]);
        assert!(samples[2].is_empty());
    }

    #[test]
    fn test_paired_columns_drop_rows() {
        let (a, b) = paired_columns(&sample_df(), "score", "other").unwrap();
        assert_eq!(a.values, vec![1.0, 4.0]);
        assert_eq!(b.values, vec![5.0, 8.0]);
        assert_eq!(a.dropped, 3);
        assert_eq!(b.dropped, 3);
    }

    #[test]
    fn test_variance() {
        let sample = Sample::new("x", vec![1.0, 2.0, 3.0]);
        assert!((sample.variance() - 1.0).abs() < 1e-12);
        assert!(Sample::new("y", vec![1.0]).variance().is_nan());
    }
}
