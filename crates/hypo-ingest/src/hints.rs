//! Column discovery for choosing samples and grouping columns.

use std::collections::HashSet;

use polars::prelude::{Column, DataFrame};
use serde::Serialize;

use hypo_common::{is_numeric_dtype, label_value};

use crate::error::{IngestError, Result};

/// Distinct labels beyond which a string column is not offered as a grouping column.
const MAX_GROUP_LABELS: usize = 50;

/// How a column can be used in a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Integer or float data; usable as a sample.
    Numeric,
    /// Anything else; usable only as a grouping column.
    Categorical,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

/// Summary of one dataset column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
    pub null_count: usize,
    /// Number of distinct non-empty labels; `None` for numeric columns.
    pub distinct_labels: Option<usize>,
}

impl ColumnInfo {
    /// True when the column has few enough labels to split samples by.
    pub fn is_grouping_candidate(&self) -> bool {
        self.distinct_labels
            .is_some_and(|labels| (2..=MAX_GROUP_LABELS).contains(&labels))
    }
}

/// Describes every column of `df` in frame order.
///
/// Labels are only counted for categorical columns.
pub fn column_kinds(df: &DataFrame) -> Result<Vec<ColumnInfo>> {
    let mut infos = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let (kind, distinct_labels) = if is_numeric_dtype(column.dtype()) {
            (ColumnKind::Numeric, None)
        } else {
            (
                ColumnKind::Categorical,
                Some(distinct_labels(column)?.len()),
            )
        };
        infos.push(ColumnInfo {
            name: column.name().to_string(),
            kind,
            null_count: column.null_count(),
            distinct_labels,
        });
    }
    Ok(infos)
}

/// Distinct non-empty labels of `column` in first-seen order.
pub fn group_labels(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let values = df
        .column(column)
        .map_err(|_| IngestError::ColumnNotFound {
            column: column.to_string(),
        })?;
    distinct_labels(values)
}

/// Polars drops exact duplicates; trimming can still merge a few more.
fn distinct_labels(column: &Column) -> Result<Vec<String>> {
    let unique = column.unique_stable()?;
    let mut seen = HashSet::with_capacity(unique.len());
    let mut labels = Vec::new();
    for idx in 0..unique.len() {
        let label = label_value(unique.get(idx)?);
        if !label.is_empty() && seen.insert(label.clone()) {
            labels.push(label);
        }
    }
    Ok(labels)
}
