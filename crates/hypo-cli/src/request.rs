//! Builds a [`TestRequest`] from command-line selections.

use anyhow::{Result, bail};

use hypo_model::TestRequest;

/// Sample selection flags of `hypotest run`.
#[derive(Debug, Clone, Default)]
pub struct SampleArgs<'a> {
    pub column: Option<&'a str>,
    pub target: Option<f64>,
    pub group_column: Option<&'a str>,
    pub labels: &'a [String],
    pub columns: &'a [String],
}

/// Turns the sample flags into a request.
///
/// Exactly one of three shapes is accepted: `--columns`, `--column` with
/// `--group-column` and `--labels`, or `--column` with `--target`.
pub fn build_request(args: &SampleArgs<'_>, alpha: f64) -> Result<TestRequest> {
    if !args.columns.is_empty() {
        if args.column.is_some() || args.group_column.is_some() || args.target.is_some() {
            bail!("--columns cannot be combined with --column, --group-column, or --target");
        }
        return Ok(TestRequest::columns(args.columns.iter().cloned(), alpha));
    }

    let Some(column) = args.column else {
        bail!("provide --column (with --target or --group-column) or --columns");
    };

    match (args.group_column, args.target) {
        (Some(_), Some(_)) => bail!("--target cannot be combined with --group-column"),
        (Some(group_column), None) => {
            if args.labels.is_empty() {
                bail!("--group-column requires --labels");
            }
            Ok(TestRequest::grouped(
                column,
                group_column,
                args.labels.iter().map(|label| label.trim().to_string()),
                alpha,
            ))
        }
        (None, Some(target)) => Ok(TestRequest::one_sample(column, target, alpha)),
        (None, None) => bail!("--column needs either --target or --group-column"),
    }
}
