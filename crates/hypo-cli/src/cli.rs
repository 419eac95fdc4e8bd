//! CLI argument definitions for hypotest.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "hypotest",
    version,
    about = "Run hypothesis tests on columns of a CSV dataset",
    long_about = "Select a hypothesis test by sample category, family, and tail direction,\n\
                  then run it on numeric columns of a CSV file.\n\n\
                  Supports one-sample, two-sample (independent and paired), and\n\
                  omnibus tests across three or more groups."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the registered tests.
    List(ListArgs),

    /// Describe the columns of a CSV file.
    Columns(ColumnsArgs),

    /// Run a test on a CSV file.
    Run(RunArgs),
}

#[derive(Parser)]
pub struct ListArgs {
    /// Only list tests of this sample category (oneSample, twoSample, moreThanTwoSample).
    #[arg(long = "samples", value_name = "CATEGORY")]
    pub samples: Option<String>,

    /// Print aligned plain text instead of a table.
    #[arg(long = "plain")]
    pub plain: bool,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Path to the CSV file.
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Also list the group labels found in this column, in first-seen order.
    #[arg(long = "group", value_name = "NAME")]
    pub group: Option<String>,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the CSV file.
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Sample category (oneSample, twoSample, moreThanTwoSample).
    #[arg(long = "samples", value_name = "CATEGORY")]
    pub samples: String,

    /// Test family (t, z, welcht, pairedt, wilcoxon, mannwhitney, anova, kruskal, mood).
    #[arg(long = "test", value_name = "FAMILY")]
    pub test: String,

    /// Tail direction (twoTail, oneTailG, oneTailL); ignored for omnibus tests.
    #[arg(long = "tails", value_name = "TAILS", default_value = "twoTail")]
    pub tails: String,

    /// Numeric column holding the observations.
    #[arg(long = "column", value_name = "NAME")]
    pub column: Option<String>,

    /// Hypothesized location for one-sample tests.
    #[arg(long = "target", value_name = "VALUE", allow_negative_numbers = true)]
    pub target: Option<f64>,

    /// Column whose values split `--column` into samples.
    #[arg(long = "group-column", value_name = "NAME", requires = "labels")]
    pub group_column: Option<String>,

    /// Group labels selecting the samples, in order.
    #[arg(long = "labels", value_name = "LABEL", value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Numeric columns used as samples, in order.
    #[arg(long = "columns", value_name = "NAME", value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Significance level in (0, 1].
    #[arg(long = "alpha", value_name = "ALPHA", default_value_t = 0.05)]
    pub alpha: f64,

    /// Output format for the result.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
