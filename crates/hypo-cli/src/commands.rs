use anyhow::{Context, Result, anyhow};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use hypo_cli::request::{SampleArgs, build_request};
use hypo_cli::summary::{
    columns_table, labels_table, listing_rows, listing_table, outcome_json, plain_listing,
    print_outcome,
};
use hypo_core::standard_registry;
use hypo_ingest::{column_kinds, group_labels, read_csv_table};
use hypo_model::SampleCategory;

use crate::cli::{ColumnsArgs, ListArgs, OutputFormatArg, RunArgs};

pub fn run_list(args: &ListArgs) -> Result<()> {
    let category = args
        .samples
        .as_deref()
        .map(|name| name.parse::<SampleCategory>().map_err(|e| anyhow!(e)))
        .transpose()?;
    let registry = standard_registry().context("build test registry")?;
    let rows = listing_rows(registry, category);
    if args.plain {
        println!("{}", plain_listing(&rows));
    } else {
        println!("{}", listing_table(&rows));
    }
    Ok(())
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let df = load_dataset(args)?;
    let columns = column_kinds(&df).context("describe columns")?;
    println!("{}", columns_table(&columns));
    if let Some(group) = &args.group {
        let labels = group_labels(&df, group).context("list group labels")?;
        println!("{}", labels_table(group, &labels));
    }
    Ok(())
}

pub fn run_test(args: &RunArgs) -> Result<()> {
    let registry = standard_registry().context("build test registry")?;
    let test = registry.select_test_by_name(&args.samples, &args.test, Some(&args.tails))?;
    let span = info_span!("run", test = test.name());
    let _guard = span.enter();

    let sample_args = SampleArgs {
        column: args.column.as_deref(),
        target: args.target,
        group_column: args.group_column.as_deref(),
        labels: &args.labels,
        columns: &args.columns,
    };
    let request = build_request(&sample_args, args.alpha)?;
    let df = read_csv_table(&args.data)
        .with_context(|| format!("load dataset {}", args.data.display()))?;
    info!(rows = df.height(), spec = %test.spec(), "running test");

    let outcome = test
        .run_test(&request, &df)
        .with_context(|| format!("run {}", test.name()))?;
    info!("{}", outcome.result);

    match args.format {
        OutputFormatArg::Table => print_outcome(&outcome),
        OutputFormatArg::Json => {
            let json = outcome_json(&outcome).context("serialize outcome")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn load_dataset(args: &ColumnsArgs) -> Result<DataFrame> {
    read_csv_table(&args.data).with_context(|| format!("load dataset {}", args.data.display()))
}
