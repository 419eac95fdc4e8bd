//! Terminal and JSON rendering for listings, column descriptions, and outcomes.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hypo_core::TestRegistry;
use hypo_ingest::{ColumnInfo, ColumnKind};
use hypo_model::{SampleCategory, TestOutcome, TestSpec};

/// One row of the test listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRow {
    pub spec: TestSpec,
    pub name: &'static str,
}

/// Registered tests in registration order, optionally limited to one category.
pub fn listing_rows(registry: &TestRegistry, category: Option<SampleCategory>) -> Vec<ListingRow> {
    registry
        .list_available_tests()
        .filter(|spec| category.is_none_or(|category| spec.category == category))
        .filter_map(|spec| {
            registry.get(&spec).map(|test| ListingRow {
                spec,
                name: test.name(),
            })
        })
        .collect()
}

/// Aligned plain-text listing, one test per line.
pub fn plain_listing(rows: &[ListingRow]) -> String {
    rows.iter()
        .map(|row| {
            let tails = row.spec.tails.map_or("-", |tails| tails.as_str());
            format!(
                "{:<18}{:<12}{:<10}{}",
                row.spec.category.as_str(),
                row.spec.family.as_str(),
                tails,
                row.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn listing_table(rows: &[ListingRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Family"),
        header_cell("Tails"),
        header_cell("Test"),
    ]);
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.spec.category.as_str()),
            Cell::new(row.spec.family.as_str()),
            match row.spec.tails {
                Some(tails) => Cell::new(tails.as_str()),
                None => dim_cell("-"),
            },
            Cell::new(row.name),
        ]);
    }
    table
}

pub fn columns_table(columns: &[ColumnInfo]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Nulls"),
        header_cell("Labels"),
        header_cell("Grouping"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for info in columns {
        let kind = match info.kind {
            ColumnKind::Numeric => Cell::new(info.kind.as_str()).fg(Color::Green),
            ColumnKind::Categorical => Cell::new(info.kind.as_str()),
        };
        let labels = match info.distinct_labels {
            Some(count) => Cell::new(count),
            None => dim_cell("-"),
        };
        let grouping = if info.is_grouping_candidate() {
            Cell::new("yes").fg(Color::Green)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(&info.name),
            kind,
            count_cell(info.null_count, Color::Yellow),
            labels,
            grouping,
        ]);
    }
    table
}

/// Group labels of `column`, numbered in first-seen order.
pub fn labels_table(column: &str, labels: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell(column)]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, label) in labels.iter().enumerate() {
        table.add_row(vec![Cell::new(idx + 1), Cell::new(label)]);
    }
    table
}

pub fn result_table(outcome: &TestOutcome) -> Table {
    let result = &outcome.result;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Test"),
        header_cell("Alternative"),
        header_cell("Statistic"),
        header_cell("p-value"),
        header_cell("Alpha"),
        header_cell("Decision"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    let decision = if result.is_significant() {
        Cell::new(result.decision())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(result.decision())
    };
    table.add_row(vec![
        Cell::new(result.test_name()),
        match result.alternative() {
            Some(tails) => Cell::new(tails.label()),
            None => dim_cell("omnibus"),
        },
        Cell::new(format!("{:.4}", result.statistic())),
        Cell::new(format_p_value(result.p_value())),
        Cell::new(result.alpha()),
        decision,
    ]);
    table
}

pub fn samples_table(outcome: &TestOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sample"),
        header_cell("N"),
        header_cell("Dropped"),
        header_cell("Mean"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for sample in &outcome.samples {
        table.add_row(vec![
            Cell::new(&sample.label),
            Cell::new(sample.size),
            count_cell(sample.dropped, Color::Yellow),
            match sample.mean {
                Some(mean) => Cell::new(format!("{mean:.4}")),
                None => dim_cell("-"),
            },
        ]);
    }
    table
}

pub fn print_outcome(outcome: &TestOutcome) {
    println!("{}", result_table(outcome));
    println!("{}", samples_table(outcome));
    for message in outcome.warning_messages() {
        println!("warning: {message}");
    }
}

/// Pretty-printed JSON of the whole outcome.
pub fn outcome_json(outcome: &TestOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}

/// Four decimals, switching to scientific notation below 0.0001.
pub fn format_p_value(p_value: f64) -> String {
    if p_value > 0.0 && p_value < 1e-4 {
        format!("{p_value:.3e}")
    } else {
        format!("{p_value:.4}")
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_table_marks_grouping_candidates() {
        let columns = vec![
            ColumnInfo {
                name: "mfr".to_string(),
                kind: ColumnKind::Categorical,
                null_count: 0,
                distinct_labels: Some(3),
            },
            ColumnInfo {
                name: "calories".to_string(),
                kind: ColumnKind::Numeric,
                null_count: 1,
                distinct_labels: None,
            },
        ];
        let rendered = columns_table(&columns).to_string();
        assert!(rendered.contains("Grouping"));
        assert_eq!(rendered.matches("yes").count(), 1);
    }

    #[test]
    fn test_format_p_value() {
        assert_eq!(format_p_value(0.02134), "0.0213");
        assert_eq!(format_p_value(4.5554e-5), "4.555e-5");
        assert_eq!(format_p_value(0.0), "0.0000");
        assert_eq!(format_p_value(1.0), "1.0000");
    }
}
