//! Dataset ingestion for hypothesis testing.
//!
//! Loads CSV files into Polars `DataFrame`s and describes their columns so
//! front ends can offer sensible choices for sample and grouping columns.

pub mod error;
pub mod hints;
pub mod reader;

pub use error::{IngestError, Result};
pub use hints::{ColumnInfo, ColumnKind, column_kinds, group_labels};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_table,
    validate_dataframe_shape, validate_encoding,
};
