//! Shared utilities for the hypotest crates.
//!
//! This crate provides Polars value and dtype helpers used by both
//! ingestion and the test adapters.

pub mod values;

pub use values::{dtype_name, format_numeric, is_numeric_dtype, label_value, numeric_value};
