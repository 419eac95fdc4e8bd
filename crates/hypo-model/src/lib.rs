//! Data model for hypothesis test selection and results.
//!
//! This crate holds the types shared between the test registry, the test
//! adapters, and the front ends that render results:
//!
//! - [`SampleCategory`], [`TestFamily`], [`TailType`]: closed selection enums
//! - [`TestSpec`]: registry key
//! - [`TestRequest`] / [`SampleInput`]: per-run parameters
//! - [`TestResult`], [`TestOutcome`], [`Advisory`]: outputs
//! - [`HypoError`]: error taxonomy

pub mod advisory;
pub mod enums;
pub mod error;
pub mod request;
pub mod result;
pub mod spec;

pub use advisory::Advisory;
pub use enums::{SampleCategory, TailType, TestFamily};
pub use error::{HypoError, Result};
pub use request::{SampleInput, TestRequest};
pub use result::{SampleSummary, TestOutcome, TestResult};
pub use spec::TestSpec;
