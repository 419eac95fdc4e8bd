//! Hypothesis test selection and execution.
//!
//! The [`TestRegistry`] maps a [`TestSpec`](hypo_model::TestSpec) key to an
//! adapter implementing [`HypothesisTest`]. Each adapter pulls its samples
//! out of a Polars `DataFrame`, validates them, computes the statistic and
//! p-value, and returns a [`TestOutcome`](hypo_model::TestOutcome) with any
//! advisory warnings attached.
//!
//! # Example
//!
//! ```ignore
//! use hypo_core::standard_registry;
//! use hypo_model::{SampleCategory, TailType, TestFamily, TestRequest};
//!
//! let registry = standard_registry()?;
//! let test = registry.select_test(SampleCategory::OneSample, TestFamily::T, TailType::TwoTail)?;
//! let outcome = test.run_test(&TestRequest::one_sample("calories", 100.0, 0.05), &df)?;
//! println!("{}", outcome.result);
//! ```

pub mod adapters;
pub mod checks;
pub mod exact;
pub mod ranks;
pub mod registry;
pub mod samples;
pub mod tails;

pub use registry::{HypothesisTest, TestRegistry, standard_registry};
pub use samples::Sample;
