//! CLI library components for hypotest.

pub mod logging;
pub mod request;
pub mod summary;
