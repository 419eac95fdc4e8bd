use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::{SampleCategory, TailType, TestFamily};

/// Registry key identifying a concrete test.
///
/// `tails` is `None` exactly for omnibus (more-than-two-sample) tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestSpec {
    pub category: SampleCategory,
    pub family: TestFamily,
    pub tails: Option<TailType>,
}

impl TestSpec {
    /// Key for a one- or two-sample test with a tail direction.
    pub fn tailed(category: SampleCategory, family: TestFamily, tails: TailType) -> Self {
        Self {
            category,
            family,
            tails: Some(tails),
        }
    }

    /// Key for an omnibus test.
    pub fn omnibus(family: TestFamily) -> Self {
        Self {
            category: SampleCategory::MoreThanTwoSample,
            family,
            tails: None,
        }
    }

    /// Returns the reason this key can never name a test, if any.
    pub fn inconsistency(&self) -> Option<String> {
        if !self.family.belongs_to(self.category) {
            return Some(format!(
                "family '{}' is not a {} test",
                self.family, self.category
            ));
        }
        match (self.category.is_tailed(), self.tails) {
            (true, None) => Some(format!("{} tests require a tail direction", self.category)),
            (false, Some(_)) => Some(format!(
                "{} tests do not take a tail direction",
                self.category
            )),
            _ => None,
        }
    }
}

impl fmt::Display for TestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tails {
            Some(tails) => write!(f, "{}/{}/{}", self.category, self.family, tails),
            None => write!(f, "{}/{}", self.category, self.family),
        }
    }
}
