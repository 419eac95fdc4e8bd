//! Test trait and registry.
//!
//! The [`HypothesisTest`] trait defines the contract every adapter
//! implements. Adapters are registered in a [`TestRegistry`] under their
//! [`TestSpec`] and selected by `(category, family, tails)`.
//!
//! # Thread Safety
//!
//! Adapters are `Send + Sync` and hold no state between calls, so the
//! registry can be shared across threads. The standard registry is built
//! once and cached in a [`OnceLock`].

use std::collections::HashMap;
use std::sync::OnceLock;

use polars::prelude::DataFrame;

use hypo_model::{
    HypoError, Result, SampleCategory, TailType, TestFamily, TestOutcome, TestRequest, TestSpec,
};

use crate::adapters::{
    Anova, KruskalWallis, MannWhitney, MoodMedian, OneSampleT, OneSampleZ, PairedT, PooledT,
    TwoSampleZ, WelchT, Wilcoxon,
};

/// A runnable hypothesis test.
///
/// # Implementing a Test
///
/// Each adapter should:
/// 1. Validate every precondition before computing anything
/// 2. Return advisories in the outcome instead of failing on them
/// 3. Be registered in [`TestRegistry::standard`]
pub trait HypothesisTest: Send + Sync {
    /// Display name used in results (e.g., "Welch's T-Test").
    fn name(&self) -> &'static str;

    /// Registry key for this adapter.
    fn spec(&self) -> TestSpec;

    /// Runs the test against `dataset`.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced column is missing or not numeric,
    /// a sample is too small, alpha is out of range, the request shape
    /// does not fit the test, or the statistic is undefined for the data.
    fn run_test(&self, request: &TestRequest, dataset: &DataFrame) -> Result<TestOutcome>;
}

/// Registry of test adapters keyed by [`TestSpec`].
///
/// Keeps registration order for listing.
#[derive(Default)]
pub struct TestRegistry {
    tests: Vec<Box<dyn HypothesisTest>>,
    index: HashMap<TestSpec, usize>,
}

impl TestRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry holding every standard adapter.
    pub fn standard() -> Result<Self> {
        let mut registry = Self::new();

        for tails in TailType::ALL {
            registry.register(Box::new(OneSampleT::new(tails)))?;
            registry.register(Box::new(OneSampleZ::new(tails)))?;
        }
        for tails in TailType::ALL {
            registry.register(Box::new(PooledT::new(tails)))?;
            registry.register(Box::new(TwoSampleZ::new(tails)))?;
            registry.register(Box::new(WelchT::new(tails)))?;
            registry.register(Box::new(PairedT::new(tails)))?;
            registry.register(Box::new(Wilcoxon::new(tails)))?;
            registry.register(Box::new(MannWhitney::new(tails)))?;
        }
        registry.register(Box::new(Anova))?;
        registry.register(Box::new(KruskalWallis))?;
        registry.register(Box::new(MoodMedian))?;

        Ok(registry)
    }

    /// Registers an adapter under its spec.
    ///
    /// # Errors
    ///
    /// Fails if the key can never be selected (family outside its
    /// category, or tail presence not matching the category) or if the
    /// key is already taken.
    pub fn register(&mut self, test: Box<dyn HypothesisTest>) -> Result<()> {
        let spec = test.spec();
        if let Some(reason) = spec.inconsistency() {
            return Err(HypoError::InvalidRegistration {
                key: spec.to_string(),
                reason,
            });
        }
        if self.index.contains_key(&spec) {
            return Err(HypoError::DuplicateTest {
                key: spec.to_string(),
            });
        }
        self.index.insert(spec, self.tests.len());
        self.tests.push(test);
        Ok(())
    }

    /// Looks up an adapter by exact spec.
    pub fn get(&self, spec: &TestSpec) -> Option<&dyn HypothesisTest> {
        self.index.get(spec).map(|&idx| self.tests[idx].as_ref())
    }

    /// Selects a one- or two-sample test.
    ///
    /// # Errors
    ///
    /// Returns [`HypoError::UnknownTest`] when nothing is registered for
    /// the triple, including omnibus categories, which take no tails.
    pub fn select_test(
        &self,
        category: SampleCategory,
        family: TestFamily,
        tails: TailType,
    ) -> Result<&dyn HypothesisTest> {
        self.lookup(TestSpec::tailed(category, family, tails))
    }

    /// Selects an omnibus (more-than-two-sample) test.
    ///
    /// # Errors
    ///
    /// Returns [`HypoError::UnknownTest`] when nothing is registered for
    /// the pair.
    pub fn select_test_multi(
        &self,
        category: SampleCategory,
        family: TestFamily,
    ) -> Result<&dyn HypothesisTest> {
        self.lookup(TestSpec {
            category,
            family,
            tails: None,
        })
    }

    /// Selects a test from loosely-typed names.
    ///
    /// Names are matched case- and punctuation-insensitively and accept
    /// legacy spellings such as `wilcoxan` or `oneTailG`. `tails` is
    /// required for one- and two-sample categories and ignored for omnibus
    /// ones.
    ///
    /// # Errors
    ///
    /// Returns [`HypoError::UnknownTest`] for any name that does not parse
    /// or any combination that is not registered.
    pub fn select_test_by_name(
        &self,
        category: &str,
        family: &str,
        tails: Option<&str>,
    ) -> Result<&dyn HypothesisTest> {
        let unknown = || HypoError::UnknownTest {
            key: match tails {
                Some(tails) => format!("{category}/{family}/{tails}"),
                None => format!("{category}/{family}"),
            },
        };

        let parsed_category: SampleCategory = category.parse().map_err(|_| unknown())?;
        let parsed_family: TestFamily = family.parse().map_err(|_| unknown())?;

        if !parsed_category.is_tailed() {
            if tails.is_some() {
                tracing::debug!(category, family, "ignoring tails for omnibus test");
            }
            return self
                .select_test_multi(parsed_category, parsed_family)
                .map_err(|_| unknown());
        }

        let parsed_tails: TailType = tails
            .ok_or_else(unknown)?
            .parse()
            .map_err(|_| unknown())?;
        self.select_test(parsed_category, parsed_family, parsed_tails)
            .map_err(|_| unknown())
    }

    /// Registered specs in registration order.
    ///
    /// The iterator borrows the registry and can be recreated at will.
    pub fn list_available_tests(&self) -> impl Iterator<Item = TestSpec> + '_ {
        self.tests.iter().map(|test| test.spec())
    }

    /// Registered adapters in registration order.
    pub fn tests(&self) -> impl Iterator<Item = &dyn HypothesisTest> + '_ {
        self.tests.iter().map(|test| test.as_ref())
    }

    /// Returns the number of registered tests.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Returns true if no tests are registered.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    fn lookup(&self, spec: TestSpec) -> Result<&dyn HypothesisTest> {
        self.get(&spec).ok_or_else(|| HypoError::UnknownTest {
            key: spec.to_string(),
        })
    }
}

/// Cached standard registry.
static STANDARD_REGISTRY: OnceLock<TestRegistry> = OnceLock::new();

/// Returns the standard registry, building it on first access.
///
/// # Errors
///
/// Fails only if a standard adapter is registered inconsistently.
pub fn standard_registry() -> Result<&'static TestRegistry> {
    if let Some(registry) = STANDARD_REGISTRY.get() {
        return Ok(registry);
    }
    let registry = TestRegistry::standard()?;
    Ok(STANDARD_REGISTRY.get_or_init(|| registry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_size() {
        let registry = TestRegistry::standard().unwrap();
        assert_eq!(registry.len(), 2 * 3 + 6 * 3 + 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_get_returns_matching_adapter() {
        let registry = standard_registry().unwrap();
        let spec = TestSpec::omnibus(TestFamily::Kruskal);
        let test = registry.get(&spec).unwrap();
        assert_eq!(test.spec(), spec);
        assert_eq!(test.name(), "Kruskal-Wallis H Test");
    }

    #[test]
    fn test_select_test_rejects_omnibus_category() {
        let registry = standard_registry().unwrap();
        let result = registry.select_test(
            SampleCategory::MoreThanTwoSample,
            TestFamily::Anova,
            TailType::TwoTail,
        );
        assert!(matches!(result, Err(HypoError::UnknownTest { .. })));
    }
}
