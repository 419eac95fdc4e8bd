use hypo_core::{HypothesisTest, TestRegistry, standard_registry};
use hypo_model::{
    HypoError, Result, SampleCategory, TailType, TestFamily, TestOutcome, TestRequest, TestSpec,
};

use polars::prelude::*;
use std::thread;

/// Adapter that claims a key it should not.
struct MisfiledTest {
    spec: TestSpec,
}

impl HypothesisTest for MisfiledTest {
    fn name(&self) -> &'static str {
        "Misfiled"
    }

    fn spec(&self) -> TestSpec {
        self.spec
    }

    fn run_test(&self, _request: &TestRequest, _dataset: &DataFrame) -> Result<TestOutcome> {
        Err(HypoError::InvalidParameters {
            test: self.name().to_string(),
            message: "not runnable".to_string(),
        })
    }
}

#[test]
fn listing_follows_registration_order() {
    let registry = standard_registry().unwrap();
    let specs: Vec<TestSpec> = registry.list_available_tests().collect();

    assert_eq!(specs.len(), 27);
    assert_eq!(
        specs[0],
        TestSpec::tailed(SampleCategory::OneSample, TestFamily::T, TailType::TwoTail)
    );
    assert_eq!(
        specs[1],
        TestSpec::tailed(SampleCategory::OneSample, TestFamily::Z, TailType::TwoTail)
    );
    assert_eq!(
        specs[6],
        TestSpec::tailed(SampleCategory::TwoSample, TestFamily::T, TailType::TwoTail)
    );
    assert_eq!(
        &specs[24..],
        &[
            TestSpec::omnibus(TestFamily::Anova),
            TestSpec::omnibus(TestFamily::Kruskal),
            TestSpec::omnibus(TestFamily::Mood),
        ]
    );

    // restartable
    let again: Vec<TestSpec> = registry.list_available_tests().collect();
    assert_eq!(specs, again);
}

#[test]
fn every_listed_spec_is_selectable() {
    let registry = standard_registry().unwrap();
    for spec in registry.list_available_tests() {
        let test = match spec.tails {
            Some(tails) => registry.select_test(spec.category, spec.family, tails),
            None => registry.select_test_multi(spec.category, spec.family),
        }
        .unwrap();
        assert_eq!(test.spec(), spec);
    }
}

#[test]
fn unregistered_triples_are_unknown() {
    let registry = standard_registry().unwrap();

    for tails in TailType::ALL {
        for family in [TestFamily::WelchT, TestFamily::Anova, TestFamily::Mood] {
            let result = registry.select_test(SampleCategory::OneSample, family, tails);
            assert!(matches!(result, Err(HypoError::UnknownTest { .. })));
        }
    }
    let result = registry.select_test_multi(SampleCategory::TwoSample, TestFamily::T);
    assert!(matches!(result, Err(HypoError::UnknownTest { .. })));
    let result = registry.select_test_multi(SampleCategory::MoreThanTwoSample, TestFamily::T);
    assert!(matches!(result, Err(HypoError::UnknownTest { .. })));
}

#[test]
fn select_by_name_accepts_legacy_spellings() {
    let registry = standard_registry().unwrap();

    let test = registry
        .select_test_by_name("twoSample", "wilcoxan", Some("oneTailG"))
        .unwrap();
    assert_eq!(test.name(), "Wilcoxon Signed-Rank Test");

    let test = registry
        .select_test_by_name("twoSample", "mann-witney", Some("twoTail"))
        .unwrap();
    assert_eq!(test.name(), "Mann-Whitney U Test");

    let test = registry
        .select_test_by_name("twoSample", "Welch T", Some("oneTailL"))
        .unwrap();
    assert_eq!(
        test.spec(),
        TestSpec::tailed(
            SampleCategory::TwoSample,
            TestFamily::WelchT,
            TailType::OneTailLess
        )
    );

    let test = registry
        .select_test_by_name("morethantwoSample", "moods", None)
        .unwrap();
    assert_eq!(test.name(), "Mood's Median Test");

    // tails are ignored for omnibus tests
    let test = registry
        .select_test_by_name("moreThanTwoSample", "anova", Some("twoTail"))
        .unwrap();
    assert_eq!(test.name(), "One-Way ANOVA");
}

#[test]
fn select_by_name_never_falls_back() {
    let registry = standard_registry().unwrap();

    for (category, family, tails) in [
        ("threeSample", "t", Some("twoTail")),
        ("oneSample", "bogus", Some("twoTail")),
        ("oneSample", "t", Some("sideways")),
        ("oneSample", "t", None),
        ("oneSample", "mannwhitney", Some("twoTail")),
    ] {
        match registry.select_test_by_name(category, family, tails) {
            Err(HypoError::UnknownTest { key }) => assert!(key.contains(family)),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(test) => panic!("unexpected selection: {}", test.name()),
        }
    }
}

#[test]
fn duplicate_registration_fails() {
    let mut registry = TestRegistry::standard().unwrap();
    let result = registry.register(Box::new(MisfiledTest {
        spec: TestSpec::omnibus(TestFamily::Anova),
    }));

    assert!(matches!(result, Err(HypoError::DuplicateTest { .. })));
    assert_eq!(registry.len(), 27);
}

#[test]
fn inconsistent_registration_fails() {
    let mut registry = TestRegistry::new();

    let family_outside_category = MisfiledTest {
        spec: TestSpec::tailed(
            SampleCategory::OneSample,
            TestFamily::Kruskal,
            TailType::TwoTail,
        ),
    };
    let omnibus_with_tails = MisfiledTest {
        spec: TestSpec {
            category: SampleCategory::MoreThanTwoSample,
            family: TestFamily::Anova,
            tails: Some(TailType::TwoTail),
        },
    };
    let tailed_without_tails = MisfiledTest {
        spec: TestSpec {
            category: SampleCategory::TwoSample,
            family: TestFamily::T,
            tails: None,
        },
    };

    for test in [
        family_outside_category,
        omnibus_with_tails,
        tailed_without_tails,
    ] {
        let result = registry.register(Box::new(test));
        assert!(matches!(
            result,
            Err(HypoError::InvalidRegistration { .. })
        ));
    }
    assert!(registry.is_empty());
}

#[test]
fn standard_registry_is_shared_across_threads() {
    let df = DataFrame::new(vec![
        Series::new("x".into(), &[4.8, 5.1, 5.3, 4.9, 5.2]).into_column(),
    ])
    .unwrap();
    let request = TestRequest::one_sample("x", 5.0, 0.05);

    let statistics: Vec<f64> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let registry = standard_registry().unwrap();
                    let test = registry
                        .select_test(SampleCategory::OneSample, TestFamily::T, TailType::TwoTail)
                        .unwrap();
                    test.run_test(&request, &df).unwrap().result.statistic()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(statistics.windows(2).all(|w| w[0] == w[1]));
    assert!(std::ptr::eq(
        standard_registry().unwrap(),
        standard_registry().unwrap()
    ));
}
