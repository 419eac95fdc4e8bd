use hypo_core::standard_registry;
use hypo_model::{
    Advisory, HypoError, SampleCategory, TestFamily, TestOutcome, TestRequest,
};

use polars::prelude::*;

fn test_df(columns: Vec<(&str, Vec<f64>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    DataFrame::new(cols).unwrap()
}

fn three_groups() -> DataFrame {
    test_df(vec![
        ("g1", vec![1.0, 2.0, 3.0]),
        ("g2", vec![1.0, 2.0, 3.0]),
        ("g3", vec![10.0, 11.0, 12.0]),
    ])
}

fn run(family: TestFamily, request: &TestRequest, df: &DataFrame) -> hypo_model::Result<TestOutcome> {
    standard_registry()?
        .select_test_multi(SampleCategory::MoreThanTwoSample, family)?
        .run_test(request, df)
}

#[test]
fn anova_on_three_columns() {
    let request = TestRequest::columns(["g1", "g2", "g3"], 0.05);
    let outcome = run(TestFamily::Anova, &request, &three_groups()).unwrap();

    assert!((outcome.result.statistic() - 81.0).abs() < 1e-9);
    assert!(outcome.result.p_value() < 0.01);
    assert!((outcome.result.p_value() - 4.56e-5).abs() < 1e-6);
    assert!(outcome.result.is_significant());
    assert_eq!(outcome.result.alternative(), None);
    assert_eq!(outcome.result.sample_sizes(), &[3, 3, 3]);
}

#[test]
fn kruskal_wallis_with_ties() {
    let request = TestRequest::columns(["g1", "g2", "g3"], 0.10);
    let outcome = run(TestFamily::Kruskal, &request, &three_groups()).unwrap();

    assert!((outcome.result.statistic() - 5.5385).abs() < 1e-3);
    assert!((outcome.result.p_value() - 0.0627).abs() < 1e-3);
    assert!(outcome.result.is_significant());

    // every group is below five observations
    let small = outcome
        .warnings
        .iter()
        .filter(|w| matches!(w, Advisory::SmallSample { recommended: 5, .. }))
        .count();
    assert_eq!(small, 3);
}

#[test]
fn kruskal_wallis_not_significant_at_five_percent() {
    let request = TestRequest::columns(["g1", "g2", "g3"], 0.05);
    let outcome = run(TestFamily::Kruskal, &request, &three_groups()).unwrap();

    assert!(!outcome.result.is_significant());
    assert_eq!(outcome.result.decision(), "Fail to reject H0");
}

#[test]
fn mood_median_test() {
    let request = TestRequest::columns(["g1", "g2", "g3"], 0.05);
    let outcome = run(TestFamily::Mood, &request, &three_groups()).unwrap();

    assert!((outcome.result.statistic() - 9.0).abs() < 1e-9);
    assert!((outcome.result.p_value() - 0.0111).abs() < 1e-3);
    assert!(outcome.result.is_significant());
    assert!(matches!(
        outcome.warnings.as_slice(),
        [Advisory::LowExpectedCounts { min_expected }] if (*min_expected - 1.0).abs() < 1e-12
    ));
}

#[test]
fn grouped_labels_select_groups() {
    let df = DataFrame::new(vec![
        Series::new("sugars".into(), &[1.0, 10.0, 1.0, 2.0, 11.0, 2.0, 3.0, 12.0, 3.0])
            .into_column(),
        Series::new("mfr".into(), &[1i64, 3, 2, 1, 3, 2, 1, 3, 2]).into_column(),
    ])
    .unwrap();
    let request = TestRequest::grouped("sugars", "mfr", ["1", "2", "3"], 0.05);
    let outcome = run(TestFamily::Anova, &request, &df).unwrap();

    assert!((outcome.result.statistic() - 81.0).abs() < 1e-9);
    assert_eq!(outcome.samples[2].label, "3");
}

#[test]
fn two_groups_are_rejected() {
    let request = TestRequest::columns(["g1", "g3"], 0.05);

    for family in [TestFamily::Anova, TestFamily::Kruskal, TestFamily::Mood] {
        let err = run(family, &request, &three_groups()).unwrap_err();
        assert!(matches!(
            err,
            HypoError::InsufficientGroups {
                required: 3,
                actual: 2
            }
        ));
    }
}

#[test]
fn degenerate_groups() {
    let flat = test_df(vec![
        ("a", vec![4.0, 4.0]),
        ("b", vec![4.0, 4.0]),
        ("c", vec![4.0, 4.0]),
    ]);
    let request = TestRequest::columns(["a", "b", "c"], 0.05);

    for family in [TestFamily::Anova, TestFamily::Kruskal, TestFamily::Mood] {
        let err = run(family, &request, &flat).unwrap_err();
        assert!(matches!(err, HypoError::DegenerateSample { .. }));
    }
}

#[test]
fn anova_needs_two_per_group() {
    let df = DataFrame::new(vec![
        Series::new("a".into(), &[Some(1.0), Some(2.0)]).into_column(),
        Series::new("b".into(), &[Some(3.0), None]).into_column(),
        Series::new("c".into(), &[Some(5.0), Some(6.0)]).into_column(),
    ])
    .unwrap();
    let request = TestRequest::columns(["a", "b", "c"], 0.05);

    let err = run(TestFamily::Anova, &request, &df).unwrap_err();
    assert!(matches!(
        err,
        HypoError::InsufficientData { ref sample, required: 2, actual: 1 } if sample == "b"
    ));

    // Kruskal-Wallis accepts single observations
    let outcome = run(TestFamily::Kruskal, &request, &df).unwrap();
    assert_eq!(outcome.result.sample_sizes(), &[2, 1, 2]);
    assert!(outcome.warning_messages()[0].contains("missing"));
}
