use hypo_model::{
    Advisory, SampleCategory, SampleSummary, TailType, TestFamily, TestOutcome, TestResult,
    TestSpec,
};
use proptest::prelude::*;

fn sample_outcome() -> TestOutcome {
    TestOutcome {
        result: TestResult::new(
            "Welch's T-Test",
            -3.5,
            0.02,
            0.05,
            Some(TailType::TwoTail),
            vec![3, 3],
        ),
        samples: vec![
            SampleSummary {
                label: "A".to_string(),
                size: 3,
                dropped: 1,
                mean: Some(2.0),
            },
            SampleSummary {
                label: "B".to_string(),
                size: 3,
                dropped: 0,
                mean: Some(5.0),
            },
        ],
        warnings: vec![Advisory::MissingValuesDropped {
            sample: "A".to_string(),
            dropped: 1,
        }],
    }
}

#[test]
fn outcome_serializes_with_derived_decision() {
    let json = serde_json::to_value(sample_outcome()).expect("serialize outcome");
    assert_eq!(json["result"]["test_name"], "Welch's T-Test");
    assert_eq!(json["result"]["alternative"], "TWO_TAIL");
    assert_eq!(json["result"]["null_rejected"], true);
    assert_eq!(json["samples"][0]["dropped"], 1);
    assert_eq!(json["warnings"][0]["kind"], "missing_values_dropped");
}

#[test]
fn outcome_warning_messages() {
    let outcome = sample_outcome();
    assert!(outcome.has_warnings());
    assert_eq!(
        outcome.warning_messages(),
        vec!["1 missing value(s) dropped from 'A'".to_string()]
    );
}

#[test]
fn spec_round_trips_through_json() {
    let spec = TestSpec::tailed(
        SampleCategory::TwoSample,
        TestFamily::MannWhitney,
        TailType::OneTailGreater,
    );
    let json = serde_json::to_string(&spec).expect("serialize spec");
    assert_eq!(
        json,
        r#"{"category":"twoSample","family":"mannwhitney","tails":"ONE_TAIL_GREATER"}"#
    );
    let round: TestSpec = serde_json::from_str(&json).expect("deserialize spec");
    assert_eq!(round, spec);
}

proptest! {
    #[test]
    fn significance_is_p_value_at_most_alpha(
        p_value in 0.0f64..=1.0,
        alpha in 0.0001f64..=1.0,
        statistic in -50.0f64..50.0,
    ) {
        let result = TestResult::new("t", statistic, p_value, alpha, None, vec![]);
        prop_assert_eq!(result.is_significant(), p_value <= alpha);
        prop_assert_eq!(result.alpha(), alpha);
    }
}
