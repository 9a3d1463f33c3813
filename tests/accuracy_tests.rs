use oddsedge::domain::{
    accuracy_report, AccuracyFilter, BetResult, GroupDimension, ResolvedPrediction, ScopeKey,
};
use oddsedge::testkit::domain::{at, PredictionBuilder};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sample() -> Vec<ResolvedPrediction> {
    vec![
        PredictionBuilder::new("a", "home", dec!(0.7))
            .resolved(BetResult::Won, 100),
        PredictionBuilder::new("b", "home", dec!(0.6))
            .confidence(dec!(0.8))
            .resolved(BetResult::Lost, 100),
        PredictionBuilder::new("c", "away", dec!(0.3))
            .sport("tennis")
            .model_version("v2")
            .resolved(BetResult::Lost, 200),
        PredictionBuilder::new("d", "away", dec!(0.5))
            .sport("tennis")
            .resolved(BetResult::Won, 200),
        PredictionBuilder::new("e", "draw", dec!(0.9))
            .resolved(BetResult::Void, 200),
    ]
}

#[test]
fn empty_input_is_safe() {
    let report = accuracy_report(&[], &[GroupDimension::Sport], &AccuracyFilter::default());
    assert_eq!(report.overall.total_count, 0);
    assert_eq!(report.overall.accuracy, Decimal::ZERO);
    assert!(report.groups.is_empty());
}

#[test]
fn overall_snapshot_excludes_voids() {
    let report = accuracy_report(&sample(), &[], &AccuracyFilter::default());
    let overall = &report.overall;

    assert_eq!(overall.scope_key, ScopeKey::overall());
    assert_eq!(overall.total_count, 4);
    // A 0.5 prediction is never correct.
    assert_eq!(overall.correct_count, 2);
    assert_eq!(overall.accuracy, dec!(50));
    assert_eq!(overall.average_accuracy_score, dec!(0.575));
    assert_eq!(overall.brier_score, dec!(0.1975));
    assert!(report.groups.is_empty());
}

#[test]
fn groups_by_sport_in_key_order() {
    let report = accuracy_report(&sample(), &[GroupDimension::Sport], &AccuracyFilter::default());
    let sports: Vec<_> = report
        .groups
        .iter()
        .map(|g| g.scope_key.sport.clone().unwrap_or_default())
        .collect();
    assert_eq!(sports, vec!["football", "tennis"]);
    assert_eq!(report.groups[0].total_count, 2);
    assert_eq!(report.groups[1].correct_count, 1);
}

#[test]
fn groups_by_confidence_decile() {
    let report = accuracy_report(
        &sample(),
        &[GroupDimension::Confidence],
        &AccuracyFilter::default(),
    );
    let buckets: Vec<_> = report
        .groups
        .iter()
        .map(|g| g.scope_key.confidence_bucket)
        .collect();
    assert_eq!(buckets, vec![Some(dec!(0.7)), Some(dec!(0.8))]);
    assert_eq!(report.groups[0].total_count, 3);
}

#[test]
fn filters_narrow_the_set() {
    let tennis = AccuracyFilter {
        sport: Some("tennis".to_string()),
        ..AccuracyFilter::default()
    };
    assert_eq!(accuracy_report(&sample(), &[], &tennis).overall.total_count, 2);

    let v2 = AccuracyFilter {
        model_version: Some("v2".to_string()),
        ..AccuracyFilter::default()
    };
    assert_eq!(accuracy_report(&sample(), &[], &v2).overall.total_count, 1);

    let window = AccuracyFilter {
        resolved_from: Some(at(100)),
        resolved_to: Some(at(200)),
        ..AccuracyFilter::default()
    };
    assert_eq!(accuracy_report(&sample(), &[], &window).overall.total_count, 2);
}

#[test]
fn creation_window_includes_both_ends() {
    let resolved = vec![
        PredictionBuilder::new("early", "home", dec!(0.7))
            .created(10)
            .resolved(BetResult::Won, 500),
        PredictionBuilder::new("edge", "home", dec!(0.7))
            .created(50)
            .resolved(BetResult::Won, 500),
        PredictionBuilder::new("late", "home", dec!(0.7))
            .created(90)
            .resolved(BetResult::Won, 500),
    ];
    let window = AccuracyFilter {
        created_from: Some(at(50)),
        created_to: Some(at(90)),
        ..AccuracyFilter::default()
    };
    assert_eq!(accuracy_report(&resolved, &[], &window).overall.total_count, 2);
}

#[test]
fn scope_key_renders_grouped_parts() {
    let report = accuracy_report(
        &sample(),
        &[GroupDimension::Sport, GroupDimension::Market],
        &AccuracyFilter::default(),
    );
    assert_eq!(
        report.groups[0].scope_key.to_string(),
        "sport=football market=match_winner"
    );
}
