use oddsedge::application::EdgeEngine;
use oddsedge::domain::error::DomainError;
use oddsedge::domain::{KellyFraction, KellyStakeOptimizer, RiskLevel, ValueAssessor};
use oddsedge::infrastructure::config::settings::Config;
use oddsedge::testkit::domain::{odds, prediction, probability, quote};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn full_kelly_at_even_money() {
    let rec = KellyStakeOptimizer::default()
        .optimal_stake(probability(dec!(0.55)), odds(dec!(2.0)), dec!(1000), KellyFraction::FULL)
        .unwrap();
    assert_eq!(rec.full_kelly, dec!(0.1));
    assert_eq!(rec.stake, dec!(100));
    assert!(rec.high_stake_warning);
    assert!(rec.should_bet());
}

#[test]
fn scenarios_follow_the_stake() {
    let rec = KellyStakeOptimizer::default()
        .optimal_stake(probability(dec!(0.55)), odds(dec!(2.0)), dec!(1000), KellyFraction::FULL)
        .unwrap();
    assert_eq!(rec.scenarios.win.bankroll, dec!(1100));
    assert_eq!(rec.scenarios.win.profit, dec!(100));
    assert_eq!(rec.scenarios.lose.bankroll, dec!(900));
    assert_eq!(rec.scenarios.lose.profit, dec!(-100));
    assert_eq!(rec.scenarios.expected_bankroll, dec!(1010));
    assert_eq!(rec.scenarios.expected_profit, dec!(10));
}

#[test]
fn risk_levels_scale_full_kelly() {
    let optimizer = KellyStakeOptimizer::default();
    let stake = |level: RiskLevel| {
        optimizer
            .optimal_stake(probability(dec!(0.55)), odds(dec!(2.0)), dec!(1000), level.into())
            .unwrap()
            .stake
    };
    assert_eq!(stake(RiskLevel::Conservative), dec!(25));
    assert_eq!(stake(RiskLevel::Moderate), dec!(50));
    assert_eq!(stake(RiskLevel::Aggressive), dec!(75));
}

#[test]
fn negative_edge_never_stakes() {
    let rec = KellyStakeOptimizer::default()
        .optimal_stake(probability(dec!(0.45)), odds(dec!(2.0)), dec!(1000), KellyFraction::FULL)
        .unwrap();
    assert_eq!(rec.full_kelly, Decimal::ZERO);
    assert_eq!(rec.stake, Decimal::ZERO);
    assert!(!rec.should_bet());
    assert!(!rec.high_stake_warning);
}

#[test]
fn non_positive_bankroll_is_rejected() {
    let result = KellyStakeOptimizer::default().optimal_stake(
        probability(dec!(0.55)),
        odds(dec!(2.0)),
        dec!(-5),
        KellyFraction::FULL,
    );
    assert!(matches!(result, Err(DomainError::InvalidBankroll { .. })));
}

#[test]
fn kelly_fraction_bounds() {
    assert!(KellyFraction::try_new(Decimal::ZERO).is_err());
    assert!(KellyFraction::try_new(dec!(1.01)).is_err());
    assert_eq!(KellyFraction::try_new(Decimal::ONE).unwrap(), KellyFraction::FULL);
}

#[test]
fn engine_sizes_assessed_bet_with_configured_risk() {
    let mut config = Config::default();
    config.kelly.risk_level = RiskLevel::Conservative;
    let engine = EdgeEngine::from_config(&config);

    let assessment = ValueAssessor
        .assess(
            &prediction("p1", "home", dec!(0.55)),
            &quote("alpha", "home", dec!(2.0), 0),
        )
        .unwrap();
    let rec = engine.stake_for(&assessment, dec!(1000), None).unwrap();
    assert_eq!(rec.stake, dec!(25));
}
