use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use oddsedge::application::EdgeEngine;
use oddsedge::domain::RiskLevel;
use oddsedge::error::{ConfigError, Error};
use oddsedge::infrastructure::config::settings::Config;
use rust_decimal_macros::dec;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("oddsedge-config-test-{nanos}-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn config_loads_sections_from_file() {
    let path = write_temp_config(
        r#"
[logging]
level = "debug"
format = "json"

[value]
min_expected_value = 0.1

[kelly]
risk_level = "aggressive"
"#,
    );
    let config = Config::load(&path).expect("valid config");
    let _ = fs::remove_file(&path);

    assert_eq!(config.logging.format, "json");
    assert_eq!(config.value.min_expected_value, dec!(0.1));
    assert_eq!(config.kelly.risk_level, RiskLevel::Aggressive);
    assert_eq!(config.arbitrage.max_quote_age_secs, 300);

    let engine = EdgeEngine::from_config(&config);
    assert_eq!(engine.default_fraction().value(), dec!(0.75));
}

#[test]
fn config_accepts_quoted_decimals() {
    let config = Config::parse_toml("[allocation]\nmin_stake_unit = \"0.5\"\n").unwrap();
    assert_eq!(config.allocation.min_stake_unit, dec!(0.5));
}

#[test]
fn config_rejects_out_of_range_threshold() {
    let path = write_temp_config("[kelly]\nhigh_stake_threshold = 1.5\n");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "kelly.high_stake_threshold",
            ..
        }))
    ));
}

#[test]
fn config_rejects_negative_margin() {
    let result = Config::parse_toml("[arbitrage]\nmin_profit_margin = -0.01\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "arbitrage.min_profit_margin",
            ..
        }))
    ));
}

#[test]
fn config_reports_malformed_toml() {
    let result = Config::parse_toml("[kelly\nrisk_level = 1");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn missing_file_is_a_read_error_unless_defaulted() {
    let path = std::env::temp_dir().join("oddsedge-config-test-does-not-exist.toml");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
    assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
}
