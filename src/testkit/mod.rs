//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for quotes, markets, predictions and outcomes.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
