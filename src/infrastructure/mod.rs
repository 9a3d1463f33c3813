//! Infrastructure layer.
//!
//! Technical concerns that support the engine without containing betting
//! logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, validation and logging setup

pub mod config;
