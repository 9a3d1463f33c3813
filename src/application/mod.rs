//! Application services (use cases).
//!
//! These services orchestrate domain logic for the outer adapters.

pub mod engine;

pub use engine::EdgeEngine;
