//! Infrastructure configuration modules.

pub mod allocation;
pub mod arbitrage;
pub mod kelly;
pub mod logging;
pub mod settings;
pub mod value;
