//! Adapters that drive the engine from the outside world.

pub mod inbound;
