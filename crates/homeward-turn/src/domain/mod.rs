//! Domain layer for the Turn Coordination context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod history;
pub mod phase;
pub mod scenario;
pub mod turn;
