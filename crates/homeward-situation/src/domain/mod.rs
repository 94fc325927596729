//! Domain layer for the Situation Tracker context.

pub mod severity;
pub mod situation;
pub mod stats;
