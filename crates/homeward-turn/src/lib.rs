//! Homeward: Turn Coordination bounded context.
//!
//! Owns the single game instance: its phase, the active round, the
//! situation, the history log and the submit cycle that sends a round to the
//! adjudicator and applies the answer exactly once.

pub mod application;
pub mod domain;
