//! Homeward Core: shared domain abstractions.
//!
//! Every bounded context of the narrative-sequencing engine builds on the
//! traits defined here: event-sourced aggregates, the event journal port,
//! commands, time, and the domain error type. No infrastructure lives here.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod repository;
