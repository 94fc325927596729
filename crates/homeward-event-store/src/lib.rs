//! Homeward: event store.
//!
//! The journal lives for the lifetime of the process; nothing survives a
//! restart.

pub mod memory_event_repository;

pub use memory_event_repository::InMemoryEventRepository;
