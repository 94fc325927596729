//! Shared test mocks and fixtures for the Homeward engine.

mod adjudicator;
mod clock;
pub mod fixtures;
mod repository;

pub use adjudicator::{FailingAdjudicator, ScriptedAdjudicator};
pub use clock::FixedClock;
pub use repository::{EmptyEventRepository, FailingEventRepository, RecordingEventRepository};
