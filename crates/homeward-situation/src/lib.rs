//! Homeward: Situation Tracker bounded context.
//!
//! The game's numeric state comes in one of two shapes, fixed per game: a
//! five-field stat vector mutated by additive deltas, or a single severity
//! score with a label that is replaced wholesale each round.

pub mod domain;

pub use domain::severity::SeverityScalar;
pub use domain::situation::{Situation, SituationError, SituationKind, SituationUpdate};
pub use domain::stats::{StatDelta, StatVector, VisibleStats};
