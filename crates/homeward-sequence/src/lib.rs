//! Homeward: Fragment Sequence bounded context.
//!
//! Owns the ordered fragment list the player arranges each round, the pool
//! of alternative fragments, the one-insertion gate between them, and the
//! intent type the input layer translates gestures into.

pub mod domain;

pub use domain::fragment::{Fragment, FragmentId};
pub use domain::intent::Intent;
pub use domain::pool::AlternativePool;
pub use domain::round::{ActiveRound, InsertionGate};
pub use domain::sequence::FragmentSequence;
