//! Domain layer for the Fragment Sequence context.

pub mod fragment;
pub mod intent;
pub mod pool;
pub mod round;
pub mod sequence;
