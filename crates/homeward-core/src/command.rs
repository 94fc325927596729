//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every player or system command.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable command name, recorded on tracing spans.
    fn command_type(&self) -> &'static str;

    /// Correlation ID carried into every event the command produces.
    fn correlation_id(&self) -> Uuid;

    /// The game the command targets.
    fn game_id(&self) -> Uuid;
}
