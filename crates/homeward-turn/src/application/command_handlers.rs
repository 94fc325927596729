//! Command handlers for the Turn Coordination context.
//!
//! Each handler loads the game's events, reconstitutes the aggregate,
//! executes the command and appends whatever events it produced.

use std::sync::Arc;

use homeward_adjudicator::Adjudicator;
use homeward_core::aggregate::AggregateRoot;
use homeward_core::clock::Clock;
use homeward_core::error::DomainError;
use homeward_core::repository::{EventRepository, StoredEvent};
use tracing::{Instrument, debug, info, instrument, warn};
use uuid::Uuid;

use super::in_flight::SubmissionLatch;
use crate::domain::aggregates::{GameSession, SubmitBlocker};
use crate::domain::commands::{
    ApplyIntent, CreateGame, RestartGame, StartGame, SubmitArrangement,
};
use crate::domain::events::{GameEvent, GameEventKind};
use crate::domain::turn::{Ending, Verdict};

/// Appends retried after a concurrency conflict before giving up.
const MAX_APPEND_ATTEMPTS: usize = 3;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct GameCommandResult {
    /// The game affected by the command.
    pub game_id: Uuid,
    /// The stored events produced and persisted; empty for a no-op.
    pub stored_events: Vec<StoredEvent>,
}

/// How a submission ended, from the player's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A precondition failed; nothing was sent.
    Ignored {
        /// The failed precondition.
        reason: SubmitBlocker,
    },
    /// The round was archived and the next one opened.
    Continued {
        /// Number the archived round received.
        archived_round: u32,
    },
    /// The game ended.
    Ended {
        /// How it ended.
        ending: Ending,
    },
}

/// Result of a handled submission.
#[derive(Debug)]
pub struct SubmitResult {
    /// What happened.
    pub outcome: SubmitOutcome,
    /// The stored events produced and persisted; empty when ignored.
    pub stored_events: Vec<StoredEvent>,
}

impl SubmitResult {
    fn ignored(reason: SubmitBlocker) -> Self {
        debug!(reason = reason.as_str(), "submission ignored");
        Self {
            outcome: SubmitOutcome::Ignored { reason },
            stored_events: Vec::new(),
        }
    }
}

/// Reconstitutes a `GameSession` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    game_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<GameSession, DomainError> {
    let mut session = GameSession::new(game_id);
    for stored in existing_events {
        let kind: GameEventKind = stored.decode_payload()?;
        let event = GameEvent {
            metadata: stored.metadata(),
            kind,
        };
        session.apply(&event);
    }
    Ok(session)
}

async fn load(game_id: Uuid, repo: &dyn EventRepository) -> Result<GameSession, DomainError> {
    let existing_events = repo.load_events(game_id).await?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(game_id));
    }
    reconstitute(game_id, &existing_events)
}

async fn persist(
    session: &mut GameSession,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let expected_version = session.committed_version();
    let stored_events: Vec<StoredEvent> = session
        .take_uncommitted_events()
        .iter()
        .map(StoredEvent::from_event)
        .collect();
    if !stored_events.is_empty() {
        repo.append_events(session.id, expected_version, &stored_events)
            .await?;
    }
    Ok(stored_events)
}

/// Handles the `CreateGame` command: opens a new game from the scenario and
/// persists the `GameCreated` event.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the game already exists or the
/// scenario is unusable, or the repository's error if appending fails.
#[instrument(skip_all, fields(game_id = %command.game_id, variant = ?command.scenario.variant))]
pub async fn handle_create_game(
    command: &CreateGame,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<GameCommandResult, DomainError> {
    let existing_events = repo.load_events(command.game_id).await?;
    let mut session = reconstitute(command.game_id, &existing_events)?;

    session.create(command.scenario.clone(), command.correlation_id, clock)?;

    let stored_events = persist(&mut session, repo).await?;
    info!("game created");
    Ok(GameCommandResult {
        game_id: command.game_id,
        stored_events,
    })
}

/// Handles the `StartGame` command: leaves the intro.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the game does not exist, or
/// the repository's error if loading or appending fails.
#[instrument(skip_all, fields(game_id = %command.game_id))]
pub async fn handle_start_game(
    command: &StartGame,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<GameCommandResult, DomainError> {
    let mut session = load(command.game_id, repo).await?;

    session.start(command.correlation_id, clock)?;

    let stored_events = persist(&mut session, repo).await?;
    Ok(GameCommandResult {
        game_id: command.game_id,
        stored_events,
    })
}

/// Handles the `ApplyIntent` command: reorders, inserts or reorders the
/// pool. Illegal intents persist nothing.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the game does not exist, or
/// the repository's error if loading or appending fails.
#[instrument(skip_all, fields(game_id = %command.game_id, intent = command.intent.kind()))]
pub async fn handle_apply_intent(
    command: &ApplyIntent,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<GameCommandResult, DomainError> {
    let mut session = load(command.game_id, repo).await?;

    session.apply_intent(&command.intent, command.correlation_id, clock)?;

    let stored_events = persist(&mut session, repo).await?;
    Ok(GameCommandResult {
        game_id: command.game_id,
        stored_events,
    })
}

/// Handles the `SubmitArrangement` command.
///
/// Takes the submission latch, snapshots the round, awaits the adjudicator
/// and then applies the answer to freshly loaded state. Unmet preconditions
/// yield `SubmitOutcome::Ignored`. An adjudication failure leaves the
/// journal untouched and releases the latch, so the same arrangement can be
/// submitted again.
///
/// # Errors
///
/// Returns `DomainError::Adjudication` if the adjudicator fails or answers
/// with a response that cannot be applied, `DomainError::AggregateNotFound`
/// if the game does not exist, or the repository's error if loading or
/// appending fails.
#[instrument(skip_all, fields(game_id = %command.game_id, correlation_id = %command.correlation_id))]
pub async fn handle_submit_arrangement(
    command: &SubmitArrangement,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
    adjudicator: &dyn Adjudicator,
    latch: &SubmissionLatch,
) -> Result<SubmitResult, DomainError> {
    let Some(_permit) = latch.try_acquire() else {
        return Ok(SubmitResult::ignored(SubmitBlocker::InFlight));
    };

    let session = load(command.game_id, repo).await?;
    let pending = match session.prepare_submission() {
        Ok(pending) => pending,
        Err(blocker) => return Ok(SubmitResult::ignored(blocker)),
    };

    let response = match adjudicator.adjudicate(&pending.request).await {
        Ok(response) => response,
        Err(err) => {
            warn!(round = pending.round, error = %err, "adjudication failed");
            return Err(err.into());
        }
    };

    let mut attempt = 1;
    loop {
        let mut session = load(command.game_id, repo).await?;
        let verdict = session
            .resolve_submission(&pending, response.clone(), command.correlation_id, clock)
            .inspect_err(|err| {
                warn!(round = pending.round, error = %err, "adjudication could not be applied");
            })?;

        match persist(&mut session, repo).await {
            Ok(stored_events) => {
                let outcome = match verdict {
                    Verdict::Continue => {
                        info!(round = pending.round, "round completed");
                        SubmitOutcome::Continued {
                            archived_round: pending.round,
                        }
                    }
                    Verdict::End(ending) => {
                        info!(
                            round = pending.round,
                            ending_type = ?ending.ending_type,
                            source = ?ending.source,
                            "game ended"
                        );
                        SubmitOutcome::Ended { ending }
                    }
                };
                return Ok(SubmitResult {
                    outcome,
                    stored_events,
                });
            }
            Err(DomainError::ConcurrencyConflict { .. }) if attempt < MAX_APPEND_ATTEMPTS => {
                debug!(attempt, "journal moved during adjudication, reapplying");
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Runs [`handle_submit_arrangement`] on its own task and waits for it.
///
/// Once issued, a submission runs to completion or failure: if the caller
/// goes away, the task keeps the latch, finishes the adjudication and
/// applies its result.
///
/// # Errors
///
/// Same as [`handle_submit_arrangement`], plus `DomainError::Infrastructure`
/// if the task panics.
pub async fn handle_submit_arrangement_detached(
    command: SubmitArrangement,
    clock: Arc<dyn Clock>,
    repo: Arc<dyn EventRepository>,
    adjudicator: Arc<dyn Adjudicator>,
    latch: SubmissionLatch,
) -> Result<SubmitResult, DomainError> {
    let task = tokio::spawn(
        async move {
            handle_submit_arrangement(
                &command,
                clock.as_ref(),
                repo.as_ref(),
                adjudicator.as_ref(),
                &latch,
            )
            .await
        }
        .in_current_span(),
    );

    task.await
        .map_err(|err| DomainError::Infrastructure(format!("submission task failed: {err}")))?
}

/// Handles the `RestartGame` command: resets an ended game to its opening.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the game does not exist, or
/// the repository's error if loading or appending fails.
#[instrument(skip_all, fields(game_id = %command.game_id))]
pub async fn handle_restart_game(
    command: &RestartGame,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<GameCommandResult, DomainError> {
    let mut session = load(command.game_id, repo).await?;

    if session.restart(command.correlation_id, clock)? {
        info!("game restarted");
    }

    let stored_events = persist(&mut session, repo).await?;
    Ok(GameCommandResult {
        game_id: command.game_id,
        stored_events,
    })
}
