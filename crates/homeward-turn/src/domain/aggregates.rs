//! Aggregate roots for the Turn Coordination context.

use homeward_adjudicator::{AdjudicationRequest, AdjudicationResponse};
use homeward_core::aggregate::AggregateRoot;
use homeward_core::clock::Clock;
use homeward_core::error::DomainError;
use homeward_core::event::EventMetadata;
use homeward_sequence::{ActiveRound, Fragment, Intent};
use homeward_situation::Situation;
use tracing::debug;
use uuid::Uuid;

use super::events::{
    AlternativeInserted, FragmentReordered, GameCreated, GameEnded, GameEvent, GameEventKind,
    GameRestarted, GameStarted, PoolReordered, RoundCompleted,
};
use super::history::HistoryLog;
use super::phase::{GamePhase, GameVariant};
use super::scenario::Scenario;
use super::turn::{Ending, Verdict, resolve_turn};

/// Why a submission was not sent. Every blocker is a silent no-op for the
/// player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocker {
    /// The game is not in `Playing`.
    NotPlaying,
    /// The game has already ended.
    GameOver,
    /// The round's alternative has not been inserted yet.
    AlternativeRequired,
    /// Another submission is awaiting adjudication.
    InFlight,
}

impl SubmitBlocker {
    /// Short machine-readable reason.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotPlaying => "not_playing",
            Self::GameOver => "game_over",
            Self::AlternativeRequired => "alternative_required",
            Self::InFlight => "in_flight",
        }
    }
}

/// Everything captured at submission time. The request is a copy, so
/// intents applied while it is in flight cannot leak into it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    /// Number of the round being submitted.
    pub round: u32,
    /// The arrangement as submitted.
    pub archived: Vec<Fragment>,
    /// The request sent to the adjudicator.
    pub request: AdjudicationRequest,
}

/// The single game instance.
#[derive(Debug)]
pub struct GameSession {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count, including uncommitted events).
    pub(crate) version: i64,
    opening: Option<Scenario>,
    variant: GameVariant,
    phase: GamePhase,
    situation: Situation,
    round: ActiveRound,
    history: HistoryLog,
    feedback: String,
    ending: Option<Ending>,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<GameEvent>,
}

impl GameSession {
    /// Creates an empty aggregate; it holds no game until `create` runs or
    /// a `game.created` event is applied.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        let variant = GameVariant::Stats;
        Self {
            id,
            version: 0,
            opening: None,
            variant,
            phase: variant.initial_phase(),
            situation: Situation::initial(variant.situation_kind()),
            round: ActiveRound::from_texts(1, &[], &[]),
            history: HistoryLog::default(),
            feedback: String::new(),
            ending: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// Whether a game has been created in this aggregate.
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.opening.is_some()
    }

    /// The opening the game was created with.
    #[must_use]
    pub fn opening(&self) -> Option<&Scenario> {
        self.opening.as_ref()
    }

    /// The rule set.
    #[must_use]
    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The current situation, unclamped.
    #[must_use]
    pub fn situation(&self) -> &Situation {
        &self.situation
    }

    /// The active round.
    #[must_use]
    pub fn round(&self) -> &ActiveRound {
        &self.round
    }

    /// The archived rounds.
    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The current feedback line.
    #[must_use]
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// How the game ended, once it has.
    #[must_use]
    pub fn ending(&self) -> Option<&Ending> {
        self.ending.as_ref()
    }

    fn ensure_created(&self) -> Result<(), DomainError> {
        if self.is_created() {
            Ok(())
        } else {
            Err(DomainError::AggregateNotFound(self.id))
        }
    }

    /// Builds an event for `kind`, applies it and queues it for persistence.
    fn record(&mut self, kind: GameEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = GameEvent {
            metadata: EventMetadata::new(
                kind.event_type(),
                self.id,
                self.next_sequence_number(),
                correlation_id,
                clock.now(),
            ),
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event);
    }

    /// Creates the game from `scenario`, producing a `GameCreated` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the game already exists or the
    /// scenario is unusable.
    pub fn create(
        &mut self,
        scenario: Scenario,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.is_created() {
            return Err(DomainError::Validation(format!(
                "game {} already exists",
                self.id
            )));
        }
        scenario
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        self.record(
            GameEventKind::GameCreated(GameCreated {
                game_id: self.id,
                scenario,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Leaves the intro. Returns `false` (and records nothing) outside
    /// `Intro`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` if no game was created.
    pub fn start(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<bool, DomainError> {
        self.ensure_created()?;
        if !self.phase.can_start() {
            debug!(phase = ?self.phase, "start ignored");
            return Ok(false);
        }
        self.record(
            GameEventKind::GameStarted(GameStarted { game_id: self.id }),
            correlation_id,
            clock,
        );
        Ok(true)
    }

    /// Applies a player intent to the active round. Illegal intents change
    /// nothing, record nothing and return `false`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` if no game was created.
    pub fn apply_intent(
        &mut self,
        intent: &Intent,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<bool, DomainError> {
        self.ensure_created()?;
        if !self.phase.accepts_intents() {
            debug!(phase = ?self.phase, intent = intent.kind(), "intent ignored outside play");
            return Ok(false);
        }

        let mut probe = self.round.clone();
        if !probe.apply_intent(intent) {
            debug!(intent = intent.kind(), "intent had no effect");
            return Ok(false);
        }

        let kind = match intent {
            Intent::Reorder {
                moving_id,
                target_id,
            } => GameEventKind::FragmentReordered(FragmentReordered {
                moving_id: moving_id.clone(),
                target_id: target_id.clone(),
            }),
            Intent::InsertFromPool {
                fragment_id,
                target_id,
            } => GameEventKind::AlternativeInserted(AlternativeInserted {
                fragment_id: fragment_id.clone(),
                target_id: target_id.clone(),
            }),
            Intent::ReorderPool {
                moving_id,
                target_id,
            } => GameEventKind::PoolReordered(PoolReordered {
                moving_id: moving_id.clone(),
                target_id: target_id.clone(),
            }),
        };
        self.record(kind, correlation_id, clock);
        Ok(true)
    }

    /// Captures the request for the active round, or says why none can be
    /// sent. Does not mutate the aggregate.
    ///
    /// # Errors
    ///
    /// Returns the `SubmitBlocker` that makes the submission a no-op.
    pub fn prepare_submission(&self) -> Result<PendingSubmission, SubmitBlocker> {
        match self.phase {
            GamePhase::Ended => return Err(SubmitBlocker::GameOver),
            GamePhase::Intro => return Err(SubmitBlocker::NotPlaying),
            GamePhase::Playing => {}
        }
        if !self.is_created() {
            return Err(SubmitBlocker::NotPlaying);
        }
        if !self.round.is_ready_for_submission() {
            return Err(SubmitBlocker::AlternativeRequired);
        }

        Ok(PendingSubmission {
            round: self.round.number(),
            archived: self.round.sequence().archive(),
            request: AdjudicationRequest {
                history_texts: self.history.texts(),
                submitted_order: self.round.sequence().snapshot(),
                situation: self.situation.clone(),
            },
        })
    }

    /// Applies an adjudication to the submitted round, producing either a
    /// `RoundCompleted` or a `GameEnded` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the game left `Playing` or moved
    /// to another round since `pending` was captured, and
    /// `DomainError::Adjudication` if the response cannot be applied. In
    /// both cases nothing is recorded.
    pub fn resolve_submission(
        &mut self,
        pending: &PendingSubmission,
        response: AdjudicationResponse,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Verdict, DomainError> {
        self.ensure_created()?;
        if self.phase != GamePhase::Playing {
            return Err(DomainError::Validation(
                "game is no longer in play".to_owned(),
            ));
        }
        if self.round.number() != pending.round {
            return Err(DomainError::Validation(format!(
                "round {} was already resolved",
                pending.round
            )));
        }

        let breakdown_text = self
            .opening
            .as_ref()
            .map(|s| s.breakdown_ending_text.clone())
            .unwrap_or_default();
        let resolution = resolve_turn(&self.situation, &response, &breakdown_text)?;

        let kind = match &resolution.verdict {
            Verdict::Continue => GameEventKind::RoundCompleted(RoundCompleted {
                round: pending.round,
                archived: pending.archived.clone(),
                outcome: response,
                situation: resolution.situation,
            }),
            Verdict::End(ending) => GameEventKind::GameEnded(GameEnded {
                round: pending.round,
                outcome: response,
                situation: resolution.situation,
                ending: ending.clone(),
            }),
        };
        self.record(kind, correlation_id, clock);
        Ok(resolution.verdict)
    }

    /// Resets an ended game to its opening. Returns `false` (and records
    /// nothing) unless the game has ended.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` if no game was created.
    pub fn restart(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<bool, DomainError> {
        self.ensure_created()?;
        if !self.phase.can_restart() {
            debug!(phase = ?self.phase, "restart ignored");
            return Ok(false);
        }
        let Some(scenario) = self.opening.clone() else {
            return Err(DomainError::AggregateNotFound(self.id));
        };
        self.record(
            GameEventKind::GameRestarted(GameRestarted {
                game_id: self.id,
                scenario,
            }),
            correlation_id,
            clock,
        );
        Ok(true)
    }

    fn reset_to(&mut self, scenario: &Scenario) {
        self.variant = scenario.variant;
        self.phase = scenario.variant.initial_phase();
        self.situation = scenario.situation.clone();
        self.round = ActiveRound::from_texts(1, &scenario.fragments, &scenario.alternatives);
        self.history.clear();
        self.feedback.clone_from(&scenario.feedback);
        self.ending = None;
        self.opening = Some(scenario.clone());
    }

    fn open_next_round(&mut self, outcome: &AdjudicationResponse) {
        #[allow(clippy::cast_possible_truncation)]
        let number = self.history.len() as u32 + 1;
        let alternatives: &[String] = if self.variant.offers_alternatives() {
            &outcome.next_round_alternatives
        } else {
            &[]
        };
        self.round = ActiveRound::from_texts(number, &outcome.next_round_fragments, alternatives);
    }
}

impl AggregateRoot for GameSession {
    type Event = GameEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            GameEventKind::GameCreated(payload) => self.reset_to(&payload.scenario),
            GameEventKind::GameStarted(_) => self.phase = GamePhase::Playing,
            GameEventKind::FragmentReordered(payload) => {
                self.round.apply_intent(&Intent::Reorder {
                    moving_id: payload.moving_id.clone(),
                    target_id: payload.target_id.clone(),
                });
            }
            GameEventKind::PoolReordered(payload) => {
                self.round.apply_intent(&Intent::ReorderPool {
                    moving_id: payload.moving_id.clone(),
                    target_id: payload.target_id.clone(),
                });
            }
            GameEventKind::AlternativeInserted(payload) => {
                self.round
                    .insert_from_pool(&payload.fragment_id, payload.target_id.as_ref());
            }
            GameEventKind::RoundCompleted(payload) => {
                self.history
                    .append(payload.archived.clone(), payload.outcome.clone());
                self.situation = payload.situation.clone();
                self.feedback.clone_from(&payload.outcome.player_feedback_text);
                self.open_next_round(&payload.outcome);
            }
            GameEventKind::GameEnded(payload) => {
                self.situation = payload.situation.clone();
                self.feedback.clone_from(&payload.outcome.player_feedback_text);
                self.ending = Some(payload.ending.clone());
                self.phase = GamePhase::Ended;
            }
            GameEventKind::GameRestarted(payload) => self.reset_to(&payload.scenario),
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use homeward_adjudicator::EndingType;
    use homeward_core::event::DomainEvent;
    use homeward_sequence::{FragmentId, InsertionGate};
    use homeward_situation::{SeverityScalar, StatVector};
    use homeward_test_support::FixedClock;
    use homeward_test_support::fixtures;

    use crate::domain::events::GAME_CREATED_EVENT_TYPE;
    use crate::domain::turn::EndingSource;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn created(variant: GameVariant) -> GameSession {
        let mut session = GameSession::new(Uuid::new_v4());
        session
            .create(Scenario::builtin(variant), Uuid::new_v4(), &clock())
            .unwrap();
        session
    }

    fn three_card_severity_game() -> GameSession {
        let mut scenario = Scenario::builtin(GameVariant::Severity);
        scenario.fragments = vec!["A".into(), "B".into(), "C".into()];
        scenario.alternatives = vec!["X".into(), "Y".into(), "Z".into()];
        let mut session = GameSession::new(Uuid::new_v4());
        session.create(scenario, Uuid::new_v4(), &clock()).unwrap();
        session.start(Uuid::new_v4(), &clock()).unwrap();
        session
    }

    fn id(s: &str) -> FragmentId {
        FragmentId::from(s)
    }

    #[test]
    fn test_create_produces_game_created_event() {
        // Arrange
        let game_id = Uuid::new_v4();
        let correlation_id = Uuid::new_v4();
        let clock = clock();
        let mut session = GameSession::new(game_id);

        // Act
        session
            .create(Scenario::builtin(GameVariant::Stats), correlation_id, &clock)
            .unwrap();

        // Assert
        let events = session.uncommitted_events();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.event_type(), GAME_CREATED_EVENT_TYPE);
        let meta = event.metadata();
        assert_eq!(meta.aggregate_id, game_id);
        assert_eq!(meta.sequence_number, 1);
        assert_eq!(meta.correlation_id, correlation_id);
        assert_eq!(meta.occurred_at, clock.0);

        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.round().number(), 1);
        assert_eq!(session.round().sequence().len(), 5);
        assert!(session.round().sequence().fragments()[0].fixed);
        assert_eq!(session.situation(), &Situation::Stats(StatVector::INITIAL));
        assert_eq!(session.committed_version(), 0);
    }

    #[test]
    fn test_create_twice_is_rejected() {
        let mut session = created(GameVariant::Stats);

        let result = session.create(
            Scenario::builtin(GameVariant::Stats),
            Uuid::new_v4(),
            &clock(),
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(session.uncommitted_events().len(), 1);
    }

    #[test]
    fn test_commands_on_missing_game_are_not_found() {
        let mut session = GameSession::new(Uuid::new_v4());

        let result = session.start(Uuid::new_v4(), &clock());

        assert!(matches!(result, Err(DomainError::AggregateNotFound(_))));
    }

    #[test]
    fn test_severity_game_starts_in_intro_and_blocks_intents() {
        // Arrange
        let mut session = created(GameVariant::Severity);
        let first = session.round().sequence().fragments()[1].id.clone();
        let second = session.round().sequence().fragments()[2].id.clone();

        // Act
        let changed = session
            .apply_intent(
                &Intent::Reorder {
                    moving_id: second,
                    target_id: first,
                },
                Uuid::new_v4(),
                &clock(),
            )
            .unwrap();

        // Assert
        assert_eq!(session.phase(), GamePhase::Intro);
        assert!(!changed);
        assert_eq!(session.uncommitted_events().len(), 1);
        assert_eq!(
            session.prepare_submission(),
            Err(SubmitBlocker::NotPlaying)
        );
    }

    #[test]
    fn test_start_moves_intro_to_playing_once() {
        let mut session = created(GameVariant::Severity);

        assert!(session.start(Uuid::new_v4(), &clock()).unwrap());
        assert!(!session.start(Uuid::new_v4(), &clock()).unwrap());

        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn test_insertion_gate_scenario() {
        // Arrange
        let mut session = three_card_severity_game();
        let clock = clock();

        // Act
        let first = session
            .apply_intent(
                &Intent::InsertFromPool {
                    fragment_id: id("1-alt-1"),
                    target_id: Some(id("1-2")),
                },
                Uuid::new_v4(),
                &clock,
            )
            .unwrap();
        let second = session
            .apply_intent(
                &Intent::InsertFromPool {
                    fragment_id: id("1-alt-2"),
                    target_id: Some(id("1-3")),
                },
                Uuid::new_v4(),
                &clock,
            )
            .unwrap();

        // Assert
        assert!(first);
        assert!(!second);
        assert_eq!(
            session.round().sequence().snapshot(),
            vec!["A", "X", "B", "C"]
        );
        assert!(session.round().sequence().fragments()[1].pending);
        let pool: Vec<&str> = session
            .round()
            .pool()
            .fragments()
            .iter()
            .map(|f| f.text.as_str())
            .collect();
        assert_eq!(pool, vec!["Y", "Z"]);
        assert_eq!(
            session.round().gate(),
            &InsertionGate::Closed {
                inserted: id("1-alt-1")
            }
        );
        // created, started, inserted
        assert_eq!(session.uncommitted_events().len(), 3);
    }

    #[test]
    fn test_submission_requires_alternative_in_severity_game() {
        let session = three_card_severity_game();

        assert_eq!(
            session.prepare_submission(),
            Err(SubmitBlocker::AlternativeRequired)
        );
    }

    #[test]
    fn test_prepare_submission_captures_request() {
        // Arrange
        let mut session = three_card_severity_game();
        session
            .apply_intent(
                &Intent::InsertFromPool {
                    fragment_id: id("1-alt-3"),
                    target_id: None,
                },
                Uuid::new_v4(),
                &clock(),
            )
            .unwrap();

        // Act
        let pending = session.prepare_submission().unwrap();

        // Assert
        assert_eq!(pending.round, 1);
        assert_eq!(pending.request.submitted_order, vec!["A", "B", "C", "Z"]);
        assert!(pending.request.history_texts.is_empty());
        assert_eq!(
            pending.request.situation,
            Situation::Severity(SeverityScalar::initial())
        );
        assert!(pending.archived.iter().all(|f| f.locked));
    }

    #[test]
    fn test_continuing_round_archives_and_opens_next() {
        // Arrange
        let mut session = created(GameVariant::Stats);
        let pending = session.prepare_submission().unwrap();
        let response = fixtures::stats_response(-5.0);

        // Act
        let verdict = session
            .resolve_submission(&pending, response.clone(), Uuid::new_v4(), &clock())
            .unwrap();

        // Assert
        assert_eq!(verdict, Verdict::Continue);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().items()[0].round, 1);
        assert_eq!(session.history().items()[0].fragments, pending.archived);
        assert_eq!(session.round().number(), 2);
        assert_eq!(
            session.round().sequence().snapshot(),
            response.next_round_fragments
        );
        assert!(session.round().sequence().fragments()[0].fixed);
        assert!(session.round().pool().is_empty());
        assert_eq!(session.feedback(), response.player_feedback_text);
        let Situation::Stats(stats) = session.situation() else {
            panic!("expected stats situation");
        };
        assert_eq!(stats.trust, 45.0);
    }

    #[test]
    fn test_stats_round_ignores_offered_alternatives() {
        let mut session = created(GameVariant::Stats);
        let pending = session.prepare_submission().unwrap();
        let mut response = fixtures::stats_response(1.0);
        response.next_round_alternatives = vec!["stray".into()];

        session
            .resolve_submission(&pending, response, Uuid::new_v4(), &clock())
            .unwrap();

        assert!(session.round().pool().is_empty());
        assert!(session.prepare_submission().is_ok());
    }

    #[test]
    fn test_severity_round_replaces_situation_and_pool() {
        // Arrange
        let mut session = three_card_severity_game();
        session
            .apply_intent(
                &Intent::InsertFromPool {
                    fragment_id: id("1-alt-1"),
                    target_id: None,
                },
                Uuid::new_v4(),
                &clock(),
            )
            .unwrap();
        let pending = session.prepare_submission().unwrap();
        let response = fixtures::severity_response(55.0);

        // Act
        session
            .resolve_submission(&pending, response.clone(), Uuid::new_v4(), &clock())
            .unwrap();

        // Assert
        assert_eq!(
            session.situation(),
            &Situation::Severity(SeverityScalar::new(55.0, fixtures::STATUS_LABEL))
        );
        assert_eq!(
            session.round().pool().len(),
            response.next_round_alternatives.len()
        );
        assert!(
            session
                .round()
                .pool()
                .fragments()
                .iter()
                .all(|f| f.pending && !f.fixed)
        );
        assert_eq!(session.round().gate(), &InsertionGate::Open);
        assert!(!session.round().has_added_alternative());
    }

    #[test]
    fn test_negative_trust_ends_game_with_local_breakdown() {
        // Arrange
        let mut session = created(GameVariant::Stats);
        let pending = session.prepare_submission().unwrap();

        // Act
        let verdict = session
            .resolve_submission(
                &pending,
                fixtures::stats_response(-60.0),
                Uuid::new_v4(),
                &clock(),
            )
            .unwrap();

        // Assert
        let Verdict::End(ending) = verdict else {
            panic!("expected game to end");
        };
        assert_eq!(ending.ending_type, EndingType::Breakdown);
        assert_eq!(ending.source, EndingSource::LocalSafetyNet);
        assert_eq!(session.phase(), GamePhase::Ended);
        assert!(session.history().is_empty());
        let Situation::Stats(stats) = session.situation() else {
            panic!("expected stats situation");
        };
        assert_eq!(stats.trust, -10.0);
        assert_eq!(
            session.ending().map(|e| e.text.as_str()),
            Some(crate::domain::scenario::BREAKDOWN_ENDING_TEXT)
        );
    }

    #[test]
    fn test_ended_game_rejects_everything_but_restart() {
        // Arrange
        let mut session = created(GameVariant::Stats);
        let pending = session.prepare_submission().unwrap();
        let mut response = fixtures::stats_response(0.0);
        response.outcome = fixtures::game_over_outcome();
        session
            .resolve_submission(&pending, response, Uuid::new_v4(), &clock())
            .unwrap();
        let before = session.round().clone();

        // Act
        let moved = session
            .apply_intent(
                &Intent::Reorder {
                    moving_id: id("1-3"),
                    target_id: id("1-2"),
                },
                Uuid::new_v4(),
                &clock(),
            )
            .unwrap();

        // Assert
        assert!(!moved);
        assert_eq!(session.round(), &before);
        assert_eq!(session.prepare_submission(), Err(SubmitBlocker::GameOver));
        assert_eq!(
            session.ending().map(|e| e.source),
            Some(EndingSource::Adjudicator)
        );
    }

    #[test]
    fn test_malformed_update_leaves_state_untouched() {
        // Arrange
        let mut session = created(GameVariant::Stats);
        let pending = session.prepare_submission().unwrap();
        let version = session.version();

        // Act
        let result = session.resolve_submission(
            &pending,
            fixtures::severity_response(40.0),
            Uuid::new_v4(),
            &clock(),
        );

        // Assert
        assert!(matches!(result, Err(DomainError::Adjudication(_))));
        assert_eq!(session.version(), version);
        assert_eq!(session.situation(), &Situation::Stats(StatVector::INITIAL));
        assert_eq!(session.round().number(), 1);
    }

    #[test]
    fn test_stale_submission_is_rejected() {
        let mut session = created(GameVariant::Stats);
        let pending = session.prepare_submission().unwrap();
        session
            .resolve_submission(
                &pending,
                fixtures::stats_response(1.0),
                Uuid::new_v4(),
                &clock(),
            )
            .unwrap();

        let result = session.resolve_submission(
            &pending,
            fixtures::stats_response(1.0),
            Uuid::new_v4(),
            &clock(),
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_restart_restores_opening() {
        // Arrange
        let mut session = created(GameVariant::Severity);
        let opening_round = session.round().clone();
        session.start(Uuid::new_v4(), &clock()).unwrap();
        assert!(!session.restart(Uuid::new_v4(), &clock()).unwrap());
        session
            .apply_intent(
                &Intent::InsertFromPool {
                    fragment_id: id("1-alt-1"),
                    target_id: None,
                },
                Uuid::new_v4(),
                &clock(),
            )
            .unwrap();
        let pending = session.prepare_submission().unwrap();
        let mut response = fixtures::severity_response(90.0);
        response.outcome = fixtures::game_over_outcome();
        session
            .resolve_submission(&pending, response, Uuid::new_v4(), &clock())
            .unwrap();

        // Act
        let restarted = session.restart(Uuid::new_v4(), &clock()).unwrap();

        // Assert
        assert!(restarted);
        assert_eq!(session.phase(), GamePhase::Intro);
        assert_eq!(session.round(), &opening_round);
        assert!(session.history().is_empty());
        assert!(session.ending().is_none());
        assert_eq!(
            session.situation(),
            &Situation::Severity(SeverityScalar::initial())
        );
        assert_eq!(
            session.feedback(),
            crate::domain::scenario::OPENING_FEEDBACK
        );
    }

    #[test]
    fn test_replaying_events_rebuilds_identical_state() {
        // Arrange
        let mut session = three_card_severity_game();
        session
            .apply_intent(
                &Intent::Reorder {
                    moving_id: id("1-3"),
                    target_id: id("1-2"),
                },
                Uuid::new_v4(),
                &clock(),
            )
            .unwrap();
        session
            .apply_intent(
                &Intent::ReorderPool {
                    moving_id: id("1-alt-3"),
                    target_id: id("1-alt-1"),
                },
                Uuid::new_v4(),
                &clock(),
            )
            .unwrap();
        session
            .apply_intent(
                &Intent::InsertFromPool {
                    fragment_id: id("1-alt-2"),
                    target_id: Some(id("1-3")),
                },
                Uuid::new_v4(),
                &clock(),
            )
            .unwrap();
        let pending = session.prepare_submission().unwrap();
        session
            .resolve_submission(
                &pending,
                fixtures::severity_response(30.0),
                Uuid::new_v4(),
                &clock(),
            )
            .unwrap();
        let events = session.take_uncommitted_events();

        // Act
        let mut replayed = GameSession::new(session.id);
        for event in &events {
            replayed.apply(event);
        }

        // Assert
        assert_eq!(replayed.version(), session.version());
        assert_eq!(replayed.round(), session.round());
        assert_eq!(replayed.history(), session.history());
        assert_eq!(replayed.situation(), session.situation());
        assert_eq!(replayed.feedback(), session.feedback());
        assert!(session.uncommitted_events().is_empty());
    }
}
