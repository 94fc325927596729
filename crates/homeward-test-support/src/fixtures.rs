//! Canned adjudication responses.

use homeward_adjudicator::{AdjudicationResponse, EndingType, Outcome};
use homeward_situation::{SeverityScalar, SituationUpdate, StatDelta};

/// Status label carried by [`severity_response`].
pub const STATUS_LABEL: &str = "心生怀疑";

/// Feedback line carried by every fixture response.
pub const FEEDBACK: &str = "妈妈的目光在屏幕上多停留了一秒。";

fn continuing(situation_update: SituationUpdate) -> AdjudicationResponse {
    AdjudicationResponse {
        turn_id: "turn-1".to_owned(),
        outcome: Outcome {
            is_game_over: false,
            ending_type: EndingType::None,
            ending_text: String::new(),
        },
        situation_update,
        player_feedback_text: FEEDBACK.to_owned(),
        next_round_fragments: vec![
            "门把手转动了。".to_owned(),
            "我屏住呼吸。".to_owned(),
            "爸爸探进头来。".to_owned(),
        ],
        next_round_alternatives: Vec::new(),
    }
}

/// A continuing stat-variant response whose delta changes only `trust`.
#[must_use]
pub fn stats_response(trust_delta: f64) -> AdjudicationResponse {
    continuing(SituationUpdate::Delta(StatDelta {
        trust: Some(trust_delta),
        ..StatDelta::default()
    }))
}

/// A continuing severity-variant response with three next-round
/// alternatives.
#[must_use]
pub fn severity_response(severity: f64) -> AdjudicationResponse {
    let mut response = continuing(SituationUpdate::Replace(SeverityScalar::new(
        severity,
        STATUS_LABEL,
    )));
    response.next_round_alternatives = vec![
        "我把游戏手柄塞到枕头下面。".to_owned(),
        "我打开了数学作业的文档。".to_owned(),
        "我假装在打电话问同学题目。".to_owned(),
    ];
    response
}

/// An adjudicator-declared game over.
#[must_use]
pub fn game_over_outcome() -> Outcome {
    Outcome {
        is_game_over: true,
        ending_type: EndingType::Caught,
        ending_text: "屏幕的光映在爸爸脸上，一切都说不清了。".to_owned(),
    }
}
