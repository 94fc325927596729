//! Opening content of a game.
//!
//! A scenario is everything a game is created with and restored to on
//! restart. Built-in scenarios exist for both variants; a YAML file can
//! override any part of them.

use std::path::{Path, PathBuf};

use homeward_situation::Situation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::phase::GameVariant;

/// Ending narration used when a visible stat falls below zero.
pub const BREAKDOWN_ENDING_TEXT: &str = "你在精神压力和长期的冲突中彻底崩溃了。";

/// Feedback line shown before the first submission.
pub const OPENING_FEEDBACK: &str = "时间紧迫，父母已经到门口了。";

const OPENING_FRAGMENTS: [&str; 5] = [
    "“砰！”防盗门被推开的声音清脆地响彻走廊。",
    "我还在电脑前打得火热，屏幕上大大的“VICTORY”还没褪去。",
    "父母的说话声在门外响起，“今天超市人真多啊。”",
    "我感到一阵寒意从脊梁骨升起，手心全是冷汗。",
    "迅速伸手去摸显示器的电源开关。",
];

const OPENING_ALTERNATIVES: [&str; 3] = [
    "我一把抓过桌角的练习册，摊开压在键盘上。",
    "我扯下耳机塞进抽屉，顺手把书包拉链拉开。",
    "我冲着门外喊了一声：“我在写作业呢！”",
];

/// Errors raised while loading a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The file could not be read.
    #[error("failed to read scenario {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid scenario YAML.
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The scenario parsed but is unusable.
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

/// Opening content and rule set of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Rule set.
    pub variant: GameVariant,
    /// Initial situation; its shape matches the variant.
    pub situation: Situation,
    /// Round-one base texts; the first is the anchor.
    pub fragments: Vec<String>,
    /// Round-one alternatives (severity variant only).
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// Feedback line shown before the first submission.
    pub feedback: String,
    /// Narration of the local breakdown ending.
    pub breakdown_ending_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    variant: GameVariant,
    situation: Option<Situation>,
    fragments: Option<Vec<String>>,
    alternatives: Option<Vec<String>>,
    feedback: Option<String>,
    breakdown_ending_text: Option<String>,
}

impl Scenario {
    /// The built-in opening for `variant`.
    #[must_use]
    pub fn builtin(variant: GameVariant) -> Self {
        let alternatives = if variant.offers_alternatives() {
            OPENING_ALTERNATIVES.iter().map(|s| (*s).to_owned()).collect()
        } else {
            Vec::new()
        };
        Self {
            variant,
            situation: Situation::initial(variant.situation_kind()),
            fragments: OPENING_FRAGMENTS.iter().map(|s| (*s).to_owned()).collect(),
            alternatives,
            feedback: OPENING_FEEDBACK.to_owned(),
            breakdown_ending_text: BREAKDOWN_ENDING_TEXT.to_owned(),
        }
    }

    /// Parses a YAML scenario; omitted fields fall back to the built-in
    /// opening of the declared variant.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Parse` for malformed YAML and
    /// `ScenarioError::Invalid` if the result fails [`Scenario::validate`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScenarioError> {
        let file: ScenarioFile = serde_yaml::from_str(yaml)?;
        let defaults = Self::builtin(file.variant);
        let scenario = Self {
            variant: file.variant,
            situation: file.situation.unwrap_or(defaults.situation),
            fragments: file.fragments.unwrap_or(defaults.fragments),
            alternatives: file.alternatives.unwrap_or(defaults.alternatives),
            feedback: file.feedback.unwrap_or(defaults.feedback),
            breakdown_ending_text: file
                .breakdown_ending_text
                .unwrap_or(defaults.breakdown_ending_text),
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reads and parses a YAML scenario file.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Io` if the file cannot be read, otherwise as
    /// [`Scenario::from_yaml_str`].
    pub fn from_path(path: &Path) -> Result<Self, ScenarioError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Checks that the scenario can open a game.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Invalid` if there are no fragments, the
    /// situation shape does not match the variant, or a stat-vector scenario
    /// declares alternatives.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.fragments.is_empty() {
            return Err(ScenarioError::Invalid(
                "at least one opening fragment is required".to_owned(),
            ));
        }
        let expected = self.variant.situation_kind();
        if self.situation.kind() != expected {
            return Err(ScenarioError::Invalid(format!(
                "a {expected} game needs a {expected} situation, got {}",
                self.situation.kind()
            )));
        }
        if !self.variant.offers_alternatives() && !self.alternatives.is_empty() {
            return Err(ScenarioError::Invalid(
                "alternatives are only offered in severity games".to_owned(),
            ));
        }
        Ok(())
    }
}
