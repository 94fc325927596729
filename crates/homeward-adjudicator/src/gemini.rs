//! Gemini `generateContent` adapter.

use std::fmt;
use std::fmt::Write as _;
use std::time::Duration;

use async_trait::async_trait;
use homeward_situation::{Situation, SituationKind};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::contract::{AdjudicationError, AdjudicationRequest, AdjudicationResponse, Adjudicator};

/// Public Gemini API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used unless configured otherwise.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const GAME_BRIEF: &str = "You adjudicate an interactive narrative game. A high-school \
student is secretly playing computer games at home when the parents come back early; the \
player is that student. Every round the player receives short narrative fragments, puts \
them in the order they believe tells the most plausible story, and submits it. Judge the \
causal plausibility of the submitted order and how much it exposes the student, then \
return the consequences and the fragments for the next round. The first next-round \
fragment is the round's fixed anchor. All narrative text must be Simplified Chinese.";

const STATS_RULES: &str = "Return situation_update as additive deltas for the visible \
values trust, autonomy and study and the hidden values risk and coherence. Omit a field to \
leave it unchanged. End the game when any visible value would fall below zero.";

const SEVERITY_RULES: &str = "Return situation_update as the new severity, from 0 \
(completely safe) to 100 (completely exposed), with a short status_label. Provide three \
next_round_alternatives; the player must insert exactly one of them into the next round.";

/// Connection settings for [`GeminiAdjudicator`].
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Model name, e.g. `gemini-3-flash-preview`.
    pub model: String,
    /// API root without trailing slash.
    pub base_url: String,
}

impl GeminiConfig {
    /// Settings for the public endpoint and default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Overrides the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Adjudicator backed by a Gemini model with a JSON response schema.
#[derive(Debug, Clone)]
pub struct GeminiAdjudicator {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiAdjudicator {
    /// Builds the adapter. Only a connect timeout is set; how long the model
    /// may think is left to the service.
    ///
    /// # Errors
    ///
    /// Returns `AdjudicationError::Transport` if the HTTP client cannot be
    /// constructed.
    pub fn new(config: GeminiConfig) -> Result<Self, AdjudicationError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AdjudicationError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[async_trait]
impl Adjudicator for GeminiAdjudicator {
    async fn adjudicate(
        &self,
        request: &AdjudicationRequest,
    ) -> Result<AdjudicationResponse, AdjudicationError> {
        let body = build_request_body(request);
        debug!(
            model = %self.config.model,
            history_len = request.history_texts.len(),
            submitted_len = request.submitted_order.len(),
            "sending adjudication request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdjudicationError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(status, "adjudicator rejected request");
            return Err(AdjudicationError::Status { status, message });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AdjudicationError::Malformed(e.to_string()))?;
        let text = payload.first_text().ok_or_else(|| {
            AdjudicationError::Malformed("response carried no text candidate".to_owned())
        })?;

        AdjudicationResponse::from_json_str(&text)
    }
}

/// The user turn sent to the model.
#[must_use]
pub fn build_prompt(request: &AdjudicationRequest) -> String {
    let mut prompt = String::new();
    match &request.situation {
        Situation::Stats(stats) => {
            let _ = writeln!(
                prompt,
                "Current situation: trust {}, autonomy {}, study {} (hidden: risk {}, coherence {})",
                stats.trust, stats.autonomy, stats.study, stats.risk, stats.coherence
            );
        }
        Situation::Severity(severity) => {
            let _ = writeln!(
                prompt,
                "Current situation: severity {} ({})",
                severity.severity, severity.status_label
            );
        }
    }
    if request.history_texts.is_empty() {
        prompt.push_str("History: (none)\n");
    } else {
        let _ = writeln!(prompt, "History: {}", request.history_texts.join(" -> "));
    }
    prompt.push_str("Submitted order:\n");
    for (index, text) in request.submitted_order.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {text}", index + 1);
    }
    prompt
}

/// System instruction for a game of the given shape.
#[must_use]
pub fn system_instruction(kind: SituationKind) -> String {
    let rules = match kind {
        SituationKind::Stats => STATS_RULES,
        SituationKind::Severity => SEVERITY_RULES,
    };
    format!("{GAME_BRIEF}\n\n{rules}")
}

/// JSON schema the model must answer with.
#[must_use]
pub fn response_schema(kind: SituationKind) -> Value {
    let number = json!({ "type": "NUMBER" });
    let string = json!({ "type": "STRING" });
    let strings = json!({ "type": "ARRAY", "items": { "type": "STRING" } });

    let situation_update = match kind {
        SituationKind::Stats => json!({
            "type": "OBJECT",
            "properties": {
                "trust": number,
                "autonomy": number,
                "study": number,
                "risk": number,
                "coherence": number,
            },
        }),
        SituationKind::Severity => json!({
            "type": "OBJECT",
            "properties": { "severity": number, "status_label": string },
            "required": ["severity", "status_label"],
        }),
    };

    let mut required = vec![
        "turn_id",
        "outcome",
        "situation_update",
        "player_feedback_text",
        "next_round_fragments",
    ];
    if kind == SituationKind::Severity {
        required.push("next_round_alternatives");
    }

    json!({
        "type": "OBJECT",
        "properties": {
            "turn_id": string,
            "outcome": {
                "type": "OBJECT",
                "properties": {
                    "is_game_over": { "type": "BOOLEAN" },
                    "ending_type": {
                        "type": "STRING",
                        "enum": ["caught", "total_distrust", "none"],
                    },
                    "ending_text": string,
                },
                "required": ["is_game_over", "ending_type", "ending_text"],
            },
            "situation_update": situation_update,
            "player_feedback_text": string,
            "next_round_fragments": strings,
            "next_round_alternatives": strings,
        },
        "required": required,
    })
}

/// Full `generateContent` request body.
#[must_use]
pub fn build_request_body(request: &AdjudicationRequest) -> Value {
    let kind = request.situation.kind();
    json!({
        "systemInstruction": { "parts": [{ "text": system_instruction(kind) }] },
        "contents": [{ "role": "user", "parts": [{ "text": build_prompt(request) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(kind),
        },
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}
