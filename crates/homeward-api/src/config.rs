//! Startup configuration read from the environment.

use std::path::PathBuf;

use homeward_adjudicator::GeminiConfig;
use homeward_turn::domain::phase::GameVariant;
use homeward_turn::domain::scenario::Scenario;
use tracing::warn;

use crate::error::AppError;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Rule set used when no scenario file is given.
    pub variant: GameVariant,
    /// Optional YAML scenario overriding the built-in opening.
    pub scenario_path: Option<PathBuf>,
    /// Adjudicator endpoint and credentials.
    pub gemini: GeminiConfig,
    /// OTLP collector; traces are exported only when set.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `GEMINI_API_KEY` is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// As [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let variant: GameVariant = match lookup("GAME_VARIANT") {
            Some(raw) => raw
                .parse()
                .map_err(|e: String| AppError::Config(format!("GAME_VARIANT: {e}")))?,
            None => GameVariant::Severity,
        };
        let scenario_path = lookup("SCENARIO_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let api_key = lookup("GEMINI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("GEMINI_API_KEY environment variable must be set".to_string())
            })?;
        let mut gemini = GeminiConfig::new(api_key);
        if let Some(model) = lookup("GEMINI_MODEL") {
            gemini = gemini.with_model(model);
        }
        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            gemini = gemini.with_base_url(base_url);
        }

        Ok(Self {
            host,
            port,
            variant,
            scenario_path,
            gemini,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.is_empty()),
        })
    }

    /// The opening to create the game with: the scenario file when one is
    /// configured, otherwise the built-in opening of `variant`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Scenario` if the scenario file cannot be loaded.
    pub fn scenario(&self) -> Result<Scenario, AppError> {
        let Some(path) = &self.scenario_path else {
            return Ok(Scenario::builtin(self.variant));
        };
        let scenario = Scenario::from_path(path)?;
        if scenario.variant != self.variant {
            warn!(
                file_variant = ?scenario.variant,
                env_variant = ?self.variant,
                "scenario file variant overrides GAME_VARIANT"
            );
        }
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_only_api_key_is_set() {
        // Arrange
        let env = lookup(&[("GEMINI_API_KEY", "k")]);

        // Act
        let config = Config::from_lookup(env).unwrap();

        // Assert
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.variant, GameVariant::Severity);
        assert!(config.scenario_path.is_none());
        assert!(config.otlp_endpoint.is_none());
        assert_eq!(config.gemini.model, homeward_adjudicator::gemini::DEFAULT_MODEL);
    }

    #[test]
    fn test_missing_api_key_is_a_config_error() {
        let result = Config::from_lookup(lookup(&[("PORT", "8080")]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let result = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "k"), ("PORT", "http")]));

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("PORT")));
    }

    #[test]
    fn test_variant_and_overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("GAME_VARIANT", "Stats"),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("GEMINI_BASE_URL", "http://localhost:9000/v1beta/"),
        ]))
        .unwrap();

        assert_eq!(config.variant, GameVariant::Stats);
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.gemini.base_url, "http://localhost:9000/v1beta");
        assert_eq!(
            config.scenario().unwrap(),
            Scenario::builtin(GameVariant::Stats)
        );
    }

    #[test]
    fn test_unknown_variant_is_a_config_error() {
        let result =
            Config::from_lookup(lookup(&[("GEMINI_API_KEY", "k"), ("GAME_VARIANT", "hard")]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
