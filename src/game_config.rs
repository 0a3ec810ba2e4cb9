//! Game configuration loaded from TOML.
//!
//! ```toml
//! rows = 5
//! cols = 5
//! max_retries = 3
//! scoring = "largest_component"
//!
//! [[players]]
//! name = "human"
//! marker = "*"
//! kind = "human"
//!
//! [[players]]
//! name = "agent"
//! marker = "o"
//! kind = "agent"
//! llm_provider = "openai"
//! llm_model = "gpt-4o-mini"
//! ```

use crate::games::territory::{Board, DEFAULT_MAX_RETRIES, ScoringMode, TurnSettings};
use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// How a seat is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SeatKind {
    /// Keyboard input on stdin.
    Human,
    /// Hosted language model.
    Agent,
    /// First-open-cell AI.
    Simple,
}

/// One seat in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SeatConfig {
    /// Display name.
    name: String,

    /// Single character drawn in owned cells.
    marker: char,

    /// How moves are produced.
    kind: SeatKind,

    /// LLM provider (agents only).
    #[serde(default)]
    llm_provider: LlmProvider,

    /// LLM model name (agents only).
    #[serde(default = "default_model")]
    llm_model: String,

    /// Maximum tokens per reply (agents only).
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_dimension() -> usize {
    5
}

fn default_max_retries() -> usize {
    DEFAULT_MAX_RETRIES
}

impl SeatConfig {
    /// Creates a seat with default LLM settings.
    pub fn new(name: impl Into<String>, marker: char, kind: SeatKind) -> Self {
        Self {
            name: name.into(),
            marker,
            kind,
            llm_provider: LlmProvider::default(),
            llm_model: default_model(),
            llm_max_tokens: default_max_tokens(),
        }
    }

    /// Creates the LLM configuration for this seat.
    /// Requires OPENAI_API_KEY or ANTHROPIC_API_KEY in the environment.
    #[instrument(skip(self), fields(seat = %self.name, provider = ?self.llm_provider, model = %self.llm_model))]
    pub fn llm_config(&self) -> Result<LlmConfig, ConfigError> {
        let var = self.llm_provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;
        debug!("API key found");
        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
        ))
    }
}

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid rows.
    #[serde(default = "default_dimension")]
    rows: usize,

    /// Grid columns.
    #[serde(default = "default_dimension")]
    cols: usize,

    /// Retries granted to automated seats after the first attempt.
    #[serde(default = "default_max_retries")]
    max_retries: usize,

    /// Which figure is reported as the score.
    #[serde(default)]
    scoring: ScoringMode,

    /// Seats in turn order.
    players: Vec<SeatConfig>,
}

impl Default for GameConfig {
    /// Human `*` against an OpenAI agent `o` on a 5x5 grid.
    fn default() -> Self {
        Self {
            rows: default_dimension(),
            cols: default_dimension(),
            max_retries: default_max_retries(),
            scoring: ScoringMode::default(),
            players: vec![
                SeatConfig::new("human", '*', SeatKind::Human),
                SeatConfig::new("agent", 'o', SeatKind::Agent),
            ],
        }
    }
}

impl GameConfig {
    /// Creates a configuration with default rules for the given seats.
    pub fn with_players(players: Vec<SeatConfig>) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(players = config.players.len(), rows = config.rows, cols = config.cols, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the default configuration.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            info!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks dimensions, seat count and marker uniqueness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = Board::cell_count(self.rows, self.cols) {
            return Err(ConfigError::new(e.to_string()));
        }
        if self.players.len() < 2 {
            return Err(ConfigError::new(format!(
                "At least two players are required, got {}",
                self.players.len()
            )));
        }
        let mut markers = HashSet::new();
        for seat in &self.players {
            if seat.marker.is_whitespace() {
                return Err(ConfigError::new(format!(
                    "Player {} has a blank marker",
                    seat.name
                )));
            }
            if !markers.insert(seat.marker) {
                return Err(ConfigError::new(format!(
                    "Marker '{}' is used by more than one player",
                    seat.marker
                )));
            }
        }
        Ok(())
    }

    /// Applies command-line overrides, then re-validates.
    pub fn with_overrides(
        mut self,
        rows: Option<usize>,
        cols: Option<usize>,
        max_retries: Option<usize>,
        scoring: Option<ScoringMode>,
    ) -> Result<Self, ConfigError> {
        if let Some(rows) = rows {
            self.rows = rows;
        }
        if let Some(cols) = cols {
            self.cols = cols;
        }
        if let Some(max_retries) = max_retries {
            self.max_retries = max_retries;
        }
        if let Some(scoring) = scoring {
            self.scoring = scoring;
        }
        self.validate()?;
        Ok(self)
    }

    /// Turn settings derived from this configuration.
    pub fn turn_settings(&self) -> TurnSettings {
        TurnSettings::new(self.max_retries, self.scoring)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
