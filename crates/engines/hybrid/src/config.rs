//! Engine configuration, loaded from TOML.
//!
//! ```toml
//! [search]
//! top_lines = 5
//! max_nodes = 5000
//! time_limit_ms = 30000
//!
//! [judge]
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-3.5-turbo-instruct"
//! max_tokens = 10
//! temperature = 0.1
//! timeout_secs = 10
//! turn_adjustment = 0.2
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{budget::SearchBudget, error::ConfigError, judge::ResponseBudget};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridConfig {
    pub search: SearchConfig,
    pub judge: JudgeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// How many ranked root lines a result keeps.
    pub top_lines: usize,
    pub max_nodes: Option<u64>,
    pub time_limit_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_lines: 5,
            max_nodes: None,
            time_limit_ms: None,
        }
    }
}

impl SearchConfig {
    /// A fresh budget carrying the configured caps.
    pub fn budget(&self) -> SearchBudget {
        let mut budget = SearchBudget::unlimited();
        if let Some(n) = self.max_nodes {
            budget = budget.with_max_nodes(n);
        }
        if let Some(ms) = self.time_limit_ms {
            budget = budget.with_time_limit(Duration::from_millis(ms));
        }
        budget
    }
}

/// Settings for the completion service that judges leaf positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout_secs: u64,
    /// Subtracted from a judged score when Black is to move.
    pub turn_adjustment: f64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo-instruct".to_string(),
            max_tokens: 10,
            temperature: 0.1,
            timeout_secs: 10,
            turn_adjustment: 0.2,
        }
    }
}

impl JudgeConfig {
    pub fn response_budget(&self) -> ResponseBudget {
        ResponseBudget {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl HybridConfig {
    /// Reads and validates a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: HybridConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.search.top_lines == 0 {
            return Err(ConfigError::Invalid("search.top_lines must be at least 1".into()));
        }
        if self.judge.timeout_secs == 0 {
            return Err(ConfigError::Invalid("judge.timeout_secs must be at least 1".into()));
        }
        if !(0.0..=2.0).contains(&self.judge.temperature) {
            return Err(ConfigError::Invalid(format!(
                "judge.temperature {} outside 0.0..=2.0",
                self.judge.temperature
            )));
        }
        if self.judge.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("judge.base_url is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
