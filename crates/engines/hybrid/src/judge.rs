//! Judgment service: a text-completion endpoint asked to score a position.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{config::JudgeConfig, error::JudgeError};

/// Generation limits sent with every judgment request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseBudget {
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for ResponseBudget {
    fn default() -> Self {
        Self {
            max_tokens: 10,
            temperature: 0.1,
        }
    }
}

/// Anything that can turn a prompt into reply text.
///
/// Implemented by [`CompletionClient`] for production and by stubs in tests.
pub trait JudgmentService {
    fn complete(&self, prompt: &str, budget: ResponseBudget) -> Result<String, JudgeError>;
}

impl<J: JudgmentService + ?Sized> JudgmentService for &J {
    fn complete(&self, prompt: &str, budget: ResponseBudget) -> Result<String, JudgeError> {
        (**self).complete(prompt, budget)
    }
}

impl<J: JudgmentService + ?Sized> JudgmentService for Box<J> {
    fn complete(&self, prompt: &str, budget: ResponseBudget) -> Result<String, JudgeError> {
        (**self).complete(prompt, budget)
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

/// Blocking client for an OpenAI-style `/completions` endpoint.
///
/// Must not be created or used from inside an async runtime thread; the
/// HTTP server builds one per request inside `spawn_blocking`.
pub struct CompletionClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl CompletionClient {
    pub fn new(config: &JudgeConfig, api_key: impl Into<String>) -> Result<Self, JudgeError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl JudgmentService for CompletionClient {
    fn complete(&self, prompt: &str, budget: ResponseBudget) -> Result<String, JudgeError> {
        let request = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: budget.max_tokens,
            temperature: budget.temperature,
        };
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(JudgeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: CompletionResponse = response.json()?;
        let text = reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or(JudgeError::MissingChoices)?;
        debug!(reply = %text.trim(), "judgment received");
        Ok(text)
    }
}

/// Extracts a score from reply text.
///
/// Keeps only ASCII digits, `.` and `-`; returns `None` when what is left
/// is empty, a lone sign or point, or not a finite number.
pub fn parse_judgment(reply: &str) -> Option<f64> {
    let cleaned: String = reply
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if matches!(cleaned.as_str(), "" | "-" | "." | "-.") {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "judge_tests.rs"]
mod judge_tests;
