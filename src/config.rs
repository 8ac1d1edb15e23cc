//! Runtime configuration.
//!
//! Values come from the command line and the environment (a `.env` file is
//! loaded first by the binary). Only the API key is required, and even that
//! is checked lazily: a missing key is reported at startup and turned into
//! an `Unauthorized` failure on the first request.

use std::time::Duration;

use thiserror::Error;

use crate::gateway::{MAX_QUESTIONS, RetryPolicy};
use crate::models::Difficulty;

pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const DEFAULT_SECONDS_PER_QUESTION: u64 = 30;
/// Longest countdown that still fits the `mm:ss` clock.
pub const MAX_SECONDS_PER_QUESTION: u64 = 3600;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("questions per quiz must be between 1 and 10, got {0}")]
    QuestionCount(usize),
    #[error("time per question must be between 1 and 3600 seconds")]
    TimePerQuestion,
}

/// Whether a usable API key is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyStatus {
    Missing,
    Placeholder,
    Present,
}

impl ApiKeyStatus {
    pub fn of(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            None | Some("") => Self::Missing,
            Some(PLACEHOLDER_API_KEY) => Self::Placeholder,
            Some(_) => Self::Present,
        }
    }

    pub fn is_usable(self) -> bool {
        self == Self::Present
    }

    /// Startup diagnostic for a key that will not work.
    pub fn diagnostic(self) -> Option<&'static str> {
        match self {
            Self::Missing => Some("Gemini API key not configured. Set GEMINI_API_KEY or add it to .env."),
            Self::Placeholder => Some("Gemini API key is still the placeholder value. Replace it in .env."),
            Self::Present => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub question_count: usize,
    pub difficulty: Difficulty,
    pub time_per_question: Duration,
    /// Initial position of the timer toggle on the topic screen.
    pub timer_enabled: bool,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            question_count: DEFAULT_QUESTION_COUNT,
            difficulty: Difficulty::default(),
            time_per_question: Duration::from_secs(DEFAULT_SECONDS_PER_QUESTION),
            timer_enabled: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    pub fn api_key_status(&self) -> ApiKeyStatus {
        ApiKeyStatus::of(self.api_key.as_deref())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_QUESTIONS).contains(&self.question_count) {
            return Err(ConfigError::QuestionCount(self.question_count));
        }
        let seconds = Duration::from_secs(1)..=Duration::from_secs(MAX_SECONDS_PER_QUESTION);
        if !seconds.contains(&self.time_per_question) {
            return Err(ConfigError::TimePerQuestion);
        }
        Ok(())
    }
}
