//! Gateway to the generative-AI text service.
//!
//! Each operation builds a prompt, calls the [`TextProvider`], extracts the
//! JSON object from the free-text reply and validates it, retrying the whole
//! unit under a [`RetryPolicy`]. Every failure comes back as a
//! [`GatewayError`].

mod error;
mod extract;
mod gemini;
mod prompt;
mod provider;
mod retry;
mod schema;
#[cfg(test)]
pub(crate) mod scripted;

use std::sync::Arc;

use crate::config::ApiKeyStatus;
use crate::models::{Difficulty, Question, WrongAnswer};

pub use error::{GatewayError, ProviderFailure};
pub use extract::extract_json;
pub use gemini::GeminiProvider;
pub use prompt::{feedback_prompt, quiz_prompt};
pub use provider::TextProvider;
pub use retry::{RetryPolicy, with_retry};
pub use schema::MAX_QUESTIONS;

use schema::{FeedbackResponse, QuizResponse};

/// Parameters of a feedback request, built from a scored quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub topic: String,
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub wrong_answers: Vec<WrongAnswer>,
}

#[derive(Clone)]
pub struct Gateway {
    provider: Arc<dyn TextProvider>,
    credentials: ApiKeyStatus,
    retry: RetryPolicy,
}

impl Gateway {
    pub fn new(provider: Arc<dyn TextProvider>, credentials: ApiKeyStatus, retry: RetryPolicy) -> Self {
        Self {
            provider,
            credentials,
            retry,
        }
    }

    /// Asks the provider for `count` questions on `topic`.
    pub async fn generate_questions(
        &self,
        topic: &str,
        count: usize,
        difficulty: Difficulty,
    ) -> Result<Vec<Question>, GatewayError> {
        self.ensure_configured()?;
        tracing::info!(topic, count, %difficulty, "generating quiz");

        let questions = with_retry(&self.retry, move |_| async move {
            let prompt = quiz_prompt(topic, count, difficulty);
            let text = self.call(&prompt, "quiz").await?;
            extract::decode::<QuizResponse>(&text)?.validate()
        })
        .await?;

        tracing::info!(topic, received = questions.len(), "quiz generated");
        Ok(questions)
    }

    /// Asks the provider for a short personalized comment on a result.
    pub async fn generate_feedback(&self, request: &FeedbackRequest) -> Result<String, GatewayError> {
        self.ensure_configured()?;
        tracing::info!(
            topic = %request.topic,
            score = request.score,
            total = request.total,
            "generating feedback"
        );

        with_retry(&self.retry, move |_| async move {
            let prompt = feedback_prompt(
                &request.topic,
                request.score,
                request.total,
                request.percentage,
                &request.wrong_answers,
            );
            let text = self.call(&prompt, "feedback").await?;
            extract::decode::<FeedbackResponse>(&text)?.validate()
        })
        .await
    }

    fn ensure_configured(&self) -> Result<(), GatewayError> {
        if self.credentials.is_usable() {
            Ok(())
        } else {
            Err(GatewayError::not_configured())
        }
    }

    async fn call(&self, prompt: &str, what: &str) -> Result<String, GatewayError> {
        match self.provider.generate(prompt).await {
            Ok(text) => {
                tracing::debug!(len = text.len(), "AI response received");
                Ok(text)
            }
            Err(failure) if failure.is_credential_failure() => Err(GatewayError::invalid_key()),
            Err(failure) => Err(GatewayError::ProviderError(format!(
                "Failed to generate {what}: {failure}"
            ))),
        }
    }
}
