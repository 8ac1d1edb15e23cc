//! Wire shapes the model is asked to produce, and their validation into
//! domain types.

use serde::Deserialize;

use crate::models::{OPTION_COUNT, Question};

use super::GatewayError;

pub const MAX_QUESTIONS: usize = 10;
const MIN_QUESTION_CHARS: usize = 10;
const MIN_FEEDBACK_CHARS: usize = 10;

#[derive(Debug, Deserialize)]
pub(crate) struct QuizResponse {
    questions: Vec<WireQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireQuestion {
    id: String,
    question: String,
    options: Vec<String>,
    correct_index: serde_json::Number,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedbackResponse {
    feedback: String,
}

impl QuizResponse {
    pub(crate) fn validate(self) -> Result<Vec<Question>, GatewayError> {
        let count = self.questions.len();
        if count == 0 || count > MAX_QUESTIONS {
            return Err(invalid(format!(
                "expected 1 to {MAX_QUESTIONS} questions, got {count}"
            )));
        }

        self.questions
            .into_iter()
            .enumerate()
            .map(|(position, question)| question.validate(position))
            .collect()
    }
}

impl WireQuestion {
    fn validate(self, position: usize) -> Result<Question, GatewayError> {
        let n = position + 1;
        if self.id.trim().is_empty() {
            return Err(invalid(format!("question {n} has an empty id")));
        }
        if self.question.chars().count() < MIN_QUESTION_CHARS {
            return Err(invalid(format!(
                "question {n} text is shorter than {MIN_QUESTION_CHARS} characters"
            )));
        }
        let found = self.options.len();
        let options: [String; OPTION_COUNT] = self.options.try_into().map_err(|_| {
            invalid(format!(
                "question {n} has {found} options, expected {OPTION_COUNT}"
            ))
        })?;
        let correct_index = option_index(&self.correct_index)
            .ok_or_else(|| {
                invalid(format!(
                    "question {n} has correctIndex {} outside 0..={}",
                    self.correct_index,
                    OPTION_COUNT - 1
                ))
            })?;

        Ok(Question {
            id: self.id,
            text: self.question,
            options,
            correct_index,
            explanation: self.explanation,
        })
    }
}

impl FeedbackResponse {
    pub(crate) fn validate(self) -> Result<String, GatewayError> {
        if self.feedback.chars().count() < MIN_FEEDBACK_CHARS {
            return Err(invalid(format!(
                "feedback is shorter than {MIN_FEEDBACK_CHARS} characters"
            )));
        }
        Ok(self.feedback)
    }
}

/// Accepts integral JSON numbers, including float spellings such as `1.0`.
fn option_index(number: &serde_json::Number) -> Option<usize> {
    let index = match number.as_u64() {
        Some(index) => index,
        None => {
            let value = number.as_f64()?;
            if value.fract() != 0.0 || value < 0.0 || value >= OPTION_COUNT as f64 {
                return None;
            }
            value as u64
        }
    };
    usize::try_from(index).ok().filter(|index| *index < OPTION_COUNT)
}

fn invalid(detail: String) -> GatewayError {
    GatewayError::MalformedResponse(format!("AI response failed validation: {detail}"))
}
