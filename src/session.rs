//! Quiz session state machine.
//!
//! `Session` owns every piece of quiz state and changes only through the
//! transition methods below. Transitions that need the AI service return a
//! request tagged with the session generation; the outcome is folded back in
//! with the same tag, and outcomes from a superseded generation are dropped.

use std::time::Instant;

use crate::gateway::FeedbackRequest;
use crate::models::{AnswerDetail, Question, QuizResult, Screen, WrongAnswer, percentage};

pub const FEEDBACK_FALLBACK: &str = "Unable to generate feedback. Great effort completing the quiz!";
pub const NOT_ANSWERED: &str = "Not answered";

/// Identifies which run of the session an async request belongs to.
pub type Generation = u64;

/// Quiz generation to start for `topic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub generation: Generation,
    pub topic: String,
}

#[derive(Debug)]
pub struct Session {
    screen: Screen,
    topic: String,
    questions: Vec<Question>,
    current_index: usize,
    answers: Vec<Option<usize>>,
    started_at: Option<Instant>,
    timer_enabled: bool,
    error: Option<String>,
    loading_feedback: bool,
    result: Option<QuizResult>,
    generation: Generation,
}

impl Session {
    pub fn new() -> Self {
        Self {
            screen: Screen::Topic,
            topic: String::new(),
            questions: Vec::new(),
            current_index: 0,
            answers: Vec::new(),
            started_at: None,
            timer_enabled: true,
            error: None,
            loading_feedback: false,
            result: None,
            generation: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Answer recorded for the current question.
    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.current_index).copied().flatten()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_some()).count()
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn timer_enabled(&self) -> bool {
        self.timer_enabled
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading_feedback(&self) -> bool {
        self.loading_feedback
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// `Topic -> Loading`. Ignored while a quiz is loading or in progress.
    pub fn select_topic(&mut self, topic: String, timer_enabled: bool) -> Option<QuizRequest> {
        if matches!(self.screen, Screen::Loading | Screen::Quiz) {
            return None;
        }

        self.generation += 1;
        self.screen = Screen::Loading;
        self.topic = topic;
        self.timer_enabled = timer_enabled;
        self.error = None;
        self.clear_attempt();

        Some(QuizRequest {
            generation: self.generation,
            topic: self.topic.clone(),
        })
    }

    /// `Result -> Loading` with the same topic and timer setting.
    pub fn retry(&mut self) -> Option<QuizRequest> {
        if self.screen != Screen::Result {
            return None;
        }
        let topic = self.topic.clone();
        self.select_topic(topic, self.timer_enabled)
    }

    /// `Loading -> Quiz`. Returns false when the outcome is stale.
    pub fn questions_loaded(
        &mut self,
        generation: Generation,
        questions: Vec<Question>,
        now: Instant,
    ) -> bool {
        if !self.awaiting_quiz(generation) {
            return false;
        }
        if questions.is_empty() {
            return self.quiz_failed(generation, "No questions were generated. Please try again.".into());
        }

        self.answers = vec![None; questions.len()];
        self.questions = questions;
        self.current_index = 0;
        self.started_at = Some(now);
        self.screen = Screen::Quiz;
        true
    }

    /// `Loading -> Topic` with `message` shown. Returns false when stale.
    pub fn quiz_failed(&mut self, generation: Generation, message: String) -> bool {
        if !self.awaiting_quiz(generation) {
            return false;
        }
        self.clear_attempt();
        self.error = Some(message);
        self.screen = Screen::Topic;
        true
    }

    /// Records `index` for the current question, replacing any earlier choice.
    pub fn select_answer(&mut self, index: usize) {
        if self.screen != Screen::Quiz {
            return;
        }
        if let Some(slot) = self.answers.get_mut(self.current_index) {
            *slot = Some(index);
        }
    }

    pub fn next(&mut self) {
        if self.screen == Screen::Quiz && !self.is_last() {
            self.current_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.screen == Screen::Quiz {
            self.current_index = self.current_index.saturating_sub(1);
        }
    }

    /// Question timer expired. Advances like `next`; on the last question
    /// nothing happens and the quiz is not submitted.
    pub fn time_up(&mut self) {
        self.next();
    }

    /// `Quiz -> Result`. Scores the attempt and returns the feedback request
    /// to issue; the result shows immediately with feedback pending.
    pub fn submit(&mut self, now: Instant) -> Option<(Generation, FeedbackRequest)> {
        if self.screen != Screen::Quiz {
            return None;
        }

        let details: Vec<AnswerDetail> = self
            .questions
            .iter()
            .zip(&self.answers)
            .map(|(question, selected)| AnswerDetail {
                question_id: question.id.clone(),
                question: question.text.clone(),
                selected_index: *selected,
                correct_index: question.correct_index,
                is_correct: *selected == Some(question.correct_index),
                explanation: question.explanation.clone(),
            })
            .collect();

        let score = details.iter().filter(|detail| detail.is_correct).count();
        let total = self.questions.len();
        let percentage = percentage(score, total);
        let elapsed = self
            .started_at
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default();
        let time_taken_secs = (elapsed.as_millis() as f64 / 1000.0).round() as u64;

        let wrong_answers = self
            .questions
            .iter()
            .zip(&details)
            .filter(|(_, detail)| !detail.is_correct)
            .map(|(question, detail)| WrongAnswer {
                question: question.text.clone(),
                user_answer: detail
                    .selected_index
                    .and_then(|index| question.option(index))
                    .unwrap_or(NOT_ANSWERED)
                    .to_string(),
                correct_answer: question.correct_option().to_string(),
            })
            .collect();

        self.result = Some(QuizResult {
            score,
            total,
            percentage,
            feedback: String::new(),
            answers: details,
            time_taken_secs,
        });
        self.loading_feedback = true;
        self.screen = Screen::Result;

        let request = FeedbackRequest {
            topic: self.topic.clone(),
            score,
            total,
            percentage,
            wrong_answers,
        };
        Some((self.generation, request))
    }

    /// Fills in the generated feedback. Returns false when stale.
    pub fn feedback_ready(&mut self, generation: Generation, feedback: String) -> bool {
        if !self.awaiting_feedback(generation) {
            return false;
        }
        if let Some(result) = &mut self.result {
            result.feedback = feedback;
        }
        self.loading_feedback = false;
        true
    }

    /// Substitutes the fallback text; no error is surfaced.
    pub fn feedback_failed(&mut self, generation: Generation) -> bool {
        self.feedback_ready(generation, FEEDBACK_FALLBACK.to_string())
    }

    /// `Result -> Topic`, discarding everything about the finished quiz.
    pub fn new_topic(&mut self) {
        if self.screen != Screen::Result {
            return;
        }
        let generation = self.generation + 1;
        *self = Self::new();
        self.generation = generation;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn awaiting_quiz(&self, generation: Generation) -> bool {
        self.screen == Screen::Loading && self.generation == generation
    }

    fn awaiting_feedback(&self, generation: Generation) -> bool {
        self.screen == Screen::Result && self.loading_feedback && self.generation == generation
    }

    fn clear_attempt(&mut self) {
        self.questions.clear();
        self.answers.clear();
        self.current_index = 0;
        self.started_at = None;
        self.result = None;
        self.loading_feedback = false;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
