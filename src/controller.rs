//! Session controller: applies intents to the [`Session`] and runs the AI
//! requests they trigger on background tasks.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::gateway::{FeedbackRequest, Gateway, GatewayError};
use crate::models::{Difficulty, Question};
use crate::protocol::Intent;
use crate::session::{Generation, QuizRequest, Session};

/// Outcome of a background AI request, tagged with the generation that
/// issued it.
#[derive(Debug)]
pub enum Completion {
    Questions {
        generation: Generation,
        outcome: Result<Vec<Question>, GatewayError>,
    },
    Feedback {
        generation: Generation,
        outcome: Result<String, GatewayError>,
    },
}

pub struct Controller {
    session: Session,
    gateway: Arc<Gateway>,
    question_count: usize,
    difficulty: Difficulty,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl Controller {
    pub fn new(gateway: Gateway, question_count: usize, difficulty: Difficulty) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            session: Session::new(),
            gateway: Arc::new(gateway),
            question_count,
            difficulty,
            completions_tx,
            completions_rx,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Applies one intent. Must be called from within a Tokio runtime, since
    /// intents that reach the AI service spawn a task.
    pub fn dispatch(&mut self, intent: Intent) {
        tracing::debug!(?intent, screen = ?self.session.screen(), "intent");

        match intent {
            Intent::SelectTopic {
                topic,
                timer_enabled,
            } => {
                let topic = topic.trim();
                if topic.is_empty() {
                    return;
                }
                if let Some(request) = self.session.select_topic(topic.to_string(), timer_enabled) {
                    self.spawn_quiz(request);
                }
            }
            Intent::SelectAnswer { index } => self.session.select_answer(index),
            Intent::Next => self.session.next(),
            Intent::Prev => self.session.prev(),
            Intent::TimeUp => self.session.time_up(),
            Intent::Submit => {
                if let Some((generation, request)) = self.session.submit(Instant::now()) {
                    if let Some(result) = self.session.result() {
                        tracing::info!(
                            score = result.score,
                            total = result.total,
                            seconds = result.time_taken_secs,
                            "quiz submitted"
                        );
                    }
                    self.spawn_feedback(generation, request);
                }
            }
            Intent::Retry => {
                if let Some(request) = self.session.retry() {
                    self.spawn_quiz(request);
                }
            }
            Intent::NewTopic => self.session.new_topic(),
            Intent::DismissError => self.session.dismiss_error(),
        }
    }

    /// Folds a finished request into the session. Returns false when the
    /// completion belonged to a superseded generation and was dropped.
    pub fn apply(&mut self, completion: Completion) -> bool {
        let applied = match completion {
            Completion::Questions {
                generation,
                outcome: Ok(questions),
            } => self
                .session
                .questions_loaded(generation, questions, Instant::now()),
            Completion::Questions {
                generation,
                outcome: Err(err),
            } => {
                tracing::warn!(error = %err, "quiz generation failed");
                self.session.quiz_failed(generation, err.to_string())
            }
            Completion::Feedback {
                generation,
                outcome: Ok(feedback),
            } => self.session.feedback_ready(generation, feedback),
            Completion::Feedback {
                generation,
                outcome: Err(err),
            } => {
                tracing::warn!(error = %err, "feedback generation failed, using fallback");
                self.session.feedback_failed(generation)
            }
        };

        if !applied {
            tracing::debug!(current = self.session.generation(), "discarded stale completion");
        }
        applied
    }

    /// Applies every completion that has already arrived, without waiting.
    pub fn poll_completions(&mut self) -> usize {
        let mut count = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply(completion);
            count += 1;
        }
        count
    }

    /// Waits for the next completion and applies it.
    pub async fn settle(&mut self) -> bool {
        match self.completions_rx.recv().await {
            Some(completion) => self.apply(completion),
            None => false,
        }
    }

    fn spawn_quiz(&self, request: QuizRequest) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.completions_tx.clone();
        let count = self.question_count;
        let difficulty = self.difficulty;

        tokio::spawn(async move {
            let outcome = gateway
                .generate_questions(&request.topic, count, difficulty)
                .await;
            let _ = tx.send(Completion::Questions {
                generation: request.generation,
                outcome,
            });
        });
    }

    fn spawn_feedback(&self, generation: Generation, request: FeedbackRequest) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.completions_tx.clone();

        tokio::spawn(async move {
            let outcome = gateway.generate_feedback(&request).await;
            let _ = tx.send(Completion::Feedback {
                generation,
                outcome,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ApiKeyStatus;
    use crate::gateway::RetryPolicy;
    use crate::gateway::scripted::{Reply, ScriptedProvider, quiz_json};
    use crate::models::Screen;
    use crate::session::FEEDBACK_FALLBACK;

    use super::*;

    const FEEDBACK: &str = r#"{"feedback": "Great work, keep practicing closures! 🎉"}"#;

    fn controller(provider: &Arc<ScriptedProvider>, credentials: ApiKeyStatus) -> Controller {
        let gateway = Gateway::new(provider.clone(), credentials, RetryPolicy::default());
        Controller::new(gateway, 4, Difficulty::Medium)
    }

    fn select(topic: &str, timer_enabled: bool) -> Intent {
        Intent::SelectTopic {
            topic: topic.to_string(),
            timer_enabled,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_quiz_flow() {
        let provider = Arc::new(ScriptedProvider::new([
            Reply::Text(quiz_json(&[0, 1, 2, 1])),
            Reply::Text(FEEDBACK.into()),
        ]));
        let mut controller = controller(&provider, ApiKeyStatus::Present);

        controller.dispatch(select("Rust", true));
        assert_eq!(controller.session().screen(), Screen::Loading);
        assert!(controller.settle().await);
        assert_eq!(controller.session().screen(), Screen::Quiz);
        assert_eq!(controller.session().questions().len(), 4);

        for answer in [Some(0), Some(2), None, Some(1)] {
            if let Some(index) = answer {
                controller.dispatch(Intent::SelectAnswer { index });
            }
            controller.dispatch(Intent::Next);
        }
        assert_eq!(controller.session().current_index(), 3);

        controller.dispatch(Intent::Submit);
        let session = controller.session();
        assert_eq!(session.screen(), Screen::Result);
        assert!(session.is_loading_feedback());
        assert_eq!(session.result().unwrap().score, 2);
        assert_eq!(session.result().unwrap().percentage, 50);

        assert!(controller.settle().await);
        let session = controller.session();
        assert!(!session.is_loading_feedback());
        assert_eq!(
            session.result().unwrap().feedback,
            "Great work, keep practicing closures! 🎉"
        );

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("exactly 4 multiple choice questions about \"Rust\""));
        assert!(prompts[1].contains("Score: 2/4 (50%)"));
        assert!(prompts[1].contains("User answered: \"Not answered\""));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unconfigured_key_returns_to_topic_with_error() {
        let provider = Arc::new(ScriptedProvider::text(quiz_json(&[0])));
        let mut controller = controller(&provider, ApiKeyStatus::Placeholder);

        controller.dispatch(select("Rust", true));
        assert!(controller.settle().await);

        let session = controller.session();
        assert_eq!(session.screen(), Screen::Topic);
        assert_eq!(
            session.error(),
            Some("Gemini API key not configured. Please add your key to .env file.")
        );
        assert!(session.questions().is_empty());
        assert_eq!(provider.call_count(), 0);

        controller.dispatch(Intent::DismissError);
        assert!(controller.session().error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_feedback_failure_falls_back_quietly() {
        let provider = Arc::new(ScriptedProvider::new([
            Reply::Text(quiz_json(&[0])),
            Reply::Text("Sorry, I can't help with that.".into()),
        ]));
        let mut controller = controller(&provider, ApiKeyStatus::Present);

        controller.dispatch(select("CSS", false));
        controller.settle().await;
        controller.dispatch(Intent::Submit);
        assert!(controller.settle().await);

        let session = controller.session();
        assert_eq!(session.screen(), Screen::Result);
        assert_eq!(session.result().unwrap().feedback, FEEDBACK_FALLBACK);
        assert!(session.error().is_none());
        // One quiz call plus three feedback attempts.
        assert_eq!(provider.call_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_regenerates_and_drops_stale_feedback() {
        let provider = Arc::new(ScriptedProvider::new([
            Reply::Text(quiz_json(&[0, 1])),
            Reply::Text(FEEDBACK.into()),
            Reply::Text(quiz_json(&[3, 3, 3])),
        ]));
        let mut controller = controller(&provider, ApiKeyStatus::Present);

        controller.dispatch(select("Python", false));
        controller.settle().await;
        controller.dispatch(Intent::Submit);
        controller.dispatch(Intent::Retry);

        let session = controller.session();
        assert_eq!(session.screen(), Screen::Loading);
        assert_eq!(session.topic(), "Python");
        assert!(!session.timer_enabled());
        assert!(session.result().is_none());

        // The first completion is the old feedback, which must not land.
        assert!(!controller.settle().await);
        assert!(controller.settle().await);

        let session = controller.session();
        assert_eq!(session.screen(), Screen::Quiz);
        assert_eq!(session.questions().len(), 3);
        assert_eq!(session.answers(), &[None, None, None]);
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn test_blank_topic_is_ignored() {
        let provider = Arc::new(ScriptedProvider::text(quiz_json(&[0])));
        let mut controller = controller(&provider, ApiKeyStatus::Present);

        controller.dispatch(select("   ", true));
        assert_eq!(controller.session().screen(), Screen::Topic);
        assert_eq!(controller.poll_completions(), 0);
    }

    #[tokio::test]
    async fn test_select_topic_trims_input() {
        let provider = Arc::new(ScriptedProvider::text(quiz_json(&[0])));
        let mut controller = controller(&provider, ApiKeyStatus::Present);

        controller.dispatch(select("  Data Structures  ", true));
        assert_eq!(controller.session().topic(), "Data Structures");
        controller.settle().await;
        assert_eq!(controller.session().screen(), Screen::Quiz);
    }
}
