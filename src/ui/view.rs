use std::time::{Duration, Instant};

use crate::models::{OPTION_COUNT, PREDEFINED_TOPICS, Screen};
use crate::protocol::Intent;
use crate::session::Session;

use super::timer::{Countdown, QuestionKey};

const CUSTOM_TOPIC_MAX_CHARS: usize = 60;

/// Presentation state owned by the terminal front end: cursors, the
/// custom-topic text box, the timer toggle and the running countdown.
/// None of it is quiz state.
#[derive(Debug)]
pub struct ViewState {
    pub topic_cursor: usize,
    pub custom_topic: String,
    pub editing_custom: bool,
    pub timer_enabled: bool,
    pub option_cursor: usize,
    pub result_scroll: usize,
    pub countdown: Countdown,
    /// Configuration problem shown on the topic screen.
    pub notice: Option<&'static str>,
    question: Option<QuestionKey>,
}

impl ViewState {
    pub fn new(timer_enabled: bool, time_per_question: Duration, notice: Option<&'static str>) -> Self {
        Self {
            topic_cursor: 0,
            custom_topic: String::new(),
            editing_custom: false,
            timer_enabled,
            option_cursor: 0,
            result_scroll: 0,
            countdown: Countdown::new(time_per_question),
            notice,
            question: None,
        }
    }

    /// Index of the "custom topic" entry after the predefined ones.
    pub fn custom_entry(&self) -> usize {
        PREDEFINED_TOPICS.len()
    }

    /// Catches the view up with the session and returns `TimeUp` when the
    /// countdown for the current question has just run out.
    pub fn sync(&mut self, session: &Session, now: Instant) -> Option<Intent> {
        if session.screen() != Screen::Quiz {
            self.question = None;
            self.countdown.clear();
            if session.screen() != Screen::Result {
                self.result_scroll = 0;
            }
            return None;
        }

        let key = (session.generation(), session.current_index());
        if self.question != Some(key) {
            self.question = Some(key);
            self.option_cursor = session.current_answer().unwrap_or(0);
        }

        if !session.timer_enabled() {
            self.countdown.clear();
            return None;
        }
        self.countdown.track(key, now);
        self.countdown.poll_expired(now).then_some(Intent::TimeUp)
    }

    pub fn topic_up(&mut self) {
        self.topic_cursor = self.topic_cursor.saturating_sub(1);
    }

    pub fn topic_down(&mut self) {
        self.topic_cursor = (self.topic_cursor + 1).min(self.custom_entry());
    }

    /// Intent for the highlighted topic; on the custom entry, opens the text box.
    pub fn choose_topic(&mut self) -> Option<Intent> {
        match PREDEFINED_TOPICS.get(self.topic_cursor) {
            Some(topic) => Some(self.select(topic.to_string())),
            None => {
                self.editing_custom = true;
                None
            }
        }
    }

    pub fn custom_push(&mut self, c: char) {
        if self.custom_topic.chars().count() < CUSTOM_TOPIC_MAX_CHARS {
            self.custom_topic.push(c);
        }
    }

    pub fn custom_pop(&mut self) {
        self.custom_topic.pop();
    }

    pub fn submit_custom(&mut self) -> Option<Intent> {
        let topic = self.custom_topic.trim();
        if topic.is_empty() {
            return None;
        }
        let topic = topic.to_string();
        self.editing_custom = false;
        Some(self.select(topic))
    }

    pub fn toggle_timer(&mut self) {
        self.timer_enabled = !self.timer_enabled;
    }

    pub fn option_up(&mut self) {
        self.option_cursor = (self.option_cursor + OPTION_COUNT - 1) % OPTION_COUNT;
    }

    pub fn option_down(&mut self) {
        self.option_cursor = (self.option_cursor + 1) % OPTION_COUNT;
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.result_scroll = (self.result_scroll + 1).min(rows.saturating_sub(1));
    }

    pub fn scroll_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    fn select(&self, topic: String) -> Intent {
        Intent::SelectTopic {
            topic,
            timer_enabled: self.timer_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Question;

    use super::*;

    fn quiz_session(count: usize, timer: bool) -> Session {
        let mut session = Session::new();
        let request = session.select_topic("Rust".into(), timer).unwrap();
        let questions = (0..count)
            .map(|n| Question {
                id: format!("q{n}"),
                text: format!("Question number {n}?"),
                options: ["a".into(), "b".into(), "c".into(), "d".into()],
                correct_index: 0,
                explanation: None,
            })
            .collect();
        session.questions_loaded(request.generation, questions, Instant::now());
        session
    }

    #[test]
    fn test_topic_navigation_and_custom_entry() {
        let mut view = ViewState::new(true, Duration::from_secs(30), None);
        assert_eq!(
            view.choose_topic(),
            Some(Intent::SelectTopic {
                topic: "JavaScript".into(),
                timer_enabled: true
            })
        );

        for _ in 0..20 {
            view.topic_down();
        }
        assert_eq!(view.topic_cursor, view.custom_entry());
        assert_eq!(view.choose_topic(), None);
        assert!(view.editing_custom);

        assert_eq!(view.submit_custom(), None);
        for c in "  Rust traits ".chars() {
            view.custom_push(c);
        }
        view.toggle_timer();
        assert_eq!(
            view.submit_custom(),
            Some(Intent::SelectTopic {
                topic: "Rust traits".into(),
                timer_enabled: false
            })
        );
        assert!(!view.editing_custom);
    }

    #[test]
    fn test_sync_fires_time_up_once() {
        let session = quiz_session(3, true);
        let mut view = ViewState::new(true, Duration::from_secs(30), None);
        let start = Instant::now();

        assert_eq!(view.sync(&session, start), None);
        assert_eq!(view.sync(&session, start + Duration::from_secs(30)), Some(Intent::TimeUp));
        assert_eq!(view.sync(&session, start + Duration::from_secs(31)), None);
    }

    #[test]
    fn test_sync_without_timer_never_fires() {
        let session = quiz_session(2, false);
        let mut view = ViewState::new(false, Duration::from_secs(30), None);
        let start = Instant::now();
        assert_eq!(view.sync(&session, start), None);
        assert_eq!(view.sync(&session, start + Duration::from_secs(300)), None);
        assert_eq!(view.countdown.remaining(start), None);
    }

    #[test]
    fn test_option_cursor_follows_recorded_answer() {
        let mut session = quiz_session(2, false);
        let mut view = ViewState::new(false, Duration::from_secs(30), None);
        session.select_answer(2);
        session.next();
        view.sync(&session, Instant::now());
        assert_eq!(view.option_cursor, 0);

        session.prev();
        view.sync(&session, Instant::now());
        assert_eq!(view.option_cursor, 2);

        view.option_up();
        view.option_up();
        view.option_up();
        assert_eq!(view.option_cursor, 3);
        view.option_down();
        assert_eq!(view.option_cursor, 0);
    }
}
