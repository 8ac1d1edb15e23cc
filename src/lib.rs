//! # ai-quiz
//!
//! A terminal quiz whose questions and feedback come from a generative-AI
//! text service.
//!
//! The crate is split into the quiz [`Session`] state machine, the
//! [`Controller`] that drives it from user [`Intent`]s, and the
//! [`gateway`] that talks to the AI service. The terminal front end in
//! [`run`] only renders session state and forwards intents.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ai_quiz::{Config, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let config = Config::new(std::env::var("GEMINI_API_KEY").ok());
//!     ai_quiz::run(config).await
//! }
//! ```

pub mod config;
pub mod controller;
pub mod gateway;
mod models;
pub mod protocol;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use config::{ApiKeyStatus, Config, ConfigError};
pub use controller::{Completion, Controller};
pub use gateway::{Gateway, GatewayError, GeminiProvider, TextProvider};
pub use models::{AnswerDetail, Difficulty, Question, QuizResult, Screen, WrongAnswer};
pub use protocol::Intent;
pub use session::Session;

use terminal::{AppTerminal, TerminalGuard};
use ui::ViewState;

const TICK: Duration = Duration::from_millis(50);

/// Error type for running the quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Runs the quiz in the terminal until the user quits.
pub async fn run(config: Config) -> Result<(), QuizError> {
    config.validate()?;

    let status = config.api_key_status();
    if let Some(diagnostic) = status.diagnostic() {
        tracing::warn!("{diagnostic}");
    }

    let provider = GeminiProvider::new(&config)?;
    let gateway = Gateway::new(Arc::new(provider), status, config.retry);
    let mut controller = Controller::new(gateway, config.question_count, config.difficulty);
    let mut view = ViewState::new(
        config.timer_enabled,
        config.time_per_question,
        status.diagnostic(),
    );

    tracing::info!(model = %config.model, questions = config.question_count, "starting quiz");

    let mut guard = TerminalGuard::enter()?;
    let result = run_event_loop(guard.terminal(), &mut controller, &mut view);
    guard.restore()?;
    result
}

fn run_event_loop(
    terminal: &mut AppTerminal,
    controller: &mut Controller,
    view: &mut ViewState,
) -> Result<(), QuizError> {
    loop {
        controller.poll_completions();

        let now = Instant::now();
        if let Some(intent) = view.sync(controller.session(), now) {
            controller.dispatch(intent);
            view.sync(controller.session(), now);
        }

        terminal.draw(|frame| ui::render(frame, controller.session(), view, now))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(controller, view, key.code) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(controller: &mut Controller, view: &mut ViewState, key: KeyCode) -> bool {
    let intent = match controller.session().screen() {
        Screen::Topic => match handle_topic_input(view, key) {
            Input::Quit => return true,
            Input::Intent(intent) => Some(intent),
            Input::None => None,
        },
        Screen::Loading => return matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')),
        Screen::Quiz => match handle_quiz_input(view, key) {
            Input::Quit => return true,
            Input::Intent(intent) => Some(intent),
            Input::None => None,
        },
        Screen::Result => {
            let rows = controller
                .session()
                .result()
                .map_or(0, |result| result.answers.len() * 4);
            match handle_result_input(view, key, rows) {
                Input::Quit => return true,
                Input::Intent(intent) => Some(intent),
                Input::None => None,
            }
        }
    };

    if let Some(intent) = intent {
        controller.dispatch(intent);
    }
    false
}

enum Input {
    Quit,
    Intent(Intent),
    None,
}

impl From<Option<Intent>> for Input {
    fn from(intent: Option<Intent>) -> Self {
        intent.map_or(Input::None, Input::Intent)
    }
}

fn handle_topic_input(view: &mut ViewState, key: KeyCode) -> Input {
    if view.editing_custom {
        match key {
            KeyCode::Enter => return view.submit_custom().into(),
            KeyCode::Esc => view.editing_custom = false,
            KeyCode::Backspace => view.custom_pop(),
            KeyCode::Char(c) => view.custom_push(c),
            _ => {}
        }
        return Input::None;
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => view.topic_up(),
        KeyCode::Down | KeyCode::Char('j') => view.topic_down(),
        KeyCode::Enter => return view.choose_topic().into(),
        KeyCode::Char('t') | KeyCode::Char('T') => view.toggle_timer(),
        KeyCode::Esc => return Input::Intent(Intent::DismissError),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Input::Quit,
        _ => {}
    }
    Input::None
}

fn handle_quiz_input(view: &mut ViewState, key: KeyCode) -> Input {
    match key {
        KeyCode::Up | KeyCode::Char('k') => view.option_up(),
        KeyCode::Down | KeyCode::Char('j') => view.option_down(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            return Input::Intent(Intent::SelectAnswer {
                index: view.option_cursor,
            });
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            view.option_cursor = index;
            return Input::Intent(Intent::SelectAnswer { index });
        }
        KeyCode::Right | KeyCode::Char('l') => return Input::Intent(Intent::Next),
        KeyCode::Left | KeyCode::Char('h') => return Input::Intent(Intent::Prev),
        KeyCode::Char('s') | KeyCode::Char('S') => return Input::Intent(Intent::Submit),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Input::Quit,
        _ => {}
    }
    Input::None
}

fn handle_result_input(view: &mut ViewState, key: KeyCode, rows: usize) -> Input {
    match key {
        KeyCode::Down | KeyCode::Char('j') => view.scroll_down(rows),
        KeyCode::Up | KeyCode::Char('k') => view.scroll_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => return Input::Intent(Intent::Retry),
        KeyCode::Char('n') | KeyCode::Char('N') => return Input::Intent(Intent::NewTopic),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Input::Quit,
        _ => {}
    }
    Input::None
}
