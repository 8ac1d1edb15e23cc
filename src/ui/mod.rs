mod loading;
mod quiz;
mod result;
pub mod timer;
mod topic;
mod view;

use std::time::Instant;

use ratatui::{prelude::*, widgets::Block};

use crate::models::Screen;
use crate::session::Session;

pub use view::ViewState;

pub fn render(frame: &mut Frame, session: &Session, view: &ViewState, now: Instant) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match session.screen() {
        Screen::Topic => topic::render(frame, area, session, view),
        Screen::Loading => loading::render(frame, area, session.topic()),
        Screen::Quiz => quiz::render(frame, area, session, view, now),
        Screen::Result => result::render(frame, area, session, view),
    }
}
