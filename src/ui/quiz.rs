use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::models::OPTION_COUNT;
use crate::session::Session;

use super::ViewState;
use super::timer::{format_clock, seconds_left};

pub const OPTION_LABELS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, session: &Session, view: &ViewState, now: Instant) {
    let Some(question) = session.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], session, view, now);
    render_question_text(frame, chunks[1], &question.text);
    render_options(
        frame,
        chunks[2],
        &question.options,
        view.option_cursor,
        session.current_answer(),
    );
    render_controls(frame, chunks[3], session.is_first(), session.is_last());
}

fn render_progress(frame: &mut Frame, area: Rect, session: &Session, view: &ViewState, now: Instant) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Length(8)]).split(area);

    let progress = format!(
        "Question {} of {}  ·  {} answered",
        session.current_index() + 1,
        session.questions().len(),
        session.answered_count()
    );
    frame.render_widget(Paragraph::new(progress).fg(Color::DarkGray), halves[0]);

    if let Some(remaining) = view.countdown.remaining(now) {
        let secs = seconds_left(remaining);
        let widget = Paragraph::new(format_clock(secs))
            .alignment(Alignment::Right)
            .fg(timer_color(secs))
            .bold();
        frame.render_widget(widget, halves[1]);
    }
}

fn timer_color(secs: u64) -> Color {
    match secs {
        21.. => Color::Green,
        11..=20 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[String; OPTION_COUNT],
    cursor: usize,
    answered: Option<usize>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_cursor = index == cursor;
        let is_chosen = answered == Some(index);
        let style = match (is_chosen, is_cursor) {
            (true, _) => Style::default().fg(Color::Green).bold(),
            (false, true) => Style::default().fg(Color::Cyan).bold(),
            (false, false) => Style::default().fg(Color::Gray),
        };
        let marker = if is_cursor { ">" } else { " " };
        let check = if is_chosen { " ✓" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
            Span::styled(check, style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(" Options ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, is_first: bool, is_last: bool) {
    let mut hint = String::from("j/k move  ·  enter answer");
    if !is_first {
        hint.push_str("  ·  h prev");
    }
    if !is_last {
        hint.push_str("  ·  l next");
    }
    hint.push_str("  ·  s submit  ·  q quit");

    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
