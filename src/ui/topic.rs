use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::models::PREDEFINED_TOPICS;
use crate::session::Session;

use super::ViewState;

pub fn render(frame: &mut Frame, area: Rect, session: &Session, view: &ViewState) {
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0]);
    render_banner(frame, chunks[1], session.error(), view.notice);
    render_topics(frame, chunks[2], view);
    render_custom_input(frame, chunks[3], view);
    render_timer_toggle(frame, chunks[4], view.timer_enabled);
    render_controls(frame, chunks[5], view.editing_custom);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "AI QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Test your knowledge with AI-generated quizzes. Choose a topic to begin!".fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_banner(frame: &mut Frame, area: Rect, error: Option<&str>, notice: Option<&str>) {
    let (text, hint) = match (error, notice) {
        (Some(error), _) => (error, "  (esc to dismiss)"),
        (None, Some(notice)) => (notice, ""),
        (None, None) => return,
    };

    let widget = Paragraph::new(Line::from(vec![
        Span::styled(text, Style::default().fg(Color::Red).bold()),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::Red)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_topics(frame: &mut Frame, area: Rect, view: &ViewState) {
    let mut lines: Vec<Line> = Vec::with_capacity(PREDEFINED_TOPICS.len() + 1);
    let entries = PREDEFINED_TOPICS
        .iter()
        .copied()
        .chain(std::iter::once("Custom topic..."));

    for (index, name) in entries.enumerate() {
        let is_selected = index == view.topic_cursor && !view.editing_custom;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(name, style),
        ]));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Topics ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_custom_input(frame: &mut Frame, area: Rect, view: &ViewState) {
    let (text, style) = if view.custom_topic.is_empty() && !view.editing_custom {
        ("Enter a custom topic...".to_string(), Style::default().fg(Color::DarkGray))
    } else if view.editing_custom {
        (format!("{}_", view.custom_topic), Style::default().fg(Color::Yellow))
    } else {
        (view.custom_topic.clone(), Style::default().fg(Color::Gray))
    };
    let border = if view.editing_custom {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let widget = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_timer_toggle(frame: &mut Frame, area: Rect, enabled: bool) {
    let (label, color) = if enabled {
        ("Timer enabled", Color::Green)
    } else {
        ("Timer disabled", Color::DarkGray)
    };
    let widget = Paragraph::new(label).alignment(Alignment::Center).fg(color);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, editing: bool) {
    let hint = if editing {
        "type a topic  ·  enter start  ·  esc cancel"
    } else {
        "j/k navigate  ·  enter start  ·  t timer  ·  esc dismiss  ·  q quit"
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
