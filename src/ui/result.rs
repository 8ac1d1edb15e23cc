use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::models::{AnswerDetail, Question, QuizResult};
use crate::session::{NOT_ANSWERED, Session};

use super::ViewState;
use super::quiz::OPTION_LABELS;
use super::timer::format_clock;

pub fn render(frame: &mut Frame, area: Rect, session: &Session, view: &ViewState) {
    let Some(result) = session.result() else {
        return;
    };
    let grade_color = get_grade_color(result.percentage);

    let chunks = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], session.topic(), result, grade_color);
    render_feedback(frame, chunks[1], &result.feedback, session.is_loading_feedback());
    render_question_breakdown(frame, chunks[2], session.questions(), result, view.result_scroll);
    render_controls(frame, chunks[3]);
}

/// Headline for a score band.
pub fn grade_label(percentage: u32) -> &'static str {
    match percentage {
        80.. => "Outstanding!",
        60..=79 => "Great job!",
        40..=59 => "Keep studying!",
        _ => "Don't give up!",
    }
}

fn get_grade_color(percentage: u32) -> Color {
    match percentage {
        80.. => Color::Green,
        60..=79 => Color::Cyan,
        40..=59 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(
    frame: &mut Frame,
    area: Rect,
    topic: &str,
    result: &QuizResult,
    grade_color: Color,
) {
    let content = vec![
        Line::from(Span::styled(
            grade_label(result.percentage),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(topic.fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({}% correct)",
                result.score, result.total, result.percentage
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(Span::styled(
            format!("Time: {}", format_clock(result.time_taken_secs)),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: &str, loading: bool) {
    let text = if loading {
        Span::styled(
            "Generating personalized feedback...",
            Style::default().fg(Color::Yellow).italic(),
        )
    } else {
        Span::styled(feedback, Style::default().fg(Color::White))
    };

    let widget = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" AI Feedback ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(
    frame: &mut Frame,
    area: Rect,
    questions: &[Question],
    result: &QuizResult,
    scroll: usize,
) {
    let lines: Vec<Line> = result
        .answers
        .iter()
        .zip(questions)
        .enumerate()
        .flat_map(|(index, (detail, question))| breakdown_lines(index, detail, question))
        .collect();

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll_offset(scroll), 0));
    frame.render_widget(widget, area);
}

fn scroll_offset(scroll: usize) -> u16 {
    u16::try_from(scroll).unwrap_or(u16::MAX)
}

fn breakdown_lines<'a>(index: usize, detail: &'a AnswerDetail, question: &'a Question) -> Vec<Line<'a>> {
    let (symbol, color) = if detail.is_correct {
        ("+", Color::Green)
    } else {
        ("-", Color::Red)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
        Span::styled(
            format!("{:2}. ", index + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(detail.question.as_str(), Style::default().fg(Color::Gray)),
    ])];

    let chosen = match detail.selected_index {
        Some(selected) => format!(
            "{}. {}",
            OPTION_LABELS.get(selected).copied().unwrap_or('?'),
            question.option(selected).unwrap_or_default()
        ),
        None => NOT_ANSWERED.to_string(),
    };
    lines.push(Line::from(vec![
        Span::raw("       Your answer: ").fg(Color::DarkGray),
        Span::styled(chosen, Style::default().fg(color)),
    ]));

    if !detail.is_correct {
        lines.push(Line::from(vec![
            Span::raw("       Correct: ").fg(Color::DarkGray),
            Span::styled(
                format!(
                    "{}. {}",
                    OPTION_LABELS[detail.correct_index],
                    question.correct_option()
                ),
                Style::default().fg(Color::Green),
            ),
        ]));
    }
    if let Some(explanation) = &detail.explanation {
        lines.push(Line::from(
            Span::raw(format!("       {}", explanation)).fg(Color::DarkGray).italic(),
        ));
    }
    lines.push(Line::from(""));
    lines
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r retry topic  ·  n new topic  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
