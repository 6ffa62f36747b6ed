use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::session::QuizCard;
use crate::view::{
    ClarificationView, OptionView, QuestionView, QuizScore, project_question, project_score,
};

const CONTROLS: &str = "a-d select  ·  enter check  ·  ? doubt  ·  j/k question  ·  n new  ·  h history  ·  q quit";
const DOUBT_CONTROLS: &str = "type your doubt  ·  enter send  ·  esc cancel";

pub fn render(
    frame: &mut Frame,
    area: Rect,
    cards: &[QuizCard],
    current: usize,
    doubt_input: Option<&str>,
) -> &'static str {
    let Some(card) = cards.get(current) else {
        return CONTROLS;
    };
    let view = project_question(card);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(7),
    ])
    .split(area);

    render_progress(frame, chunks[0], current, project_score(cards));
    render_question_text(frame, chunks[1], &view.heading);
    render_options(frame, chunks[2], &view);
    render_clarification(frame, chunks[3], &view.clarification, doubt_input);

    if doubt_input.is_some() {
        DOUBT_CONTROLS
    } else {
        CONTROLS
    }
}

fn render_progress(frame: &mut Frame, area: Rect, current: usize, score: QuizScore) {
    let mut spans = vec![Span::styled(
        format!("{}/{}", current + 1, score.total),
        Style::default().fg(Color::DarkGray),
    )];
    if score.checked > 0 {
        spans.push(Span::styled(
            format!("   score {}/{}", score.correct, score.checked),
            Style::default().fg(get_grade_color(score)),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
    frame.render_widget(widget, area);
}

fn get_grade_color(score: QuizScore) -> Color {
    let percentage = score.correct * 100 / score.checked.max(1);
    match percentage {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
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

fn render_options(frame: &mut Frame, area: Rect, view: &QuestionView) {
    let mut lines: Vec<Line> = Vec::with_capacity(view.options.len() * 2 + 4);

    for option in &view.options {
        let style = option_style(option);
        let marker = if option.selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option.label), style),
            Span::styled(option.text, style),
        ]));
        lines.push(Line::from(""));
    }

    if let Some(verdict) = &view.verdict {
        let color = if verdict.correct { Color::Green } else { Color::Red };
        lines.push(Line::from(Span::styled(
            verdict.message.as_str(),
            Style::default().fg(color).bold(),
        )));
    }
    if let Some(explanation) = view.explanation {
        lines.push(Line::from(Span::styled(
            explanation,
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(notice) = view.notice {
        lines.push(Line::from(Span::styled(
            notice,
            Style::default().fg(Color::Yellow),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn option_style(option: &OptionView) -> Style {
    match option.is_answer {
        Some(true) => Style::default().fg(Color::Green).bold(),
        Some(false) if option.selected => Style::default().fg(Color::Red).bold(),
        _ if option.selected => Style::default().fg(Color::Cyan).bold(),
        _ => Style::default().fg(Color::Gray),
    }
}

fn render_clarification(
    frame: &mut Frame,
    area: Rect,
    clarification: &ClarificationView,
    doubt_input: Option<&str>,
) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Color::DarkGray)
        .title(" Doubt ")
        .padding(Padding::horizontal(1));

    let lines: Vec<Line> = if let Some(input) = doubt_input {
        vec![Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::styled(format!("{}_", input), Style::default().fg(Color::White)),
        ])]
    } else {
        match clarification {
            ClarificationView::Hidden => vec![Line::from(Span::styled(
                "Check your answer to ask a doubt.",
                Style::default().fg(Color::DarkGray),
            ))],
            ClarificationView::Idle => vec![Line::from(Span::styled(
                "Press ? to ask about this question.",
                Style::default().fg(Color::DarkGray),
            ))],
            ClarificationView::Pending { doubt } => vec![
                doubt_line(doubt),
                Line::from(Span::styled("Thinking...", Style::default().fg(Color::Yellow))),
            ],
            ClarificationView::Answered { doubt, answer } => {
                let mut lines = vec![doubt_line(doubt)];
                lines.extend(answer.lines().map(|line| {
                    Line::from(Span::styled(line, Style::default().fg(Color::White)))
                }));
                lines
            }
            ClarificationView::Failed { doubt, message } => vec![
                doubt_line(doubt),
                Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
            ],
        }
    };

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(widget, area);
}

fn doubt_line(doubt: &str) -> Line<'_> {
    Line::from(vec![
        Span::styled("You: ", Style::default().fg(Color::DarkGray)),
        Span::styled(doubt, Style::default().fg(Color::Gray)),
    ])
}
