use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Row, Table, Wrap},
};

use crate::app::{App, ResponsePane};
use crate::backend::StudyBackend;
use crate::models::TableModel;
use crate::session::{Session, SessionContent};
use crate::view::{TextLine, TextLineKind, TextSpan, project_table, project_text};

use super::quiz;

const IDLE_CONTROLS: &str = "n new prompt  ·  h history  ·  q quit";
const TEXT_CONTROLS: &str = "j/k scroll  ·  n new prompt  ·  h history  ·  q quit";

pub fn render<B: StudyBackend>(frame: &mut Frame, area: Rect, app: &App<B>) -> &'static str {
    match &app.response {
        ResponsePane::Empty => {
            render_message(frame, area, "Nothing here yet. Press n to write a prompt.", Color::DarkGray);
            IDLE_CONTROLS
        }
        ResponsePane::Processing => {
            render_message(frame, area, "Processing...", Color::Yellow);
            IDLE_CONTROLS
        }
        ResponsePane::Failed(message) => {
            render_message(frame, area, message, Color::Red);
            IDLE_CONTROLS
        }
        ResponsePane::Ready(session) => render_session(frame, area, app, session),
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let widget = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .fg(color)
        .block(Block::default().padding(Padding::uniform(1)));
    frame.render_widget(widget, area);
}

fn render_session<B: StudyBackend>(
    frame: &mut Frame,
    area: Rect,
    app: &App<B>,
    session: &Session,
) -> &'static str {
    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).split(area);
    render_header(frame, chunks[0], session);

    match &session.content {
        SessionContent::Quiz(cards) => quiz::render(
            frame,
            chunks[1],
            cards,
            app.current_question,
            app.doubt_input.as_deref(),
        ),
        SessionContent::Table(table) if !table.is_empty() => {
            render_table(frame, chunks[1], table, app.scroll);
            TEXT_CONTROLS
        }
        SessionContent::Table(_) => {
            render_text(frame, chunks[1], &session.response_text, false, app.scroll);
            TEXT_CONTROLS
        }
        SessionContent::FreeForm { text, markdown } => {
            render_text(frame, chunks[1], text, *markdown, app.scroll);
            TEXT_CONTROLS
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect, session: &Session) {
    let mut spans = vec![Span::styled(
        session.mode.wire_name().to_uppercase(),
        Style::default().fg(Color::Cyan).bold(),
    )];
    if let Some(prompt) = session.prompt.lines().next().filter(|p| !p.trim().is_empty()) {
        spans.push(Span::styled(format!("  {}", prompt), Style::default().fg(Color::Gray)));
    }
    if !session.warnings.is_empty() {
        spans.push(Span::styled(
            format!("  ({} parse warnings, see log)", session.warnings.len()),
            Style::default().fg(Color::Yellow),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_table(frame: &mut Frame, area: Rect, table: &TableModel, scroll: u16) {
    let view = project_table(table);
    let widths = vec![Constraint::Fill(1); view.columns];

    let header = Row::new(view.header.clone())
        .style(Style::default().fg(Color::Cyan).bold())
        .bottom_margin(1);
    let rows = view
        .rows
        .iter()
        .skip(scroll as usize)
        .map(|row| Row::new(row.clone()).style(Style::default().fg(Color::Gray)));

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_text(frame: &mut Frame, area: Rect, text: &str, markdown: bool, scroll: u16) {
    let lines: Vec<Line> = project_text(text, markdown)
        .iter()
        .map(|line| text_line(line, area.width))
        .collect();

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn text_line(line: &TextLine, width: u16) -> Line<'static> {
    let base = match line.kind {
        TextLineKind::Heading(_) => Style::default().fg(Color::Cyan).bold(),
        TextLineKind::Code => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::White),
    };

    let mut spans = match line.kind {
        TextLineKind::Item { depth, number } => {
            let marker = match number {
                Some(number) => format!("{}. ", number),
                None => "• ".to_string(),
            };
            vec![Span::styled(
                format!("{}{}", "  ".repeat(depth + 1), marker),
                Style::default().fg(Color::DarkGray),
            )]
        }
        TextLineKind::Code => vec![Span::styled(" │ ", Style::default().fg(Color::DarkGray))],
        TextLineKind::Rule => vec![Span::styled(
            "─".repeat(width.saturating_sub(2) as usize),
            Style::default().fg(Color::DarkGray),
        )],
        _ => Vec::new(),
    };
    spans.extend(line.spans.iter().map(|span| styled_span(span, base)));
    Line::from(spans)
}

fn styled_span(span: &TextSpan, base: Style) -> Span<'static> {
    let mut style = base;
    if span.style.strong {
        style = style.bold();
    }
    if span.style.emphasis {
        style = style.italic();
    }
    if span.style.code {
        style = style.fg(Color::Yellow);
    }
    Span::styled(span.text.clone(), style)
}
