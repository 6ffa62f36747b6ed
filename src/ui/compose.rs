use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::form::{FormField, PromptForm};

const CONTROLS: &str = "tab next field  ·  ←/→ mode  ·  enter generate  ·  esc response  ·  ctrl-c quit";

pub fn render(frame: &mut Frame, area: Rect, form: &PromptForm) -> &'static str {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .split(area);

    let title = Paragraph::new("NEW PROMPT").fg(Color::Cyan).bold();
    frame.render_widget(title, chunks[0]);

    render_fields(frame, chunks[1], form);
    render_error(frame, chunks[2], form.error.as_deref());
    CONTROLS
}

fn render_fields(frame: &mut Frame, area: Rect, form: &PromptForm) {
    let mut lines: Vec<Line> = Vec::new();

    for field in form.visible_fields() {
        let focused = field == form.focus;
        let label_style = if focused {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let marker = if focused { ">" } else { " " };

        let value = match field {
            FormField::Mode => format!("< {} >", form.mode),
            _ if focused => format!("{}_", form.value(field)),
            _ => form.value(field).to_string(),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), label_style),
            Span::styled(format!("{:<16}", field.label()), label_style),
            Span::styled(value, Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_error(frame: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(error) = error {
        let widget = Paragraph::new(error).fg(Color::Red);
        frame.render_widget(widget, area);
    }
}
