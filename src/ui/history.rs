use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::HistoryPanel;

const PROMPT_PREVIEW_LENGTH: usize = 55;
const CONTROLS: &str = "j/k navigate  ·  enter open  ·  d delete  ·  r refresh  ·  n new  ·  q quit";
const CONFIRM_CONTROLS: &str = "y delete  ·  n keep";

pub fn render(frame: &mut Frame, area: Rect, history: &HistoryPanel) -> &'static str {
    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(2)]).split(area);

    render_entries(frame, chunks[0], history);
    render_status(frame, chunks[1], history);

    if history.confirm_delete.is_some() {
        CONFIRM_CONTROLS
    } else {
        CONTROLS
    }
}

fn render_entries(frame: &mut Frame, area: Rect, history: &HistoryPanel) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Color::DarkGray)
        .padding(Padding::horizontal(1));

    if history.items.is_empty() {
        let message = if history.loading {
            "Loading..."
        } else {
            "No history yet."
        };
        frame.render_widget(Paragraph::new(message).fg(Color::DarkGray).block(block), area);
        return;
    }

    let lines: Vec<Line> = history
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let is_selected = index == history.selected;
            let style = if is_selected {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if is_selected { ">" } else { " " };

            Line::from(vec![
                Span::styled(format!(" {} ", marker), style),
                Span::styled(
                    format!("{:<16} ", item.display_time()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{:<9} ", item.mode.wire_name()), Style::default().fg(Color::Yellow)),
                Span::styled(truncate_prompt(&item.prompt), style),
            ])
        })
        .collect();

    // Keep the selection on screen.
    let visible = area.height.saturating_sub(1) as usize;
    let scroll = (history.selected + 1).saturating_sub(visible);

    let widget = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, history: &HistoryPanel) {
    let line = if history.confirm_delete.is_some() {
        Line::from(Span::styled(
            "Delete this chat?",
            Style::default().fg(Color::Yellow).bold(),
        ))
    } else if let Some(status) = &history.status {
        Line::from(Span::styled(status.as_str(), Style::default().fg(Color::Red)))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn truncate_prompt(text: &str) -> String {
    let text = if text.trim().is_empty() {
        "(file upload)"
    } else {
        text.lines().next().unwrap_or_default()
    };

    let char_count = text.chars().count();
    if char_count > PROMPT_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(PROMPT_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_prompt() {
        assert_eq!(truncate_prompt("short"), "short");
        assert_eq!(truncate_prompt("  "), "(file upload)");
        assert_eq!(truncate_prompt("first\nsecond"), "first");

        let long = "x".repeat(60);
        assert_eq!(truncate_prompt(&long), format!("{}...", "x".repeat(55)));
    }
}
