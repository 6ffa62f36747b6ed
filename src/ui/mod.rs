mod compose;
mod history;
mod quiz;
mod response;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::backend::StudyBackend;
use crate::models::AppState;

const TABS: [(AppState, &str); 3] = [
    (AppState::Compose, "Prompt"),
    (AppState::Response, "Response"),
    (AppState::History, "History"),
];

pub fn render<B: StudyBackend>(frame: &mut Frame, app: &App<B>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_tabs(frame, chunks[0], app.state);

    let controls = match app.state {
        AppState::Compose => compose::render(frame, chunks[1], &app.form),
        AppState::Response => response::render(frame, chunks[1], app),
        AppState::History => history::render(frame, chunks[1], &app.history),
    };
    render_controls(frame, chunks[2], controls);
}

fn render_tabs(frame: &mut Frame, area: Rect, current: AppState) {
    let mut spans = Vec::with_capacity(TABS.len() * 2);
    for (state, title) in TABS {
        let style = if state == current {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", title), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_controls(frame: &mut Frame, area: Rect, controls: &str) {
    let widget = Paragraph::new(controls)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
