//! # study-deck
//!
//! A terminal client for an AI study assistant. Generated summaries, quizzes,
//! explanations and exam plans are parsed into structured content; quizzes
//! can be answered question by question, with follow-up doubts sent back to
//! the assistant.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use study_deck::{AppError, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     study_deck::run(Config::default()).await
//! }
//! ```
//!
//! The parsing and quiz layers work without a terminal:
//!
//! ```rust
//! use study_deck::parse::{ParseMode, parse_quiz};
//!
//! let parsed = parse_quiz("Q: 2+2?\nA. 3\nB. 4\nAnswer: B", ParseMode::Lenient);
//! assert_eq!(parsed.value[0].correct_label.as_deref(), Some("B"));
//! ```

mod app;
pub mod backend;
mod config;
pub mod error;
mod form;
pub mod logging;
pub mod models;
pub mod parse;
pub mod protocol;
pub mod quiz;
pub mod session;
pub mod terminal;
mod ui;
pub mod view;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

pub use app::{App, AppEvent, HistoryPanel, ResponsePane};
pub use backend::{HttpBackend, StudyBackend};
pub use config::{Config, DEFAULT_BACKEND_URL, DEFAULT_LOG_FILE, OfflineResponse};
pub use error::{AppError, AppResult};
pub use form::{FormField, PromptForm};
pub use models::AppState;

use models::OptionLabel;
use session::{ResponseSource, Session};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the application until the user quits.
///
/// Takes over the terminal for the duration of the call.
pub async fn run(config: Config) -> AppResult<()> {
    info!("Using backend at {}", config.backend_url);
    let backend = HttpBackend::new(config.backend_url.as_str()).map_err(AppError::Client)?;
    let (mut app, mut events) = App::new(Arc::new(backend), config.parse_mode());

    if let Some(offline) = &config.open {
        let response_text = tokio::fs::read_to_string(&offline.path)
            .await
            .map_err(|source| AppError::Load {
                path: offline.path.clone(),
                source,
            })?;
        info!("Opening {} offline", offline.path.display());
        app.open_session(Session::open(
            ResponseSource {
                mode: offline.mode.clone(),
                prompt: String::new(),
                response_text,
                context: String::new(),
            },
            config.parse_mode(),
        ));
        app.show(AppState::Response);
    }
    app.refresh_history();

    let mut screen = terminal::Screen::enter()?;
    run_event_loop(screen.terminal(), &mut app, &mut events)
}

fn run_event_loop<B: StudyBackend>(
    terminal: &mut terminal::AppTerminal,
    app: &mut App<B>,
    events: &mut UnboundedReceiver<AppEvent>,
) -> AppResult<()> {
    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(app, key) {
                    break;
                }
            }
        }
    }

    info!("Exiting");
    Ok(())
}

/// Returns true if the app should exit.
fn handle_input<B: StudyBackend>(app: &mut App<B>, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return true;
    }

    match app.state {
        AppState::Compose => handle_compose_input(app, key.code),
        AppState::Response => handle_response_input(app, key.code),
        AppState::History => handle_history_input(app, key.code),
    }
    app.should_quit
}

fn handle_compose_input<B: StudyBackend>(app: &mut App<B>, key: KeyCode) {
    match key {
        KeyCode::Enter => app.submit_prompt(),
        KeyCode::Esc => app.show(AppState::Response),
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_previous(),
        KeyCode::Left if app.form.focus == FormField::Mode => app.form.cycle_mode(false),
        KeyCode::Right if app.form.focus == FormField::Mode => app.form.cycle_mode(true),
        KeyCode::Char(' ') if app.form.focus == FormField::Mode => app.form.cycle_mode(true),
        KeyCode::Char(c) => app.form.push(c),
        KeyCode::Backspace => app.form.pop(),
        _ => {}
    }
}

fn handle_response_input<B: StudyBackend>(app: &mut App<B>, key: KeyCode) {
    if app.doubt_input.is_some() {
        handle_doubt_input(app, key);
        return;
    }

    let is_quiz = app.question_count() > 0;
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.show(AppState::Compose),
        KeyCode::Char('h') | KeyCode::Char('H') => app.show(AppState::History),
        KeyCode::Down | KeyCode::Char('j') if is_quiz => app.next_question(),
        KeyCode::Up | KeyCode::Char('k') if is_quiz => app.previous_question(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        KeyCode::Enter if is_quiz => app.check_answer(),
        KeyCode::Char('?') if is_quiz => app.start_doubt(),
        KeyCode::Char(c) if is_quiz => {
            if let Some(label) = OptionLabel::from_char(c.to_ascii_uppercase()) {
                app.select_option(label);
            }
        }
        _ => {}
    }
}

fn handle_doubt_input<B: StudyBackend>(app: &mut App<B>, key: KeyCode) {
    match key {
        KeyCode::Enter => app.submit_doubt(),
        KeyCode::Esc => app.cancel_doubt(),
        KeyCode::Backspace => {
            if let Some(input) = app.doubt_input.as_mut() {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.doubt_input.as_mut() {
                input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_history_input<B: StudyBackend>(app: &mut App<B>, key: KeyCode) {
    if app.history.confirm_delete.is_some() {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_delete(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_delete(false),
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Down | KeyCode::Char('j') => app.history_next(),
        KeyCode::Up | KeyCode::Char('k') => app.history_previous(),
        KeyCode::Enter => app.open_selected_history(),
        KeyCode::Char('d') | KeyCode::Char('D') => app.request_delete(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.refresh_history(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.show(AppState::Compose),
        KeyCode::Esc => app.show(AppState::Response),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::{FakeBackend, history_item};
    use crate::models::Mode;
    use crate::parse::ParseMode;

    const QUIZ: &str = "Q: What is 2+2?\nA. 3\nB. 4\nAnswer: B";

    fn app_with_quiz() -> App<FakeBackend> {
        let (mut app, _events) = App::new(Arc::new(FakeBackend::default()), ParseMode::Lenient);
        app.open_session(Session::open(
            ResponseSource {
                mode: Mode::Mcq,
                prompt: String::new(),
                response_text: QUIZ.to_string(),
                context: String::new(),
            },
            ParseMode::Lenient,
        ));
        app.show(AppState::Response);
        app
    }

    fn press(app: &mut App<FakeBackend>, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn card_is_correct(app: &App<FakeBackend>) -> Option<bool> {
        app.session().unwrap().cards()[0].state.is_correct()
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = app_with_quiz();
        app.show(AppState::Compose);
        assert!(handle_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn test_compose_typing_does_not_quit() {
        let mut app = app_with_quiz();
        app.show(AppState::Compose);
        for c in "quiz".chars() {
            assert!(!press(&mut app, KeyCode::Char(c)));
        }
        assert_eq!(app.form.prompt, "quiz");
    }

    #[test]
    fn test_compose_mode_cycling() {
        let mut app = app_with_quiz();
        app.show(AppState::Compose);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form.focus, FormField::Mode);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.mode, Mode::Mcq);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.form.mode, Mode::Summarize);
    }

    #[test]
    fn test_answer_keys() {
        let mut app = app_with_quiz();
        press(&mut app, KeyCode::Enter);
        assert_eq!(card_is_correct(&app), None);

        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(card_is_correct(&app), Some(true));
    }

    #[test]
    fn test_doubt_input_captures_keys() {
        let mut app = app_with_quiz();
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.doubt_input.as_deref(), Some("q"));
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.doubt_input, None);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_text_responses_scroll() {
        let (mut app, _events) = App::new(Arc::new(FakeBackend::default()), ParseMode::Lenient);
        app.show(AppState::Response);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.scroll, 1);
    }

    #[test]
    fn test_history_delete_confirmation_keys() {
        let mut app = app_with_quiz();
        app.history.items = vec![history_item(5, Mode::Mcq, "p", QUIZ)];
        app.show(AppState::History);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.history.confirm_delete, Some(5));
        // Navigation is blocked until the prompt is answered.
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.history.confirm_delete, None);
        assert_eq!(app.state, AppState::History);
    }
}
