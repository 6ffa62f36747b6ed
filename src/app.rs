use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::{Generation, HistoryItem, StudyBackend};
use crate::error::{BackendError, ValidationError};
use crate::form::PromptForm;
use crate::models::{AppState, Mode, OptionLabel};
use crate::parse::ParseMode;
use crate::quiz::QuizAction;
use crate::session::{ClarificationTicket, Session};

pub const GENERATION_FAILED: &str = "Error fetching response.";
pub const HISTORY_FAILED: &str = "Could not load history.";
pub const DELETE_FAILED: &str = "Could not delete.";

/// Completion of a backend call, delivered to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    Generated {
        ticket: u64,
        mode: Mode,
        prompt: String,
        outcome: Result<Generation, BackendError>,
    },
    HistoryLoaded(Result<Vec<HistoryItem>, BackendError>),
    Clarified {
        session_id: Uuid,
        question: usize,
        seq: u64,
        outcome: Result<String, BackendError>,
    },
    Deleted {
        id: i64,
        outcome: Result<(), BackendError>,
    },
}

/// What the response screen shows.
#[derive(Debug)]
pub enum ResponsePane {
    Empty,
    Processing,
    Failed(String),
    Ready(Session),
}

#[derive(Debug, Default)]
pub struct HistoryPanel {
    pub items: Vec<HistoryItem>,
    pub selected: usize,
    /// Entry waiting for a y/n answer.
    pub confirm_delete: Option<i64>,
    pub loading: bool,
    pub status: Option<String>,
}

impl HistoryPanel {
    pub fn selected_item(&self) -> Option<&HistoryItem> {
        self.items.get(self.selected)
    }
}

pub struct App<B> {
    pub state: AppState,
    pub form: PromptForm,
    pub response: ResponsePane,
    pub history: HistoryPanel,
    pub current_question: usize,
    /// Doubt being typed for the current question.
    pub doubt_input: Option<String>,
    pub scroll: u16,
    pub should_quit: bool,
    parse_mode: ParseMode,
    generation_ticket: u64,
    backend: Arc<B>,
    events: UnboundedSender<AppEvent>,
}

impl<B: StudyBackend> App<B> {
    pub fn new(backend: Arc<B>, parse_mode: ParseMode) -> (Self, UnboundedReceiver<AppEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let app = Self {
            state: AppState::Compose,
            form: PromptForm::default(),
            response: ResponsePane::Empty,
            history: HistoryPanel::default(),
            current_question: 0,
            doubt_input: None,
            scroll: 0,
            should_quit: false,
            parse_mode,
            generation_ticket: 0,
            backend,
            events,
        };
        (app, receiver)
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.response {
            ResponsePane::Ready(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.response, ResponsePane::Processing)
    }

    pub fn show(&mut self, state: AppState) {
        self.state = state;
        if state != AppState::History {
            self.history.confirm_delete = None;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        let events = self.events.clone();
        tokio::spawn(async move {
            // Fails only once the UI loop has gone away.
            let _ = events.send(task.await);
        });
    }

    // Compose

    pub fn submit_prompt(&mut self) {
        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(err) => {
                self.form.error = Some(err.to_string());
                return;
            }
        };

        self.generation_ticket += 1;
        let ticket = self.generation_ticket;
        let mode = request.mode.clone();
        let prompt = request.prompt.clone();
        info!("Generating {} response (ticket {})", mode, ticket);

        self.replace_response(ResponsePane::Processing);
        self.show(AppState::Response);

        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            let outcome = backend.generate(request).await;
            AppEvent::Generated {
                ticket,
                mode,
                prompt,
                outcome,
            }
        });
    }

    /// Makes `session` the active one, dropping whatever was there.
    pub fn open_session(&mut self, session: Session) {
        self.replace_response(ResponsePane::Ready(session));
    }

    fn replace_response(&mut self, response: ResponsePane) {
        self.response = response;
        self.current_question = 0;
        self.doubt_input = None;
        self.scroll = 0;
    }

    // Response

    fn dispatch(&mut self, action: QuizAction) -> Result<(), ValidationError> {
        let ResponsePane::Ready(session) = &mut self.response else {
            return Ok(());
        };
        if let Some(ticket) = session.dispatch(self.current_question, action)? {
            self.request_clarification(ticket);
        }
        Ok(())
    }

    fn request_clarification(&self, ticket: ClarificationTicket) {
        let ClarificationTicket {
            session_id,
            question,
            seq,
            request,
        } = ticket;
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            let outcome = backend.clarify(request).await;
            AppEvent::Clarified {
                session_id,
                question,
                seq,
                outcome,
            }
        });
    }

    pub fn question_count(&self) -> usize {
        self.session().map_or(0, |session| session.cards().len())
    }

    pub fn select_option(&mut self, label: OptionLabel) {
        // Rejections are recorded on the card.
        let _ = self.dispatch(QuizAction::Select(label));
    }

    pub fn check_answer(&mut self) {
        let _ = self.dispatch(QuizAction::Check);
    }

    pub fn next_question(&mut self) {
        if self.current_question + 1 < self.question_count() {
            self.current_question += 1;
            self.doubt_input = None;
        }
    }

    pub fn previous_question(&mut self) {
        if self.current_question > 0 {
            self.current_question -= 1;
            self.doubt_input = None;
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn start_doubt(&mut self) {
        if self.question_count() > 0 {
            self.doubt_input = Some(String::new());
        }
    }

    pub fn cancel_doubt(&mut self) {
        self.doubt_input = None;
    }

    pub fn submit_doubt(&mut self) {
        let Some(doubt) = self.doubt_input.clone() else {
            return;
        };
        match self.dispatch(QuizAction::SubmitClarification(doubt)) {
            // Keep the input open so the doubt can be typed.
            Err(ValidationError::EmptyDoubt) => {}
            _ => self.doubt_input = None,
        }
    }

    // History

    pub fn refresh_history(&mut self) {
        self.history.loading = true;
        let backend = Arc::clone(&self.backend);
        self.spawn(async move { AppEvent::HistoryLoaded(backend.history().await) });
    }

    pub fn history_next(&mut self) {
        if self.history.selected + 1 < self.history.items.len() {
            self.history.selected += 1;
        }
        self.history.confirm_delete = None;
    }

    pub fn history_previous(&mut self) {
        self.history.selected = self.history.selected.saturating_sub(1);
        self.history.confirm_delete = None;
    }

    /// Opens the selected entry and restores its prompt and mode into the form.
    pub fn open_selected_history(&mut self) {
        let Some(item) = self.history.selected_item() else {
            return;
        };
        let session = Session::from_history(item, self.parse_mode);
        self.form.restore(&item.prompt, &item.mode);

        // A generation still in flight must not replace what was just opened.
        self.generation_ticket += 1;
        self.open_session(session);
        self.show(AppState::Response);
    }

    pub fn request_delete(&mut self) {
        self.history.confirm_delete = self.history.selected_item().map(|item| item.id);
    }

    pub fn answer_delete(&mut self, confirmed: bool) {
        let Some(id) = self.history.confirm_delete.take() else {
            return;
        };
        if !confirmed {
            return;
        }

        info!("Deleting history entry {}", id);
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            let outcome = backend.delete(id).await;
            AppEvent::Deleted { id, outcome }
        });
    }

    // Events

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Generated {
                ticket,
                mode,
                prompt,
                outcome,
            } => self.on_generated(ticket, mode, prompt, outcome),
            AppEvent::HistoryLoaded(outcome) => self.on_history_loaded(outcome),
            AppEvent::Clarified {
                session_id,
                question,
                seq,
                outcome,
            } => {
                if let Err(err) = &outcome {
                    warn!("Clarification for question {} failed: {}", question + 1, err);
                }
                if let ResponsePane::Ready(session) = &mut self.response {
                    session.resolve_clarification(
                        session_id,
                        question,
                        seq,
                        outcome.map_err(|err| err.to_string()),
                    );
                }
            }
            AppEvent::Deleted { id, outcome } => match outcome {
                Ok(()) => {
                    info!("Deleted history entry {}", id);
                    self.history.status = None;
                    self.refresh_history();
                }
                Err(err) => {
                    warn!("Delete of history entry {} failed: {}", id, err);
                    self.history.status = Some(DELETE_FAILED.to_string());
                }
            },
        }
    }

    fn on_generated(
        &mut self,
        ticket: u64,
        mode: Mode,
        prompt: String,
        outcome: Result<Generation, BackendError>,
    ) {
        if ticket != self.generation_ticket {
            debug!("Dropping stale generation {}", ticket);
            return;
        }

        match outcome {
            Ok(generation) => {
                let session = Session::from_generation(mode, prompt, generation, self.parse_mode);
                self.open_session(session);
                self.refresh_history();
            }
            Err(err) => {
                warn!("Generation {} failed: {}", ticket, err);
                let message = match err {
                    BackendError::Status {
                        message: Some(message),
                        ..
                    } => message,
                    _ => GENERATION_FAILED.to_string(),
                };
                self.replace_response(ResponsePane::Failed(message));
            }
        }
    }

    fn on_history_loaded(&mut self, outcome: Result<Vec<HistoryItem>, BackendError>) {
        self.history.loading = false;
        match outcome {
            Ok(items) => {
                debug!("Loaded {} history entries", items.len());
                self.history.selected = self.history.selected.min(items.len().saturating_sub(1));
                self.history.items = items;
                self.history.status = None;
            }
            Err(err) => {
                warn!("History refresh failed: {}", err);
                self.history.status = Some(HISTORY_FAILED.to_string());
            }
        }
    }
}
