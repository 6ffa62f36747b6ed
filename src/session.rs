//! The active response.
//!
//! A [`Session`] is opened the same way whether its text came from a live
//! generation, a history entry or a file on disk, and is replaced wholesale
//! by the next one.

use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::{Generation, HistoryItem};
use crate::error::ValidationError;
use crate::models::{Mode, Question, ResponseKind, TableModel};
use crate::parse::{ParseMode, ParseWarning, parse_quiz, parse_table};
use crate::quiz::{
    ClarificationOutcome, ClarificationRequest, QuizAction, QuizInteractionState, reduce,
};

/// A question together with its interaction state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCard {
    pub question: Question,
    pub state: QuizInteractionState,
    /// Last validation message for this question, cleared by the next
    /// accepted action.
    pub notice: Option<String>,
}

impl QuizCard {
    fn new(question: Question) -> Self {
        Self {
            question,
            state: QuizInteractionState::new(),
            notice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionContent {
    Quiz(Vec<QuizCard>),
    Table(TableModel),
    FreeForm { text: String, markdown: bool },
}

/// Raw material for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSource {
    pub mode: Mode,
    pub prompt: String,
    pub response_text: String,
    pub context: String,
}

/// An outgoing clarification call, addressed so its answer can find the way
/// back to the right question of the right session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClarificationTicket {
    pub session_id: Uuid,
    pub question: usize,
    pub seq: u64,
    pub request: ClarificationRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub mode: Mode,
    pub kind: ResponseKind,
    pub prompt: String,
    pub response_text: String,
    /// Source material the response was generated from, sent back with
    /// every doubt.
    pub context: String,
    pub content: SessionContent,
    pub warnings: Vec<ParseWarning>,
}

impl Session {
    pub fn open(source: ResponseSource, parse_mode: ParseMode) -> Self {
        let mut kind = source.mode.response_kind();
        let mut warnings = Vec::new();

        let content = match kind {
            ResponseKind::Mcq => {
                let parsed = parse_quiz(&source.response_text, parse_mode);
                if parsed.value.is_empty() {
                    // No `Q:` marker: an error message or a chatty refusal.
                    kind = ResponseKind::FreeForm { markdown: false };
                    SessionContent::FreeForm {
                        text: source.response_text.clone(),
                        markdown: false,
                    }
                } else {
                    warnings = parsed.warnings;
                    SessionContent::Quiz(parsed.value.into_iter().map(QuizCard::new).collect())
                }
            }
            ResponseKind::Table => {
                let parsed = parse_table(&source.response_text, parse_mode);
                warnings = parsed.warnings;
                SessionContent::Table(parsed.value)
            }
            ResponseKind::FreeForm { markdown } => SessionContent::FreeForm {
                text: source.response_text.clone(),
                markdown,
            },
        };

        let session = Self {
            id: Uuid::new_v4(),
            mode: source.mode,
            kind,
            prompt: source.prompt,
            response_text: source.response_text,
            context: source.context,
            content,
            warnings,
        };
        info!(
            "Opened {} session {} ({:?})",
            session.mode, session.id, session.kind
        );
        session
    }

    pub fn from_generation(
        mode: Mode,
        prompt: String,
        generation: Generation,
        parse_mode: ParseMode,
    ) -> Self {
        Self::open(
            ResponseSource {
                mode,
                prompt,
                response_text: generation.response_text,
                context: generation.context,
            },
            parse_mode,
        )
    }

    pub fn from_history(item: &HistoryItem, parse_mode: ParseMode) -> Self {
        Self::open(
            ResponseSource {
                mode: item.mode.clone(),
                prompt: item.prompt.clone(),
                response_text: item.response_text.clone(),
                context: item.context.clone(),
            },
            parse_mode,
        )
    }

    pub fn cards(&self) -> &[QuizCard] {
        match &self.content {
            SessionContent::Quiz(cards) => cards,
            _ => &[],
        }
    }

    pub fn card(&self, question: usize) -> Option<&QuizCard> {
        self.cards().get(question)
    }

    /// Runs a user action against one question.
    ///
    /// A rejected action leaves the state alone and stores the message as the
    /// card's notice. Returns the clarification call to make, if any.
    pub fn dispatch(
        &mut self,
        question: usize,
        action: QuizAction,
    ) -> Result<Option<ClarificationTicket>, ValidationError> {
        let session_id = self.id;
        let context = &self.context;
        let SessionContent::Quiz(cards) = &mut self.content else {
            return Ok(None);
        };
        let Some(card) = cards.get_mut(question) else {
            return Ok(None);
        };

        match reduce(&card.state, &card.question, context, action) {
            Ok(transition) => {
                card.state = transition.state;
                card.notice = None;
                Ok(transition.request.map(|(seq, request)| {
                    debug!("Question {} issued clarification #{}", question + 1, seq);
                    ClarificationTicket {
                        session_id,
                        question,
                        seq,
                        request,
                    }
                }))
            }
            Err(err) => {
                card.notice = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Applies a clarification answer. Answers meant for another session or
    /// for a superseded request are dropped.
    pub fn resolve_clarification(
        &mut self,
        session_id: Uuid,
        question: usize,
        seq: u64,
        outcome: ClarificationOutcome,
    ) {
        if session_id != self.id {
            debug!("Dropping clarification for replaced session {}", session_id);
            return;
        }
        let SessionContent::Quiz(cards) = &mut self.content else {
            return;
        };
        let Some(card) = cards.get_mut(question) else {
            return;
        };

        // Not a user action, so the card's notice stays.
        let action = QuizAction::ClarificationResolved { seq, outcome };
        if let Ok(transition) = reduce(&card.state, &card.question, &self.context, action) {
            card.state = transition.state;
        }
    }
}
