use crate::error::ValidationError;
use crate::models::{OptionLabel, Question};

use super::state::{AnswerPhase, ClarificationState, QuizInteractionState};

/// Everything that can happen to one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizAction {
    Select(OptionLabel),
    Check,
    SubmitClarification(String),
    ClarificationResolved {
        seq: u64,
        outcome: ClarificationOutcome,
    },
}

/// Result of a clarification call as seen by the state machine.
pub type ClarificationOutcome = Result<String, String>;

/// What the backend needs to answer a doubt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClarificationRequest {
    pub question_text: String,
    pub doubt_text: String,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: QuizInteractionState,
    /// Set when the action must be followed by a clarification call,
    /// tagged with the sequence number the response has to carry.
    pub request: Option<(u64, ClarificationRequest)>,
}

impl Transition {
    fn to(state: QuizInteractionState) -> Self {
        Self {
            state,
            request: None,
        }
    }
}

/// Applies `action` to `state`. `context` is the source material of the
/// response the question came from.
///
/// On `Err` the caller keeps the old state.
pub fn reduce(
    state: &QuizInteractionState,
    question: &Question,
    context: &str,
    action: QuizAction,
) -> Result<Transition, ValidationError> {
    match action {
        QuizAction::Select(label) => select(state, question, label),
        QuizAction::Check => check(state, question),
        QuizAction::SubmitClarification(doubt) => submit_clarification(state, question, context, doubt),
        QuizAction::ClarificationResolved { seq, outcome } => {
            Ok(Transition::to(resolve_clarification(state, seq, outcome)))
        }
    }
}

fn select(
    state: &QuizInteractionState,
    question: &Question,
    label: OptionLabel,
) -> Result<Transition, ValidationError> {
    if state.checked() {
        return Ok(Transition::to(state.clone()));
    }
    if question.option(label).is_none() {
        return Err(ValidationError::UnknownOption(label));
    }

    Ok(Transition::to(QuizInteractionState {
        phase: AnswerPhase::Selected(label),
        ..state.clone()
    }))
}

fn check(
    state: &QuizInteractionState,
    question: &Question,
) -> Result<Transition, ValidationError> {
    let label = state.selected_label().ok_or(ValidationError::NoSelection)?;
    let correct = question
        .correct_label
        .as_deref()
        .is_some_and(|correct| correct == label.as_str());

    Ok(Transition::to(QuizInteractionState {
        phase: AnswerPhase::Checked { label, correct },
        clarification: ClarificationState::default(),
        issued_seq: state.issued_seq,
    }))
}

fn submit_clarification(
    state: &QuizInteractionState,
    question: &Question,
    context: &str,
    doubt: String,
) -> Result<Transition, ValidationError> {
    if !state.checked() {
        return Err(ValidationError::NotChecked);
    }
    let doubt = doubt.trim();
    if doubt.is_empty() {
        return Err(ValidationError::EmptyDoubt);
    }

    let seq = state.issued_seq + 1;
    let request = ClarificationRequest {
        question_text: question.clarification_text(),
        doubt_text: doubt.to_string(),
        context: context.to_string(),
    };

    Ok(Transition {
        state: QuizInteractionState {
            phase: state.phase,
            clarification: ClarificationState {
                pending: true,
                doubt_text: Some(doubt.to_string()),
                answer_text: None,
                error: None,
                latest_seq: Some(seq),
            },
            issued_seq: seq,
        },
        request: Some((seq, request)),
    })
}

fn resolve_clarification(
    state: &QuizInteractionState,
    seq: u64,
    outcome: ClarificationOutcome,
) -> QuizInteractionState {
    let clarification = &state.clarification;
    if !clarification.pending || clarification.latest_seq != Some(seq) {
        return state.clone();
    }

    let (answer_text, error) = match outcome {
        Ok(answer) => (Some(answer), None),
        Err(error) => (None, Some(error)),
    };

    QuizInteractionState {
        clarification: ClarificationState {
            pending: false,
            answer_text,
            error,
            ..clarification.clone()
        },
        ..state.clone()
    }
}
