//! Per-question interaction state and the reducer that drives it.
//!
//! Every question owns one [`QuizInteractionState`]. User actions and
//! clarification completions go through [`reduce`], which never mutates in
//! place and never touches sibling questions.

mod reducer;
mod state;

pub use reducer::{ClarificationOutcome, ClarificationRequest, QuizAction, Transition, reduce};
pub use state::{AnswerPhase, ClarificationState, QuizInteractionState};
