//! Display-ready projections of the session.
//!
//! Everything here is a pure function of domain values. The `ui` module
//! only draws what these functions return.

mod text;

pub use text::{SpanStyle, TextLine, TextLineKind, TextSpan, project_text};

use crate::models::{OptionLabel, TableModel};
use crate::quiz::ClarificationState;
use crate::session::QuizCard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView<'a> {
    pub label: OptionLabel,
    pub text: &'a str,
    pub selected: bool,
    /// After checking: whether this option is the correct one.
    pub is_answer: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarificationView<'a> {
    /// The question has not been checked yet.
    Hidden,
    Idle,
    Pending { doubt: &'a str },
    Answered { doubt: &'a str, answer: &'a str },
    Failed { doubt: &'a str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView<'a> {
    pub heading: String,
    pub options: Vec<OptionView<'a>>,
    pub verdict: Option<Verdict>,
    pub explanation: Option<&'a str>,
    pub notice: Option<&'a str>,
    pub clarification: ClarificationView<'a>,
}

pub fn project_question(card: &QuizCard) -> QuestionView<'_> {
    let question = &card.question;
    let state = &card.state;
    let checked = state.checked();
    let selected = state.selected_label();
    let correct_label = question.correct_label.as_deref();

    let options = question
        .options
        .iter()
        .map(|option| OptionView {
            label: option.label,
            text: &option.text,
            selected: selected == Some(option.label),
            is_answer: checked.then(|| correct_label == Some(option.label.as_str())),
        })
        .collect();

    let verdict = state.is_correct().map(|correct| Verdict {
        correct,
        message: if correct {
            "Correct!".to_string()
        } else {
            format!("Wrong. Correct: {}", correct_label.unwrap_or("?"))
        },
    });

    QuestionView {
        heading: format!("Q{}: {}", question.index + 1, question.prompt_text),
        options,
        verdict,
        explanation: if checked {
            question.explanation.as_deref()
        } else {
            None
        },
        notice: card.notice.as_deref(),
        clarification: if checked {
            project_clarification(&state.clarification)
        } else {
            ClarificationView::Hidden
        },
    }
}

fn project_clarification(clarification: &ClarificationState) -> ClarificationView<'_> {
    let doubt = clarification.doubt_text.as_deref().unwrap_or_default();

    if clarification.pending {
        return ClarificationView::Pending { doubt };
    }
    if let Some(answer) = &clarification.answer_text {
        return ClarificationView::Answered { doubt, answer };
    }
    if let Some(error) = &clarification.error {
        return ClarificationView::Failed {
            doubt,
            message: format!("Could not fetch explanation: {}", error),
        };
    }
    ClarificationView::Idle
}

/// Progress over all questions of a quiz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizScore {
    pub total: usize,
    pub checked: usize,
    pub correct: usize,
}

pub fn project_score(cards: &[QuizCard]) -> QuizScore {
    cards.iter().fold(
        QuizScore {
            total: cards.len(),
            ..QuizScore::default()
        },
        |mut score, card| {
            if let Some(correct) = card.state.is_correct() {
                score.checked += 1;
                score.correct += usize::from(correct);
            }
            score
        },
    )
}

/// A table with every row padded to the widest row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView<'a> {
    pub header: Vec<&'a str>,
    pub rows: Vec<Vec<&'a str>>,
    pub columns: usize,
}

pub fn project_table(table: &TableModel) -> TableView<'_> {
    let columns = table.column_count();
    TableView {
        header: pad_cells(&table.header, columns),
        rows: table.rows.iter().map(|row| pad_cells(row, columns)).collect(),
        columns,
    }
}

fn pad_cells(cells: &[String], columns: usize) -> Vec<&str> {
    let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
    padded.resize(columns, "");
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mode;
    use crate::parse::ParseMode;
    use crate::quiz::QuizAction;
    use crate::session::{ResponseSource, Session};

    fn session() -> Session {
        Session::open(
            ResponseSource {
                mode: Mode::Mcq,
                prompt: String::new(),
                response_text: "Q: What is 2+2?\nA. 3\nB. 4\nAnswer: B\nExplanation: adding".into(),
                context: String::new(),
            },
            ParseMode::Lenient,
        )
    }

    #[test]
    fn test_unanswered_view() {
        let session = session();
        let view = project_question(&session.cards()[0]);
        assert_eq!(view.heading, "Q1: What is 2+2?");
        assert_eq!(view.options.len(), 2);
        assert!(view.options.iter().all(|o| !o.selected && o.is_answer.is_none()));
        assert_eq!(view.verdict, None);
        assert_eq!(view.explanation, None);
        assert_eq!(view.clarification, ClarificationView::Hidden);
    }

    #[test]
    fn test_wrong_answer_view() {
        let mut session = session();
        session.dispatch(0, QuizAction::Select(OptionLabel::A)).unwrap();
        session.dispatch(0, QuizAction::Check).unwrap();

        let view = project_question(&session.cards()[0]);
        let verdict = view.verdict.unwrap();
        assert!(!verdict.correct);
        assert_eq!(verdict.message, "Wrong. Correct: B");
        assert_eq!(view.explanation, Some("Explanation: adding"));
        assert!(view.options[0].selected);
        assert_eq!(view.options[0].is_answer, Some(false));
        assert_eq!(view.options[1].is_answer, Some(true));
        assert_eq!(view.clarification, ClarificationView::Idle);
    }

    #[test]
    fn test_clarification_views() {
        let mut session = session();
        session.dispatch(0, QuizAction::Select(OptionLabel::B)).unwrap();
        session.dispatch(0, QuizAction::Check).unwrap();
        let ticket = session
            .dispatch(0, QuizAction::SubmitClarification("why?".into()))
            .unwrap()
            .unwrap();

        assert_eq!(
            project_question(&session.cards()[0]).clarification,
            ClarificationView::Pending { doubt: "why?" }
        );

        let id = session.id;
        session.resolve_clarification(id, 0, ticket.seq, Err("timeout".into()));
        assert_eq!(
            project_question(&session.cards()[0]).clarification,
            ClarificationView::Failed {
                doubt: "why?",
                message: "Could not fetch explanation: timeout".into()
            }
        );
    }

    #[test]
    fn test_score() {
        let mut session = session();
        assert_eq!(
            project_score(session.cards()),
            QuizScore {
                total: 1,
                checked: 0,
                correct: 0
            }
        );
        session.dispatch(0, QuizAction::Select(OptionLabel::B)).unwrap();
        session.dispatch(0, QuizAction::Check).unwrap();
        assert_eq!(project_score(session.cards()).correct, 1);
    }

    #[test]
    fn test_ragged_table_padded() {
        let table = TableModel {
            header: vec!["a".into(), "b".into()],
            rows: vec![vec!["1".into()], vec!["1".into(), "2".into(), "3".into()]],
        };
        let view = project_table(&table);
        assert_eq!(view.columns, 3);
        assert_eq!(view.header, vec!["a", "b", ""]);
        assert_eq!(view.rows[0], vec!["1", "", ""]);
    }
}
