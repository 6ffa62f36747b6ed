use crate::models::OptionLabel;

/// Where a question is in the select/check flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerPhase {
    #[default]
    Unanswered,
    Selected(OptionLabel),
    Checked { label: OptionLabel, correct: bool },
}

/// The doubt dialogue that opens once a question has been checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClarificationState {
    pub pending: bool,
    pub doubt_text: Option<String>,
    pub answer_text: Option<String>,
    pub error: Option<String>,
    /// Sequence number of the latest request issued since the last reset.
    pub latest_seq: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizInteractionState {
    pub phase: AnswerPhase,
    pub clarification: ClarificationState,
    /// Last sequence number handed out. Never reset, so responses to
    /// requests issued before a re-check cannot match a later one.
    pub(crate) issued_seq: u64,
}

impl QuizInteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_label(&self) -> Option<OptionLabel> {
        match self.phase {
            AnswerPhase::Unanswered => None,
            AnswerPhase::Selected(label) | AnswerPhase::Checked { label, .. } => Some(label),
        }
    }

    pub fn checked(&self) -> bool {
        matches!(self.phase, AnswerPhase::Checked { .. })
    }

    /// `Some` exactly when the question has been checked.
    pub fn is_correct(&self) -> Option<bool> {
        match self.phase {
            AnswerPhase::Checked { correct, .. } => Some(correct),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_follow_phase() {
        let mut state = QuizInteractionState::new();
        assert_eq!(state.selected_label(), None);
        assert!(!state.checked());
        assert_eq!(state.is_correct(), None);

        state.phase = AnswerPhase::Selected(OptionLabel::C);
        assert_eq!(state.selected_label(), Some(OptionLabel::C));
        assert_eq!(state.is_correct(), None);

        state.phase = AnswerPhase::Checked {
            label: OptionLabel::C,
            correct: false,
        };
        assert!(state.checked());
        assert_eq!(state.is_correct(), Some(false));
        assert_eq!(state.selected_label(), Some(OptionLabel::C));
    }
}
