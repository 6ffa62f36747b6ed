use std::fmt;

/// Label of a multiple-choice option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub label: OptionLabel,
    pub text: String,
}

/// One parsed multiple-choice question.
///
/// `correct_label` is whatever followed `Answer:` in the source block and is
/// not checked against `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub index: usize,
    pub prompt_text: String,
    pub options: Vec<QuizOption>,
    pub correct_label: Option<String>,
    pub explanation: Option<String>,
}

impl Question {
    pub fn option(&self, label: OptionLabel) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.label == label)
    }

    /// Text sent along with a doubt: the prompt, every option and the answer line.
    pub fn clarification_text(&self) -> String {
        let mut text = format!("Q: {}", self.prompt_text);
        for option in &self.options {
            text.push_str(&format!("\n{}. {}", option.label, option.text));
        }
        if let Some(correct) = &self.correct_label {
            text.push_str(&format!("\nAnswer: {}", correct));
        }
        text
    }
}
