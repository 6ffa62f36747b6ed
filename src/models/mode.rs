use std::fmt;
use std::str::FromStr;

/// Generation mode requested from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    Summarize,
    Mcq,
    Explain,
    ExamPrep,
    /// A mode name this client does not know, kept verbatim from history.
    Other(String),
}

impl Mode {
    /// Modes offered by the compose form, in selector order.
    pub const SELECTABLE: [Mode; 4] = [Mode::Summarize, Mode::Mcq, Mode::Explain, Mode::ExamPrep];

    pub fn wire_name(&self) -> &str {
        match self {
            Mode::Summarize => "summarize",
            Mode::Mcq => "mcq",
            Mode::Explain => "explain",
            Mode::ExamPrep => "examprep",
            Mode::Other(name) => name,
        }
    }

    pub fn response_kind(&self) -> ResponseKind {
        match self {
            Mode::Mcq => ResponseKind::Mcq,
            Mode::ExamPrep => ResponseKind::Table,
            Mode::Summarize | Mode::Explain => ResponseKind::FreeForm { markdown: true },
            Mode::Other(_) => ResponseKind::FreeForm { markdown: false },
        }
    }

    pub fn next(&self) -> Mode {
        self.step(1)
    }

    pub fn previous(&self) -> Mode {
        self.step(Self::SELECTABLE.len() - 1)
    }

    fn step(&self, by: usize) -> Mode {
        let count = Self::SELECTABLE.len();
        let position = Self::SELECTABLE
            .iter()
            .position(|mode| mode == self)
            .unwrap_or(0);
        Self::SELECTABLE[(position + by) % count].clone()
    }
}

impl FromStr for Mode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "summarize" => Mode::Summarize,
            "mcq" => Mode::Mcq,
            "explain" => Mode::Explain,
            "examprep" => Mode::ExamPrep,
            _ => Mode::Other(s.trim().to_string()),
        })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Shape of a response, chosen once from the mode when a session opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Mcq,
    Table,
    FreeForm { markdown: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip_names() {
        for mode in Mode::SELECTABLE {
            assert_eq!(mode.wire_name().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!("MCQ".parse::<Mode>().unwrap(), Mode::Mcq);
        assert_eq!(
            "flashcards".parse::<Mode>().unwrap(),
            Mode::Other("flashcards".to_string())
        );
    }

    #[test]
    fn test_response_kind() {
        assert_eq!(Mode::Mcq.response_kind(), ResponseKind::Mcq);
        assert_eq!(Mode::ExamPrep.response_kind(), ResponseKind::Table);
        assert_eq!(
            Mode::Explain.response_kind(),
            ResponseKind::FreeForm { markdown: true }
        );
        assert_eq!(
            Mode::Other("x".into()).response_kind(),
            ResponseKind::FreeForm { markdown: false }
        );
    }

    #[test]
    fn test_mode_cycles() {
        assert_eq!(Mode::Summarize.next(), Mode::Mcq);
        assert_eq!(Mode::ExamPrep.next(), Mode::Summarize);
        assert_eq!(Mode::Summarize.previous(), Mode::ExamPrep);
    }
}
