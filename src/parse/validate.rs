use std::fmt;

use crate::models::{Question, TableModel};

/// Something lenient parsing accepted that strict mode reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// The `Answer:` label names no parsed option.
    UnmatchedCorrectLabel { question: usize, label: String },
    /// The question has no `Answer:` line at all.
    MissingCorrectLabel { question: usize },
    /// A body row whose width differs from the header. `row` is its index
    /// among body rows before any were dropped.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A markdown `|---|---|` separator row.
    SeparatorRow { row: usize },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::UnmatchedCorrectLabel { question, label } => write!(
                f,
                "Question {} names answer '{}' which is not one of its options",
                question + 1,
                label
            ),
            ParseWarning::MissingCorrectLabel { question } => {
                write!(f, "Question {} has no answer line", question + 1)
            }
            ParseWarning::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "Table row {} has {} cells, header has {}",
                row + 1,
                found,
                expected
            ),
            ParseWarning::SeparatorRow { row } => {
                write!(f, "Table row {} is a separator row", row + 1)
            }
        }
    }
}

pub fn validate_question(question: &Question) -> Vec<ParseWarning> {
    let Some(label) = &question.correct_label else {
        return vec![ParseWarning::MissingCorrectLabel {
            question: question.index,
        }];
    };

    let matches_option = question
        .options
        .iter()
        .any(|option| option.label.as_str() == label);

    if matches_option {
        Vec::new()
    } else {
        vec![ParseWarning::UnmatchedCorrectLabel {
            question: question.index,
            label: label.clone(),
        }]
    }
}

/// Drops separator rows and rows whose width differs from the header.
pub fn validate_table(table: TableModel) -> (TableModel, Vec<ParseWarning>) {
    let expected = table.header.len();
    let mut warnings = Vec::new();
    let mut rows = Vec::with_capacity(table.rows.len());

    for (row, cells) in table.rows.into_iter().enumerate() {
        if is_separator_row(&cells) {
            warnings.push(ParseWarning::SeparatorRow { row });
        } else if cells.len() != expected {
            warnings.push(ParseWarning::RaggedRow {
                row,
                expected,
                found: cells.len(),
            });
        } else {
            rows.push(cells);
        }
    }

    (
        TableModel {
            header: table.header,
            rows,
        },
        warnings,
    )
}

/// True for rows like `|---|:--:|` where every cell is dashes with optional colons.
pub fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let cell = cell.trim_matches(':');
            !cell.is_empty() && cell.chars().all(|c| c == '-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::build_question;

    #[test]
    fn test_matching_answer_is_clean() {
        let question = build_question("Prompt\nA. x\nB. y\nAnswer: b", 0);
        assert!(validate_question(&question).is_empty());
    }

    #[test]
    fn test_missing_answer() {
        let question = build_question("Prompt\nA. x", 2);
        assert_eq!(
            validate_question(&question),
            vec![ParseWarning::MissingCorrectLabel { question: 2 }]
        );
    }

    #[test]
    fn test_ragged_rows_dropped() {
        let table = TableModel {
            header: vec!["a".into(), "b".into()],
            rows: vec![vec!["1".into()], vec!["1".into(), "2".into()]],
        };
        let (table, warnings) = validate_table(table);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(
            warnings,
            vec![ParseWarning::RaggedRow {
                row: 0,
                expected: 2,
                found: 1
            }]
        );
    }

    #[test]
    fn test_separator_detection() {
        let sep: Vec<String> = vec!["---".into(), ":--:".into()];
        let data: Vec<String> = vec!["---".into(), "x".into()];
        assert!(is_separator_row(&sep));
        assert!(!is_separator_row(&data));
        assert!(!is_separator_row(&[]));
        assert!(!is_separator_row(&[":".to_string()]));
    }

    #[test]
    fn test_warning_display_is_one_based() {
        let warning = ParseWarning::SeparatorRow { row: 0 };
        assert_eq!(warning.to_string(), "Table row 1 is a separator row");
    }
}
