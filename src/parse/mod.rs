//! Parsing of generated study content.
//!
//! Parsing is lenient: lines that fit no convention are dropped and nothing
//! here returns an error. [`ParseMode::Strict`] layers checks on top that
//! report [`ParseWarning`]s and clean up tables.

mod question;
mod table;
mod tokenizer;
mod validate;

use tracing::{debug, warn};

use crate::models::{Question, TableModel};

pub use question::build_question;
pub use table::{build_table, render_table};
pub use tokenizer::{tokenize_questions, tokenize_table_lines};
pub use validate::{ParseWarning, is_separator_row, validate_question, validate_table};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    #[default]
    Lenient,
    Strict,
}

/// A parse result together with anything strict validation flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<ParseWarning>,
}

/// Tokenizes and builds every question in `raw`.
pub fn parse_quiz(raw: &str, mode: ParseMode) -> Parsed<Vec<Question>> {
    let questions: Vec<Question> = tokenize_questions(raw)
        .into_iter()
        .enumerate()
        .map(|(index, block)| build_question(block, index))
        .collect();

    let warnings = match mode {
        ParseMode::Lenient => Vec::new(),
        ParseMode::Strict => questions.iter().flat_map(validate_question).collect(),
    };

    debug!("Parsed {} questions", questions.len());
    log_warnings(&warnings);

    Parsed {
        value: questions,
        warnings,
    }
}

/// Tokenizes and builds the table in `raw`.
pub fn parse_table(raw: &str, mode: ParseMode) -> Parsed<TableModel> {
    let table = build_table(&tokenize_table_lines(raw));

    let (value, warnings) = match mode {
        ParseMode::Lenient => (table, Vec::new()),
        ParseMode::Strict => validate_table(table),
    };

    debug!(
        "Parsed table with {} columns and {} rows",
        value.header.len(),
        value.rows.len()
    );
    log_warnings(&warnings);

    Parsed { value, warnings }
}

fn log_warnings(warnings: &[ParseWarning]) {
    for warning in warnings {
        warn!("{}", warning);
    }
}
