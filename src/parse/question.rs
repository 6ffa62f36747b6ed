use std::sync::LazyLock;

use regex::Regex;

use crate::models::{OptionLabel, Question, QuizOption};

static ANSWER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)answer:").expect("answer marker pattern is valid"));
static EXPLANATION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)explanation:").expect("explanation marker pattern is valid")
});

/// Builds a [`Question`] from one block produced by
/// [`tokenize_questions`](super::tokenize_questions).
///
/// The first line is the prompt. Each later line is tested on its own
/// against the option, answer and explanation conventions; the first answer
/// and explanation lines win and anything unrecognised is ignored.
pub fn build_question(block: &str, index: usize) -> Question {
    let mut lines = block.lines();
    let prompt_text = lines.next().unwrap_or_default().to_string();

    let mut options: Vec<QuizOption> = Vec::new();
    let mut correct_label = None;
    let mut explanation = None;

    for line in lines {
        if let Some(option) = parse_option(line) {
            // Labels must strictly increase; out-of-order repeats are dropped.
            if options.last().is_none_or(|last| last.label < option.label) {
                options.push(option);
            }
        }

        if correct_label.is_none() && ANSWER_MARKER.is_match(line) {
            correct_label = Some(parse_correct_label(line));
        }

        if explanation.is_none() && EXPLANATION_MARKER.is_match(line) {
            explanation = Some(line.to_string());
        }
    }

    Question {
        index,
        prompt_text,
        options,
        correct_label: correct_label.flatten(),
        explanation,
    }
}

fn parse_option(line: &str) -> Option<QuizOption> {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    let label = chars.next().and_then(OptionLabel::from_char)?;
    if chars.next() != Some('.') {
        return None;
    }

    Some(QuizOption {
        label,
        text: trimmed[2..].trim().to_string(),
    })
}

fn parse_correct_label(line: &str) -> Option<String> {
    let (_, after) = line.split_once(':')?;
    let label = after.trim().to_uppercase();
    (!label.is_empty()).then_some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: &str =
        "What is 2+2?\nA. 3\nB. 4\nC. 5\nD. 6\nAnswer: B\nExplanation: basic arithmetic";

    #[test]
    fn test_full_block() {
        let question = build_question(BLOCK, 0);
        assert_eq!(question.prompt_text, "What is 2+2?");
        assert_eq!(question.options.len(), 4);
        assert_eq!(question.options[1].label, OptionLabel::B);
        assert_eq!(question.options[1].text, "4");
        assert_eq!(question.correct_label.as_deref(), Some("B"));
        assert_eq!(
            question.explanation.as_deref(),
            Some("Explanation: basic arithmetic")
        );
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(build_question(BLOCK, 3), build_question(BLOCK, 3));
    }

    #[test]
    fn test_prompt_kept_verbatim() {
        let question = build_question("Which is prime? (pick one)  \nA. 4", 0);
        assert_eq!(question.prompt_text, "Which is prime? (pick one)  ");
    }

    #[test]
    fn test_option_requires_single_uppercase_letter_and_period() {
        let block = "Prompt\n   A.  indented\nb. lower\nAB. double\nE. out of range\nC) paren\nD.tight";
        let question = build_question(block, 0);
        let labels: Vec<_> = question.options.iter().map(|o| o.label).collect();
        assert_eq!(labels, vec![OptionLabel::A, OptionLabel::D]);
        assert_eq!(question.options[0].text, "indented");
        assert_eq!(question.options[1].text, "tight");
    }

    #[test]
    fn test_out_of_order_labels_dropped() {
        let question = build_question("Prompt\nB. two\nA. one\nB. again\nC. three", 0);
        let labels: Vec<_> = question.options.iter().map(|o| o.label).collect();
        assert_eq!(labels, vec![OptionLabel::B, OptionLabel::C]);
    }

    #[test]
    fn test_answer_marker_case_insensitive_and_first_wins() {
        let block = "Prompt\nA. x\nthe ANSWER: c \nAnswer: A\nexplanation: first\nExplanation: second";
        let question = build_question(block, 0);
        assert_eq!(question.correct_label.as_deref(), Some("C"));
        assert_eq!(question.explanation.as_deref(), Some("explanation: first"));
    }

    #[test]
    fn test_answer_not_validated_against_options() {
        let question = build_question("Prompt\nA. x\nB. y\nAnswer: z", 0);
        assert_eq!(question.correct_label.as_deref(), Some("Z"));
    }

    #[test]
    fn test_empty_answer_is_absent() {
        let question = build_question("Prompt\nA. x\nAnswer:   ", 0);
        assert_eq!(question.correct_label, None);
    }

    #[test]
    fn test_unmatched_lines_ignored() {
        let question = build_question("Prompt\nsome chatter\n\n---", 7);
        assert_eq!(question.index, 7);
        assert!(question.options.is_empty());
        assert_eq!(question.correct_label, None);
        assert_eq!(question.explanation, None);
    }
}
