use std::sync::LazyLock;

use regex::Regex;

static QUESTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Q:\s*").expect("question marker pattern is valid"));

/// Splits `raw` into one block per `Q:` marker, in order of appearance.
///
/// Text before the first marker and whitespace-only blocks are discarded.
pub fn tokenize_questions(raw: &str) -> Vec<&str> {
    QUESTION_MARKER
        .split(raw)
        .skip(1)
        .filter(|block| !block.trim().is_empty())
        .collect()
}

/// Keeps the lines of `raw` that begin and end with `|`.
///
/// Surrounding whitespace disqualifies a line; only a trailing `\r` from a
/// CRLF line break is removed.
pub fn tokenize_table_lines(raw: &str) -> Vec<&str> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| is_qualifying_line(line))
        .collect()
}

fn is_qualifying_line(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('|') && line.ends_with('|')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_block_per_marker() {
        let raw = "Q: first?\nA. x\nQ:second?\nQ:   third?";
        let blocks = tokenize_questions(raw);
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with("first?"));
        assert_eq!(blocks[1], "second?\n");
        assert_eq!(blocks[2], "third?");
    }

    #[test]
    fn test_leading_text_and_empty_blocks_discarded() {
        let raw = "Sure! Here is a quiz:\nQ:\n\nQ: real question\nA. yes";
        let blocks = tokenize_questions(raw);
        assert_eq!(blocks, vec!["real question\nA. yes"]);
    }

    #[test]
    fn test_no_marker_means_no_blocks() {
        assert!(tokenize_questions("Just a summary.\nq: lowercase").is_empty());
        assert!(tokenize_questions("").is_empty());
    }

    #[test]
    fn test_block_count_matches_marker_count() {
        for n in 0..20 {
            let raw: String = (0..n).map(|i| format!("Q: question {}\n", i)).collect();
            let blocks = tokenize_questions(&raw);
            assert_eq!(blocks.len(), n);
            for (i, block) in blocks.iter().enumerate() {
                assert_eq!(block.trim(), format!("question {}", i));
            }
        }
    }

    #[test]
    fn test_table_lines() {
        let raw = "| Day | Slot |\n |indented|\n|trailing| \nplain\n|ok|\r\n|\n||";
        assert_eq!(
            tokenize_table_lines(raw),
            vec!["| Day | Slot |", "|ok|", "||"]
        );
    }
}
