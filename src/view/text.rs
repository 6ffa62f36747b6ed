//! Free-text projection.
//!
//! Markdown responses are run through `pulldown-cmark` and flattened into
//! display lines with styled spans; the `ui` module maps those onto ratatui
//! `Line`s. Text that is not markdown is passed through line by line.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLineKind {
    Heading(u8),
    /// List item; `number` is set for ordered lists.
    Item { depth: usize, number: Option<u64> },
    Code,
    Rule,
    Plain,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub style: SpanStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub kind: TextLineKind,
    pub spans: Vec<TextSpan>,
}

impl TextLine {
    fn new(kind: TextLineKind) -> Self {
        Self {
            kind,
            spans: Vec::new(),
        }
    }

    fn blank() -> Self {
        Self::new(TextLineKind::Plain)
    }

    fn plain(text: &str) -> Self {
        let mut line = Self::blank();
        line.push(text, SpanStyle::default());
        line
    }

    /// The line's text without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.kind == TextLineKind::Plain && self.spans.is_empty()
    }

    fn push(&mut self, text: &str, style: SpanStyle) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(TextSpan {
                text: text.to_string(),
                style,
            }),
        }
    }
}

/// Splits a free-text response into display lines.
pub fn project_text(text: &str, markdown: bool) -> Vec<TextLine> {
    if !markdown {
        return text.lines().map(TextLine::plain).collect();
    }

    let mut builder = TextBuilder::default();
    for event in Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH) {
        builder.event(event);
    }
    builder.finish()
}

#[derive(Default)]
struct TextBuilder {
    lines: Vec<TextLine>,
    current: Option<TextLine>,
    /// One entry per open list: the next item number, `None` when unordered.
    lists: Vec<Option<u64>>,
    strong: usize,
    emphasis: usize,
    code_block: Option<String>,
}

impl TextBuilder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => {
                if let Some(buffer) = &mut self.code_block {
                    buffer.push_str(&text);
                } else {
                    let style = self.style();
                    self.push(&text, style);
                }
            }
            Event::Code(code) => {
                let style = SpanStyle {
                    code: true,
                    ..self.style()
                };
                self.push(&code, style);
            }
            Event::SoftBreak => self.push(" ", self.style()),
            Event::HardBreak => {
                let kind = match self.current.as_ref().map(|line| line.kind) {
                    Some(TextLineKind::Heading(level)) => TextLineKind::Heading(level),
                    _ => TextLineKind::Plain,
                };
                self.flush();
                self.current = Some(TextLine::new(kind));
            }
            Event::Rule => {
                self.flush();
                self.lines.push(TextLine::new(TextLineKind::Rule));
                self.separate();
            }
            Event::Html(html) => {
                for line in html.lines() {
                    self.push(line.trim_end(), SpanStyle::default());
                    self.flush();
                }
            }
            Event::InlineHtml(html) => self.push(&html, self.style()),
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // The first paragraph of a loose list item stays on the
                // item's line.
                if !self.at_empty_item() {
                    self.open(TextLineKind::Plain);
                }
            }
            Tag::Heading { level, .. } => self.open(TextLineKind::Heading(heading_level(level))),
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                let depth = self.lists.len().saturating_sub(1);
                let number = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let number = *next;
                        *next += 1;
                        Some(number)
                    }
                    _ => None,
                };
                self.open(TextLineKind::Item { depth, number });
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.code_block = Some(String::new());
            }
            Tag::Strong => self.strong += 1,
            Tag::Emphasis => self.emphasis += 1,
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Heading(_) => {
                self.flush();
                if self.lists.is_empty() {
                    self.separate();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.separate();
                }
            }
            TagEnd::CodeBlock => {
                if let Some(buffer) = self.code_block.take() {
                    for line in buffer.lines() {
                        let mut code = TextLine::new(TextLineKind::Code);
                        code.push(line, SpanStyle::default());
                        self.lines.push(code);
                    }
                }
                if self.lists.is_empty() {
                    self.separate();
                }
            }
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            _ => {}
        }
    }

    fn style(&self) -> SpanStyle {
        SpanStyle {
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code: false,
        }
    }

    fn at_empty_item(&self) -> bool {
        matches!(
            &self.current,
            Some(line) if matches!(line.kind, TextLineKind::Item { .. }) && line.spans.is_empty()
        )
    }

    fn open(&mut self, kind: TextLineKind) {
        self.flush();
        self.current = Some(TextLine::new(kind));
    }

    fn push(&mut self, text: &str, style: SpanStyle) {
        self.current
            .get_or_insert_with(TextLine::blank)
            .push(text, style);
    }

    fn flush(&mut self) {
        if let Some(line) = self.current.take() {
            if !line.spans.is_empty() {
                self.lines.push(line);
            }
        }
    }

    /// Blank line between top-level blocks.
    fn separate(&mut self) {
        if self.lines.last().is_some_and(|line| !line.is_blank()) {
            self.lines.push(TextLine::blank());
        }
    }

    fn finish(mut self) -> Vec<TextLine> {
        self.flush();
        while self.lines.last().is_some_and(TextLine::is_blank) {
            self.lines.pop();
        }
        self.lines
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(lines: &[TextLine]) -> Vec<TextLineKind> {
        lines.iter().map(|line| line.kind).collect()
    }

    #[test]
    fn test_heading_and_bullets() {
        let lines = project_text("## Topic\n\n- point with `x`\n- *soft*\n\nplain", true);

        let bullet = TextLineKind::Item {
            depth: 0,
            number: None,
        };
        assert_eq!(
            kinds(&lines),
            vec![
                TextLineKind::Heading(2),
                TextLineKind::Plain,
                bullet,
                bullet,
                TextLineKind::Plain,
                TextLineKind::Plain,
            ]
        );
        assert_eq!(lines[0].text(), "Topic");
        assert!(lines[1].is_blank());
        assert_eq!(lines[2].text(), "point with x");
        assert!(lines[2].spans[1].style.code);
        assert_eq!(lines[3].text(), "soft");
        assert!(lines[3].spans[0].style.emphasis);
        assert_eq!(lines[5].text(), "plain");
    }

    #[test]
    fn test_numbered_step_with_bold_and_code_block() {
        let lines = project_text("1. first step\n**Key idea**\n```\ncode\n```", true);

        assert_eq!(
            lines[0].kind,
            TextLineKind::Item {
                depth: 0,
                number: Some(1)
            }
        );
        assert_eq!(lines[0].text(), "first step Key idea");
        assert!(
            lines[0]
                .spans
                .iter()
                .any(|span| span.text == "Key idea" && span.style.strong)
        );

        let code: Vec<String> = lines
            .iter()
            .filter(|line| line.kind == TextLineKind::Code)
            .map(TextLine::text)
            .collect();
        assert_eq!(code, vec!["code"]);
        assert!(lines.iter().all(|line| {
            let text = line.text();
            !text.contains("**") && !text.contains("```")
        }));
    }

    #[test]
    fn test_ordered_list_counts_from_start() {
        let lines = project_text("3. three\n4. four", true);
        assert_eq!(
            kinds(&lines),
            vec![
                TextLineKind::Item {
                    depth: 0,
                    number: Some(3)
                },
                TextLineKind::Item {
                    depth: 0,
                    number: Some(4)
                },
            ]
        );
    }

    #[test]
    fn test_nested_list_depth() {
        let lines = project_text("- a\n  - b", true);
        assert_eq!(
            kinds(&lines),
            vec![
                TextLineKind::Item {
                    depth: 0,
                    number: None
                },
                TextLineKind::Item {
                    depth: 1,
                    number: None
                },
            ]
        );
        assert_eq!(lines[1].text(), "b");
    }

    #[test]
    fn test_hashtag_is_not_heading() {
        let lines = project_text("#hashtag", true);
        assert_eq!(kinds(&lines), vec![TextLineKind::Plain]);
        assert_eq!(lines[0].text(), "#hashtag");
    }

    #[test]
    fn test_plain_text_kept_raw() {
        let lines = project_text("## Topic\n- item", false);
        assert_eq!(kinds(&lines), vec![TextLineKind::Plain, TextLineKind::Plain]);
        assert_eq!(lines[0].text(), "## Topic");
        assert_eq!(lines[1].text(), "- item");
    }
}
