//! Comment formatting.
//!
//! Free text is word-wrapped so that a rendered line, prefix included, stays under
//! the column budget. Words are never split; a single word longer than the budget
//! gets a line of its own.

use textwrap::{Options as WrapOptions, WordSeparator, WordSplitter, WrapAlgorithm};

use crate::go_ast::GoComment;

/// Default column budget.
pub const DEFAULT_WIDTH: usize = 120;

const LINE_PREFIX: &str = "//";

/// Wrap `text` into lines that fit `width` once rendered after `prefix` and a space.
///
/// Returned lines carry neither the prefix nor the separating space. Runs of whitespace,
/// newlines included, collapse to one space before wrapping.
pub fn wrap(prefix: &str, text: &str, width: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    let budget = width.saturating_sub(prefix.chars().count() + 1).max(1);
    let options = WrapOptions::new(budget)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);
    textwrap::wrap(&words.join(" "), options).into_iter().map(|line| line.into_owned()).collect()
}

/// `// ...` comment for `text`, or `None` when there is nothing to say.
pub fn line_comment(text: Option<&str>, width: usize) -> Option<GoComment> {
    let lines = wrap(LINE_PREFIX, text?, width);
    (!lines.is_empty()).then_some(GoComment::Line(lines))
}

/// `// ...` comment followed by a `source:` attribution when one is supplied.
pub fn line_comment_with_source(
    text: Option<&str>,
    source: Option<&str>,
    width: usize,
) -> Option<GoComment> {
    let mut lines = text.map(|t| wrap(LINE_PREFIX, t, width)).unwrap_or_default();
    if let Some(source) = source.map(str::trim).filter(|s| !s.is_empty()) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("source: {source}"));
    }
    (!lines.is_empty()).then_some(GoComment::Line(lines))
}

/// `/* ... */` comment with an unprefixed body.
///
/// A `*/` inside the text would close the comment early, so it is split apart.
pub fn block_comment(text: Option<&str>, width: usize) -> Option<GoComment> {
    let lines = wrap("", &text?.replace("*/", "* /"), width);
    (!lines.is_empty()).then_some(GoComment::Block(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "Account will return data for a single account. Use this endpoint when you know the \
                           account_id. API key must belong to the same profile as the account.";

    #[test]
    fn test_wraps_at_word_boundaries() {
        let lines = wrap(LINE_PREFIX, ACCOUNT, DEFAULT_WIDTH);
        assert_eq!(
            lines,
            vec![
                "Account will return data for a single account. Use this endpoint when you know the account_id. API key must belong to",
                "the same profile as the account.",
            ]
        );
        assert!(lines.iter().all(|l| l.len() + 3 <= DEFAULT_WIDTH));
    }

    #[test]
    fn test_long_word_gets_its_own_line() {
        let lines = wrap(LINE_PREFIX, "see https://example.com/a/very/long/url done", 20);
        assert_eq!(lines, vec!["see", "https://example.com/a/very/long/url", "done"]);

        let lines = wrap(LINE_PREFIX, "good-till-cancelled orders", 20);
        assert_eq!(lines, vec!["good-till-cancelled", "orders"]);
    }

    #[test]
    fn test_blank_text_has_no_comment() {
        assert_eq!(line_comment(Some("   "), DEFAULT_WIDTH), None);
        assert_eq!(line_comment(None, DEFAULT_WIDTH), None);
        assert_eq!(line_comment_with_source(None, Some(" "), DEFAULT_WIDTH), None);
    }

    #[test]
    fn test_source_attribution() {
        let comment = line_comment_with_source(
            Some("AccountTransfers returns past withdrawals and deposits for an account."),
            Some("https://docs.cloud.coinbase.com/exchange/reference/exchangerestapi_getaccounttransfers"),
            DEFAULT_WIDTH,
        );
        assert_eq!(
            comment,
            Some(GoComment::Line(vec![
                "AccountTransfers returns past withdrawals and deposits for an account.".into(),
                String::new(),
                "source: https://docs.cloud.coinbase.com/exchange/reference/exchangerestapi_getaccounttransfers"
                    .into(),
            ]))
        );
    }

    #[test]
    fn test_newlines_collapse() {
        let lines = wrap(LINE_PREFIX, "first line\n\n  second   line", DEFAULT_WIDTH);
        assert_eq!(lines, vec!["first line second line"]);
    }

    #[test]
    fn test_exact_fit() {
        // "// " plus ten characters is exactly thirteen columns.
        assert_eq!(wrap(LINE_PREFIX, "abcd efghi", 13), vec!["abcd efghi"]);
        assert_eq!(wrap(LINE_PREFIX, "abcd efghi", 12), vec!["abcd", "efghi"]);
    }

    #[test]
    fn test_block_form() {
        let comment = block_comment(Some("one two three"), 9);
        assert_eq!(comment, Some(GoComment::Block(vec!["one two".into(), "three".into()])));
    }

    #[test]
    fn test_block_form_cannot_close_early() {
        let comment = block_comment(Some("matches */v1/* routes"), DEFAULT_WIDTH);
        assert_eq!(comment, Some(GoComment::Block(vec!["matches * /v1/* routes".into()])));
    }
}
