//! Markdown subset parser for text mutation.
//!
//! Supports exactly the inline subset the text writer can express:
//! `**`/`__` for bold, `*`/`_` for italic, and newlines as paragraph
//! breaks. Everything else, including unterminated markers, passes
//! through as literal text, so arbitrary input is always accepted. A
//! backslash escapes the following marker character.
use memchr::{memchr2, memchr3};

/// A contiguous span of equally-formatted text within one paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownRun {
    /// Literal text of the span
    pub text: String,
    /// Bold flag (`**` or `__`)
    pub bold: bool,
    /// Italic flag (`*` or `_`)
    pub italic: bool,
}

/// One paragraph's worth of runs. A blank line parses to an empty list.
pub type MarkdownParagraph = Vec<MarkdownRun>;

/// Parse a Markdown-subset string into paragraphs of formatted runs.
///
/// # Examples
///
/// ```rust
/// use quince::markdown::parse;
///
/// let paragraphs = parse("plain **bold**");
/// assert_eq!(paragraphs.len(), 1);
/// assert_eq!(paragraphs[0].len(), 2);
/// assert_eq!(paragraphs[0][0].text, "plain ");
/// assert!(!paragraphs[0][0].bold);
/// assert!(paragraphs[0][1].bold);
/// ```
pub fn parse(input: &str) -> Vec<MarkdownParagraph> {
    input.split('\n').map(parse_line).collect()
}

fn parse_line(line: &str) -> MarkdownParagraph {
    let mut runs = Vec::new();
    parse_spans(line, false, false, &mut runs);
    runs
}

/// Emit the accumulated plain text as a run with the current flags.
fn flush(plain: &mut String, bold: bool, italic: bool, runs: &mut Vec<MarkdownRun>) {
    if !plain.is_empty() {
        runs.push(MarkdownRun {
            text: std::mem::take(plain),
            bold,
            italic,
        });
    }
}

/// Scan one span of text, toggling flags at matched marker pairs.
///
/// A marker with no closing partner on the same line is literal text.
fn parse_spans(text: &str, bold: bool, italic: bool, runs: &mut Vec<MarkdownRun>) {
    let bytes = text.as_bytes();
    let mut plain = String::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let Some(offset) = memchr3(b'*', b'_', b'\\', &bytes[pos..]) else {
            plain.push_str(&text[pos..]);
            break;
        };
        let at = pos + offset;
        plain.push_str(&text[pos..at]);

        if bytes[at] == b'\\' {
            match bytes.get(at + 1) {
                Some(&escaped @ (b'*' | b'_' | b'\\')) => {
                    plain.push(escaped as char);
                    pos = at + 2;
                },
                _ => {
                    plain.push('\\');
                    pos = at + 1;
                },
            }
            continue;
        }

        let marker = bytes[at];
        let len = if bytes.get(at + 1) == Some(&marker) { 2 } else { 1 };
        let delim = &text[at..at + len];
        match find_closer(&bytes[at + len..], marker, len) {
            Some(inner_len) => {
                flush(&mut plain, bold, italic, runs);
                let inner = &text[at + len..at + len + inner_len];
                if len == 2 {
                    parse_spans(inner, !bold, italic, runs);
                } else {
                    parse_spans(inner, bold, !italic, runs);
                }
                pos = at + len + inner_len + len;
            },
            None => {
                plain.push_str(delim);
                pos = at + len;
            },
        }
    }
    flush(&mut plain, bold, italic, runs);
}

/// Length of the span enclosed by the matching closer, if one exists.
///
/// Escaped markers do not close; a double marker cannot be closed by a
/// lone one.
fn find_closer(bytes: &[u8], marker: u8, len: usize) -> Option<usize> {
    let mut pos = 0;
    loop {
        let offset = memchr2(marker, b'\\', &bytes[pos..])?;
        let at = pos + offset;
        if bytes[at] == b'\\' {
            pos = at + 2;
            if pos > bytes.len() {
                return None;
            }
            continue;
        }
        if len == 1 || bytes.get(at + 1) == Some(&marker) {
            return Some(at);
        }
        pos = at + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat(input: &str) -> Vec<(String, bool, bool)> {
        parse(input)
            .into_iter()
            .flatten()
            .map(|r| (r.text, r.bold, r.italic))
            .collect()
    }

    #[test]
    fn test_plain_text_single_run() {
        assert_eq!(flat("hello"), vec![("hello".into(), false, false)]);
    }

    #[test]
    fn test_bold_and_italic_markers() {
        assert_eq!(
            flat("a **b** *c* __d__ _e_"),
            vec![
                ("a ".into(), false, false),
                ("b".into(), true, false),
                (" ".into(), false, false),
                ("c".into(), false, true),
                (" ".into(), false, false),
                ("d".into(), true, false),
                (" ".into(), false, false),
                ("e".into(), false, true),
            ]
        );
    }

    #[test]
    fn test_nested_italic_inside_bold() {
        assert_eq!(
            flat("**a *b* c**"),
            vec![
                ("a ".into(), true, false),
                ("b".into(), true, true),
                (" c".into(), true, false),
            ]
        );
    }

    #[test]
    fn test_unterminated_marker_is_literal() {
        assert_eq!(flat("2 * 3 = 6"), vec![("2 * 3 = 6".into(), false, false)]);
        assert_eq!(flat("**oops"), vec![("**oops".into(), false, false)]);
    }

    #[test]
    fn test_escaped_marker_is_literal() {
        assert_eq!(flat(r"\*not italic\*"), vec![("*not italic*".into(), false, false)]);
    }

    #[test]
    fn test_newline_splits_paragraphs() {
        let paragraphs = parse("one\ntwo\n\nfour");
        assert_eq!(paragraphs.len(), 4);
        assert_eq!(paragraphs[0][0].text, "one");
        assert_eq!(paragraphs[1][0].text, "two");
        assert!(paragraphs[2].is_empty());
        assert_eq!(paragraphs[3][0].text, "four");
    }

    #[test]
    fn test_double_marker_not_closed_by_single() {
        // The lone trailing asterisk cannot close the double marker.
        assert_eq!(flat("**a*"), vec![("**a*".into(), false, false)]);
    }

    proptest! {
        #[test]
        fn prop_markerless_input_passes_through(s in "[^*_\\\\\n]{1,64}") {
            prop_assert_eq!(flat(&s), vec![(s.clone(), false, false)]);
        }

        #[test]
        fn prop_parse_never_panics(s in ".{0,128}") {
            let _ = parse(&s);
        }

        #[test]
        fn prop_paragraph_count_matches_newlines(s in "[a-z\n]{0,64}") {
            prop_assert_eq!(parse(&s).len(), s.split('\n').count());
        }
    }
}
