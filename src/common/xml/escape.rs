//! XML entity escaping and resolution.
//!
//! The writer escapes through a multi-pattern automaton; the reader
//! resolves entity bodies one at a time as the parser reports them.
//! Resolution covers the five predefined entities plus decimal and
//! hexadecimal character references; unknown entities are kept
//! literally rather than rejected, so malformed-but-parseable input
//! survives a round trip.
use aho_corasick::AhoCorasick;
use memchr::memchr;
use once_cell::sync::Lazy;

/// The five characters XML requires escaping, with their entities.
const ESCAPES: [(&str, &str); 5] = [
    ("&", "&amp;"),
    ("<", "&lt;"),
    (">", "&gt;"),
    ("\"", "&quot;"),
    ("'", "&apos;"),
];

static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(ESCAPES.map(|(raw, _)| raw)).expect("escape automaton")
});

/// Escape XML special characters in text or attribute content.
///
/// # Examples
///
/// ```
/// use quince::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<t>\"hi\"</t>"), "&lt;t&gt;&quot;hi&quot;&lt;/t&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &ESCAPES.map(|(_, entity)| entity))
}

/// Resolve an entity body (the part between `&` and `;`).
///
/// Handles the five predefined entities and `#NNN`/`#xHH` character
/// references. Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use quince::common::xml::resolve_entity;
/// assert_eq!(resolve_entity("amp"), Some('&'));
/// assert_eq!(resolve_entity("#65"), Some('A'));
/// assert_eq!(resolve_entity("#x2014"), Some('\u{2014}'));
/// assert_eq!(resolve_entity("nbsp"), None);
/// ```
pub fn resolve_entity(body: &str) -> Option<char> {
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = body.strip_prefix('#')?;
            let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => digits.parse().ok(),
            }?;
            char::from_u32(code)
        },
    }
}

/// Unescape XML entities in a string.
///
/// Applies [`resolve_entity`] to every `&...;` sequence; sequences
/// that do not resolve (unknown names, unterminated ampersands) pass
/// through unchanged.
///
/// # Examples
///
/// ```
/// use quince::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("x &#247; y"), "x \u{f7} y");
/// assert_eq!(unescape_xml("&invalid; & more"), "&invalid; & more");
/// ```
pub fn unescape_xml(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut pos = 0;
    while let Some(offset) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + offset;
        out.push_str(&s[pos..amp]);
        let resolved = memchr(b';', &bytes[amp + 1..])
            .and_then(|end| resolve_entity(&s[amp + 1..amp + 1 + end]).map(|ch| (ch, end)));
        match resolved {
            Some((ch, end)) => {
                out.push(ch);
                pos = amp + 1 + end + 1;
            },
            None => {
                out.push('&');
                pos = amp + 1;
            },
        }
    }
    out.push_str(&s[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_covers_all_five() {
        assert_eq!(escape_xml(r#"<&>"'"#), "&lt;&amp;&gt;&quot;&apos;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_resolve_character_references() {
        assert_eq!(resolve_entity("#9731"), Some('\u{2603}'));
        assert_eq!(resolve_entity("#x2603"), Some('\u{2603}'));
        assert_eq!(resolve_entity("#X2603"), Some('\u{2603}'));
        // Surrogate code points are not characters.
        assert_eq!(resolve_entity("#xD800"), None);
        assert_eq!(resolve_entity("#"), None);
        assert_eq!(resolve_entity(""), None);
    }

    #[test]
    fn test_unescape_leaves_unknown_sequences() {
        assert_eq!(unescape_xml("&unknown;"), "&unknown;");
        assert_eq!(unescape_xml("a & b"), "a & b");
        assert_eq!(unescape_xml("trailing &"), "trailing &");
    }

    #[test]
    fn test_escape_unescape_roundtrip() {
        let original = r#"mixed <tags> & "quotes" with 'apostrophes'"#;
        assert_eq!(unescape_xml(&escape_xml(original)), original);
    }
}
