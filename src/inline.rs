use std::sync::LazyLock;

use regex::Regex;

/// Face, size and colour of code spans. Fixed for every call.
pub const CODE_FACE: &str = "Courier";
pub const CODE_SIZE: f32 = 9.0;
pub const CODE_COLOR: &str = "#c0392b";

static CODE_OPEN_TAG: LazyLock<String> = LazyLock::new(|| {
    format!(r#"<font face="{CODE_FACE}" size="{CODE_SIZE}" color="{CODE_COLOR}">"#)
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    BoldOpen,
    BoldClose,
    ItalicOpen,
    ItalicClose,
    CodeOpen,
    CodeClose,
}

impl Marker {
    fn sentinel(self) -> char {
        match self {
            Marker::BoldOpen => '\u{E000}',
            Marker::BoldClose => '\u{E001}',
            Marker::ItalicOpen => '\u{E002}',
            Marker::ItalicClose => '\u{E003}',
            Marker::CodeOpen => '\u{E004}',
            Marker::CodeClose => '\u{E005}',
        }
    }

    fn from_sentinel(c: char) -> Option<Self> {
        match c {
            '\u{E000}' => Some(Marker::BoldOpen),
            '\u{E001}' => Some(Marker::BoldClose),
            '\u{E002}' => Some(Marker::ItalicOpen),
            '\u{E003}' => Some(Marker::ItalicClose),
            '\u{E004}' => Some(Marker::CodeOpen),
            '\u{E005}' => Some(Marker::CodeClose),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Marker::BoldOpen => "<b>",
            Marker::BoldClose => "</b>",
            Marker::ItalicOpen => "<i>",
            Marker::ItalicClose => "</i>",
            Marker::CodeOpen => CODE_OPEN_TAG.as_str(),
            Marker::CodeClose => "</font>",
        }
    }
}

/// One delimiter rule: a non-greedy pattern and the sentinel-wrapped
/// replacement for its captured content.
struct SpanRule {
    pattern: Regex,
    replacement: String,
}

impl SpanRule {
    fn new(pattern: &str, open: &[Marker], close: &[Marker]) -> Self {
        let mut replacement: String = open.iter().map(|m| m.sentinel()).collect();
        replacement.push_str("${1}");
        replacement.extend(close.iter().map(|m| m.sentinel()));
        Self {
            pattern: Regex::new(pattern).expect("invalid inline span pattern"),
            replacement,
        }
    }
}

// Applied in order; each rule sees the output of the previous one.
static SPAN_RULES: LazyLock<[SpanRule; 4]> = LazyLock::new(|| {
    use Marker::*;
    [
        SpanRule::new(
            r"\*\*\*(.+?)\*\*\*",
            &[BoldOpen, ItalicOpen],
            &[ItalicClose, BoldClose],
        ),
        SpanRule::new(r"\*\*(.+?)\*\*", &[BoldOpen], &[BoldClose]),
        SpanRule::new(r"\*(.+?)\*", &[ItalicOpen], &[ItalicClose]),
        SpanRule::new(r"`(.+?)`", &[CodeOpen], &[CodeClose]),
    ]
});

/// Resolve inline emphasis and code spans in a single line of text.
///
/// Never fails: unmatched delimiters stay literal. Sentinel code points
/// (U+E000..=U+E005) in the input are dropped so the source cannot forge
/// markup.
pub fn format_inline(raw: &str) -> String {
    let mut text: String = raw
        .chars()
        .filter(|c| Marker::from_sentinel(*c).is_none())
        .collect();

    for rule in SPAN_RULES.iter() {
        if let std::borrow::Cow::Owned(replaced) =
            rule.pattern.replace_all(&text, rule.replacement.as_str())
        {
            text = replaced;
        }
    }

    let escaped = html_escape::encode_text(&text);

    let mut out = String::with_capacity(escaped.len());
    for c in escaped.chars() {
        match Marker::from_sentinel(c) {
            Some(marker) => out.push_str(marker.tag()),
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn resolves_every_span_kind_and_escapes_text() {
        assert_eq!(
            format_inline("**a** *b* `c` <d>"),
            r##"<b>a</b> <i>b</i> <font face="Courier" size="9" color="#c0392b">c</font> &lt;d&gt;"##
        );
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("***both***", "<b><i>both</i></b>")]
    #[case("**bold** and **more**", "<b>bold</b> and <b>more</b>")]
    #[case("*one* *two*", "<i>one</i> <i>two</i>")]
    #[case("a & b", "a &amp; b")]
    #[case("x < y > z", "x &lt; y &gt; z")]
    #[case("&lt;", "&amp;lt;")]
    fn formats(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_inline(raw), expected);
    }

    #[rstest]
    #[case("2 * 3")]
    #[case("**")]
    #[case("a ` b")]
    #[case("")]
    fn unmatched_delimiters_stay_literal(#[case] raw: &str) {
        assert_eq!(format_inline(raw), raw);
    }

    #[test]
    fn literal_tags_in_source_are_escaped() {
        assert_eq!(
            format_inline("<b>not bold</b>"),
            "&lt;b&gt;not bold&lt;/b&gt;"
        );
        assert_eq!(
            format_inline(r#"<font face="x">"#),
            r#"&lt;font face="x"&gt;"#
        );
    }

    #[test]
    fn code_span_content_is_escaped() {
        assert_eq!(
            format_inline("`a < b && c`"),
            r##"<font face="Courier" size="9" color="#c0392b">a &lt; b &amp;&amp; c</font>"##
        );
    }

    #[test]
    fn emphasis_runs_before_code_spans() {
        assert_eq!(
            format_inline("`a*b*c`"),
            r##"<font face="Courier" size="9" color="#c0392b">a<i>b</i>c</font>"##
        );
    }

    #[test]
    fn lone_star_run_pairs_with_its_neighbours() {
        assert_eq!(format_inline("****"), "<i>*</i>*");
    }

    #[test]
    fn sentinels_in_source_are_dropped() {
        assert_eq!(format_inline("a\u{E000}b\u{E005}c"), "abc");
    }

    #[test]
    fn code_tag_is_built_from_code_constants() {
        assert_eq!(
            Marker::CodeOpen.tag(),
            r##"<font face="Courier" size="9" color="#c0392b">"##
        );
    }
}
