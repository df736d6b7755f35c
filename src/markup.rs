use std::sync::LazyLock;

use regex::Regex;

static FONT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+)\s*=\s*"([^"]*)""#).expect("invalid font attribute pattern")
});

/// Attributes of a `<font>` tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Font {
    pub face: Option<String>,
    /// Points
    pub size: Option<f32>,
    pub color: Option<String>,
}

/// A stretch of decoded text sharing one style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub font: Option<Font>,
}

impl Run {
    fn same_style(&self, other: &Run) -> bool {
        self.bold == other.bold && self.italic == other.italic && self.font == other.font
    }
}

#[derive(Debug, PartialEq)]
enum Tag {
    Bold,
    EndBold,
    Italic,
    EndItalic,
    Font(Font),
    EndFont,
}

impl Tag {
    fn parse(inner: &str) -> Option<Tag> {
        match inner.trim() {
            "b" => Some(Tag::Bold),
            "/b" => Some(Tag::EndBold),
            "i" => Some(Tag::Italic),
            "/i" => Some(Tag::EndItalic),
            "/font" => Some(Tag::EndFont),
            "font" => Some(Tag::Font(Font::default())),
            other => other
                .strip_prefix("font ")
                .map(|attrs| Tag::Font(parse_font(attrs))),
        }
    }
}

fn parse_font(attrs: &str) -> Font {
    let mut font = Font::default();
    for caps in FONT_ATTR.captures_iter(attrs) {
        let value = html_escape::decode_html_entities(&caps[2]).into_owned();
        match &caps[1] {
            "face" => font.face = Some(value),
            "size" => font.size = value.trim().parse().ok(),
            "color" => font.color = Some(value),
            other => log::debug!("ignoring font attribute {other}"),
        }
    }
    font
}

#[derive(Default)]
struct Reader {
    runs: Vec<Run>,
    pending: String,
    bold: usize,
    italic: usize,
    fonts: Vec<Font>,
}

impl Reader {
    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let run = Run {
            text: html_escape::decode_html_entities(&self.pending).into_owned(),
            bold: self.bold > 0,
            italic: self.italic > 0,
            font: self.fonts.last().cloned(),
        };
        self.pending.clear();

        match self.runs.last_mut() {
            Some(last) if last.same_style(&run) => last.text.push_str(&run.text),
            _ => self.runs.push(run),
        }
    }

    fn apply(&mut self, tag: Tag) {
        self.flush();
        match tag {
            Tag::Bold => self.bold += 1,
            Tag::EndBold => self.bold = self.bold.saturating_sub(1),
            Tag::Italic => self.italic += 1,
            Tag::EndItalic => self.italic = self.italic.saturating_sub(1),
            Tag::Font(font) => self.fonts.push(font),
            Tag::EndFont => {
                self.fonts.pop();
            }
        }
    }
}

/// Flatten rich-text markup into styled runs. Unknown tags are kept as text.
pub fn parse_markup(markup: &str) -> Vec<Run> {
    let mut reader = Reader::default();
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        reader.pending.push_str(&rest[..open]);
        let candidate = &rest[open..];
        let tag = candidate
            .find('>')
            .and_then(|close| Tag::parse(&candidate[1..close]).map(|tag| (tag, close)));
        match tag {
            Some((tag, close)) => {
                reader.apply(tag);
                rest = &candidate[close + 1..];
            }
            None => {
                reader.pending.push('<');
                rest = &candidate[1..];
            }
        }
    }
    reader.pending.push_str(rest);
    reader.flush();

    reader.runs
}
