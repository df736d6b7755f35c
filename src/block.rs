/// Heading depths the scanner recognises (`#`, `##`, `###`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// `# ` - document title
    Title,
    /// `## ` - section heading, rendered with a leading rule
    Section,
    /// `### ` - subheading
    Sub,
}

impl HeadingLevel {
    /// Number of `#` characters in the marker.
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::Title => 1,
            HeadingLevel::Section => 2,
            HeadingLevel::Sub => 3,
        }
    }

    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            1 => Some(HeadingLevel::Title),
            2 => Some(HeadingLevel::Section),
            3 => Some(HeadingLevel::Sub),
            _ => None,
        }
    }
}

/// A pipe table. Column count is taken from the header; body rows are kept
/// as written, so they may be shorter or longer than the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// Block-level elements produced by the scanner, in source order.
///
/// Text-bearing variants hold inline-formatted rich text (see
/// [`crate::format_inline`]); code blocks hold their lines verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: HeadingLevel,
        text: String,
    },
    Paragraph {
        text: String,
    },
    ListItem {
        text: String,
    },
    CodeBlock {
        /// Info string after the opening fence, if any
        language: Option<String>,
        content: String,
    },
    Table(Table),
    Rule,
}

impl Block {
    /// The formatted text of headings, paragraphs and list items.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } | Block::ListItem { text } => {
                Some(text)
            }
            Block::CodeBlock { .. } | Block::Table(_) | Block::Rule => None,
        }
    }
}
