use crate::block::{Block, HeadingLevel, Table};
use crate::style::{StyleName, frame_width_mm};

const SECTION_GAP_MM: f32 = 3.0;
const SECTION_RULE_PT: f32 = 1.0;
const SECTION_RULE_COLOR: &str = "#cccccc";

const RULE_GAP_MM: f32 = 3.0;
const RULE_PT: f32 = 0.5;
const RULE_COLOR: &str = "#dddddd";

const TABLE_GAP_MM: f32 = 2.0;

const BULLET_PREFIX: &str = "\u{2022} ";

/// A table ready for layout, with one width per header column.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFlow {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Millimetres
    pub column_widths: Vec<f32>,
}

/// Abstract flow elements consumed by the layout backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Rich-text paragraph in a named style
    Paragraph { style: StyleName, text: String },
    /// Vertical gap in millimetres
    Spacer { height: f32 },
    /// Full-width horizontal line, thickness in points
    Rule { thickness: f32, color: String },
    /// Verbatim text, line breaks preserved
    Preformatted {
        style: StyleName,
        language: Option<String>,
        text: String,
    },
    Table(TableFlow),
}

impl Flow {
    fn rule(thickness: f32, color: &str) -> Self {
        Flow::Rule {
            thickness,
            color: color.to_string(),
        }
    }
}

/// Lay out blocks as flow elements, adding the decoration each block kind
/// carries (rules and gaps around section headings, rules and tables).
pub fn blocks_to_flow(blocks: &[Block]) -> Vec<Flow> {
    let mut flow = Vec::with_capacity(blocks.len());
    for block in blocks {
        push_block(block, &mut flow);
    }
    log::debug!("{} blocks became {} flow elements", blocks.len(), flow.len());
    flow
}

fn push_block(block: &Block, flow: &mut Vec<Flow>) {
    match block {
        Block::Heading { level, text } => {
            let style = match level {
                HeadingLevel::Title => StyleName::Title,
                HeadingLevel::Section => {
                    flow.push(Flow::Spacer {
                        height: SECTION_GAP_MM,
                    });
                    flow.push(Flow::rule(SECTION_RULE_PT, SECTION_RULE_COLOR));
                    StyleName::Heading2
                }
                HeadingLevel::Sub => StyleName::Heading3,
            };
            flow.push(Flow::Paragraph {
                style,
                text: text.clone(),
            });
        }
        Block::Paragraph { text } => flow.push(Flow::Paragraph {
            style: StyleName::Body,
            text: text.clone(),
        }),
        Block::ListItem { text } => flow.push(Flow::Paragraph {
            style: StyleName::Bullet,
            text: format!("{BULLET_PREFIX}{text}"),
        }),
        Block::CodeBlock { language, content } => flow.push(Flow::Preformatted {
            style: StyleName::Code,
            language: language.clone(),
            text: content.clone(),
        }),
        Block::Table(table) => {
            flow.push(Flow::Spacer {
                height: TABLE_GAP_MM,
            });
            flow.push(Flow::Table(table_flow(table)));
            flow.push(Flow::Spacer {
                height: TABLE_GAP_MM,
            });
        }
        Block::Rule => {
            flow.push(Flow::Spacer {
                height: RULE_GAP_MM,
            });
            flow.push(Flow::rule(RULE_PT, RULE_COLOR));
            flow.push(Flow::Spacer {
                height: RULE_GAP_MM,
            });
        }
    }
}

fn table_flow(table: &Table) -> TableFlow {
    let columns = table.column_count();
    let column_widths = if columns == 0 {
        Vec::new()
    } else {
        vec![frame_width_mm() / columns as f32; columns]
    };
    TableFlow {
        header: table.header.clone(),
        rows: table.rows.clone(),
        column_widths,
    }
}
