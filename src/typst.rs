use std::fmt::Write;

use crate::config::Config;
use crate::flow::{Flow, TableFlow};
use crate::markup::{Run, parse_markup};
use crate::style::{
    Alignment, Family, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, ParagraphStyle, StyleName,
};

/// Font faces the rich-text markup may name that mean "the monospace font".
const MONO_FACES: &[&str] = &["Courier", "Courier New", "monospace"];

/// Convert flow elements to a complete Typst document.
pub fn flow_to_typst(flow: &[Flow], config: &Config) -> String {
    let mut out = String::new();
    emit_preamble(config, &mut out);

    let mut i = 0;
    while i < flow.len() {
        let group_end = if config.layout.keep_headings_with_next {
            heading_group_end(flow, i)
        } else {
            None
        };

        match group_end {
            Some(end) => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                for element in &flow[i..end] {
                    emit_element(element, config, &mut out);
                }
                out.push_str("]\n\n");
                i = end;
            }
            None => {
                emit_element(&flow[i], config, &mut out);
                i += 1;
            }
        }
    }

    out
}

fn is_heading(element: &Flow) -> bool {
    matches!(element, Flow::Paragraph { style, .. } if style.is_heading())
}

fn is_decoration(element: &Flow) -> bool {
    matches!(element, Flow::Spacer { .. } | Flow::Rule { .. })
}

fn next_content(flow: &[Flow], from: usize) -> Option<usize> {
    flow.get(from..)?
        .iter()
        .position(|element| !is_decoration(element))
        .map(|offset| from + offset)
}

/// Exclusive end of an unbreakable run starting at `start`: the decoration
/// leading into a heading, the heading (or consecutive headings) and the
/// first content element after it. `None` when `start` does not lead into a
/// heading, or nothing but decoration follows the heading.
fn heading_group_end(flow: &[Flow], start: usize) -> Option<usize> {
    let mut at = next_content(flow, start)?;
    if !is_heading(&flow[at]) {
        return None;
    }
    while is_heading(&flow[at]) {
        at = next_content(flow, at + 1)?;
    }
    Some(at + 1)
}

fn emit_preamble(config: &Config, out: &mut String) {
    let numbering = if config.page.numbers {
        ", numbering: \"1\""
    } else {
        ""
    };
    let _ = writeln!(
        out,
        "#set page(width: {PAGE_WIDTH_MM}mm, height: {PAGE_HEIGHT_MM}mm, margin: {MARGIN_MM}mm{numbering})"
    );
    let _ = writeln!(out, "#set text(font: {})", string(&config.font.body));
    out.push_str("#set par(linebreaks: \"optimized\")\n\n");
}

fn emit_element(element: &Flow, config: &Config, out: &mut String) {
    match element {
        Flow::Paragraph { style, text } => {
            emit_paragraph(config.styles.get(*style), text, config, out);
        }
        Flow::Spacer { height } => {
            let _ = writeln!(out, "#v({height}mm)\n");
        }
        Flow::Rule { thickness, color } => {
            let _ = writeln!(
                out,
                "#line(length: 100%, stroke: {thickness}pt + rgb({}))\n",
                string(color)
            );
        }
        Flow::Preformatted {
            style,
            language,
            text,
        } => {
            emit_preformatted(config.styles.get(*style), language.as_deref(), text, config, out);
        }
        Flow::Table(table) => {
            emit_table(table, config, out);
        }
    }
}

fn open_block(style: &ParagraphStyle, out: &mut String) {
    let inset = if style.bullet_indent > 0.0 {
        style.bullet_indent
    } else {
        style.left_indent
    };
    let fill = style
        .background
        .as_deref()
        .map(|color| format!(", fill: rgb({})", string(color)))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "#block(width: 100%, above: {}mm, below: {}mm, inset: (left: {inset}mm){fill})[",
        style.space_before, style.space_after
    );
}

/// `#set` rules applying a paragraph style to the rest of the enclosing content block.
fn emit_style_rules(style: &ParagraphStyle, config: &Config, out: &mut String) {
    let weight = if style.bold { "bold" } else { "regular" };
    let slant = if style.italic { "italic" } else { "normal" };
    let _ = writeln!(
        out,
        "#set text(font: {}, size: {}pt, fill: rgb({}), weight: \"{weight}\", style: \"{slant}\")",
        string(family_font(style.family, config)),
        style.font_size,
        string(&style.color)
    );

    // Typst leading is the gap between lines, not the baseline distance.
    let leading = round_pt((style.leading - style.font_size).max(0.0));
    let _ = write!(out, "#set par(leading: {leading}pt");
    if style.bullet_indent > 0.0 && style.left_indent > style.bullet_indent {
        let _ = write!(
            out,
            ", hanging-indent: {}mm",
            style.left_indent - style.bullet_indent
        );
    }
    out.push_str(")\n");

    if style.alignment == Alignment::Center {
        out.push_str("#set align(center)\n");
    }
}

fn emit_paragraph(style: &ParagraphStyle, text: &str, config: &Config, out: &mut String) {
    open_block(style, out);
    emit_style_rules(style, config, out);
    runs_to_typst(&parse_markup(text), config, out);
    out.push_str("\n]\n\n");
}

fn emit_preformatted(
    style: &ParagraphStyle,
    language: Option<&str>,
    text: &str,
    config: &Config,
    out: &mut String,
) {
    open_block(style, out);
    emit_style_rules(style, config, out);
    let _ = writeln!(
        out,
        "#show raw: set text(font: {}, size: {}pt)",
        string(family_font(style.family, config)),
        style.font_size
    );
    let lang = language
        .map(|lang| format!("lang: {}, ", string(lang)))
        .unwrap_or_default();
    let _ = writeln!(out, "#raw(block: true, {lang}{})", string(text));
    out.push_str("]\n\n");
}

fn emit_table(table: &TableFlow, config: &Config, out: &mut String) {
    let columns = table.column_widths.len();
    if columns == 0 {
        log::warn!("skipping table without header columns");
        return;
    }

    let style = &config.table;
    let widths: Vec<String> = table
        .column_widths
        .iter()
        .map(|width| format!("{width}mm"))
        .collect();
    let row_fill = if style.row_backgrounds.is_empty() {
        "none".to_string()
    } else {
        let colors: String = style
            .row_backgrounds
            .iter()
            .map(|color| format!("rgb({}), ", string(color)))
            .collect();
        format!(
            "({colors}).at(calc.rem(y - 1, {}))",
            style.row_backgrounds.len()
        )
    };

    out.push_str("#table(\n");
    let _ = writeln!(out, "  columns: ({},),", widths.join(", "));
    let _ = writeln!(out, "  inset: {}pt,", style.padding);
    let _ = writeln!(
        out,
        "  stroke: {}pt + rgb({}),",
        style.grid_width,
        string(&style.grid_color)
    );
    out.push_str("  align: left + top,\n");
    let _ = writeln!(
        out,
        "  fill: (_, y) => if y == 0 {{ rgb({}) }} else {{ {row_fill} }},",
        string(&style.header_background)
    );

    let header_style = config.styles.get(StyleName::TableHeader);
    out.push_str("  table.header(\n");
    for cell in &table.header {
        out.push_str("    ");
        emit_cell(header_style, cell, config, out);
    }
    out.push_str("  ),\n");

    let cell_style = config.styles.get(StyleName::TableCell);
    for (index, row) in table.rows.iter().enumerate() {
        if row.len() > columns {
            log::warn!(
                "table row {} has {} cells, dropping {} beyond the header's {columns}",
                index + 1,
                row.len(),
                row.len() - columns
            );
        }
        for cell in row.iter().take(columns) {
            out.push_str("  ");
            emit_cell(cell_style, cell, config, out);
        }
        for _ in row.len()..columns {
            out.push_str("  [],\n");
        }
    }

    out.push_str(")\n\n");
}

fn emit_cell(style: &ParagraphStyle, text: &str, config: &Config, out: &mut String) {
    out.push_str("[\n");
    emit_style_rules(style, config, out);
    runs_to_typst(&parse_markup(text), config, out);
    out.push_str("\n],\n");
}

/// Round to hundredths so f32 noise (`1.3999996`) stays out of the markup.
fn round_pt(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

fn family_font(family: Family, config: &Config) -> &str {
    match family {
        Family::Body => &config.font.body,
        Family::Mono => &config.font.mono,
    }
}

fn runs_to_typst(runs: &[Run], config: &Config, out: &mut String) {
    for run in runs {
        let mut props = Vec::new();
        if run.bold {
            props.push("weight: \"bold\"".to_string());
        }
        if run.italic {
            props.push("style: \"italic\"".to_string());
        }
        if let Some(font) = &run.font {
            if let Some(face) = &font.face {
                let face = if MONO_FACES.contains(&face.as_str()) {
                    &config.font.mono
                } else {
                    face
                };
                props.push(format!("font: {}", string(face)));
            }
            if let Some(size) = font.size {
                props.push(format!("size: {size}pt"));
            }
            if let Some(color) = &font.color {
                props.push(format!("fill: rgb({})", string(color)));
            }
        }

        // Text always goes through a string literal so nothing in it is read as markup.
        if props.is_empty() {
            let _ = write!(out, "#{}", string(&run.text));
        } else {
            let _ = write!(out, "#text({}, {})", props.join(", "), string(&run.text));
        }
    }
}

/// Quote `text` as a Typst string literal.
fn string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
