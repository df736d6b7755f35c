use mdpdf::{Block, Config, Error, Flow, HeadingLevel, StyleName, Table};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const SAMPLE: &str = "# Project Summary

## Overview

Plain text with **bold**, *italic*, ***both*** and `code`.

- first point
- second point & more

### Results

| Metric | Value |
|--------|-------|
| Accuracy | **92%** |
| Latency | 40 ms |

---

```python
def f(x):
    return x * 2  # *not italic*
```
";

#[test]
fn parses_sample_in_source_order() {
    let blocks = mdpdf::parse(SAMPLE);
    let kinds: Vec<&str> = blocks
        .iter()
        .map(|block| match block {
            Block::Heading { level, .. } => match level {
                HeadingLevel::Title => "title",
                HeadingLevel::Section => "section",
                HeadingLevel::Sub => "sub",
            },
            Block::Paragraph { .. } => "paragraph",
            Block::ListItem { .. } => "item",
            Block::CodeBlock { .. } => "code",
            Block::Table(_) => "table",
            Block::Rule => "rule",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "title", "section", "paragraph", "item", "item", "sub", "table", "rule", "code"
        ]
    );
    assert_eq!(blocks[4].text(), Some("second point &amp; more"));
}

#[test]
fn table_shape_follows_header_and_data_lines() {
    let blocks = mdpdf::parse(SAMPLE);
    let table = blocks
        .iter()
        .find_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
        .expect("sample has a table");
    assert_eq!(
        table,
        &Table {
            header: vec!["Metric".to_string(), "Value".to_string()],
            rows: vec![
                vec!["Accuracy".to_string(), "<b>92%</b>".to_string()],
                vec!["Latency".to_string(), "40 ms".to_string()],
            ],
        }
    );
}

#[test]
fn code_block_content_is_untouched() {
    let blocks = mdpdf::parse(SAMPLE);
    assert_eq!(
        blocks.last(),
        Some(&Block::CodeBlock {
            language: Some("python".to_string()),
            content: "def f(x):\n    return x * 2  # *not italic*".to_string(),
        })
    );
}

#[test]
fn flow_names_styles_and_config_resolves_them() {
    let flow = mdpdf::markdown_to_flow("### Results\ntext");
    assert_eq!(
        flow,
        vec![
            Flow::Paragraph {
                style: StyleName::Heading3,
                text: "Results".to_string(),
            },
            Flow::Paragraph {
                style: StyleName::Body,
                text: "text".to_string(),
            },
        ]
    );

    let mut config = Config::compiled_default();
    config.styles.heading3.font_size = 15.0;
    let typst = mdpdf::flow_to_typst(&flow, &config);
    assert!(typst.contains("size: 15pt"));
}

#[test]
fn strict_parse_accepts_clean_sources() {
    assert_eq!(mdpdf::parse_strict(SAMPLE).unwrap(), mdpdf::parse(SAMPLE));
}

#[test]
fn strict_parse_reports_line_numbers() {
    let err = mdpdf::parse_strict("ok\n\n| a | b |\n|---|---|\n\n```\nnever closed").unwrap_err();
    let lines: Vec<usize> = err.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![3, 6]);
    assert!(err.to_string().contains("line 6: code fence is never closed"));
}

#[test]
fn converts_file_to_pdf() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("summary.md");
    let output = dir.path().join("summary.pdf");
    std::fs::write(&input, SAMPLE).unwrap();

    mdpdf::convert_file(&input, &output, &Config::compiled_default()).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn missing_source_is_a_read_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("missing.md");
    let output = dir.path().join("out.pdf");

    let err = mdpdf::convert_file(&input, &output, &Config::compiled_default()).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
    assert!(err.to_string().contains("missing.md"));
    assert!(!output.exists());
}
