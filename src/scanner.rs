use thiserror::Error;

use crate::block::{Block, HeadingLevel, Table};
use crate::error::ScanError;
use crate::inline::format_inline;

const FENCE: &str = "```";
const RULE: &str = "---";
const BULLET: &str = "- ";

/// What a single line starts, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Heading(HeadingLevel),
    Rule,
    FenceStart,
    TableStart,
    ListItem,
    Paragraph,
}

/// Classify `line`, using `next` only for the table lookahead.
pub fn classify(line: &str, next: Option<&str>) -> LineKind {
    let line = line.trim_end();
    if line.is_empty() {
        LineKind::Blank
    } else if let Some(level) = heading_level(line) {
        LineKind::Heading(level)
    } else if line.trim() == RULE {
        LineKind::Rule
    } else if line.starts_with(FENCE) {
        LineKind::FenceStart
    } else if line.contains('|') && next.is_some_and(|next| next.contains(RULE)) {
        LineKind::TableStart
    } else if line.starts_with(BULLET) {
        LineKind::ListItem
    } else {
        LineKind::Paragraph
    }
}

/// Length of the leading `#` run when it is followed by a space.
fn heading_marker(line: &str) -> Option<usize> {
    let depth = line.bytes().take_while(|b| *b == b'#').count();
    (depth > 0 && line[depth..].starts_with(' ')).then_some(depth)
}

fn heading_level(line: &str) -> Option<HeadingLevel> {
    heading_marker(line).and_then(HeadingLevel::from_depth)
}

/// Why a construct was degraded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Reason {
    #[error("code fence is never closed; the rest of the document is code")]
    UnterminatedFence,
    #[error("table has {lines} line(s) but needs a header, a separator and a row; dropped")]
    ShortTable { lines: usize },
    #[error("table row has {found} cell(s) but the header has {expected}")]
    RaggedRow { expected: usize, found: usize },
    #[error("heading depth {depth} is not supported; rendered as a paragraph")]
    UnsupportedHeading { depth: usize },
}

/// A degraded construct and the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct Diagnostic {
    pub line: usize,
    pub reason: Reason,
}

/// Outcome of scanning from one cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub block: Option<Block>,
    /// Lines consumed, always at least one.
    pub consumed: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Step {
    fn emit(block: Block, consumed: usize) -> Self {
        Self {
            block: Some(block),
            consumed,
            diagnostics: Vec::new(),
        }
    }

    fn skip(consumed: usize) -> Self {
        Self {
            block: None,
            consumed,
            diagnostics: Vec::new(),
        }
    }

    fn with(mut self, diagnostic: Option<Diagnostic>) -> Self {
        self.diagnostics.extend(diagnostic);
        self
    }
}

/// Scan the construct starting at `at`. Returns `None` past the end of input.
pub fn step<S: AsRef<str>>(lines: &[S], at: usize) -> Option<Step> {
    let line = lines.get(at)?.as_ref().trim_end();
    let next: Option<&str> = lines.get(at + 1).map(AsRef::as_ref);

    let step = match classify(line, next) {
        LineKind::Blank => Step::skip(1),
        LineKind::Heading(level) => {
            let text = &line[usize::from(level.depth()) + 1..];
            Step::emit(
                Block::Heading {
                    level,
                    text: format_inline(text),
                },
                1,
            )
        }
        LineKind::Rule => Step::emit(Block::Rule, 1),
        LineKind::FenceStart => fenced_code(lines, at),
        LineKind::TableStart => table(lines, at),
        LineKind::ListItem => Step::emit(
            Block::ListItem {
                text: format_inline(&line[BULLET.len()..]),
            },
            1,
        ),
        LineKind::Paragraph => {
            let deep_heading = heading_marker(line).map(|depth| Diagnostic {
                line: at + 1,
                reason: Reason::UnsupportedHeading { depth },
            });
            Step::emit(
                Block::Paragraph {
                    text: format_inline(line),
                },
                1,
            )
            .with(deep_heading)
        }
    };

    Some(step)
}

fn fenced_code<S: AsRef<str>>(lines: &[S], at: usize) -> Step {
    let opening = lines[at].as_ref().trim_end();
    let info = opening.trim_start_matches('`').trim();
    let language = (!info.is_empty()).then(|| info.to_string());

    let mut body = Vec::new();
    let mut end = at + 1;
    let mut closed = false;
    while let Some(line) = lines.get(end) {
        let line = line.as_ref();
        if line.trim().starts_with(FENCE) {
            closed = true;
            break;
        }
        body.push(line.trim_end());
        end += 1;
    }

    let block = Block::CodeBlock {
        language,
        content: body.join("\n"),
    };

    if closed {
        Step::emit(block, end + 1 - at)
    } else {
        Step::emit(block, end - at).with(Some(Diagnostic {
            line: at + 1,
            reason: Reason::UnterminatedFence,
        }))
    }
}

fn table<S: AsRef<str>>(lines: &[S], at: usize) -> Step {
    let table_lines: Vec<&str> = lines[at..]
        .iter()
        .map(AsRef::as_ref)
        .take_while(|line: &&str| line.contains('|'))
        .map(str::trim_end)
        .collect();
    let consumed = table_lines.len();

    if consumed < 3 {
        return Step::skip(consumed).with(Some(Diagnostic {
            line: at + 1,
            reason: Reason::ShortTable { lines: consumed },
        }));
    }

    let header = split_cells(table_lines[0]);
    let mut diagnostics = Vec::new();
    let rows: Vec<Vec<String>> = table_lines[2..]
        .iter()
        .enumerate()
        .map(|(offset, line)| {
            let row = split_cells(line);
            if row.len() != header.len() {
                diagnostics.push(Diagnostic {
                    line: at + 3 + offset,
                    reason: Reason::RaggedRow {
                        expected: header.len(),
                        found: row.len(),
                    },
                });
            }
            row
        })
        .collect();

    Step {
        block: Some(Block::Table(Table { header, rows })),
        consumed,
        diagnostics,
    }
}

/// Split a pipe row into formatted cells, dropping the empty edge fields of
/// `| a | b |`.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.first().is_some_and(|cell| cell.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells.into_iter().map(format_inline).collect()
}

/// Iterator over the blocks of a document, collecting diagnostics on the way.
pub struct Scanner<'a, S> {
    lines: &'a [S],
    at: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, S: AsRef<str>> Scanner<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        Self {
            lines,
            at: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl<S: AsRef<str>> Iterator for Scanner<'_, S> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        while let Some(step) = step(self.lines, self.at) {
            self.at += step.consumed;
            self.diagnostics.extend(step.diagnostics);
            if step.block.is_some() {
                return step.block;
            }
        }
        None
    }
}

/// Best-effort scan: degraded constructs are logged and otherwise ignored.
pub fn scan<S: AsRef<str>>(lines: &[S]) -> Vec<Block> {
    let (blocks, diagnostics) = scan_with_diagnostics(lines);
    for diagnostic in &diagnostics {
        log::warn!("{diagnostic}");
    }
    blocks
}

/// Best-effort scan that also returns every degraded construct.
pub fn scan_with_diagnostics<S: AsRef<str>>(lines: &[S]) -> (Vec<Block>, Vec<Diagnostic>) {
    let mut scanner = Scanner::new(lines);
    let blocks: Vec<Block> = scanner.by_ref().collect();
    log::debug!("scanned {} lines into {} blocks", lines.len(), blocks.len());
    (blocks, scanner.into_diagnostics())
}

/// Scan, failing if anything had to be degraded.
pub fn scan_strict<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Block>, ScanError> {
    let (blocks, diagnostics) = scan_with_diagnostics(lines);
    if diagnostics.is_empty() {
        Ok(blocks)
    } else {
        Err(ScanError { diagnostics })
    }
}
