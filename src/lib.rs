mod block;
mod config;
mod error;
mod flow;
mod inline;
mod markup;
mod scanner;
mod style;
mod typst;

pub use block::{Block, HeadingLevel, Table};
pub use config::{Config, FontConfig, LayoutConfig, PageConfig};
pub use error::{ConfigError, Error, ScanError};
pub use flow::{Flow, TableFlow, blocks_to_flow};
pub use inline::{CODE_COLOR, CODE_FACE, CODE_SIZE, format_inline};
pub use markup::{Font, Run, parse_markup};
pub use scanner::{
    Diagnostic, LineKind, Reason, Scanner, Step, classify, scan, scan_strict,
    scan_with_diagnostics, step,
};
pub use style::{
    Alignment, Family, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, ParagraphStyle, StyleName,
    StyleRegistry, TableStyle,
};
pub use typst::flow_to_typst;

use std::fs;
use std::path::Path;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Parse markdown text into a vector of blocks, degrading malformed constructs.
pub fn parse(markdown: &str) -> Vec<Block> {
    let lines: Vec<&str> = markdown.lines().collect();
    scan(&lines)
}

/// Parse markdown text, failing on anything that would be degraded.
pub fn parse_strict(markdown: &str) -> Result<Vec<Block>, ScanError> {
    let lines: Vec<&str> = markdown.lines().collect();
    scan_strict(&lines)
}

/// Parse markdown into the flow elements handed to the layout engine.
pub fn markdown_to_flow(markdown: &str) -> Vec<Flow> {
    blocks_to_flow(&parse(markdown))
}

/// Convert markdown to Typst markup using default config.
pub fn markdown_to_typst(markdown: &str) -> String {
    markdown_to_typst_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to Typst markup with custom config.
pub fn markdown_to_typst_with_config(markdown: &str, config: &Config) -> String {
    flow_to_typst(&markdown_to_flow(markdown), config)
}

/// Convert markdown to PDF bytes using default config.
pub fn markdown_to_pdf(markdown: &str) -> Result<Vec<u8>, Error> {
    markdown_to_pdf_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to PDF bytes with custom config.
pub fn markdown_to_pdf_with_config(markdown: &str, config: &Config) -> Result<Vec<u8>, Error> {
    typst_to_pdf(markdown_to_typst_with_config(markdown, config), config)
}

/// Compile a Typst document to PDF bytes.
pub fn typst_to_pdf(typst_content: String, config: &Config) -> Result<Vec<u8>, Error> {
    use typst_library::layout::PagedDocument;

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(config.font.system_fonts);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Compile(format!("{e:?}")))?;
    log::debug!("laid out {} page(s)", doc.pages.len());

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{e:?}")))
}

/// Read a markdown file and write it as a PDF.
///
/// The source is read in full before anything else happens; the PDF is
/// written only once it has been produced completely.
pub fn convert_file(input: &Path, output: &Path, config: &Config) -> Result<(), Error> {
    let markdown = read_source(input)?;
    let pdf = markdown_to_pdf_with_config(&markdown, config)?;
    write_output(output, &pdf)
}

/// Read a markdown source file.
pub fn read_source(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write rendered output to disk.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    fs::write(path, bytes).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
