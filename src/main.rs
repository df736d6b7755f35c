use std::path::{Path, PathBuf};

use clap::Parser;
use mdpdf::{Config, Error};

#[derive(Parser)]
#[command(name = "mdpdf")]
#[command(about = "Convert Markdown files to styled A4 PDFs")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output file
    output: PathBuf,

    /// TOML file overriding the bundled style and layout settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refuse to convert sources containing malformed tables, unclosed code
    /// fences or unsupported headings
    #[arg(long)]
    strict: bool,

    /// Write the generated Typst markup instead of a PDF
    #[arg(long)]
    typst: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    println!("Created {}", cli.output.display());
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::compiled_default(),
    };

    let markdown = mdpdf::read_source(&cli.input)?;
    log::info!("read {} bytes from {}", markdown.len(), cli.input.display());

    if cli.strict {
        mdpdf::parse_strict(&markdown)?;
    }

    if cli.typst {
        let typst = mdpdf::markdown_to_typst_with_config(&markdown, &config);
        write(&cli.output, typst.as_bytes())
    } else {
        let pdf = mdpdf::markdown_to_pdf_with_config(&markdown, &config)?;
        write(&cli.output, &pdf)
    }
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    mdpdf::write_output(path, bytes)?;
    log::info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
