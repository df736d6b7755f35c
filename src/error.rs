use std::path::PathBuf;

use thiserror::Error;

use crate::scanner::Diagnostic;

/// Errors surfaced by file conversion.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Returned by strict scanning when any construct had to be degraded.
#[derive(Debug, Error)]
#[error(
    "source has {} problem(s):\n{}",
    .diagnostics.len(),
    .diagnostics.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
)]
pub struct ScanError {
    pub diagnostics: Vec<Diagnostic>,
}
