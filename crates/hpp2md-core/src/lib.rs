//! hpp2md-core: Core library for generating Markdown API pages from C++ headers
//!
//! This crate provides:
//! - Header reading (binary-safe line splitting)
//! - Synopsis extraction (comment/include filtering + pluggable formatter)
//! - Description extraction (leading comment block to paragraphs)
//! - Output path derivation and page rendering

pub mod description;
pub mod page;
pub mod paths;
pub mod source;
pub mod synopsis;

pub use description::{DescriptionOptions, DescriptionScope, extract_description};
pub use page::{Page, PageOptions, build_documentation_for_file};
pub use paths::PathMapping;
pub use source::HeaderSource;
pub use synopsis::{ExternalFormatter, Formatter, Verbatim, extract_synopsis, gather_code};

use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that can occur while generating a page
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Input path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to run formatter `{program}`: {source}")]
    FormatterSpawn {
        program: String,
        source: std::io::Error,
    },

    #[error("I/O error while talking to formatter `{program}`: {source}")]
    FormatterIo {
        program: String,
        source: std::io::Error,
    },

    #[error("Formatter `{program}` exited with {status}")]
    FormatterStatus { program: String, status: ExitStatus },
}

/// Result type for page generation
pub type Result<T> = std::result::Result<T, Error>;
