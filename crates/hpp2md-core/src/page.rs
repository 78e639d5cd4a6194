//! Markdown page assembly
//!
//! A page has four fixed sections: NAME, LIBRARY, SYNOPSIS and DESCRIPTION.

use std::fs;
use std::path::{Path, PathBuf};

use crate::description::{DescriptionOptions, extract_description};
use crate::paths::PathMapping;
use crate::source::HeaderSource;
use crate::synopsis::{Formatter, extract_synopsis};
use crate::{Error, Result};

/// Library reference printed in the LIBRARY section by default
pub const DEFAULT_LIBRARY: &str =
    "measurement-kit (`libmeasurement_kit`, `-lmeasurement_kit`)";

/// Info string of the synopsis code fence by default
pub const DEFAULT_LANGUAGE: &str = "C++";

/// Options for page generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    /// Text of the LIBRARY section
    pub library: String,
    /// Language tag of the synopsis code fence
    pub language: String,
    pub description: DescriptionOptions,
    pub paths: PathMapping,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            library: DEFAULT_LIBRARY.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            description: DescriptionOptions::default(),
            paths: PathMapping::default(),
        }
    }
}

/// Extracted content of one documentation page
///
/// Synopsis and description hold the header's bytes as found, without
/// assuming an encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub name: String,
    pub synopsis: Vec<u8>,
    pub description: Vec<u8>,
}

impl Page {
    /// Extract a page from an already loaded header
    pub fn from_source(
        name: impl Into<String>,
        source: &HeaderSource,
        formatter: &dyn Formatter,
        options: &PageOptions,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            synopsis: extract_synopsis(source.lines(), formatter)?,
            description: extract_description(source.lines(), &options.description),
        })
    }

    /// Render the page as Markdown
    pub fn to_markdown(&self, options: &PageOptions) -> Vec<u8> {
        let mut out = Vec::new();

        out.extend_from_slice(b"# NAME\n\n");
        out.extend_from_slice(format!("`{}`\n\n", self.name).as_bytes());

        out.extend_from_slice(b"# LIBRARY\n\n");
        out.extend_from_slice(options.library.as_bytes());
        out.extend_from_slice(b"\n\n");

        // The formatter output is expected to end with its own newline.
        out.extend_from_slice(format!("# SYNOPSIS\n\n```{}\n", options.language).as_bytes());
        out.extend_from_slice(&self.synopsis);
        out.extend_from_slice(b"```\n\n");

        out.extend_from_slice(b"# DESCRIPTION\n\n");
        out.extend_from_slice(&self.description);
        out.extend_from_slice(b"\n\n");

        out
    }
}

/// Generate the page for one header and write it next to the API docs
///
/// The output path is derived from `input` through `options.paths`. The
/// whole page is rendered before the output file is touched, and an
/// existing file is overwritten. The parent directory must already exist.
///
/// Returns the path that was written.
pub fn build_documentation_for_file(
    input: &Path,
    formatter: &dyn Formatter,
    options: &PageOptions,
) -> Result<PathBuf> {
    let (name, output_path) = options.paths.map_path(input)?;

    let source = HeaderSource::read(input)?;
    let page = Page::from_source(name, &source, formatter, options)?;

    fs::write(&output_path, page.to_markdown(options)).map_err(|source| Error::Write {
        path: output_path.clone(),
        source,
    })?;

    Ok(output_path)
}
