//! Header source loading

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// The lines of one header file, as raw bytes
///
/// Each line keeps its own terminator (`\n` or `\r\n`), so concatenating
/// the lines reproduces the file byte for byte. No encoding is assumed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSource {
    lines: Vec<Vec<u8>>,
}

impl HeaderSource {
    /// Read a header from disk
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            lines: bytes
                .split_inclusive(|&b| b == b'\n')
                .map(<[u8]>::to_vec)
                .collect(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
