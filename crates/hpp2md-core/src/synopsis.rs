//! Code synopsis extraction
//!
//! The synopsis is the header with comment-only lines and `#include`
//! directives removed, passed through a source formatter.
//!
//! ## Formatters
//!
//! | Formatter | Behavior |
//! |-----------|----------|
//! | [`ExternalFormatter`] | Pipes the code through an executable (`clang-format` by default) |
//! | [`Verbatim`] | Returns the code unchanged |
//! | `Fn(&[u8]) -> Result<Vec<u8>>` | Any closure, mostly for tests |
//!
//! Code travels as raw bytes, so headers in any encoding pass through unchanged.

use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;

use crate::{Error, Result};

/// Default formatter executable
pub const DEFAULT_FORMATTER: &str = "clang-format";

/// Turns raw code into display-ready code
pub trait Formatter {
    fn format(&self, code: &[u8]) -> Result<Vec<u8>>;
}

impl<F> Formatter for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>>,
{
    fn format(&self, code: &[u8]) -> Result<Vec<u8>> {
        self(code)
    }
}

/// Leaves code untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl Formatter for Verbatim {
    fn format(&self, code: &[u8]) -> Result<Vec<u8>> {
        Ok(code.to_vec())
    }
}

/// Formats code by running an external program over stdin/stdout
#[derive(Debug, Clone)]
pub struct ExternalFormatter {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ExternalFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_FORMATTER)
    }
}

impl ExternalFormatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Parse a whitespace-separated command line such as `clang-format -style=LLVM`
    ///
    /// Returns `None` for a blank command.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut words = command.split_whitespace();
        let program = words.next()?;
        Some(Self::new(program).with_args(words))
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::FormatterIo {
            program: self.program.clone(),
            source,
        }
    }
}

impl Formatter for ExternalFormatter {
    fn format(&self, code: &[u8]) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| Error::FormatterSpawn {
                program: self.program.clone(),
                source,
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            self.io_error(std::io::Error::other("stdin was not captured"))
        })?;
        let mut stdout = child.stdout.take().ok_or_else(|| {
            self.io_error(std::io::Error::other("stdout was not captured"))
        })?;

        // Feed stdin while draining stdout so neither pipe can fill up.
        let (written, read) = thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(code));
            let mut output = Vec::new();
            let read = stdout.read_to_end(&mut output).map(|_| output);
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (written, read)
        });

        let status = child.wait().map_err(|e| self.io_error(e))?;
        // A formatter that exits early closes its stdin; report the exit status instead.
        if !status.success() {
            return Err(Error::FormatterStatus {
                program: self.program.clone(),
                status,
            });
        }
        written.map_err(|e| self.io_error(e))?;
        read.map_err(|e| self.io_error(e))
    }
}

/// Whether a line belongs in the code body
///
/// Comment-only lines and `#include` directives are dropped.
fn is_code_line(line: &[u8]) -> bool {
    let trimmed = line.trim_ascii();
    !trimmed.starts_with(b"//") && !trimmed.starts_with(b"#include")
}

/// Collect the code body of a header
///
/// Kept lines are copied verbatim (indentation and terminators included).
pub fn gather_code<S: AsRef<[u8]>>(lines: &[S]) -> Vec<u8> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| is_code_line(line))
        .flatten()
        .copied()
        .collect()
}

/// Produce the formatted synopsis of a header
pub fn extract_synopsis<S: AsRef<[u8]>>(
    lines: &[S],
    formatter: &dyn Formatter,
) -> Result<Vec<u8>> {
    formatter.format(&gather_code(lines))
}
