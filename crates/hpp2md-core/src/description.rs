//! Description extraction from header comments
//!
//! After skipping the license banner, consecutive `//` lines are grouped into
//! paragraphs. A blank comment line (`//` alone) or a line that is not a
//! comment ends the current paragraph. Lines are handled as raw bytes; only
//! ASCII whitespace is trimmed.
//!
//! ```text
//! // Part of measurement-kit ...      <- banner (skipped)
//! // ...
//! // ...
//! // ...
//! // The `Logger` class allows you    <- paragraph 1
//! // to configure logging.
//! //                                  <- end of paragraph
//! // It is thread safe.               <- paragraph 2
//! class Logger;                       <- end of comment block
//! ```

use std::str::FromStr;

/// Number of banner lines skipped by default
pub const DEFAULT_BANNER_LINES: usize = 4;

/// Which comment lines contribute to the description
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DescriptionScope {
    /// Only the comment block right after the banner; the first non-comment
    /// line ends the scan
    #[default]
    Leading,
    /// Every comment run after the banner, anywhere in the file
    File,
}

impl FromStr for DescriptionScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leading" => Ok(Self::Leading),
            "file" => Ok(Self::File),
            other => Err(format!(
                "unknown description scope '{other}' (expected \"leading\" or \"file\")"
            )),
        }
    }
}

/// Options for description extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionOptions {
    /// Lines skipped unconditionally at the top of the file
    pub banner_lines: usize,
    pub scope: DescriptionScope,
}

impl Default for DescriptionOptions {
    fn default() -> Self {
        Self {
            banner_lines: DEFAULT_BANNER_LINES,
            scope: DescriptionScope::default(),
        }
    }
}

/// Lexical class of a header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    /// A comment with text, `//` and surrounding whitespace removed
    Comment(&'a [u8]),
    /// A comment line with no text
    BlankComment,
    /// Anything else
    Code,
}

fn classify(line: &[u8]) -> Line<'_> {
    match line.trim_ascii_start().strip_prefix(b"//") {
        Some(rest) => match rest.trim_ascii() {
            [] => Line::BlankComment,
            text => Line::Comment(text),
        },
        None => Line::Code,
    }
}

/// Fold accumulator: finished paragraphs plus the one being built
#[derive(Debug, Default)]
struct Paragraphs<'a> {
    done: Vec<Vec<u8>>,
    current: Vec<&'a [u8]>,
}

impl<'a> Paragraphs<'a> {
    fn push(mut self, line: Line<'a>) -> Self {
        match line {
            Line::Comment(text) => self.current.push(text),
            Line::BlankComment | Line::Code => self.end_paragraph(),
        }
        self
    }

    fn end_paragraph(&mut self) {
        if !self.current.is_empty() {
            self.done.push(self.current.join(&b' '));
            self.current.clear();
        }
    }

    fn finish(mut self) -> Vec<Vec<u8>> {
        self.end_paragraph();
        self.done
    }
}

/// Split the header comments into paragraphs
pub fn extract_paragraphs<S: AsRef<[u8]>>(
    lines: &[S],
    options: &DescriptionOptions,
) -> Vec<Vec<u8>> {
    let classified = lines
        .iter()
        .skip(options.banner_lines)
        .map(|line| classify(line.as_ref()));

    let paragraphs = match options.scope {
        DescriptionScope::Leading => classified
            .take_while(|line| *line != Line::Code)
            .fold(Paragraphs::default(), Paragraphs::push),
        DescriptionScope::File => classified.fold(Paragraphs::default(), Paragraphs::push),
    };

    paragraphs.finish()
}

/// Extract the prose description of a header
///
/// Paragraphs are separated by a blank line. Headers shorter than the banner
/// yield nothing.
pub fn extract_description<S: AsRef<[u8]>>(lines: &[S], options: &DescriptionOptions) -> Vec<u8> {
    extract_paragraphs(lines, options).join(&b"\n\n"[..])
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANNER: [&str; 4] = [
        "// Part of measurement-kit <https://measurement-kit.github.io/>.\n",
        "// Measurement-kit is free software under the BSD license. See AUTHORS\n",
        "// and LICENSE for more information on the copying conditions.\n",
        "#ifndef MK_FOO_HPP\n",
    ];

    fn header(body: &[&str]) -> Vec<String> {
        BANNER.iter().chain(body).map(|s| s.to_string()).collect()
    }

    fn describe(lines: &[String]) -> String {
        describe_with(lines, &DescriptionOptions::default())
    }

    fn describe_with<S: AsRef<[u8]>>(lines: &[S], options: &DescriptionOptions) -> String {
        String::from_utf8(extract_description(lines, options)).unwrap()
    }

    #[test]
    fn test_short_header_is_empty() {
        assert_eq!(describe(&[]), "");
        assert_eq!(describe(&header(&[])), "");
        let three: Vec<String> = BANNER[..3].iter().map(|s| s.to_string()).collect();
        assert_eq!(describe(&three), "");
    }

    #[test]
    fn test_paragraph_split_on_blank_comment() {
        let lines = header(&["// A\n", "// B\n", "//\n", "// C\n", "// D\n"]);
        assert_eq!(
            extract_paragraphs(&lines, &DescriptionOptions::default()),
            vec![b"A B".to_vec(), b"C D".to_vec()]
        );
        assert_eq!(describe(&lines), "A B\n\nC D");
    }

    #[test]
    fn test_single_paragraph_until_code() {
        let lines = header(&["// Does X.\n", "int f();\n"]);
        assert_eq!(describe(&lines), "Does X.");
    }

    #[test]
    fn test_banner_is_skipped_even_when_comment() {
        let lines = header(&["// Body.\n"]);
        assert!(!describe(&lines).contains("measurement-kit"));
        assert_eq!(describe(&lines), "Body.");
    }

    #[test]
    fn test_fragments_are_trimmed() {
        let lines = header(&["    //   Indented   text  \r\n", "\t// more\n"]);
        assert_eq!(describe(&lines), "Indented   text more");
    }

    #[test]
    fn test_only_first_comment_marker_is_removed() {
        let lines = header(&["// See https://example.org // here\n"]);
        assert_eq!(describe(&lines), "See https://example.org // here");
    }

    #[test]
    fn test_leading_scope_stops_at_first_code_line() {
        let lines = header(&[
            "// Intro.\n",
            "\n",
            "// Not part of the description.\n",
            "int f();\n",
            "// Nor this.\n",
        ]);
        assert_eq!(describe(&lines), "Intro.");
    }

    #[test]
    fn test_leading_scope_with_code_right_after_banner() {
        let lines = header(&["#define MK_FOO_HPP\n", "// Later comment.\n"]);
        assert_eq!(describe(&lines), "");
    }

    #[test]
    fn test_file_scope_collects_every_comment_run() {
        let options = DescriptionOptions {
            scope: DescriptionScope::File,
            ..Default::default()
        };
        let lines = header(&[
            "#define MK_FOO_HPP\n",
            "\n",
            "// The `Foo` class.\n",
            "// It does things.\n",
            "#include <string> // for std::string\n",
            "\n",
            "//\n",
            "//\n",
            "    // Method doc.\n",
            "    void f();\n",
        ]);
        assert_eq!(
            describe_with(&lines, &options),
            "The `Foo` class. It does things.\n\nMethod doc."
        );
    }

    #[test]
    fn test_consecutive_blank_comments_do_not_make_empty_paragraphs() {
        let lines = header(&["//\n", "// A\n", "//\n", "//\n", "// B\n", "//\n"]);
        assert_eq!(describe(&lines), "A\n\nB");
    }

    #[test]
    fn test_custom_banner_size() {
        let options = DescriptionOptions {
            banner_lines: 1,
            ..Default::default()
        };
        let lines = ["// Copyright.\n", "// Real text.\n", "int x;\n"];
        assert_eq!(describe_with(&lines, &options), "Real text.");

        let none = DescriptionOptions {
            banner_lines: 0,
            ..Default::default()
        };
        assert_eq!(describe_with(&lines, &none), "Copyright. Real text.");
    }

    #[test]
    fn test_non_utf8_bytes_are_kept() {
        let lines: Vec<&[u8]> = vec![
            b"// banner 1\n",
            b"// banner 2\n",
            b"// banner 3\n",
            b"//\n",
            b"// caf\xe9.\n",
            b"char c = '\xe9';\n",
        ];
        let description = extract_description(&lines, &DescriptionOptions::default());
        assert_eq!(description, b"caf\xe9.");
    }

    #[test]
    fn test_scope_from_str() {
        assert_eq!("leading".parse::<DescriptionScope>(), Ok(DescriptionScope::Leading));
        assert_eq!("file".parse::<DescriptionScope>(), Ok(DescriptionScope::File));
        assert!("all".parse::<DescriptionScope>().is_err());
    }
}
