//! Display name and output path derivation
//!
//! Both are plain string substitutions on the input path; a pattern that
//! does not occur leaves the path unchanged.
//!
//! | Input | Display name | Output path |
//! |-------|--------------|-------------|
//! | `include/mk/net/http.hpp` | `mk/net/http.hpp` | `doc/api/net/http.md` |
//! | `include/mk/safe.h` | `mk/safe.h` | `doc/api/safe.md` |
//! | `src/foo.hpp` | `src/foo.hpp` | `src/foo.md` |

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Header extensions replaced in the output path, longest first
const HEADER_EXTENSIONS: [&str; 2] = [".hpp", ".h"];

/// Substitutions used to derive names and output paths from input paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapping {
    /// Segment removed from the input path to form the display name
    pub strip_prefix: String,
    /// Segment of the input path replaced by `output_prefix`
    pub source_prefix: String,
    pub output_prefix: String,
    /// Extension (without dot) replacing `.hpp`/`.h`
    pub output_extension: String,
}

impl Default for PathMapping {
    fn default() -> Self {
        Self {
            strip_prefix: "include/".to_string(),
            source_prefix: "include/mk".to_string(),
            output_prefix: "doc/api".to_string(),
            output_extension: "md".to_string(),
        }
    }
}

impl PathMapping {
    /// Name shown in the NAME section
    pub fn display_name(&self, input: &str) -> String {
        if self.strip_prefix.is_empty() {
            return input.to_string();
        }
        input.replace(&self.strip_prefix, "")
    }

    /// Path of the generated page
    pub fn output_path(&self, input: &str) -> String {
        let relocated = if self.source_prefix.is_empty() {
            input.to_string()
        } else {
            input.replace(&self.source_prefix, &self.output_prefix)
        };

        match HEADER_EXTENSIONS
            .iter()
            .find_map(|ext| relocated.strip_suffix(ext))
        {
            Some(stem) => format!("{}.{}", stem, self.output_extension),
            None => relocated,
        }
    }

    /// [`Self::display_name`] and [`Self::output_path`] for a filesystem path
    ///
    /// The substitutions are textual, so the path must be valid UTF-8.
    pub fn map_path(&self, input: &Path) -> Result<(String, PathBuf)> {
        let input = input.to_str().ok_or_else(|| Error::NonUtf8Path {
            path: input.to_path_buf(),
        })?;
        Ok((
            self.display_name(input),
            PathBuf::from(self.output_path(input)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping() {
        let mapping = PathMapping::default();
        assert_eq!(mapping.display_name("include/mk/net/http.hpp"), "mk/net/http.hpp");
        assert_eq!(mapping.output_path("include/mk/net/http.hpp"), "doc/api/net/http.md");
    }

    #[test]
    fn test_dot_h_extension() {
        let mapping = PathMapping::default();
        assert_eq!(mapping.output_path("include/mk/safe.h"), "doc/api/safe.md");
    }

    #[test]
    fn test_non_matching_paths_are_best_effort() {
        let mapping = PathMapping::default();
        assert_eq!(mapping.display_name("src/foo.hpp"), "src/foo.hpp");
        assert_eq!(mapping.output_path("src/foo.hpp"), "src/foo.md");
        // No header extension: only the prefix substitution applies
        assert_eq!(mapping.output_path("include/mk/README"), "doc/api/README");
    }

    #[test]
    fn test_extension_only_replaced_at_end() {
        let mapping = PathMapping::default();
        assert_eq!(mapping.output_path("include/mk/a.hpp.d/b.hpp"), "doc/api/a.hpp.d/b.md");
        assert_eq!(mapping.output_path("include/mk/x.hh"), "doc/api/x.hh");
    }

    #[test]
    fn test_prefix_inside_path() {
        let mapping = PathMapping::default();
        assert_eq!(
            mapping.display_name("/src/project/include/mk/logger.hpp"),
            "/src/project/mk/logger.hpp"
        );
        assert_eq!(
            mapping.output_path("/src/project/include/mk/logger.hpp"),
            "/src/project/doc/api/logger.md"
        );
    }

    #[test]
    fn test_custom_mapping() {
        let mapping = PathMapping {
            strip_prefix: "inc/".to_string(),
            source_prefix: "inc/lib".to_string(),
            output_prefix: "docs/reference".to_string(),
            output_extension: "qmd".to_string(),
        };
        let (name, output) = mapping.map_path(Path::new("inc/lib/core.h")).unwrap();
        assert_eq!(name, "lib/core.h");
        assert_eq!(output, PathBuf::from("docs/reference/core.qmd"));
    }

    #[test]
    fn test_derivation_is_pure() {
        let mapping = PathMapping::default();
        let first = mapping.map_path(Path::new("include/mk/logger.hpp")).unwrap();
        let second = mapping.map_path(Path::new("include/mk/logger.hpp")).unwrap();
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mapping = PathMapping::default();
        let input = Path::new(OsStr::from_bytes(b"include/mk/caf\xe9.hpp"));
        let err = mapping.map_path(input).unwrap_err();
        assert!(matches!(err, Error::NonUtf8Path { .. }));
    }
}
