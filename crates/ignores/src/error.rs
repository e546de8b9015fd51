use std::io;
use std::path::PathBuf;

/// Reason a pattern line could not become a working rule.
///
/// These never reach callers of [`IgnoreProcessor::allowed`](crate::IgnoreProcessor::allowed);
/// the rendered message is stored as the reason of an invalid rule.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The line consisted of `!` alone.
    #[error("negation with no negated pattern")]
    NegationWithoutPattern,

    /// The pattern named the ignore file's own directory.
    #[error("pattern '.' is invalid")]
    CurrentDirectory,

    /// The pattern started by leaving the ignore file's directory.
    #[error("pattern '..' is invalid: patterns cannot reach outside the ignore file's directory")]
    ParentDirectory,

    /// The pattern contained three consecutive `*`.
    #[error("the pattern *** is invalid")]
    TripleStar,

    /// Nothing but separators remained once the pattern was parsed.
    #[error("pattern has no path components")]
    EmptyPattern,

    /// Too many `**` shared a path segment with other text.
    #[error("pattern has more than {limit} '**' sharing a segment with other text")]
    EmbeddedRecursive {
        /// Largest number accepted.
        limit: usize,
    },

    /// The reconstructed glob was rejected by the glob compiler.
    #[error("failed to compile glob '{pattern}': {source}")]
    Glob {
        /// Glob text handed to the compiler.
        pattern: String,
        /// Underlying compiler error.
        #[source]
        source: globset::Error,
    },

    /// The wildcard expression of a rooted file pattern was rejected.
    #[error("failed to compile expression for '{pattern}': {source}")]
    Regex {
        /// Filename pattern the expression was built from.
        pattern: String,
        /// Underlying compiler error.
        #[source]
        source: regex::Error,
    },
}

impl RuleError {
    pub(crate) fn glob(pattern: impl Into<String>, source: globset::Error) -> Self {
        Self::Glob {
            pattern: pattern.into(),
            source,
        }
    }

    pub(crate) fn regex(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::Regex {
            pattern: pattern.into(),
            source,
        }
    }
}

/// Failure while reading an ignore file that exists.
///
/// Loading is best-effort: rules parsed before the failure stay active and the
/// error is reported through [`LoadStatus::Partial`](crate::LoadStatus::Partial).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("could not process {path}: {source}")]
    Io {
        /// The ignore file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    /// Creates an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the file that failed to load.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } => path,
        }
    }
}

/// Maps I/O results to [`LoadError`] with path context.
pub(crate) trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T, LoadError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T, LoadError> {
        self.map_err(|e| LoadError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globset::GlobBuilder;
    use std::error::Error as _;

    #[test]
    fn glob_error_preserves_pattern_and_source() {
        let glob_err = GlobBuilder::new("[").build().unwrap_err();
        let error = RuleError::glob("[", glob_err.clone());

        assert!(error.to_string().contains("failed to compile glob '['"));
        assert!(error.source().is_some());
        assert_eq!(error.source().unwrap().to_string(), glob_err.to_string());
    }

    #[test]
    fn regex_error_preserves_source() {
        let regex_err = regex::Regex::new("(").unwrap_err();
        let error = RuleError::regex("foo(", regex_err);
        assert!(error.to_string().contains("'foo('"));
        assert!(error.source().is_some());
    }

    #[test]
    fn fixed_messages() {
        assert_eq!(
            RuleError::NegationWithoutPattern.to_string(),
            "negation with no negated pattern"
        );
        assert_eq!(RuleError::TripleStar.to_string(), "the pattern *** is invalid");
        assert_eq!(RuleError::CurrentDirectory.to_string(), "pattern '.' is invalid");
    }

    #[test]
    fn load_error_io_mentions_path() {
        let error = LoadError::io(
            "/path/to/.ignore",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{error}");
        assert!(display.contains("/path/to/.ignore"));
        assert!(display.contains("denied"));
        assert_eq!(error.path(), std::path::Path::new("/path/to/.ignore"));
    }

    #[test]
    fn with_path_wraps_io_errors() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let error = result.with_path("missing/.ignore").unwrap_err();
        assert!(matches!(error, LoadError::Io { .. }));
    }
}
