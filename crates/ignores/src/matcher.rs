//! Compiled matchers backing the file, directory, and rooted rule shapes.

use std::borrow::Cow;

use globset::{GlobBuilder, GlobMatcher};
use regex::{Regex, RegexBuilder};

use crate::error::RuleError;
use crate::token::{Part, Token};

/// Most `**` that may share a segment with other text in one pattern.
const EMBEDDED_RECURSIVE_LIMIT: usize = 6;

fn compile_glob(pattern: &str, case_insensitive: bool) -> Result<GlobMatcher, RuleError> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|error| RuleError::glob(pattern, error))?;
    Ok(glob.compile_matcher())
}

/// Expands `parts` into the globs compiled for one pattern.
///
/// [`globset`] only treats `**` as recursive when it fills a whole segment.
/// Any other `**` yields two globs, one with `*` in its place and one with
/// `*/**/*`, so `src/**.java` still reaches `src/a/b/C.java`.
fn glob_variants(parts: &[Part]) -> Result<Vec<String>, RuleError> {
    let parts: Vec<&Part> = parts
        .iter()
        .filter(|part| part.token() != Token::RootedMarker)
        .collect();
    let embedded = |index: usize| {
        parts[index].token() == Token::MatchAll && !fills_segment(&parts, index)
    };

    if (0..parts.len()).filter(|&index| embedded(index)).count() > EMBEDDED_RECURSIVE_LIMIT {
        return Err(RuleError::EmbeddedRecursive {
            limit: EMBEDDED_RECURSIVE_LIMIT,
        });
    }

    let mut variants = vec![String::new()];
    for (index, part) in parts.iter().enumerate() {
        if embedded(index) {
            variants = variants
                .into_iter()
                .flat_map(|prefix| [format!("{prefix}*"), format!("{prefix}*/**/*")])
                .collect();
        } else {
            for variant in &mut variants {
                variant.push_str(part.value());
            }
        }
    }
    Ok(variants)
}

fn fills_segment(parts: &[&Part], index: usize) -> bool {
    let opens = index
        .checked_sub(1)
        .and_then(|before| parts.get(before))
        .is_none_or(|part| part.token() == Token::PathDelimiter);
    let closes = parts.get(index + 1).is_none_or(|part| {
        matches!(
            part.token(),
            Token::PathDelimiter | Token::DirectoryMarker
        )
    });
    opens && closes
}

fn compile_globs(parts: &[Part], case_insensitive: bool) -> Result<Vec<GlobMatcher>, RuleError> {
    glob_variants(parts)?
        .iter()
        .map(|glob| compile_glob(glob, case_insensitive))
        .collect()
}

/// Glob over the full relative path.
///
/// `*` stays within one segment while `**` spans any number of segments,
/// including none, whether or not it fills a segment on its own. Character
/// classes, `?`, and `{a,b}` alternation are handled by [`globset`].
#[derive(Clone, Debug)]
pub struct FileMatcher {
    matchers: Vec<GlobMatcher>,
}

impl FileMatcher {
    pub(crate) fn new(parts: &[Part], case_insensitive: bool) -> Result<Self, RuleError> {
        Ok(Self {
            matchers: compile_globs(parts, case_insensitive)?,
        })
    }

    /// Returns the compiled glob texts, one per expansion of an embedded `**`.
    pub fn globs(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|matcher| matcher.glob().glob())
    }

    /// Returns `true` when a glob matches the whole of `relative_path`.
    #[must_use]
    pub fn is_match(&self, relative_path: &str) -> bool {
        self.matchers
            .iter()
            .any(|matcher| matcher.is_match(relative_path))
    }
}

/// Matches a directory entry and everything beneath it.
#[derive(Clone, Debug)]
pub struct DirectoryMatcher {
    directory: Vec<GlobMatcher>,
    contents: Vec<GlobMatcher>,
}

impl DirectoryMatcher {
    pub(crate) fn new(parts: &[Part], case_insensitive: bool) -> Result<Self, RuleError> {
        let mut directory = Vec::new();
        let mut contents = Vec::new();
        for variant in glob_variants(parts)? {
            let base = variant.trim_end_matches('/');
            directory.push(compile_glob(&format!("{base}/"), case_insensitive)?);
            contents.push(compile_glob(&format!("{base}/**"), case_insensitive)?);
        }
        Ok(Self {
            directory,
            contents,
        })
    }

    /// Returns the globs matching the directory entry, each ending in a single `/`.
    pub fn directory_globs(&self) -> impl Iterator<Item = &str> {
        self.directory.iter().map(|matcher| matcher.glob().glob())
    }

    /// Returns the globs matching the directory's recursive contents.
    pub fn contents_globs(&self) -> impl Iterator<Item = &str> {
        self.contents.iter().map(|matcher| matcher.glob().glob())
    }

    /// Returns `true` for the directory itself (with or without a trailing
    /// separator) or any path nested beneath it.
    #[must_use]
    pub fn is_match(&self, relative_path: &str) -> bool {
        if self
            .contents
            .iter()
            .any(|matcher| matcher.is_match(relative_path))
        {
            return true;
        }
        let as_directory = if relative_path.ends_with('/') {
            Cow::Borrowed(relative_path)
        } else {
            Cow::Owned(format!("{relative_path}/"))
        };
        self.directory
            .iter()
            .any(|matcher| matcher.is_match(as_directory.as_ref()))
    }
}

/// Single-segment pattern anchored to the ignore file's directory.
///
/// The pattern is split at its last `.` into a filename part and an extension
/// part. Only `*` is special here: it expands to a lazy run of any characters
/// in the filename part, and an extension part of exactly `*` accepts any
/// extension, the empty one included. A backslash makes the next character
/// literal. Character classes and `?` are compared as written.
#[derive(Clone, Debug)]
pub struct RootedFileMatcher {
    filename: String,
    extension: String,
    literal_filename: String,
    literal_extension: String,
    wildcard: Option<Regex>,
    case_insensitive: bool,
}

impl RootedFileMatcher {
    pub(crate) fn new(pattern: &str, case_insensitive: bool) -> Result<Self, RuleError> {
        let (filename, extension) = split_filename(pattern);
        let wildcard = if has_wildcard(filename) {
            Some(compile_wildcard(filename, case_insensitive)?)
        } else {
            None
        };
        Ok(Self {
            filename: filename.to_owned(),
            extension: extension.to_owned(),
            literal_filename: unescape(filename),
            literal_extension: unescape(extension),
            wildcard,
            case_insensitive,
        })
    }

    /// Returns the part of the pattern before its last `.`.
    #[must_use]
    pub fn filename_part(&self) -> &str {
        &self.filename
    }

    /// Returns the part of the pattern after its last `.`, or `""`.
    #[must_use]
    pub fn extension_part(&self) -> &str {
        &self.extension
    }

    /// Returns `true` when `relative_path` is a single segment whose filename
    /// and extension both satisfy the pattern.
    #[must_use]
    pub fn is_match(&self, relative_path: &str) -> bool {
        // "/file.txt" is still a single segment; "dir/file.txt" is not.
        if relative_path.rfind('/').is_some_and(|index| index > 0) {
            return false;
        }

        let (filename, extension) = split_filename(relative_path);
        let extension_matches =
            self.extension == "*" || self.equals(&self.literal_extension, extension);
        if !extension_matches {
            return false;
        }

        match &self.wildcard {
            Some(regex) => regex.is_match(filename),
            None => self.equals(&self.literal_filename, filename),
        }
    }

    fn equals(&self, defined: &str, candidate: &str) -> bool {
        if self.case_insensitive {
            defined
                .chars()
                .flat_map(char::to_lowercase)
                .eq(candidate.chars().flat_map(char::to_lowercase))
        } else {
            defined == candidate
        }
    }
}

/// Splits a single segment into filename and extension at its last `.`.
///
/// A leading `/` is ignored, and a dot in first position belongs to the
/// filename, so `.env` has no extension.
fn split_filename(segment: &str) -> (&str, &str) {
    let name = segment.strip_prefix('/').unwrap_or(segment);
    match name.rfind('.') {
        Some(index) if index > 0 => (&name[..index], &name[index + 1..]),
        _ => (name, ""),
    }
}

/// Returns `true` when `part` holds a `*` that is not escaped.
fn has_wildcard(part: &str) -> bool {
    let mut chars = part.chars();
    while let Some(c) = chars.next() {
        match c {
            '*' => return true,
            '\\' => {
                chars.next();
            }
            _ => {}
        }
    }
    false
}

fn unescape(part: &str) -> String {
    let mut literal = String::with_capacity(part.len());
    let mut chars = part.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            literal.push(chars.next().unwrap_or('\\'));
        } else {
            literal.push(c);
        }
    }
    literal
}

fn compile_wildcard(filename: &str, case_insensitive: bool) -> Result<Regex, RuleError> {
    let mut source = String::with_capacity(filename.len().saturating_mul(2) + 2);
    let mut literal = String::new();
    let mut chars = filename.chars();
    source.push('^');
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                source.push_str(&regex::escape(&std::mem::take(&mut literal)));
                source.push_str(".*?");
            }
            '\\' => literal.push(chars.next().unwrap_or('\\')),
            _ => literal.push(c),
        }
    }
    source.push_str(&regex::escape(&literal));
    source.push('$');

    RegexBuilder::new(&source)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|error| RuleError::regex(filename, error))
}
