use std::fmt;

use crate::error::RuleError;
use crate::matcher::{DirectoryMatcher, FileMatcher, RootedFileMatcher};
use crate::operation::Operation;
use crate::options::IgnoreOptions;
use crate::token::{Part, Token, reconstruct, tokenize};

/// Matching strategy selected for a rule when its line is parsed.
#[derive(Clone, Debug)]
pub enum RuleKind {
    /// Glob over the whole relative path.
    File(FileMatcher),
    /// Pattern ending in `/`: the directory and its recursive contents.
    Directory(DirectoryMatcher),
    /// Single segment anchored to the ignore file's directory.
    RootedFile(RootedFileMatcher),
    /// Line that was tokenized but could not become a usable pattern.
    Invalid {
        /// Human-readable explanation.
        reason: String,
    },
}

/// Fieldless discriminant of [`RuleKind`], convenient for introspection.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RuleShape {
    /// See [`RuleKind::File`].
    File,
    /// See [`RuleKind::Directory`].
    Directory,
    /// See [`RuleKind::RootedFile`].
    RootedFile,
    /// See [`RuleKind::Invalid`].
    Invalid,
}

impl fmt::Display for RuleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
            Self::RootedFile => f.write_str("rooted-file"),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}

/// One parsed line of an ignore file.
///
/// The effective pattern is rebuilt from the tokenized [`Part`]s rather than
/// copied from the line, and every matcher is compiled once here. Rules never
/// change after construction.
#[derive(Clone, Debug)]
pub struct Rule {
    syntax: Vec<Part>,
    definition: String,
    negated: bool,
    pattern: String,
    kind: RuleKind,
}

impl Rule {
    /// Parses `line` with the default (case-sensitive) options.
    ///
    /// Returns `None` for blank lines and comments. Lines that cannot be
    /// resolved into a pattern produce a rule of shape [`RuleShape::Invalid`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ignores::{Operation, Rule, RuleShape};
    ///
    /// let rule = Rule::create("docs/**/Users/").expect("not a comment");
    /// assert_eq!(rule.shape(), RuleShape::Directory);
    /// assert_eq!(rule.evaluate("docs/1/Users/a"), Operation::Exclude);
    /// assert_eq!(rule.evaluate("docs/1/Users1/a"), Operation::Noop);
    ///
    /// assert!(Rule::create("# comment").is_none());
    /// assert_eq!(Rule::create("***").unwrap().shape(), RuleShape::Invalid);
    /// ```
    #[must_use]
    pub fn create(line: &str) -> Option<Self> {
        Self::create_with(line, &IgnoreOptions::default())
    }

    /// Parses `line`, compiling matchers according to `options`.
    #[must_use]
    pub fn create_with(line: &str, options: &IgnoreOptions) -> Option<Self> {
        let trimmed = line.trim_start();
        if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let (negated, body) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        let syntax = tokenize(body);
        let pattern = reconstruct(&syntax);

        let kind = match classify(body, &syntax, &pattern, options.is_case_insensitive()) {
            Ok(kind) => kind,
            Err(error) => RuleKind::Invalid {
                reason: error.to_string(),
            },
        };

        Some(Self {
            syntax,
            definition: line.to_owned(),
            negated,
            pattern,
            kind,
        })
    }

    /// Returns the original line text.
    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Returns the pattern reconstructed from [`syntax`](Self::syntax).
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the tokenized parts of the line (without the `!` prefix).
    #[must_use]
    pub fn syntax(&self) -> &[Part] {
        &self.syntax
    }

    /// Returns `true` when the line began with `!`.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Returns the selected matching strategy.
    #[must_use]
    pub const fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Returns the fieldless shape of [`kind`](Self::kind).
    #[must_use]
    pub const fn shape(&self) -> RuleShape {
        match self.kind {
            RuleKind::File(_) => RuleShape::File,
            RuleKind::Directory(_) => RuleShape::Directory,
            RuleKind::RootedFile(_) => RuleShape::RootedFile,
            RuleKind::Invalid { .. } => RuleShape::Invalid,
        }
    }

    /// Returns the reason an invalid rule was rejected.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match &self.kind {
            RuleKind::Invalid { reason } => Some(reason),
            _ => None,
        }
    }

    /// Tests `relative_path` against the rule.
    ///
    /// Returns `None` for invalid rules, which can neither match nor fail to.
    #[must_use]
    pub fn matches(&self, relative_path: &str) -> Option<bool> {
        match &self.kind {
            RuleKind::File(matcher) => Some(matcher.is_match(relative_path)),
            RuleKind::Directory(matcher) => Some(matcher.is_match(relative_path)),
            RuleKind::RootedFile(matcher) => Some(matcher.is_match(relative_path)),
            RuleKind::Invalid { .. } => None,
        }
    }

    /// Maps a match onto the operation this rule contributes.
    ///
    /// A matching negated rule yields [`Operation::Include`], any other match
    /// [`Operation::Exclude`]. Everything else, invalid rules included, is
    /// [`Operation::Noop`].
    #[must_use]
    pub fn evaluate(&self, relative_path: &str) -> Operation {
        match self.matches(relative_path) {
            Some(true) if self.negated => Operation::Include,
            Some(true) => Operation::Exclude,
            Some(false) | None => Operation::Noop,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.definition)
    }
}

fn classify(
    body: &str,
    syntax: &[Part],
    pattern: &str,
    case_insensitive: bool,
) -> Result<RuleKind, RuleError> {
    if body.is_empty() {
        return Err(RuleError::NegationWithoutPattern);
    }
    if pattern == "." {
        return Err(RuleError::CurrentDirectory);
    }
    if pattern.split('/').next() == Some("..") {
        return Err(RuleError::ParentDirectory);
    }
    let triple_star = syntax
        .windows(2)
        .any(|pair| pair[0].token() == Token::MatchAll && pair[1].token() == Token::MatchAny);
    if triple_star {
        return Err(RuleError::TripleStar);
    }
    if pattern.trim_matches('/').is_empty() {
        return Err(RuleError::EmptyPattern);
    }

    if pattern.ends_with('/') {
        return DirectoryMatcher::new(syntax, case_insensitive).map(RuleKind::Directory);
    }
    if !syntax
        .iter()
        .any(|part| part.token() == Token::PathDelimiter)
    {
        return RootedFileMatcher::new(pattern, case_insensitive).map(RuleKind::RootedFile);
    }
    FileMatcher::new(syntax, case_insensitive).map(RuleKind::File)
}
