//! Pattern line tokenizer.
//!
//! [`tokenize`] turns one pattern line into an ordered list of [`Part`]s. The
//! tokenizer never fails: malformed input still produces parts, and the rule
//! classifier decides whether they describe a usable pattern.

use std::fmt;

/// Kind of a lexical element within a pattern line.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Token {
    /// Literal text between special tokens.
    Text,
    /// An interior `/` separating two path segments.
    PathDelimiter,
    /// `*`, matching any run of characters inside one segment.
    MatchAny,
    /// `**`, matching across zero or more segments.
    MatchAll,
    /// A trailing `/` marking the pattern as directory-only.
    DirectoryMarker,
    /// A leading `/` anchoring the pattern to the ignore file's directory.
    RootedMarker,
}

impl Token {
    /// Canonical literal carried by a [`Part`] built from this token alone.
    #[must_use]
    pub const fn literal(self) -> &'static str {
        match self {
            Self::Text => "",
            Self::PathDelimiter | Self::DirectoryMarker | Self::RootedMarker => "/",
            Self::MatchAny => "*",
            Self::MatchAll => "**",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::PathDelimiter => f.write_str("path-delimiter"),
            Self::MatchAny => f.write_str("match-any"),
            Self::MatchAll => f.write_str("match-all"),
            Self::DirectoryMarker => f.write_str("directory-marker"),
            Self::RootedMarker => f.write_str("rooted-marker"),
        }
    }
}

/// A token paired with the literal value it contributes to a rule's pattern.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Part {
    token: Token,
    value: String,
}

impl Part {
    /// Creates a part carrying the token's canonical literal.
    #[must_use]
    pub fn new(token: Token) -> Self {
        Self {
            token,
            value: token.literal().to_owned(),
        }
    }

    /// Creates a [`Token::Text`] part with explicit contents.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            token: Token::Text,
            value: value.into(),
        }
    }

    /// Returns the token kind.
    #[must_use]
    pub const fn token(&self) -> Token {
        self.token
    }

    /// Returns the literal value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Concatenates the literal values of `parts` into a matcher pattern.
///
/// [`Token::RootedMarker`] is skipped: anchoring is implied by matching against
/// paths relative to the ignore file, so the marker contributes no text.
pub(crate) fn reconstruct(parts: &[Part]) -> String {
    parts
        .iter()
        .filter(|part| part.token != Token::RootedMarker)
        .map(Part::value)
        .collect()
}

/// Splits `line` into ordered [`Part`]s.
///
/// The caller strips a leading `!` before tokenizing; comment and blank lines
/// are filtered out before they reach this function.
///
/// # Examples
///
/// ```
/// use ignores::{Part, Token, tokenize};
///
/// let parts = tokenize("/docs/**/*.md");
/// assert_eq!(
///     parts,
///     vec![
///         Part::new(Token::RootedMarker),
///         Part::text("docs"),
///         Part::new(Token::PathDelimiter),
///         Part::new(Token::MatchAll),
///         Part::new(Token::PathDelimiter),
///         Part::new(Token::MatchAny),
///         Part::text(".md"),
///     ]
/// );
/// ```
#[must_use]
pub fn tokenize(line: &str) -> Vec<Part> {
    let chars: Vec<char> = trim_unescaped_trailing_whitespace(line).chars().collect();
    let last = chars.len().saturating_sub(1);
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut pos = 0;

    let flush_text = |text: &mut String, parts: &mut Vec<Part>| {
        if !text.is_empty() {
            parts.push(Part::text(std::mem::take(text)));
        }
    };

    while let Some(&c) = chars.get(pos) {
        let next = chars.get(pos + 1).copied();
        match c {
            '\\' => match next {
                Some(' ') => {
                    text.push(' ');
                    pos += 2;
                }
                Some(escaped @ ('#' | '!')) if pos == 0 => {
                    text.push(escaped);
                    pos += 2;
                }
                Some(escaped) => {
                    // Left for the glob matcher to interpret.
                    text.push('\\');
                    text.push(escaped);
                    pos += 2;
                }
                None => {
                    text.push('\\');
                    pos += 1;
                }
            },
            '*' => {
                flush_text(&mut text, &mut parts);
                if next == Some('*') {
                    parts.push(Part::new(Token::MatchAll));
                    pos += 2;
                } else {
                    parts.push(Part::new(Token::MatchAny));
                    pos += 1;
                }
            }
            '/' if pos == 0 => {
                // A run of leading separators anchors once.
                parts.push(Part::new(Token::RootedMarker));
                pos = separator_run_end(&chars, pos);
            }
            '/' if pos == last => {
                flush_text(&mut text, &mut parts);
                parts.push(Part::new(Token::DirectoryMarker));
                pos += 1;
            }
            '/' => {
                flush_text(&mut text, &mut parts);
                let run_end = separator_run_end(&chars, pos);
                if run_end > last {
                    parts.push(Part::new(Token::DirectoryMarker));
                } else {
                    parts.push(Part::new(Token::PathDelimiter));
                }
                pos = run_end;
            }
            _ => {
                text.push(c);
                pos += 1;
            }
        }
    }

    flush_text(&mut text, &mut parts);
    parts
}

/// Returns the index just past the run of `/` starting at `pos`.
fn separator_run_end(chars: &[char], pos: usize) -> usize {
    pos + chars[pos..].iter().take_while(|&&c| c == '/').count()
}

/// Drops trailing whitespace unless the last whitespace character is escaped.
fn trim_unescaped_trailing_whitespace(line: &str) -> &str {
    let mut end = line.len();
    while let Some(c) = line[..end].chars().next_back() {
        if !c.is_whitespace() {
            break;
        }
        let before = &line[..end - c.len_utf8()];
        if c == ' ' && before.ends_with('\\') && !before.ends_with("\\\\") {
            break;
        }
        end -= c.len_utf8();
    }
    &line[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Part {
        Part::text(value)
    }

    fn tok(token: Token) -> Part {
        Part::new(token)
    }

    #[test]
    fn plain_filename_is_single_text_part() {
        assert_eq!(tokenize("build.sh"), vec![text("build.sh")]);
    }

    #[test]
    fn leading_slash_becomes_rooted_marker() {
        assert_eq!(
            tokenize("/build.sh"),
            vec![tok(Token::RootedMarker), text("build.sh")]
        );
    }

    #[test]
    fn trailing_slash_becomes_directory_marker() {
        assert_eq!(
            tokenize("docs/**/Users/"),
            vec![
                text("docs"),
                tok(Token::PathDelimiter),
                tok(Token::MatchAll),
                tok(Token::PathDelimiter),
                text("Users"),
                tok(Token::DirectoryMarker),
            ]
        );
    }

    #[test]
    fn single_star_flushes_preceding_text() {
        assert_eq!(
            tokenize("foo*.txt"),
            vec![text("foo"), tok(Token::MatchAny), text(".txt")]
        );
    }

    #[test]
    fn double_star_after_text_flushes_text() {
        assert_eq!(
            tokenize("foo**"),
            vec![text("foo"), tok(Token::MatchAll)]
        );
    }

    #[test]
    fn triple_star_is_match_all_then_match_any() {
        assert_eq!(
            tokenize("***"),
            vec![tok(Token::MatchAll), tok(Token::MatchAny)]
        );
    }

    #[test]
    fn escaped_space_is_literal_space() {
        assert_eq!(
            tokenize("**/improperly\\ escaped.txt"),
            vec![
                tok(Token::MatchAll),
                tok(Token::PathDelimiter),
                text("improperly escaped.txt"),
            ]
        );
    }

    #[test]
    fn unescaped_trailing_whitespace_is_dropped() {
        assert_eq!(tokenize("notes.txt   "), vec![text("notes.txt")]);
        assert_eq!(tokenize("build/ \t"), vec![text("build"), tok(Token::DirectoryMarker)]);
    }

    #[test]
    fn escaped_trailing_space_survives() {
        assert_eq!(tokenize("name\\ "), vec![text("name ")]);
    }

    #[test]
    fn leading_escaped_hash_and_bang_are_literal() {
        assert_eq!(tokenize("\\#notes"), vec![text("#notes")]);
        assert_eq!(tokenize("\\!important"), vec![text("!important")]);
    }

    #[test]
    fn other_escapes_pass_through_to_glob() {
        assert_eq!(tokenize("foo\\?bar"), vec![text("foo\\?bar")]);
    }

    #[test]
    fn doubled_delimiters_collapse() {
        assert_eq!(
            tokenize("a//b"),
            vec![text("a"), tok(Token::PathDelimiter), text("b")]
        );
        assert_eq!(
            tokenize("a//"),
            vec![text("a"), tok(Token::DirectoryMarker)]
        );
    }

    #[test]
    fn leading_separator_run_is_one_rooted_marker() {
        assert_eq!(
            tokenize("//docs/a.md"),
            vec![
                tok(Token::RootedMarker),
                text("docs"),
                tok(Token::PathDelimiter),
                text("a.md"),
            ]
        );
        assert_eq!(tokenize("///build.sh"), tokenize("/build.sh"));
        assert_eq!(tokenize("//"), vec![tok(Token::RootedMarker)]);
        assert_eq!(reconstruct(&tokenize("//docs/a.md")), "docs/a.md");
    }

    #[test]
    fn glob_syntax_stays_inside_text() {
        assert_eq!(
            tokenize("*.{java,md}"),
            vec![tok(Token::MatchAny), text(".{java,md}")]
        );
        assert_eq!(
            tokenize("*[0-9]*"),
            vec![tok(Token::MatchAny), text("[0-9]"), tok(Token::MatchAny)]
        );
    }

    #[test]
    fn reconstruct_skips_rooted_marker() {
        let parts = tokenize("/path/to/**/complex/*.txt");
        assert_eq!(reconstruct(&parts), "path/to/**/complex/*.txt");
    }

    #[test]
    fn reconstruct_keeps_directory_marker() {
        assert_eq!(reconstruct(&tokenize("build/")), "build/");
    }

    #[test]
    fn part_new_uses_canonical_literal() {
        assert_eq!(Part::new(Token::MatchAny).value(), "*");
        assert_eq!(Part::new(Token::MatchAll).value(), "**");
        assert_eq!(Part::new(Token::PathDelimiter).value(), "/");
        assert_eq!(Part::new(Token::Text).value(), "");
    }

    #[test]
    fn token_display_names() {
        let cases = [
            (Token::Text, "text"),
            (Token::PathDelimiter, "path-delimiter"),
            (Token::MatchAny, "match-any"),
            (Token::MatchAll, "match-all"),
            (Token::DirectoryMarker, "directory-marker"),
            (Token::RootedMarker, "rooted-marker"),
        ];
        for (token, expected) in cases {
            assert_eq!(token.to_string(), expected);
        }
    }
}
