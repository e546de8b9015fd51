use std::fmt;

/// Outcome of evaluating a single rule against a relative path.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Operation {
    /// The rule matched and hides the path.
    Exclude,
    /// The rule matched and re-includes a previously excluded path.
    Include,
    /// The rule did not match, or cannot match.
    Noop,
    /// Stops the exclusion pass; no further exclusion rule is consulted.
    ///
    /// Reserved: none of the current rule shapes produce it. It sets neither
    /// exclusion flag, so only exclusions recorded before it count.
    ExcludeAndTerminate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exclude => f.write_str("exclude"),
            Self::Include => f.write_str("include"),
            Self::Noop => f.write_str("noop"),
            Self::ExcludeAndTerminate => f.write_str("exclude-and-terminate"),
        }
    }
}
