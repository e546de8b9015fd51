//! Reading ignore files into parsed rules.
//!
//! Loading never fails outright. A missing directory or file leaves the
//! processor unloaded, and a read error partway through keeps every rule parsed
//! before it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{IoResultExt, LoadError};
use crate::{IgnoreOptions, Rule, debug_ignore};

/// How an [`IgnoreProcessor`](crate::IgnoreProcessor) obtained its rules.
#[derive(Debug, Default)]
pub enum LoadStatus {
    /// Nothing was loaded; every path is allowed.
    #[default]
    NotLoaded,
    /// The whole file was read.
    Loaded {
        /// The ignore file.
        path: PathBuf,
        /// Number of rules parsed, invalid ones included.
        rules: usize,
    },
    /// The base directory does not exist.
    MissingDirectory(PathBuf),
    /// The base directory exists but holds no ignore file.
    MissingFile(PathBuf),
    /// Reading stopped early. Rules read before the failure are active.
    Partial {
        /// The ignore file.
        path: PathBuf,
        /// Number of rules parsed before the failure.
        rules: usize,
        /// The failure that stopped reading.
        error: LoadError,
    },
    /// Rules were parsed from text supplied by the caller.
    Text {
        /// Number of rules parsed, invalid ones included.
        rules: usize,
    },
}

impl LoadStatus {
    /// Returns `true` when rules are in effect, even if only some of them.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(
            self,
            Self::Loaded { .. } | Self::Partial { .. } | Self::Text { .. }
        )
    }

    /// Returns the ignore file this status refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Loaded { path, .. } | Self::MissingFile(path) | Self::Partial { path, .. } => {
                Some(path)
            }
            Self::NotLoaded | Self::MissingDirectory(_) | Self::Text { .. } => None,
        }
    }

    /// Returns the number of rules that were parsed.
    #[must_use]
    pub const fn rule_count(&self) -> usize {
        match self {
            Self::Loaded { rules, .. } | Self::Partial { rules, .. } | Self::Text { rules } => {
                *rules
            }
            Self::NotLoaded | Self::MissingDirectory(_) | Self::MissingFile(_) => 0,
        }
    }

    /// Returns the read error behind a partial load.
    #[must_use]
    pub const fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Partial { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Rules produced by one load together with its outcome.
#[derive(Debug, Default)]
pub(crate) struct Loaded {
    pub(crate) rules: Vec<Rule>,
    pub(crate) status: LoadStatus,
}

/// Loads `file_name` from `base_dir`.
pub(crate) fn load_directory(base_dir: &Path, options: &IgnoreOptions) -> Loaded {
    if !base_dir.is_dir() {
        return finish(Loaded {
            rules: Vec::new(),
            status: LoadStatus::MissingDirectory(base_dir.to_path_buf()),
        });
    }
    load_file(&base_dir.join(options.file_name()), options)
}

/// Loads the ignore file at `path`.
pub(crate) fn load_file(path: &Path, options: &IgnoreOptions) -> Loaded {
    if !path.is_file() {
        return finish(Loaded {
            rules: Vec::new(),
            status: LoadStatus::MissingFile(path.to_path_buf()),
        });
    }

    let mut rules = Vec::new();
    let status = match read_rules(path, options, &mut rules) {
        Ok(()) => LoadStatus::Loaded {
            path: path.to_path_buf(),
            rules: rules.len(),
        },
        Err(error) => LoadStatus::Partial {
            path: path.to_path_buf(),
            rules: rules.len(),
            error,
        },
    };
    finish(Loaded { rules, status })
}

/// Parses rules from text supplied directly by the caller.
pub(crate) fn load_text(text: &str, options: &IgnoreOptions) -> Loaded {
    let mut rules = Vec::new();
    for line in text.lines() {
        push_rule(&mut rules, line, options);
    }
    let status = LoadStatus::Text { rules: rules.len() };
    finish(Loaded { rules, status })
}

fn read_rules(path: &Path, options: &IgnoreOptions, rules: &mut Vec<Rule>) -> Result<(), LoadError> {
    let file = File::open(path).with_path(path)?;
    for line in BufReader::new(file).lines() {
        let line = line.with_path(path)?;
        push_rule(rules, &line, options);
    }
    Ok(())
}

fn push_rule(rules: &mut Vec<Rule>, line: &str, options: &IgnoreOptions) {
    let Some(rule) = Rule::create_with(line, options) else {
        return;
    };
    if let Some(reason) = rule.reason() {
        debug_ignore::trace_invalid_rule(rule.definition(), reason);
    }
    debug_ignore::trace_rule_added(rule.definition(), rule.shape(), rule.is_negated());
    rules.push(rule);
}

fn finish(loaded: Loaded) -> Loaded {
    debug_ignore::trace_load(&loaded.status);
    loaded
}
