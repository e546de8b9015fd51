use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::load::{self, Loaded};
use crate::{IgnoreOptions, LoadStatus, Rule, RuleShape, debug_ignore, decision};

#[derive(Debug, Default)]
struct ProcessorInner {
    base_dir: PathBuf,
    absolute_base: Option<PathBuf>,
    exclusions: Vec<Rule>,
    inclusions: Vec<Rule>,
    status: LoadStatus,
}

/// Immutable store of ignore rules answering whether paths may be written.
///
/// Rules are split at construction: plain lines go to the exclusion list and
/// `!` lines to the inclusion list, both in file order. Construction never
/// fails. When no ignore file could be found every path is allowed, and when
/// reading stopped partway the rules read so far stay in effect; inspect
/// [`status`](Self::status) to tell these cases apart.
///
/// `IgnoreProcessor` is cheaply cloneable (the inner state is behind an
/// [`Arc`]) and can be queried from several threads at once.
///
/// # Examples
///
/// ```
/// use ignores::IgnoreProcessor;
///
/// let processor = IgnoreProcessor::from_text(
///     "/project",
///     "docs/**\n!docs/UserApi.md\n*.sh\n",
/// );
///
/// assert!(!processor.allowed("docs/Other.md"));
/// assert!(processor.allowed("docs/UserApi.md"));
/// assert!(!processor.allowed("/project/build.sh"));
/// assert!(processor.allowed("src/build.sh"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct IgnoreProcessor {
    inner: Arc<ProcessorInner>,
}

impl IgnoreProcessor {
    /// Loads [`DEFAULT_IGNORE_FILE`](crate::DEFAULT_IGNORE_FILE) from `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_options(base_dir, &IgnoreOptions::default())
    }

    /// Loads `file_name` from `base_dir`.
    #[must_use]
    pub fn with_file_name(base_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self::with_options(base_dir, &IgnoreOptions::default().with_file_name(file_name))
    }

    /// Loads the ignore file named by `options` from `base_dir`.
    #[must_use]
    pub fn with_options(base_dir: impl Into<PathBuf>, options: &IgnoreOptions) -> Self {
        let base_dir = base_dir.into();
        let loaded = load::load_directory(&base_dir, options);
        Self::build(base_dir, loaded)
    }

    /// Loads the ignore file at `path`, anchoring rules to its parent directory.
    ///
    /// Uses the default options; file name settings are irrelevant here.
    #[must_use]
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self::from_file_with(path, &IgnoreOptions::default())
    }

    /// Loads the ignore file at `path` using `options` for pattern compilation.
    #[must_use]
    pub fn from_file_with(path: impl AsRef<Path>, options: &IgnoreOptions) -> Self {
        let path = path.as_ref();
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let loaded = if base_dir.is_dir() {
            load::load_file(path, options)
        } else {
            load::load_directory(&base_dir, options)
        };
        Self::build(base_dir, loaded)
    }

    /// Parses `text` as the contents of an ignore file living in `base_dir`.
    #[must_use]
    pub fn from_text(base_dir: impl Into<PathBuf>, text: &str) -> Self {
        Self::from_text_with(base_dir, text, &IgnoreOptions::default())
    }

    /// Parses `text` using `options` for pattern compilation.
    #[must_use]
    pub fn from_text_with(base_dir: impl Into<PathBuf>, text: &str, options: &IgnoreOptions) -> Self {
        Self::build(base_dir.into(), load::load_text(text, options))
    }

    fn build(base_dir: PathBuf, loaded: Loaded) -> Self {
        let Loaded { rules, status } = loaded;
        let (inclusions, exclusions): (Vec<Rule>, Vec<Rule>) =
            rules.into_iter().partition(Rule::is_negated);
        let absolute_base = std::path::absolute(&base_dir)
            .ok()
            .filter(|absolute| absolute != &base_dir);
        Self {
            inner: Arc::new(ProcessorInner {
                base_dir,
                absolute_base,
                exclusions,
                inclusions,
                status,
            }),
        }
    }

    /// Returns `true` when `path` may be written.
    ///
    /// `path` may be absolute (it is made relative to the base directory) or
    /// already relative to it. Without a loaded ignore file, or with no rules,
    /// every path is allowed.
    #[must_use]
    pub fn allowed(&self, path: impl AsRef<Path>) -> bool {
        let inner = &*self.inner;
        if !inner.status.is_loaded() {
            return true;
        }
        if inner.exclusions.is_empty() && inner.inclusions.is_empty() {
            return true;
        }

        let relative = self.relative_path(path.as_ref());
        let allowed = !decision::is_excluded(&inner.exclusions, &inner.inclusions, &relative);
        debug_ignore::trace_decision(&relative, allowed);
        allowed
    }

    /// Returns the non-negated rules in file order.
    ///
    /// A rule in this list does not by itself mean a path it matches is
    /// excluded; an inclusion rule may override it.
    #[must_use]
    pub fn exclusion_rules(&self) -> &[Rule] {
        &self.inner.exclusions
    }

    /// Returns the negated rules in file order.
    #[must_use]
    pub fn inclusion_rules(&self) -> &[Rule] {
        &self.inner.inclusions
    }

    /// Iterates over rules from either list that could not be parsed.
    pub fn invalid_rules(&self) -> impl Iterator<Item = &Rule> {
        self.inner
            .exclusions
            .iter()
            .chain(&self.inner.inclusions)
            .filter(|rule| rule.shape() == RuleShape::Invalid)
    }

    /// Returns `true` when rules are in effect.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.inner.status.is_loaded()
    }

    /// Returns how the rules were obtained.
    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.inner.status
    }

    /// Returns the ignore file that was read or looked for.
    #[must_use]
    pub fn ignore_file(&self) -> Option<&Path> {
        self.inner.status.path()
    }

    /// Returns the directory rules are anchored to.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.inner.base_dir
    }

    fn relative_path(&self, path: &Path) -> String {
        let inner = &*self.inner;
        let relative = if path.is_absolute() {
            path.strip_prefix(&inner.base_dir)
                .ok()
                .or_else(|| {
                    inner
                        .absolute_base
                        .as_deref()
                        .and_then(|base| path.strip_prefix(base).ok())
                })
                .unwrap_or(path)
        } else {
            path
        };
        normalize(relative)
    }
}

/// Joins the components of `path` with `/`, dropping `.` and resolving `..`.
fn normalize(path: &Path) -> String {
    let mut rooted = false;
    let mut segments: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) => {}
            Component::RootDir => rooted = true,
            Component::CurDir => {}
            Component::ParentDir => {
                if segments.last().is_some_and(|last| last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..".to_owned());
                }
            }
            Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
        }
    }
    let joined = segments.join("/");
    if rooted { format!("/{joined}") } else { joined }
}
