#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `ignores` decides whether a generated file may be written, based on a
//! gitignore-like pattern file that lives in the output directory. A code
//! generator asks [`IgnoreProcessor::allowed`] before writing each file and
//! skips any path the user has chosen to protect from regeneration.
//!
//! # Design
//!
//! - [`tokenize`] turns each pattern line into [`Part`]s. The effective
//!   pattern of a [`Rule`] is rebuilt by concatenating those parts, with the
//!   leading `/` anchor dropped.
//! - [`Rule::create`] classifies the rebuilt pattern: a trailing `/` yields a
//!   directory rule, a single segment yields a rooted file rule, anything else
//!   a file rule over the full relative path. Lines that cannot become a
//!   pattern are kept as inert invalid rules with a reason.
//! - [`IgnoreProcessor`] files plain rules into an exclusion list and `!`
//!   rules into an inclusion list and runs a two-pass precedence algorithm
//!   over them for each query.
//!
//! # Invariants
//!
//! - Rules are compiled once at construction and never change.
//! - Both rule lists keep file order.
//! - Bare single-segment patterns only match at the top of the base
//!   directory. Use `**/name` to match at any depth.
//! - A rooted file rule never matches a path with an interior separator.
//! - A path excluded by a directory rule can only be re-included by a
//!   directory-shaped `!` rule.
//!
//! # Errors
//!
//! Nothing in this crate fails at query time. Unusable lines become
//! [`RuleShape::Invalid`] rules whose reason renders a [`RuleError`]. A missing
//! directory or ignore file leaves the processor unloaded, which allows every
//! path. A read failure partway through a file is reported as
//! [`LoadStatus::Partial`] carrying a [`LoadError`], and the rules read before
//! it stay active.
//!
//! # Examples
//!
//! ```
//! use ignores::IgnoreProcessor;
//!
//! let processor = IgnoreProcessor::from_text(
//!     "/out",
//!     "# keep hand-edited sources\n\
//!      docs/**/Users/\n\
//!      !docs/1/Users/UserApi.md\n\
//!      **/*.{java,md}\n\
//!      /build.sh\n",
//! );
//!
//! assert!(!processor.allowed("/out/build.sh"));
//! assert!(processor.allowed("/out/nested/build.sh"));
//! assert!(!processor.allowed("docs/1/Users/UserApi.md"));
//! assert!(processor.allowed("notes.txt"));
//! ```
//!
//! # Features
//!
//! - `tracing` emits structured events under the `ignores::rule` target; see
//!   [`debug_ignore`].
//! - `serde` derives `Serialize`/`Deserialize` for [`IgnoreOptions`] and
//!   [`Operation`].
//!
//! # See also
//!
//! - [`globset`] for the glob matching primitives used internally.

pub mod debug_ignore;
mod decision;
mod error;
mod load;
mod matcher;
mod operation;
mod options;
mod processor;
mod rule;
mod token;

pub use error::{LoadError, RuleError};
pub use load::LoadStatus;
pub use matcher::{DirectoryMatcher, FileMatcher, RootedFileMatcher};
pub use operation::Operation;
pub use options::{DEFAULT_IGNORE_FILE, IgnoreOptions};
pub use processor::IgnoreProcessor;
pub use rule::{Rule, RuleKind, RuleShape};
pub use token::{Part, Token, tokenize};

#[cfg(test)]
mod tests;
