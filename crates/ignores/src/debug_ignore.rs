//! Structured tracing for rule parsing, evaluation, and loading.
//!
//! Every function is compiled behind the `tracing` feature flag and becomes an
//! inline no-op when the feature is disabled, so callers never need their own
//! `cfg` guards. Events are emitted under the `ignores::rule` target.
//!
//! # Examples
//!
//! ```rust,ignore
//! use ignores::debug_ignore::{trace_decision, trace_rule_added};
//! use ignores::RuleShape;
//!
//! trace_rule_added("docs/**", RuleShape::File, false);
//! trace_decision("docs/readme.md", false);
//! ```

use crate::{LoadStatus, Operation, RuleShape};

/// Target name for tracing events.
#[cfg(feature = "tracing")]
pub const IGNORE_TARGET: &str = "ignores::rule";

// ============================================================================
// Tracing functions (feature-gated)
// ============================================================================

/// Traces a rule being filed into the exclusion or inclusion list.
///
/// # Arguments
///
/// * `definition` - The original pattern line
/// * `shape` - The matching strategy chosen for it
/// * `negated` - Whether the rule went to the inclusion list
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_rule_added(definition: &str, shape: RuleShape, negated: bool) {
    tracing::debug!(
        target: IGNORE_TARGET,
        definition = %definition,
        shape = %shape,
        negated = negated,
        "rule_added"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_rule_added(_definition: &str, _shape: RuleShape, _negated: bool) {}

/// Traces a pattern line that was kept as an inert invalid rule.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_invalid_rule(definition: &str, reason: &str) {
    tracing::warn!(
        target: IGNORE_TARGET,
        definition = %definition,
        reason = %reason,
        "invalid_rule"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_invalid_rule(_definition: &str, _reason: &str) {}

/// Traces one rule evaluated against one relative path.
///
/// # Arguments
///
/// * `path` - The relative path being evaluated (e.g. "docs/readme.md")
/// * `pattern` - The reconstructed pattern of the rule
/// * `operation` - What the rule contributed
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_rule_evaluate(path: &str, pattern: &str, operation: Operation) {
    tracing::trace!(
        target: IGNORE_TARGET,
        path = %path,
        pattern = %pattern,
        operation = %operation,
        "rule_evaluate"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_rule_evaluate(_path: &str, _pattern: &str, _operation: Operation) {}

/// Traces the final answer of [`IgnoreProcessor::allowed`](crate::IgnoreProcessor::allowed).
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_decision(path: &str, allowed: bool) {
    tracing::debug!(
        target: IGNORE_TARGET,
        path = %path,
        allowed = allowed,
        "decision"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_decision(_path: &str, _allowed: bool) {}

/// Traces the outcome of loading an ignore file.
///
/// A partial read is reported at warn level, everything else at info.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_load(status: &LoadStatus) {
    match status {
        LoadStatus::Partial { path, rules, error } => tracing::warn!(
            target: IGNORE_TARGET,
            path = %path.display(),
            rules = *rules,
            error = %error,
            "load_partial"
        ),
        LoadStatus::MissingDirectory(path) => tracing::info!(
            target: IGNORE_TARGET,
            path = %path.display(),
            "load_missing_directory"
        ),
        LoadStatus::MissingFile(path) => tracing::info!(
            target: IGNORE_TARGET,
            path = %path.display(),
            "load_missing_file"
        ),
        LoadStatus::Loaded { path, rules } => tracing::info!(
            target: IGNORE_TARGET,
            path = %path.display(),
            rules = *rules,
            "load_complete"
        ),
        LoadStatus::Text { rules } => tracing::info!(
            target: IGNORE_TARGET,
            rules = *rules,
            "load_text"
        ),
        LoadStatus::NotLoaded => {}
    }
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_load(_status: &LoadStatus) {}
