//! Tests for directory rules (patterns ending with `/`).
//!
//! A directory rule excludes the directory entry and everything beneath it,
//! respecting full segment boundaries.

use ignores::{IgnoreProcessor, Rule, RuleKind, RuleShape};

fn processor(text: &str) -> IgnoreProcessor {
    IgnoreProcessor::from_text("/out", text)
}

// =============================================================================
// Entry and Contents
// =============================================================================

#[test]
fn directory_rule_excludes_entry_and_contents() {
    let processor = processor("build/");

    assert!(!processor.allowed("build"));
    assert!(!processor.allowed("build/"));
    assert!(!processor.allowed("build/out.o"));
    assert!(!processor.allowed("build/a/b/c/out.o"));
}

#[test]
fn directory_rule_respects_segment_boundaries() {
    let processor = processor("docs/**/Users/");

    assert!(!processor.allowed("docs/1/Users/a"));
    assert!(!processor.allowed("docs/Users/a"));
    assert!(!processor.allowed("docs/1/2/3/Users/a/b"));
    assert!(processor.allowed("docs/1/Users1/a"));
    assert!(processor.allowed("docs/1/MyUsers/a"));
}

#[test]
fn bare_directory_rule_is_root_only() {
    let processor = processor("build/");

    assert!(processor.allowed("src/build/out.o"));
    assert!(processor.allowed("build1/out.o"));
}

#[test]
fn recursive_directory_rule_matches_at_any_depth() {
    let processor = processor("**/target/");

    assert!(!processor.allowed("target/debug/app"));
    assert!(!processor.allowed("crates/a/target/debug/app"));
    assert!(processor.allowed("crates/a/targets/debug/app"));
}

#[test]
fn anchored_directory_rule() {
    let processor = processor("/generated/");

    assert!(!processor.allowed("generated/model.rs"));
    assert!(processor.allowed("src/generated/model.rs"));
}

#[test]
fn doubled_trailing_separator_is_one_directory_marker() {
    let processor = processor("build//");

    assert_eq!(processor.exclusion_rules()[0].shape(), RuleShape::Directory);
    assert!(!processor.allowed("build/out.o"));
}

// =============================================================================
// Directory Rules and Negation
// =============================================================================

#[test]
fn file_negation_cannot_lift_directory_exclusion() {
    let processor = processor("docs/**/Users/\n!docs/1/Users/UserApi.md");

    assert!(!processor.allowed("docs/1/Users/UserApi.md"));
}

#[test]
fn directory_negation_lifts_directory_exclusion() {
    let processor = processor("build/\n!build/keep/");

    assert!(processor.allowed("build/keep/file.txt"));
    assert!(!processor.allowed("build/other/file.txt"));
}

#[test]
fn directory_negation_lifts_file_exclusion() {
    let processor = processor("**/*.log\n!logs/");

    assert!(processor.allowed("logs/app.log"));
    assert!(!processor.allowed("app.log"));
    assert!(!processor.allowed("other/app.log"));
}

#[test]
fn directory_exclusion_anywhere_in_list_blocks_file_negation() {
    // The file rule matches first, the directory rule still marks the path.
    let processor = processor("**/*.md\ndocs/\n!docs/README.md");

    assert!(!processor.allowed("docs/README.md"));
}

// =============================================================================
// Matcher Introspection
// =============================================================================

#[test]
fn directory_matcher_exposes_both_globs() {
    let rule = Rule::create("docs/**/Users/").unwrap();
    let RuleKind::Directory(matcher) = rule.kind() else {
        panic!("expected a directory rule");
    };

    assert_eq!(matcher.directory_globs().collect::<Vec<_>>(), ["docs/**/Users/"]);
    assert_eq!(matcher.contents_globs().collect::<Vec<_>>(), ["docs/**/Users/**"]);
}

#[test]
fn embedded_double_star_directory_expands() {
    let rule = Rule::create("cache**/").unwrap();
    let RuleKind::Directory(matcher) = rule.kind() else {
        panic!("expected a directory rule");
    };

    assert_eq!(
        matcher.directory_globs().collect::<Vec<_>>(),
        ["cache*/", "cache*/**/*/"]
    );
    assert!(rule.matches("cache-v2/index.bin").unwrap_or_default());
    assert!(rule.matches("cache/a/b/index.bin").unwrap_or_default());
}
