use super::*;
use std::path::Path;

fn processor(text: &str) -> IgnoreProcessor {
    IgnoreProcessor::from_text("/out", text)
}

#[test]
fn empty_text_allows_everything() {
    let processor = processor("");
    assert!(processor.is_loaded());
    assert!(processor.allowed("foo"));
    assert!(processor.allowed(Path::new("/out/a/b/c")));
}

#[test]
fn comments_and_blanks_produce_no_rules() {
    let processor = processor("# comment\n\n   \n  # indented\n");
    assert!(processor.exclusion_rules().is_empty());
    assert!(processor.inclusion_rules().is_empty());
    assert!(processor.allowed("anything"));
}

#[test]
fn exact_file_at_root() {
    let processor = processor("build.sh");
    assert!(!processor.allowed("build.sh"));
    assert!(!processor.allowed("/out/build.sh"));
    assert!(processor.allowed("src/build.sh"));
}

#[test]
fn extension_glob_is_root_only() {
    let processor = processor("*.sh");
    assert!(!processor.allowed("build.sh"));
    assert!(processor.allowed("src/build.sh"));
}

#[test]
fn recursive_prefix_matches_any_depth() {
    let processor = processor("**/build.sh");
    assert!(!processor.allowed("src/build.sh"));
    assert!(!processor.allowed("a/b/c/build.sh"));
    assert!(processor.allowed("src/Build.sh"));
}

#[test]
fn exclude_then_reinclude_file() {
    let processor = processor("docs/**\n!docs/UserApi.md");
    assert!(processor.allowed("docs/UserApi.md"));
    assert!(!processor.allowed("docs/PetApi.md"));
}

#[test]
fn file_negation_cannot_reach_into_directory_exclusion() {
    let processor = processor("docs/**/Users/\n!docs/1/Users/UserApi.md");
    assert!(!processor.allowed("docs/1/Users/UserApi.md"));
}

#[test]
fn negation_order_does_not_matter() {
    let processor = processor("!docs/UserApi.md\ndocs/**");
    assert!(processor.allowed("docs/UserApi.md"));
}

#[test]
fn invalid_lines_do_not_disturb_valid_ones() {
    let processor = processor("***\n.\n!\n*.log");
    assert_eq!(processor.invalid_rules().count(), 3);
    assert!(!processor.allowed("server.log"));
    assert!(processor.allowed("server.txt"));
}

#[test]
fn case_insensitive_options() {
    let options = IgnoreOptions::default().with_case_insensitive(true);
    let processor = IgnoreProcessor::from_text_with("/out", "**/build.sh\nREADME.md", &options);
    assert!(!processor.allowed("src/Build.SH"));
    assert!(!processor.allowed("readme.md"));
}

#[test]
fn rule_lists_expose_shapes() {
    let processor = processor("docs/\n*.md\nsrc/**/*.rs\n!keep/");
    let shapes: Vec<_> = processor
        .exclusion_rules()
        .iter()
        .map(Rule::shape)
        .collect();
    assert_eq!(
        shapes,
        [RuleShape::Directory, RuleShape::RootedFile, RuleShape::File]
    );
    assert_eq!(processor.inclusion_rules()[0].shape(), RuleShape::Directory);
}
