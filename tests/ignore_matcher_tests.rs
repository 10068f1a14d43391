use ignorefile::errors::IgnoreError;
use ignorefile::matcher::{parse_ignore_file, IgnoreMatcher};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const BASE: &str = "/ignorefile-tests";

fn matcher_for(lines: &[&str]) -> IgnoreMatcher {
    IgnoreMatcher::from_lines(lines.iter().copied(), Path::new(BASE))
        .unwrap_or_else(|e| panic!("Failed to compile rules: {}", e))
}

#[test]
fn test_negation_reincludes_matching_path() {
    let matcher = matcher_for(&["*.log", "!important.log"]);
    assert!(
        matcher.is_ignored("/ignorefile-tests/debug.log"),
        "Plain rule should ignore the log file"
    );
    assert!(
        !matcher.is_ignored("/ignorefile-tests/important.log"),
        "Negation should re-include the file"
    );
    assert!(
        !matcher.is_ignored("/ignorefile-tests/sub/important.log"),
        "Unanchored negation applies at any depth"
    );
}

#[test]
fn test_later_rule_overrides_earlier_negation() {
    let matcher = matcher_for(&["*.txt", "!keep.txt", "*.txt"]);
    assert!(
        matcher.is_ignored("/ignorefile-tests/keep.txt"),
        "The last declared rule wins"
    );
}

#[test]
fn test_nothing_matches_by_default() {
    let matcher = matcher_for(&["*.log"]);
    assert!(!matcher.is_ignored("/ignorefile-tests/readme.md"));

    let empty = IgnoreMatcher::empty();
    assert!(empty.is_empty(), "Empty matcher has no rules");
    assert!(!empty.is_ignored("/anything/at/all"));
}

#[test]
fn test_paths_outside_the_base_are_skipped() {
    let matcher = matcher_for(&["*.log"]);
    assert!(
        !matcher.is_ignored("/elsewhere/debug.log"),
        "Rules do not apply outside their anchor directory"
    );
}

#[test]
fn test_directory_only_rules() {
    let matcher = matcher_for(&["build/"]);
    assert!(
        matcher.is_ignored_with_hint("/ignorefile-tests/build", true),
        "Directory rule should match the directory"
    );
    assert!(
        !matcher.is_ignored_with_hint("/ignorefile-tests/build", false),
        "Directory rule must not match a plain file with the same name"
    );
    assert!(
        matcher.is_ignored_with_hint("/ignorefile-tests/build/main.o", false),
        "Files inside the directory are ignored with it"
    );
    assert!(
        matcher.is_ignored_with_hint("/ignorefile-tests/sub/build/obj/main.o", false),
        "Unanchored directory rule applies at any depth"
    );
}

#[test]
fn test_negated_directory_rules() {
    let matcher = matcher_for(&["b*/", "!build/"]);
    assert!(
        matcher.is_ignored_with_hint("/ignorefile-tests/bx", true),
        "The glob directory rule should match"
    );
    assert!(
        !matcher.is_ignored_with_hint("/ignorefile-tests/build", true),
        "The negated directory rule should re-include the directory"
    );
}

#[test]
fn test_trailing_separator_string_hint() {
    let matcher = matcher_for(&["target/"]);
    assert!(
        matcher.is_ignored_str("/ignorefile-tests/target/"),
        "A trailing separator is an explicit directory hint"
    );
    assert!(
        !matcher.is_ignored_str("/ignorefile-tests/target"),
        "Without the hint the probe finds no directory"
    );
}

#[test]
fn test_anchored_and_unanchored_patterns() {
    let matcher = matcher_for(&["/out", "sub/gen", "cache"]);
    assert!(matcher.is_ignored("/ignorefile-tests/out"));
    assert!(
        !matcher.is_ignored("/ignorefile-tests/nested/out"),
        "Rooted pattern only applies at the top level"
    );
    assert!(matcher.is_ignored("/ignorefile-tests/sub/gen"));
    assert!(
        !matcher.is_ignored("/ignorefile-tests/x/sub/gen"),
        "Internal slash anchors the pattern to the base"
    );
    assert!(
        matcher.is_ignored("/ignorefile-tests/a/b/cache"),
        "Unanchored pattern applies at any depth"
    );
}

#[test]
fn test_double_star_depth() {
    let matcher = matcher_for(&["**/node_modules", "dist/**"]);
    assert!(matcher.is_ignored("/ignorefile-tests/node_modules"));
    assert!(matcher.is_ignored("/ignorefile-tests/a/b/node_modules"));
    assert!(matcher.is_ignored("/ignorefile-tests/dist/bundle/app.js"));
    assert!(
        !matcher.is_ignored("/ignorefile-tests/dist"),
        "`dist/**` covers contents, not the directory itself"
    );
}

#[test]
fn test_character_classes() {
    let matcher = matcher_for(&["file[!0-9].txt", "file[.txt"]);
    assert!(matcher.is_ignored("/ignorefile-tests/fileA.txt"));
    assert!(!matcher.is_ignored("/ignorefile-tests/file5.txt"));
    assert!(
        matcher.is_ignored("/ignorefile-tests/file[.txt"),
        "Unterminated class matches the literal bracket"
    );
}

#[test]
fn test_matched_rule_reports_the_deciding_rule() {
    let matcher = matcher_for(&["*.log", "!important.log"]);

    let rule = matcher
        .matched_rule("/ignorefile-tests/important.log")
        .expect("A rule should decide this path");
    assert!(rule.negation);
    assert_eq!(rule.pattern, "!important.log");

    assert!(
        matcher.matched_rule("/ignorefile-tests/readme.md").is_none(),
        "No rule decides an unmatched path"
    );
}

#[test]
fn test_from_lines_requires_absolute_base() {
    let result = IgnoreMatcher::from_lines(["*.log"], Path::new("relative"));
    assert!(
        matches!(result, Err(IgnoreError::BasePathNotAbsolute(_))),
        "Relative anchor directories are a caller error"
    );
}

#[test]
fn test_parse_ignore_file_defaults_base_to_parent() {
    let dir = tempdir().unwrap_or_else(|e| panic!("Failed to create temp dir: {}", e));
    let root = dir.path();
    fs::write(root.join(".gitignore"), "# deps\n*.tmp\nbuild/\n!keep.tmp\n")
        .unwrap_or_else(|e| panic!("Failed to write ignore file: {}", e));

    let matcher = parse_ignore_file(root.join(".gitignore"), None)
        .unwrap_or_else(|e| panic!("Failed to parse ignore file: {}", e));

    assert_eq!(matcher.rules().len(), 3, "Comment lines compile to no rule");
    let source = matcher.rules()[0].source.as_ref().expect("Loader records sources");
    assert_eq!(source.file, root.join(".gitignore"));
    assert_eq!(source.line, 2, "Line numbers are 1-based");

    assert!(matcher.is_ignored(root.join("junk.tmp")));
    assert!(!matcher.is_ignored(root.join("keep.tmp")));
    assert!(!matcher.is_ignored(root.join("src.rs")));
}

#[test]
fn test_parse_ignore_file_with_base_override() {
    let dir = tempdir().unwrap_or_else(|e| panic!("Failed to create temp dir: {}", e));
    let root = dir.path();
    fs::write(root.join("rules.ignore"), "*.tmp\n")
        .unwrap_or_else(|e| panic!("Failed to write ignore file: {}", e));

    let matcher = parse_ignore_file(root.join("rules.ignore"), Some(Path::new("/virtual")))
        .unwrap_or_else(|e| panic!("Failed to parse ignore file: {}", e));

    assert!(matcher.is_ignored_with_hint("/virtual/scratch.tmp", false));
    assert!(
        !matcher.is_ignored_with_hint(root.join("scratch.tmp"), false),
        "Rules anchor to the override, not the file location"
    );
}

#[test]
fn test_missing_ignore_file_errors() {
    let result = parse_ignore_file("/no/such/place/.gitignore", None);
    assert!(matches!(result, Err(IgnoreError::FileReadError(_))));
}

#[test]
fn test_directory_ness_is_probed_from_the_filesystem() {
    let dir = tempdir().unwrap_or_else(|e| panic!("Failed to create temp dir: {}", e));
    let root = dir.path();
    fs::write(root.join(".gitignore"), "build/\nrelease/\n")
        .unwrap_or_else(|e| panic!("Failed to write ignore file: {}", e));
    fs::create_dir(root.join("build")).unwrap_or_else(|e| panic!("Failed to create dir: {}", e));
    fs::write(root.join("build").join("out.o"), "o")
        .unwrap_or_else(|e| panic!("Failed to write file: {}", e));
    fs::write(root.join("release"), "a plain file")
        .unwrap_or_else(|e| panic!("Failed to write file: {}", e));

    let matcher = parse_ignore_file(root.join(".gitignore"), None)
        .unwrap_or_else(|e| panic!("Failed to parse ignore file: {}", e));

    assert!(
        matcher.is_ignored(root.join("build")),
        "The real directory is ignored"
    );
    assert!(
        matcher.is_ignored(root.join("build").join("out.o")),
        "Files inside the ignored directory are ignored"
    );
    assert!(
        !matcher.is_ignored(root.join("release")),
        "A plain file never matches a directory rule of its own name"
    );
}
