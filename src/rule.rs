use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a rule came from, for diagnostics.
#[derive(Debug, Clone)]
pub struct RuleSource {
    pub file: PathBuf,
    /// 1-based line number in `file`.
    pub line: usize,
}

/// A single compiled ignore rule.
///
/// Rules are flat value types distinguished only by their flag fields; they
/// are created once by the pattern compiler and never mutate afterwards.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    /// Original pattern line, kept for diagnostics and display only.
    pub pattern: String,
    /// Compiled predicate over the path relative to `base_path`.
    pub regex: Regex,
    /// A match excludes the path from ignoring instead of including it.
    pub negation: bool,
    /// The rule applies only to directories.
    pub directory_only: bool,
    /// Matching starts at the beginning of the relative path.
    pub anchored: bool,
    /// Absolute directory the relative-path computation is anchored to.
    pub base_path: PathBuf,
    pub source: Option<RuleSource>,
}

impl IgnoreRule {
    /// Tests the rule against an absolute candidate path.
    ///
    /// The predicate only ever sees path text; directory-ness must be
    /// resolved by the caller. A candidate outside `base_path` never
    /// matches.
    pub fn matches(&self, abs_path: &Path, is_dir: bool) -> bool {
        let rel = match abs_path.strip_prefix(&self.base_path) {
            Ok(rel) => rel,
            Err(_) => return false,
        };
        let mut rel_path = rel.to_string_lossy().replace('\\', "/");
        if self.negation && is_dir {
            rel_path.push('/');
        }
        if self.directory_only && !self.negation && !is_dir {
            // A file only matches a directory rule from inside the
            // directory, never by sharing its name.
            return match rel_path.rfind('/') {
                Some(idx) => self.regex.is_match(&rel_path[..=idx]),
                None => false,
            };
        }
        self.regex.is_match(&rel_path)
    }
}

impl fmt::Display for IgnoreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}
