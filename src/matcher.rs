use crate::errors::IgnoreError;
use crate::parser::rule_from_pattern;
use crate::rule::{IgnoreRule, RuleSource};
use crate::utils::absolutize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use tracing::{debug, trace};

/// An ordered set of compiled ignore rules.
///
/// Rule order is the appearance order in the source and is load bearing:
/// evaluation walks the rules in reverse, so the last declared match wins.
/// The set never mutates after construction and can be queried from many
/// threads concurrently.
pub struct IgnoreMatcher {
    rules: Vec<IgnoreRule>,
}

impl IgnoreMatcher {
    pub fn new(rules: Vec<IgnoreRule>) -> Self {
        IgnoreMatcher { rules }
    }

    /// Creates a matcher with no rules; it never ignores anything.
    pub fn empty() -> Self {
        IgnoreMatcher { rules: Vec::new() }
    }

    /// Compiles a matcher from raw pattern lines supplied by the caller.
    ///
    /// `base_dir` is the directory the rules anchor to and must be
    /// absolute.
    pub fn from_lines<I, S>(lines: I, base_dir: &Path) -> Result<Self, IgnoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Vec::new();
        for (lineno, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            match rule_from_pattern(line, base_dir, None)? {
                Some(rule) => rules.push(rule),
                None => debug!("Skipping line {}: {:?}", lineno + 1, line),
            }
        }
        Ok(IgnoreMatcher { rules })
    }

    /// Returns the compiled rules for logging/debugging.
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns true if the given path is ignored. Directory-ness is probed
    /// from the filesystem.
    pub fn is_ignored<P: AsRef<Path>>(&self, path: P) -> bool {
        self.lookup(path.as_ref(), None)
            .map(|rule| !rule.negation)
            .unwrap_or(false)
    }

    /// Like [`IgnoreMatcher::is_ignored`], for raw string paths: a trailing
    /// separator is an explicit directory hint, otherwise directory-ness is
    /// probed from the filesystem.
    pub fn is_ignored_str(&self, path: &str) -> bool {
        self.matched_rule_str(path)
            .map(|rule| !rule.negation)
            .unwrap_or(false)
    }

    /// Evaluates with an explicit directory hint, skipping the filesystem
    /// probe entirely.
    pub fn is_ignored_with_hint<P: AsRef<Path>>(&self, path: P, is_dir: bool) -> bool {
        self.lookup(path.as_ref(), Some(is_dir))
            .map(|rule| !rule.negation)
            .unwrap_or(false)
    }

    /// Returns the rule that decides the given path, if any.
    pub fn matched_rule<P: AsRef<Path>>(&self, path: P) -> Option<&IgnoreRule> {
        self.lookup(path.as_ref(), None)
    }

    /// String-path variant of [`IgnoreMatcher::matched_rule`], honoring the
    /// trailing-separator directory hint.
    pub fn matched_rule_str(&self, path: &str) -> Option<&IgnoreRule> {
        let hint = if path.ends_with('/') || path.ends_with(MAIN_SEPARATOR) {
            Some(true)
        } else {
            None
        };
        self.lookup(Path::new(path), hint)
    }

    fn lookup(&self, path: &Path, is_dir: Option<bool>) -> Option<&IgnoreRule> {
        let abs_path = absolutize(path)?;
        let is_dir = is_dir.unwrap_or_else(|| abs_path.is_dir());
        let hit = self
            .rules
            .iter()
            .rev()
            .find(|rule| rule.matches(&abs_path, is_dir));
        if let Some(rule) = hit {
            trace!("Path {:?} decided by rule {}", path, rule);
        }
        hit
    }
}

/// Parses an ignore file into a matcher.
///
/// `base_dir` overrides the directory the rules anchor to; it defaults to
/// the directory containing the ignore file. Line numbers in rule sources
/// are 1-based.
pub fn parse_ignore_file<P: AsRef<Path>>(
    ignore_file: P,
    base_dir: Option<&Path>,
) -> Result<IgnoreMatcher, IgnoreError> {
    let ignore_file = ignore_file.as_ref();
    let base_dir = match base_dir {
        Some(dir) => dir.to_path_buf(),
        None => ignore_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let base_dir = absolutize(&base_dir)
        .ok_or_else(|| IgnoreError::BasePathNotAbsolute(base_dir.display().to_string()))?;

    debug!(
        "Parsing ignore file {:?} anchored at {:?}",
        ignore_file, base_dir
    );
    let file = File::open(ignore_file)?;
    let reader = BufReader::new(file);
    let mut rules = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let source = RuleSource {
            file: ignore_file.to_path_buf(),
            line: lineno + 1,
        };
        match rule_from_pattern(&line, &base_dir, Some(source))? {
            Some(rule) => {
                trace!("Compiled rule {} from line {}", rule, lineno + 1);
                rules.push(rule);
            }
            None => debug!("Skipping line {}: {:?}", lineno + 1, line),
        }
    }
    Ok(IgnoreMatcher::new(rules))
}
