use crate::errors::IgnoreError;
use crate::glob::glob_to_regex;
use crate::rule::{IgnoreRule, RuleSource};
use regex::Regex;
use std::path::Path;
use tracing::trace;

/// Compiles one raw ignore-file line into a rule.
///
/// Comments, blank lines and malformed patterns produce `Ok(None)` and the
/// line has no effect; the only error is a non-absolute `base_path`, which
/// is a caller contract violation rather than a data problem.
pub fn rule_from_pattern(
    pattern: &str,
    base_path: &Path,
    source: Option<RuleSource>,
) -> Result<Option<IgnoreRule>, IgnoreError> {
    if !base_path.is_absolute() {
        return Err(IgnoreError::BasePathNotAbsolute(
            base_path.display().to_string(),
        ));
    }
    let orig_pattern = pattern;

    // Comments and blank separators.
    if pattern.trim().is_empty() || pattern.starts_with('#') {
        return Ok(None);
    }
    // More than two consecutive asterisks void the whole line.
    if pattern.contains("***") {
        return Ok(None);
    }
    // Strip the leading bang before examining double asterisks.
    let (pattern, negation) = match pattern.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (pattern, false),
    };
    // Double asterisks may sit at the start or the end of the pattern, or
    // be surrounded by slashes; anywhere else voids the line.
    let bytes = pattern.as_bytes();
    for (start, _) in pattern.match_indices("**") {
        let at_start = start == 0;
        let at_end = start + 2 == bytes.len();
        if !at_start && !at_end && (bytes[start - 1] != b'/' || bytes.get(start + 2) != Some(&b'/'))
        {
            return Ok(None);
        }
    }
    // A bare slash matches nothing by git convention.
    if pattern.trim_end() == "/" {
        return Ok(None);
    }

    let directory_only = pattern.ends_with('/');
    // A slash anywhere before the final character ties the rule to its
    // base path.
    let anchored = match pattern.char_indices().next_back() {
        Some((last, _)) => pattern[..last].contains('/'),
        None => false,
    };

    let pattern = pattern.strip_prefix('/').unwrap_or(pattern);
    let (pattern, have_double_asterisk) = match pattern.strip_prefix("**") {
        Some(rest) => (rest, true),
        None => (pattern, false),
    };
    // A leading `**/` means "at any depth" and cancels anchoring.
    let anchored = anchored && !have_double_asterisk;
    let pattern = pattern.strip_prefix('/').unwrap_or(pattern);
    let pattern = pattern.strip_suffix('/').unwrap_or(pattern);
    // A leading hash escaped with a backslash is a literal hash, not a
    // comment marker.
    let pattern = if pattern.starts_with("\\#") {
        &pattern[1..]
    } else {
        pattern
    };
    // Trailing spaces are ignored unless escaped with a backslash; an
    // escaped run keeps exactly one space.
    let pattern = pattern.trim_end();
    let (pattern, have_escaped_space) = match pattern.strip_suffix('\\') {
        Some(rest) => (rest, true),
        None => (pattern, false),
    };
    let mut body = pattern.to_string();
    if have_escaped_space {
        body.push(' ');
    }
    // Patterns that reduce to nothing (e.g. a lone `!`) compile to no rule;
    // a bare `**` still means "everything".
    if body.is_empty() && !have_double_asterisk {
        return Ok(None);
    }

    let regex_str = glob_to_regex(&body, directory_only, negation, anchored);
    trace!("Compiled pattern {:?} to regex {:?}", orig_pattern, regex_str);
    let regex = Regex::new(&regex_str)?;
    Ok(Some(IgnoreRule {
        pattern: orig_pattern.to_string(),
        regex,
        negation,
        directory_only,
        anchored,
        base_path: base_path.to_path_buf(),
        source,
    }))
}
