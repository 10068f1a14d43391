//! Translates gitignore glob bodies into regular expressions.
//!
//! Matching is pathname-style: `*` and `?` never cross a path separator,
//! unlike plain shell globbing.

const SEP: &str = "[/]";
const NONSEP: &str = "[^/]";

/// Converts a glob body (negation, anchors and directory markers already
/// stripped by the pattern compiler) into a regex over normalized relative
/// path strings.
///
/// The scan walks the pattern once with an explicit cursor; `**` needs two
/// characters of lookahead, so access goes through an indexed char buffer
/// instead of an iterator. A `*` at the very end of the pattern falls back
/// to the single-`*` rule.
pub fn glob_to_regex(
    pattern: &str,
    directory_only: bool,
    negation: bool,
    anchored: bool,
) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let n = chars.len();
    let mut i = 0;
    let mut res = String::new();
    while i < n {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                if i < n && chars[i] == '*' {
                    i += 1;
                    res.push_str(".*");
                    if i < n && chars[i] == '/' {
                        i += 1;
                        res.push_str(SEP);
                        res.push('?');
                    }
                } else {
                    res.push_str(NONSEP);
                    res.push('*');
                }
            }
            '?' => res.push_str(NONSEP),
            '/' => res.push_str(SEP),
            '[' => {
                let mut j = i;
                if j < n && chars[j] == '!' {
                    j += 1;
                }
                if j < n && chars[j] == ']' {
                    j += 1;
                }
                while j < n && chars[j] != ']' {
                    j += 1;
                }
                if j >= n {
                    // Unterminated class degrades to a literal bracket.
                    res.push_str("\\[");
                } else {
                    let stuff: String = chars[i..j].iter().collect();
                    let stuff = stuff.replace('\\', "\\\\");
                    i = j + 1;
                    res.push('[');
                    if let Some(rest) = stuff.strip_prefix('!') {
                        res.push('^');
                        res.push_str(rest);
                    } else if stuff.starts_with('^') {
                        res.push('\\');
                        res.push_str(&stuff);
                    } else {
                        res.push_str(&stuff);
                    }
                    res.push(']');
                }
            }
            _ => res.push_str(&regex::escape(&c.to_string())),
        }
    }

    // `(?s)` keeps the predicate from being line-restrictive; `^`/`$`
    // already anchor to the whole haystack.
    let mut out = String::from("(?s)");
    if anchored {
        out.push('^');
    }
    out.push_str(&res);
    if !directory_only {
        out.push('$');
    } else if negation {
        // Negated directory rules are tested against relative paths that
        // carry a trailing separator.
        out.push_str("/$");
    } else {
        // A directory rule also matches paths nested under the directory.
        out.push_str("($|/)");
    }
    out
}
