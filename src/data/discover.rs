use std::path::{Path, PathBuf};

use crate::error::{ReplicaError, Result};

// ---------------------------------------------------------------------------
// File discovery
// ---------------------------------------------------------------------------

/// List the regular files in `folder` whose name matches `pattern`, sorted
/// by file name.
///
/// Fails with [`ReplicaError::NoFilesFound`] when nothing matches.
pub fn discover(folder: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(folder).map_err(|source| ReplicaError::Io {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ReplicaError::Io {
            path: folder.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if wildcard_match(pattern, name) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(ReplicaError::NoFilesFound {
            folder: folder.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    files.sort();
    log::debug!("{} files match '{pattern}' in {}", files.len(), folder.display());
    Ok(files)
}

// ---------------------------------------------------------------------------
// Shell-style wildcard matching
// ---------------------------------------------------------------------------

/// Match `name` against a shell wildcard pattern.
///
/// Supports `*` (any run of characters), `?` (one character) and bracket
/// classes such as `[abc]`, `[0-9]` and `[!x]`. An unterminated `[` matches
/// itself literally.
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0, 0);
    // Position after the last `*` and the name index it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        let step = match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p + 1, n));
                p += 1;
                continue;
            }
            Some('?') => Some(p + 1),
            Some('[') => match match_class(&pattern, p, name[n]) {
                Some((true, next)) => Some(next),
                Some((false, _)) => None,
                None if name[n] == '[' => Some(p + 1),
                None => None,
            },
            Some(&c) if c == name[n] => Some(p + 1),
            _ => None,
        };

        match (step, backtrack) {
            (Some(next), _) => {
                p = next;
                n += 1;
            }
            (None, Some((star_p, star_n))) => {
                p = star_p;
                n = star_n + 1;
                backtrack = Some((star_p, star_n + 1));
            }
            (None, None) => return false,
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Evaluate the bracket class starting at `pattern[start] == '['` against
/// `c`. Returns whether it matched and the index after the closing `]`, or
/// `None` if the class is unterminated.
fn match_class(pattern: &[char], start: usize, c: char) -> Option<(bool, usize)> {
    let mut i = start + 1;
    let negate = matches!(pattern.get(i), Some('!') | Some('^'));
    if negate {
        i += 1;
    }

    let mut matched = false;
    let mut first = true;
    loop {
        let &lo = pattern.get(i)?;
        if lo == ']' && !first {
            return Some((matched != negate, i + 1));
        }
        first = false;
        if pattern.get(i + 1) == Some(&'-') && pattern.get(i + 2).is_some_and(|&hi| hi != ']') {
            let hi = pattern[i + 2];
            matched |= lo <= c && c <= hi;
            i += 3;
        } else {
            matched |= lo == c;
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_and_question_mark() {
        assert!(wildcard_match("stats*.txt", "stats1.txt"));
        assert!(wildcard_match("stats*.txt", "stats.txt"));
        assert!(wildcard_match("run?.csv", "run7.csv"));
        assert!(!wildcard_match("run?.csv", "run10.csv"));
        assert!(wildcard_match("*", "anything"));
        assert!(wildcard_match("*a*b*", "xxaybzb"));
        assert!(!wildcard_match("*.csv", "data.csv.bak"));
    }

    #[test]
    fn literal_names() {
        assert!(wildcard_match("exact.txt", "exact.txt"));
        assert!(!wildcard_match("exact.txt", "exact.tx"));
        assert!(!wildcard_match("exact.tx", "exact.txt"));
    }

    #[test]
    fn bracket_classes() {
        assert!(wildcard_match("run[0-9].csv", "run3.csv"));
        assert!(!wildcard_match("run[0-9].csv", "runx.csv"));
        assert!(wildcard_match("run[!a].csv", "runb.csv"));
        assert!(!wildcard_match("run[!a].csv", "runa.csv"));
        assert!(wildcard_match("[ab]*", "beta"));
        assert!(wildcard_match("[]]x", "]x"));
        assert!(wildcard_match("a[b", "a[b"));
    }

    #[test]
    fn missing_folder_is_io_error() {
        let err = discover(Path::new("/definitely/not/here"), "*").unwrap_err();
        assert!(matches!(err, ReplicaError::Io { .. }));
    }
}
