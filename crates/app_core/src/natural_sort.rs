//! Natural sort keys for file names and paths
//!
//! "image2.jpg" < "image10.jpg" < "image10b.jpg"

use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};

/// One piece of a sort key
///
/// Numbers sort before text when the two meet at the same position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Token {
    Number(Digits),
    Text(String),
}

/// A run of ASCII digits compared by numeric value, of any length
///
/// Leading zeros are stripped on construction, so "007" equals "7".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digits(String);

impl Digits {
    fn new(run: &str) -> Self {
        let trimmed = run.trim_start_matches('0');
        Self(trimmed.to_string())
    }

    /// Digits without leading zeros ("" for zero)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for Digits {
    fn cmp(&self, other: &Self) -> Ordering {
        // No leading zeros, so a longer run is a larger number
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Digits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Natural sort key of a single string
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey(Vec<Token>);

impl SortKey {
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }
}

/// Natural sort key of a whole path, one [`SortKey`] per component
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct PathSortKey(Vec<SortKey>);

impl PathSortKey {
    pub fn components(&self) -> &[SortKey] {
        &self.0
    }
}

/// Build the natural sort key of a string
///
/// Maximal runs of ASCII digits become numbers, everything between them is
/// lower-cased text. Empty pieces never produce a token.
pub fn sort_key(s: &str) -> SortKey {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_digits = false;

    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        if i > start && is_digit != in_digits {
            tokens.push(make_token(&s[start..i], in_digits));
            start = i;
        }
        in_digits = is_digit;
    }

    if start < s.len() {
        tokens.push(make_token(&s[start..], in_digits));
    }

    SortKey(tokens)
}

fn make_token(piece: &str, digits: bool) -> Token {
    if digits {
        Token::Number(Digits::new(piece))
    } else {
        Token::Text(piece.to_lowercase())
    }
}

/// Build the natural sort key of a path
///
/// The path is normalized lexically first; the file system is never touched.
pub fn path_sort_key<P: AsRef<Path>>(path: P) -> PathSortKey {
    let keys = normalized_components(path.as_ref())
        .iter()
        .map(|c| sort_key(c))
        .collect();
    PathSortKey(keys)
}

/// Compare two paths in natural order
pub fn compare_paths<A: AsRef<Path>, B: AsRef<Path>>(a: A, b: B) -> Ordering {
    path_sort_key(a).cmp(&path_sort_key(b))
}

/// Stable in-place natural sort of paths
pub fn sort_paths(paths: &mut [PathBuf]) {
    paths.sort_by_cached_key(|p| path_sort_key(p));
}

/// Components after collapsing separators, `.` and `..`
///
/// A root contributes an empty string so absolute paths keep a leading slot.
fn normalized_components(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    // Number of leading entries that `..` must not pop (prefix/root or kept `..`)
    let mut anchored = 0;
    let mut rooted = false;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                parts.push(prefix.as_os_str().to_string_lossy().into_owned());
                anchored = parts.len();
            }
            Component::RootDir => {
                parts.push(String::new());
                anchored = parts.len();
                rooted = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.len() > anchored {
                    parts.pop();
                } else if !rooted {
                    parts.push("..".to_string());
                    anchored = parts.len();
                }
            }
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
        }
    }

    parts
}
