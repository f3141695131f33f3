//! File ordering, including the "human" order where embedded numbers are
//! compared by value (`file2` before `file10`).

use crate::config::SortMode;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// One component of a human sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyToken {
    /// Digit run with leading zeros stripped, compared by numeric value.
    Number(String),
    /// Trimmed, lower-cased text.
    Text(String),
}

impl Ord for KeyToken {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyToken::Number(a), KeyToken::Number(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (KeyToken::Text(a), KeyToken::Text(b)) => a.cmp(b),
            (KeyToken::Number(_), KeyToken::Text(_)) => Ordering::Less,
            (KeyToken::Text(_), KeyToken::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for KeyToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Builds the human sort key of `path`.
///
/// The base name is split on digit runs; all numbers come first, in order,
/// followed by the non-blank text pieces.
pub fn human_key(path: &Path) -> Vec<KeyToken> {
    let base_name = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    let mut numbers = Vec::new();
    let mut texts = Vec::new();
    let mut rest: &str = &base_name;

    while !rest.is_empty() {
        let is_digit = rest.starts_with(|c: char| c.is_ascii_digit());
        let len = rest
            .find(|c: char| c.is_ascii_digit() != is_digit)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(len);
        if is_digit {
            let value = chunk.trim_start_matches('0');
            numbers.push(KeyToken::Number(if value.is_empty() {
                "0".to_string()
            } else {
                value.to_string()
            }));
        } else {
            let text = chunk.trim();
            if !text.is_empty() {
                texts.push(KeyToken::Text(text.to_lowercase()));
            }
        }
        rest = tail;
    }

    numbers.extend(texts);
    numbers
}

/// Orders `files` in place. Every mode is stable.
pub fn sort_files(files: &mut [PathBuf], mode: SortMode) {
    match mode {
        SortMode::None => {}
        SortMode::Lexicographical => files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str())),
        SortMode::Human => files.sort_by_cached_key(|path| human_key(path)),
    }
}
