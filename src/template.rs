//! Placeholder scanning and substitution for name and command formats.
//! A placeholder is the literal text `${FP_<LABEL>}` where the label is made
//! of ASCII letters, digits and underscores.

use crate::constants::VAR_PREFIX;
use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"\$\{{{}([A-Za-z0-9_]+)\}}", regex::escape(VAR_PREFIX));
    Regex::new(&pattern).expect("placeholder pattern is a valid regex")
});

/// A `${FP_LABEL}` span found inside a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Byte offset of the leading `$`.
    pub start: usize,
    /// Byte offset just past the closing brace.
    pub end: usize,
    /// Text between the prefix and the closing brace.
    pub label: &'a str,
}

/// Lazily scans `format` for non-overlapping placeholders, left to right.
///
/// The scan holds no state beyond the returned iterator; calling it again
/// restarts from the beginning of the string.
pub fn placeholders(format: &str) -> impl Iterator<Item = Placeholder<'_>> + '_ {
    PLACEHOLDER_RE.captures_iter(format).filter_map(|caps| {
        let whole = caps.get(0)?;
        let label = caps.get(1)?;
        Some(Placeholder {
            start: whole.start(),
            end: whole.end(),
            label: label.as_str(),
        })
    })
}

/// Maps placeholder labels to the text that replaces them.
pub trait LabelResolver {
    /// Resolves a label.
    ///
    /// # Returns
    /// * `Ok(Some(text))` - Substitute `text` for the placeholder
    /// * `Ok(None)` - The variable has no value here; the placeholder is dropped
    /// * `Err(_)` - The label is not valid for this format
    fn resolve(&self, label: &str) -> Result<Option<String>>;
}

/// Renders `format`, replacing every placeholder with the value produced by `resolver`.
///
/// A format without placeholders is returned verbatim. The first label that
/// fails to resolve aborts the render.
pub fn render<R: LabelResolver + ?Sized>(format: &str, resolver: &R) -> Result<String> {
    let mut rendered = String::with_capacity(format.len());
    let mut cursor = 0;

    for placeholder in placeholders(format) {
        rendered.push_str(&format[cursor..placeholder.start]);
        if let Some(value) = resolver.resolve(placeholder.label)? {
            rendered.push_str(&value);
        }
        cursor = placeholder.end;
    }
    rendered.push_str(&format[cursor..]);

    Ok(rendered)
}
