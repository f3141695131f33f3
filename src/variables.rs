//! Template variables available to the output name format and to the command format.

use crate::constants::{
    VAR_BASENAME, VAR_COUNTER, VAR_EXTENSION, VAR_IN, VAR_ORIG_COUNTER, VAR_OUT, VAR_OUT_FOLDER,
};
use crate::error::{Error, Result};
use crate::template::LabelResolver;
use std::path::Path;

/// Folder, base name and extension of a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileParts {
    pub folder: String,
    pub base_name: String,
    /// Extension including the leading dot, empty when there is none.
    pub extension: String,
}

impl FileParts {
    pub fn of(path: &Path) -> Self {
        let folder = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Self {
            folder,
            base_name,
            extension,
        }
    }
}

/// Formats `value` on `width` digits, zero padded. A width of 0 disables padding.
pub fn format_counter(value: i64, width: usize) -> String {
    if width > 0 {
        format!("{value:0width$}")
    } else {
        value.to_string()
    }
}

/// Returns the first run of ASCII digits in `name`.
pub fn first_digit_run(name: &str) -> Option<&str> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let rest = &name[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

/// Reads the first number embedded in `base_name` and formats it like a counter.
///
/// The digits are handled as text so arbitrarily long runs never overflow.
pub fn counter_from_name(base_name: &str, width: usize) -> Result<String> {
    let digits = first_digit_run(base_name).ok_or_else(|| Error::MissingDigitsForOrigCounter {
        base_name: base_name.to_string(),
    })?;
    let trimmed = digits.trim_start_matches('0');
    let value = if trimmed.is_empty() { "0" } else { trimmed };
    Ok(format!("{value:0>width$}"))
}

/// Widest counter a label may ask for; an `i64` never needs more digits.
pub const MAX_COUNTER_WIDTH: usize = 20;

/// Parses the digit count that follows a counter stem, e.g. `3` in `COUNTER3`.
fn counter_width(label: &str, stem: &str) -> Option<usize> {
    let suffix = label.strip_prefix(stem)?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix
        .parse()
        .ok()
        .filter(|&width| width <= MAX_COUNTER_WIDTH)
}

/// Variables of the output name format.
#[derive(Debug)]
pub struct NameVariables<'a> {
    pub parts: &'a FileParts,
    /// Running counter, `None` when no counter is in scope.
    pub counter: Option<i64>,
}

impl LabelResolver for NameVariables<'_> {
    fn resolve(&self, label: &str) -> Result<Option<String>> {
        let invalid = || Error::InvalidNameFormatLabel {
            label: label.to_string(),
        };

        if label == VAR_BASENAME {
            Ok(Some(self.parts.base_name.clone()))
        } else if label == VAR_EXTENSION {
            Ok(Some(self.parts.extension.clone()))
        } else if label.starts_with(VAR_COUNTER) {
            let width = counter_width(label, VAR_COUNTER).ok_or_else(invalid)?;
            Ok(self.counter.map(|value| format_counter(value, width)))
        } else if label.starts_with(VAR_ORIG_COUNTER) {
            let width = counter_width(label, VAR_ORIG_COUNTER).ok_or_else(invalid)?;
            counter_from_name(&self.parts.base_name, width).map(Some)
        } else {
            Err(invalid())
        }
    }
}

/// Variables of the command format: `IN`, `OUT` and `OUT_FOLDER`, each wrapped
/// in double quotes. The other input details reach the command through its
/// environment only.
#[derive(Debug)]
pub struct CommandVariables<'a> {
    pub input: &'a Path,
    pub output: Option<&'a Path>,
    pub output_folder: &'a Path,
}

fn quoted<S: std::fmt::Display>(value: S) -> String {
    format!("\"{value}\"")
}

impl LabelResolver for CommandVariables<'_> {
    fn resolve(&self, label: &str) -> Result<Option<String>> {
        let value = match label {
            VAR_IN => quoted(self.input.display()),
            VAR_OUT => match self.output {
                Some(output) => quoted(output.display()),
                None => {
                    return Err(Error::MissingOutputPath {
                        label: label.to_string(),
                    })
                }
            },
            VAR_OUT_FOLDER => quoted(self.output_folder.display()),
            _ => {
                return Err(Error::InvalidCommandFormatLabel {
                    label: label.to_string(),
                })
            }
        };
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_file_parts() {
        let parts = FileParts::of(Path::new("dir/sub/archive.tar.gz"));
        assert_eq!(parts.folder, "dir/sub");
        assert_eq!(parts.base_name, "archive.tar");
        assert_eq!(parts.extension, ".gz");
    }

    #[test]
    fn file_parts_without_extension() {
        let parts = FileParts::of(Path::new("README"));
        assert_eq!(parts.folder, "");
        assert_eq!(parts.base_name, "README");
        assert_eq!(parts.extension, "");

        let hidden = FileParts::of(Path::new("/home/.profile"));
        assert_eq!(hidden.base_name, ".profile");
        assert_eq!(hidden.extension, "");
    }

    #[test]
    fn counter_widths() {
        assert_eq!(format_counter(7, 3), "007");
        assert_eq!(format_counter(7, 0), "7");
        assert_eq!(format_counter(1234, 2), "1234");
        assert_eq!(format_counter(-7, 3), "-07");
    }

    #[test]
    fn counter_width_requires_digits() {
        assert_eq!(counter_width("COUNTER12", VAR_COUNTER), Some(12));
        assert_eq!(counter_width("COUNTER", VAR_COUNTER), None);
        assert_eq!(counter_width("COUNTERX", VAR_COUNTER), None);
    }

    #[test]
    fn counter_width_is_capped() {
        assert_eq!(counter_width("COUNTER20", VAR_COUNTER), Some(20));
        assert_eq!(counter_width("COUNTER21", VAR_COUNTER), None);
        assert_eq!(counter_width("ORIGCOUNTER4000000000", VAR_ORIG_COUNTER), None);
        assert_eq!(counter_width("COUNTER99999999999999999999999", VAR_COUNTER), None);
    }

    #[test]
    fn digit_runs() {
        assert_eq!(first_digit_run("scan042final7"), Some("042"));
        assert_eq!(first_digit_run("99"), Some("99"));
        assert_eq!(first_digit_run("none"), None);
    }

    #[test]
    fn counters_recovered_from_names() {
        assert_eq!(counter_from_name("scan042final", 2).unwrap(), "42");
        assert_eq!(counter_from_name("scan42final", 5).unwrap(), "00042");
        assert_eq!(counter_from_name("img000", 0).unwrap(), "0");
        assert!(matches!(
            counter_from_name("plain", 2),
            Err(Error::MissingDigitsForOrigCounter { .. })
        ));
    }
}
