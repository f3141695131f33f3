//! Input file discovery: listing, filtering, ordering and sampling.

use crate::config::{RunConfiguration, SortMode};
use crate::error::{Error, Result};
use crate::sort::sort_files;
use log::{debug, warn};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file selected for processing together with its counter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub counter: i64,
}

/// Compiles the optional file filter.
pub fn compile_filter(pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|source| Error::InvalidFilterPattern {
                pattern: p.to_string(),
                source,
            })
        })
        .transpose()
}

/// Lists, filters and orders the regular files below a root folder.
#[derive(Debug)]
pub struct FileCollector<'a> {
    root: &'a Path,
    filter: Option<Regex>,
    recursive: bool,
    sort_mode: SortMode,
}

impl<'a> FileCollector<'a> {
    /// Validates the root folder and the filter pattern.
    ///
    /// # Errors
    /// * `Error::InputPathNotFound` if `root` is not an existing directory
    /// * `Error::InvalidFilterPattern` if the filter does not compile
    pub fn new(
        root: &'a Path,
        filter: Option<&str>,
        recursive: bool,
        sort_mode: SortMode,
    ) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::InputPathNotFound {
                path: root.to_path_buf(),
            });
        }
        let filter = compile_filter(filter)?;
        Ok(Self {
            root,
            filter,
            recursive,
            sort_mode,
        })
    }

    pub fn from_config(config: &'a RunConfiguration) -> Result<Self> {
        Self::new(
            &config.input_path,
            config.file_filter.as_deref(),
            config.recursive,
            config.sort_mode,
        )
    }

    fn accepts(&self, path: &Path) -> bool {
        match &self.filter {
            Some(filter) => path
                .file_name()
                .is_some_and(|name| filter.is_match(&name.to_string_lossy())),
            None => true,
        }
    }

    /// Returns the matching files in processing order.
    ///
    /// Entries that cannot be read are logged and skipped.
    pub fn files(&self) -> Vec<PathBuf> {
        let walker = WalkDir::new(self.root).min_depth(1).follow_links(true);
        let walker = if self.recursive {
            walker
        } else {
            walker.max_depth(1)
        };

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if self.accepts(entry.path()) {
                files.push(entry.into_path());
            } else {
                debug!("Filtered out {}", entry.path().display());
            }
        }

        sort_files(&mut files, self.sort_mode);
        files
    }
}

/// Keeps one file every `step`, numbering all of them from `offset`.
///
/// The counter advances for every file, including the ones dropped by
/// sampling, so a kept file's counter is `offset + position`.
///
/// # Errors
/// * `Error::ConfigError` if a kept file's counter does not fit in an `i64`
pub fn sample(files: Vec<PathBuf>, step: usize, offset: i64) -> Result<Vec<Candidate>> {
    let step = step.max(1);
    let mut kept = Vec::with_capacity(files.len() / step + 1);

    for (position, path) in files.into_iter().enumerate().step_by(step) {
        let counter = i64::try_from(position)
            .ok()
            .and_then(|position| offset.checked_add(position))
            .ok_or_else(|| {
                Error::ConfigError(format!(
                    "the counter offset {offset} overflows at file {}",
                    path.display()
                ))
            })?;
        kept.push(Candidate { path, counter });
    }
    Ok(kept)
}
