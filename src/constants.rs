//! Names shared by the template language and the command environment.

/// Prefix of every template variable and exported environment variable.
pub const VAR_PREFIX: &str = "FP_";

/// Input file base name (no folder, no extension).
pub const VAR_BASENAME: &str = "BASENAME";
/// Input file extension, separator included.
pub const VAR_EXTENSION: &str = "EXTENSION";
/// Running counter, followed by its digit count.
pub const VAR_COUNTER: &str = "COUNTER";
/// Counter recovered from the input name, followed by its digit count.
pub const VAR_ORIG_COUNTER: &str = "ORIGCOUNTER";

pub const VAR_IN: &str = "IN";
pub const VAR_IN_FOLDER: &str = "IN_FOLDER";
pub const VAR_IN_BASENAME: &str = "IN_BASENAME";
pub const VAR_IN_EXTENSION: &str = "IN_EXTENSION";
pub const VAR_OUT: &str = "OUT";
pub const VAR_OUT_FOLDER: &str = "OUT_FOLDER";

/// Header row of the CSV log.
pub const LOG_HEADER: [&str; 3] = ["# command", "stdout", "stderr"];
