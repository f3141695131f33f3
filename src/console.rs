//! Console colors, passed explicitly to the components that print.

use std::io::IsTerminal;

/// ANSI escape sequences used for console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub exec: &'static str,
    pub progress: &'static str,
    pub debug: &'static str,
    pub fail: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn colored() -> Self {
        Self {
            exec: "\x1b[94m",
            progress: "\x1b[92m",
            debug: "\x1b[93m",
            fail: "\x1b[91m",
            reset: "\x1b[0m",
        }
    }

    pub fn plain() -> Self {
        Self {
            exec: "",
            progress: "",
            debug: "",
            fail: "",
            reset: "",
        }
    }

    /// Colors unless disabled or stdout is not a terminal.
    pub fn detect(no_color: bool) -> Self {
        if no_color || !std::io::stdout().is_terminal() {
            Self::plain()
        } else {
            Self::colored()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::plain()
    }
}
