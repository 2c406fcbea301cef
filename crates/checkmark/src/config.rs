//! Harness configuration via environment variables
//!
//! The command line of a test executable is fixed (no arguments, `--list`
//! or one identifier), so everything optional is configured through the
//! environment instead.

use std::env;
use std::io::{self, IsTerminal};

/// Selects colored banners (`auto`, `always`, `never`)
pub const COLOR_ENV: &str = "CHECKMARK_COLOR";
/// Tracing filter directives for harness logs (e.g. `checkmark=debug`)
pub const LOG_ENV: &str = "CHECKMARK_LOG";

/// When to colorize `[Passed]`/`[Failed]` banners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Parse a `CHECKMARK_COLOR` value; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(ColorChoice::Auto),
            "always" | "1" | "on" | "true" => Some(ColorChoice::Always),
            "never" | "0" | "off" | "false" => Some(ColorChoice::Never),
            _ => None,
        }
    }

    /// Decide for a given output stream
    pub fn resolve(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Harness configuration loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Banner coloring (CHECKMARK_COLOR, forced to `never` by NO_COLOR)
    pub color: ColorChoice,
    /// Log filter directives (CHECKMARK_LOG); logging is off when unset
    pub log_filter: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let color = if env::var_os("NO_COLOR").is_some() {
            ColorChoice::Never
        } else {
            env::var(COLOR_ENV)
                .ok()
                .and_then(|v| ColorChoice::parse(&v))
                .unwrap_or_default()
        };

        Self {
            color,
            log_filter: env::var(LOG_ENV).ok().filter(|v| !v.trim().is_empty()),
        }
    }

    /// Whether banners written to stdout should be colored
    pub fn use_color(&self) -> bool {
        self.color.resolve(io::stdout().is_terminal())
    }
}
