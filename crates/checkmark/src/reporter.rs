//! Test reporter - render identifiers, banners and errors

use crate::runner::Verdict;
use crate::unit::TestId;
use colored::*;
use std::fmt;
use std::io::{self, Write};

/// Output formatting for the runner
#[derive(Debug, Clone, Copy, Default)]
pub struct TestReporter {
    /// Colorize verdict banners
    color: bool,
}

impl TestReporter {
    /// Create a plain-text reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable colored banners
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Write one line of `--list` output
    pub fn list_entry(&self, out: &mut dyn Write, id: &TestId<'_>) -> io::Result<()> {
        writeln!(out, "{}", id)
    }

    /// Write the `suite-name: ` prefix printed before a unit runs.
    ///
    /// Flushed right away so diagnostics written while the body runs
    /// appear after the prefix.
    pub fn start(&self, out: &mut dyn Write, id: &TestId<'_>) -> io::Result<()> {
        write!(out, "{}: ", id)?;
        out.flush()
    }

    /// Finish the line started by [`TestReporter::start`]
    pub fn verdict(&self, out: &mut dyn Write, verdict: Verdict) -> io::Result<()> {
        let tag = verdict.tag();
        if !self.color {
            return writeln!(out, "{}", tag);
        }
        match verdict {
            Verdict::Passed => writeln!(out, "{}", tag.green()),
            Verdict::Failed => writeln!(out, "{}", tag.red().bold()),
        }
    }

    /// Report an error that ends the invocation
    pub fn error(&self, err: &mut dyn Write, error: &dyn fmt::Display) {
        let _ = writeln!(err, "{}", error);
        let _ = err.flush();
    }
}
