//! Check protocol - record failures without aborting the test body
//!
//! A check never unwinds. When its condition is false it writes one
//! diagnostic line to the error sink, records a [`Failure`] and marks the
//! invocation as failed; the rest of the body keeps running so a single test
//! can report every broken check at once.

use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::panic::Location;

/// Tag appended to every diagnostic line.
pub const DIAGNOSTIC_TAG: &str = "[UnitTest]";

/// A single recorded check failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Human readable description of the check (e.g. `check_equal!(1, 2)`)
    pub description: String,
    /// Source file of the failing check
    pub file: &'static str,
    /// Line number of the failing check
    pub line: u32,
}

impl Failure {
    /// Create a failure located at `location`
    pub fn at(description: impl Into<String>, location: &'static Location<'static>) -> Self {
        Self {
            description: description.into(),
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed {} {}:{} {}",
            self.description, self.file, self.line, DIAGNOSTIC_TAG
        )
    }
}

/// Failure state for one test invocation.
///
/// The runner creates a fresh `Checks` for every invocation and reads
/// [`Checks::failed`] after the body returns; that value is the verdict.
pub struct Checks<'w> {
    failed: bool,
    failures: Vec<Failure>,
    diagnostics: &'w mut dyn Write,
}

impl<'w> Checks<'w> {
    /// Create an empty failure state writing diagnostics to `diagnostics`
    pub fn new(diagnostics: &'w mut dyn Write) -> Self {
        Self {
            failed: false,
            failures: Vec::new(),
            diagnostics,
        }
    }

    /// Evaluate a condition, recording a failure at the caller if it is false.
    ///
    /// Returns the condition so callers can branch on it.
    #[track_caller]
    pub fn check(&mut self, condition: bool, description: impl fmt::Display) -> bool {
        if !condition {
            self.record(Failure::at(description.to_string(), Location::caller()));
        }
        condition
    }

    /// Record a failure and emit its diagnostic line
    pub fn record(&mut self, failure: Failure) {
        tracing::trace!(check = %failure.description, file = failure.file, line = failure.line, "check failed");
        let _ = writeln!(self.diagnostics, "{}", failure);
        let _ = self.diagnostics.flush();
        self.failures.push(failure);
        self.failed = true;
    }

    /// Whether any check has failed during this invocation
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Failures recorded so far, in the order they happened
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Consume the state, keeping only the recorded failures
    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }
}

impl fmt::Debug for Checks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checks")
            .field("failed", &self.failed)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}

/// `|a - b| < tolerance`. A difference equal to the tolerance is not close.
pub fn close(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

/// Element-wise equality over the first `size` elements.
///
/// An index past the end of either slice counts as a mismatch.
pub fn array_equal<T: PartialEq>(a: &[T], b: &[T], size: usize) -> bool {
    (0..size).all(|i| matches!((a.get(i), b.get(i)), (Some(x), Some(y)) if x == y))
}

/// Element-wise closeness over the first `size` elements
pub fn array_close<T: Copy + Into<f64>>(a: &[T], b: &[T], size: usize, tolerance: f64) -> bool {
    (0..size).all(|i| match (a.get(i), b.get(i)) {
        (Some(&x), Some(&y)) => close(x.into(), y.into(), tolerance),
        _ => false,
    })
}

/// Element-wise equality over a `rows` x `cols` window of two 2D arrays
pub fn array2d_equal<T, RA, RB>(a: &[RA], b: &[RB], rows: usize, cols: usize) -> bool
where
    T: PartialEq,
    RA: AsRef<[T]>,
    RB: AsRef<[T]>,
{
    (0..rows).all(|i| match (a.get(i), b.get(i)) {
        (Some(x), Some(y)) => array_equal(x.as_ref(), y.as_ref(), cols),
        _ => false,
    })
}

/// Element-wise closeness over a `rows` x `cols` window of two 2D arrays
pub fn array2d_close<T, RA, RB>(
    a: &[RA],
    b: &[RB],
    rows: usize,
    cols: usize,
    tolerance: f64,
) -> bool
where
    T: Copy + Into<f64>,
    RA: AsRef<[T]>,
    RB: AsRef<[T]>,
{
    (0..rows).all(|i| match (a.get(i), b.get(i)) {
        (Some(x), Some(y)) => array_close(x.as_ref(), y.as_ref(), cols, tolerance),
        _ => false,
    })
}
