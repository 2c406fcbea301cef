//! Test runner - list, run everything, or run one unit by name

use crate::check::{Checks, Failure};
use crate::error::{HarnessError, HarnessResult};
use crate::registry::Registry;
use crate::reporter::TestReporter;
use crate::unit::{TestId, TestUnit};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, info};

/// Outcome of a single invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Passed,
    Failed,
}

impl Verdict {
    pub fn from_failed(failed: bool) -> Self {
        if failed {
            Verdict::Failed
        } else {
            Verdict::Passed
        }
    }

    pub fn is_pass(self) -> bool {
        self == Verdict::Passed
    }

    pub fn is_fail(self) -> bool {
        self == Verdict::Failed
    }

    /// Banner printed after the identifier when running everything
    pub fn tag(self) -> &'static str {
        match self {
            Verdict::Passed => "[Passed]",
            Verdict::Failed => "[Failed]",
        }
    }
}

/// A completed invocation
#[derive(Debug, Clone, Serialize)]
pub struct TestRun {
    /// The unit that was run
    #[serde(skip)]
    pub unit: &'static TestUnit,
    /// Rendered `suite-name` identifier
    pub id: String,
    pub verdict: Verdict,
    /// Every check that failed, in order
    pub failures: Vec<Failure>,
}

/// Results of running every registered unit
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub runs: Vec<TestRun>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.runs.len()
    }

    pub fn passed(&self) -> usize {
        self.runs.iter().filter(|r| r.verdict.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.runs.iter().filter(|r| r.verdict.is_fail()).count()
    }

    /// Logical OR of every verdict; the overall result of the run
    pub fn any_failed(&self) -> bool {
        self.runs.iter().any(|r| r.verdict.is_fail())
    }
}

/// Executes units from a [`Registry`], one at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct TestRunner {
    reporter: TestReporter,
}

impl TestRunner {
    /// Create a runner with plain-text output
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given reporter for banners
    pub fn with_reporter(mut self, reporter: TestReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn reporter(&self) -> &TestReporter {
        &self.reporter
    }

    /// Write every identifier in registry order, one per line
    pub fn list(&self, registry: &Registry, out: &mut dyn Write) -> io::Result<()> {
        for unit in registry.iter() {
            self.reporter.list_entry(out, &unit.id())?;
        }
        out.flush()
    }

    /// Invoke one unit with its own failure state
    pub fn invoke(&self, unit: &'static TestUnit, diagnostics: &mut dyn Write) -> TestRun {
        let id = unit.id();
        let _span = tracing::debug_span!("test", id = %id).entered();

        let mut checks = Checks::new(diagnostics);
        unit.run(&mut checks);
        let verdict = Verdict::from_failed(checks.failed());
        let failures = checks.into_failures();

        debug!(verdict = verdict.tag(), failures = failures.len(), "test finished");
        TestRun {
            unit,
            id: id.to_string(),
            verdict,
            failures,
        }
    }

    /// Run every unit in registry order, printing `id: [Passed|Failed]`
    pub fn run_all(
        &self,
        registry: &Registry,
        out: &mut dyn Write,
        diagnostics: &mut dyn Write,
    ) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for unit in registry.iter() {
            self.reporter.start(out, &unit.id())?;
            let run = self.invoke(unit, diagnostics);
            self.reporter.verdict(out, run.verdict)?;
            summary.runs.push(run);
        }

        info!(
            total = summary.total(),
            passed = summary.passed(),
            failed = summary.failed(),
            "test run complete"
        );
        Ok(summary)
    }

    /// Run the first unit matching `identifier`.
    ///
    /// Prints nothing itself; only failing checks write diagnostics.
    pub fn run_one(
        &self,
        registry: &Registry,
        identifier: &str,
        diagnostics: &mut dyn Write,
    ) -> HarnessResult<TestRun> {
        let id = TestId::parse(identifier);
        debug!(suite = id.suite, name = id.name, "looking up test");

        let unit = registry
            .find(&id)
            .ok_or_else(|| HarnessError::unknown_test(identifier))?;
        Ok(self.invoke(unit, diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn passes(t: &mut Checks<'_>) {
        t.check(1 + 1 == 2, "check_equal!(1 + 1, 2)");
    }

    fn fails_twice(t: &mut Checks<'_>) {
        t.check(false, "check!(false)");
        t.check(1 == 2, "check_equal!(1, 2)");
    }

    static ADDITION: TestUnit = TestUnit::new("", "Addition", passes, "math.rs", 1);
    static BROKEN: TestUnit = TestUnit::new("", "Broken", fails_twice, "math.rs", 5);
    static CONSTRUCTOR: TestUnit = TestUnit::new("Events", "Constructor", passes, "events.rs", 1);
    static SHADOWED: TestUnit = TestUnit::new("Events", "Constructor", fails_twice, "events.rs", 9);

    fn registry(units: &[&'static TestUnit]) -> Registry {
        let mut registry = Registry::new();
        for unit in units {
            registry.register(unit).unwrap();
        }
        registry
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_list_in_registry_order() {
        let registry = registry(&[&CONSTRUCTOR, &ADDITION, &BROKEN]);
        let runner = TestRunner::new();

        let mut first: Vec<u8> = Vec::new();
        runner.list(&registry, &mut first).unwrap();
        let mut second: Vec<u8> = Vec::new();
        runner.list(&registry, &mut second).unwrap();

        assert_eq!(text(first.clone()), "Events-Constructor\nAddition\nBroken\n");
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_all_banners_and_aggregate() {
        let registry = registry(&[&ADDITION, &BROKEN, &CONSTRUCTOR]);
        let runner = TestRunner::new();
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();

        let summary = runner.run_all(&registry, &mut out, &mut err).unwrap();

        assert_eq!(
            text(out),
            "Addition: [Passed]\nBroken: [Failed]\nEvents-Constructor: [Passed]\n"
        );
        assert!(summary.any_failed());
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.failed(), 1);

        let diagnostics = text(err);
        assert_eq!(diagnostics.lines().count(), 2);
        assert!(diagnostics.contains("Failed check!(false)"));
        assert!(diagnostics.contains("Failed check_equal!(1, 2)"));
    }

    #[test]
    fn test_failure_state_does_not_leak_between_units() {
        let registry = registry(&[&BROKEN, &ADDITION]);
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();

        let summary = TestRunner::new()
            .run_all(&registry, &mut out, &mut err)
            .unwrap();

        assert_eq!(summary.runs[0].verdict, Verdict::Failed);
        assert_eq!(summary.runs[1].verdict, Verdict::Passed);
        assert!(summary.runs[1].failures.is_empty());
    }

    #[test]
    fn test_run_all_empty_registry() {
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();

        let summary = TestRunner::new()
            .run_all(&Registry::new(), &mut out, &mut err)
            .unwrap();

        assert!(!summary.any_failed());
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_one_is_silent_on_pass() {
        let registry = registry(&[&ADDITION, &CONSTRUCTOR]);
        let mut err: Vec<u8> = Vec::new();

        let run = TestRunner::new()
            .run_one(&registry, "Events-Constructor", &mut err)
            .unwrap();

        assert_eq!(run.verdict, Verdict::Passed);
        assert_eq!(run.id, "Events-Constructor");
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_one_reports_every_failure() {
        let registry = registry(&[&BROKEN]);
        let mut err: Vec<u8> = Vec::new();

        let run = TestRunner::new().run_one(&registry, "Broken", &mut err).unwrap();

        assert_eq!(run.verdict, Verdict::Failed);
        assert_eq!(run.failures.len(), 2);
        let diagnostics = text(err);
        let lines: Vec<_> = diagnostics.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.starts_with("Failed ") && l.ends_with(" [UnitTest]")));
    }

    #[test]
    fn test_run_one_matches_run_all_verdicts() {
        let registry = registry(&[&ADDITION, &BROKEN, &CONSTRUCTOR]);
        let runner = TestRunner::new();
        let mut sink: Vec<u8> = Vec::new();

        let summary = runner.run_all(&registry, &mut io::sink(), &mut sink).unwrap();
        for run in &summary.runs {
            let single = runner.run_one(&registry, &run.id, &mut sink).unwrap();
            assert_eq!(single.verdict, run.verdict, "verdict differs for {}", run.id);
        }
    }

    #[test]
    fn test_run_one_bare_name_needs_empty_suite() {
        let registry = registry(&[&CONSTRUCTOR]);
        let result = TestRunner::new().run_one(&registry, "Constructor", &mut io::sink());
        assert!(matches!(result, Err(HarnessError::UnknownTest { .. })));
    }

    #[test]
    fn test_run_one_first_registered_wins() {
        let registry = registry(&[&CONSTRUCTOR, &SHADOWED]);
        let run = TestRunner::new()
            .run_one(&registry, "Events-Constructor", &mut io::sink())
            .unwrap();
        assert_eq!(run.unit.line(), 1);
        assert_eq!(run.verdict, Verdict::Passed);
    }

    #[test]
    fn test_run_one_unknown() {
        let registry = registry(&[&ADDITION]);
        let err = TestRunner::new()
            .run_one(&registry, "Nonexistent", &mut io::sink())
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown test \"Nonexistent\"");
    }

    #[test]
    fn test_summary_serializes() {
        let registry = registry(&[&ADDITION, &BROKEN]);
        let summary = TestRunner::new()
            .run_all(&registry, &mut io::sink(), &mut io::sink())
            .unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["runs"][0]["id"], "Addition");
        assert_eq!(json["runs"][0]["verdict"], "passed");
        assert_eq!(json["runs"][1]["verdict"], "failed");
        assert_eq!(json["runs"][1]["failures"].as_array().unwrap().len(), 2);
        assert!(json["runs"][1]["failures"][0]["file"]
            .as_str()
            .unwrap()
            .ends_with("runner.rs"));
    }
}
