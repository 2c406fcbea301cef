//! Test units and their `suite-name` identity

use crate::check::Checks;
use std::fmt;

/// Separator between suite and test name in a rendered identifier
pub const SEPARATOR: char = '-';

/// Signature of a test body
pub type TestFn = fn(&mut Checks<'_>);

/// One independently invocable unit of test behavior.
///
/// Units are built in `const` context and live in `static`s; the registry
/// only ever holds `&'static` handles to them.
#[derive(Clone, Copy)]
pub struct TestUnit {
    suite: &'static str,
    name: &'static str,
    body: TestFn,
    file: &'static str,
    line: u32,
}

impl TestUnit {
    /// Create a unit. `suite` is empty for the default suite.
    pub const fn new(
        suite: &'static str,
        name: &'static str,
        body: TestFn,
        file: &'static str,
        line: u32,
    ) -> Self {
        Self {
            suite,
            name,
            body,
            file,
            line,
        }
    }

    pub fn suite(&self) -> &'static str {
        self.suite
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Source file the unit was declared in
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Line the unit was declared on
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The `(suite, name)` identity of this unit
    pub fn id(&self) -> TestId<'static> {
        TestId::new(self.suite, self.name)
    }

    /// Invoke the body against the given failure state
    pub fn run(&self, checks: &mut Checks<'_>) {
        (self.body)(checks)
    }
}

impl fmt::Debug for TestUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestUnit")
            .field("suite", &self.suite)
            .field("name", &self.name)
            .field("file", &self.file)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}

/// A `(suite, name)` pair, rendered as `name` or `suite-name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestId<'a> {
    pub suite: &'a str,
    pub name: &'a str,
}

impl<'a> TestId<'a> {
    pub fn new(suite: &'a str, name: &'a str) -> Self {
        Self { suite, name }
    }

    /// Parse an identifier given on the command line.
    ///
    /// Splits at the first `-`: the prefix is the suite and the remainder
    /// (which may contain further hyphens) is the name. Without a hyphen, or
    /// with a leading one, the whole identifier is the name in the default
    /// suite.
    pub fn parse(identifier: &'a str) -> Self {
        match identifier.split_once(SEPARATOR) {
            Some((suite, name)) if !suite.is_empty() => Self { suite, name },
            _ => Self {
                suite: "",
                name: identifier,
            },
        }
    }

    /// Whether this id belongs to `unit`. The empty suite only matches
    /// the empty suite.
    pub fn matches(&self, unit: &TestUnit) -> bool {
        unit.suite == self.suite && unit.name == self.name
    }

    /// Whether the rendered form of this id parses back to the same pair.
    ///
    /// A default-suite name containing `-` renders like a suite-qualified
    /// id and can never be selected by name.
    pub fn is_addressable(&self) -> bool {
        let rendered = self.to_string();
        TestId::parse(&rendered) == *self
    }
}

impl fmt::Display for TestId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.suite.is_empty() {
            f.write_str(self.name)
        } else {
            write!(f, "{}{}{}", self.suite, SEPARATOR, self.name)
        }
    }
}

/// Run `body` against a freshly constructed fixture.
///
/// The fixture is built right before the body and dropped right after it,
/// so its `Default` impl is the setup and its `Drop` impl the teardown.
pub fn with_fixture<F: Default>(checks: &mut Checks<'_>, body: impl FnOnce(&mut F, &mut Checks<'_>)) {
    let mut fixture = F::default();
    body(&mut fixture, checks);
}
