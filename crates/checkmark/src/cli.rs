//! Entry point for test executables
//!
//! A test executable accepts exactly three invocation shapes:
//!
//! ```text
//! ./tests                       run every unit, one "id: [Passed]" line each
//! ./tests --list                print every identifier, one per line
//! ./tests Events-Constructor    run one unit; silent unless a check fails
//! ```
//!
//! Anything else is reported on stderr. The exit status is 0 on success and
//! 1 for any failure or error.

use crate::config::Config;
use crate::error::{HarnessError, HarnessResult};
use crate::logging;
use crate::registry::{Registry, RegistryGuard};
use crate::reporter::TestReporter;
use crate::runner::TestRunner;
use clap::Parser;
use std::convert::Infallible;
use std::env;
use std::fmt;
use std::io::{self, Write};
use std::process::ExitCode;

/// The only recognized option
pub const LIST_FLAG: &str = "--list";

/// Program name used when the OS does not provide one
const DEFAULT_PROGRAM: &str = "test";

/// Exit status for success
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status for any failure or error
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Print every test identifier without running anything
    #[arg(long)]
    list: bool,
    /// `suite-name` (or bare `name`) of the single test to run
    identifier: Option<String>,
}

/// What a test executable was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    RunAll,
    List,
    RunOne(String),
}

impl Invocation {
    /// Classify the arguments that follow the program name
    pub fn parse(program: &str, args: &[String]) -> HarnessResult<Self> {
        let arg = match args {
            [] => return Ok(Invocation::RunAll),
            [arg] => arg,
            _ => {
                return Err(HarnessError::TooManyArguments {
                    program: program.to_string(),
                })
            }
        };

        // `-`, `--` and `--list=...` are options too, just not ones we know.
        if arg.starts_with('-') && arg != LIST_FLAG {
            return Err(HarnessError::unrecognized_option(arg, program));
        }

        let parsed = Args::try_parse_from(args)
            .map_err(|_| HarnessError::unrecognized_option(arg, program))?;

        Ok(match (parsed.list, parsed.identifier) {
            (true, _) => Invocation::List,
            (false, Some(identifier)) => Invocation::RunOne(identifier),
            (false, None) => Invocation::RunAll,
        })
    }
}

/// Perform one invocation; `Ok(true)` means everything passed
pub fn execute(
    invocation: &Invocation,
    registry: &Registry,
    runner: &TestRunner,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> HarnessResult<bool> {
    match invocation {
        Invocation::List => {
            runner.list(registry, out)?;
            Ok(true)
        }
        Invocation::RunAll => {
            let summary = runner.run_all(registry, out, err)?;
            Ok(!summary.any_failed())
        }
        Invocation::RunOne(identifier) => {
            let run = runner.run_one(registry, identifier, err)?;
            Ok(run.verdict.is_pass())
        }
    }
}

/// Parse `args`, perform the invocation and return the exit status
pub fn run(
    program: &str,
    args: &[String],
    registry: &Registry,
    runner: &TestRunner,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> u8 {
    let result = match Invocation::parse(program, args) {
        Ok(invocation) => execute(&invocation, registry, runner, out, err),
        Err(error) => Err(error),
    };

    match result {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_FAILURE,
        Err(error) => {
            tracing::debug!(%error, "invocation failed");
            runner.reporter().error(err, &error);
            EXIT_FAILURE
        }
    }
}

/// `main` for a test executable with only declared units
pub fn main() -> ExitCode {
    main_with_setup(|_| Ok::<(), Infallible>(()))
}

/// `main` for a test executable that registers extra units in `setup`
pub fn main_with_setup<F, E>(setup: F) -> ExitCode
where
    F: FnOnce(&RegistryGuard) -> Result<(), E>,
    E: fmt::Display,
{
    let config = Config::from_env();
    logging::init(&config);

    let color = config.use_color();
    colored::control::set_override(color);
    let runner = TestRunner::new().with_reporter(TestReporter::new().with_color(color));

    let mut argv = env::args_os().map(|a| a.to_string_lossy().into_owned());
    let program = argv.next().unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
    let args: Vec<String> = argv.collect();

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let guard = RegistryGuard::acquire();
    if let Err(error) = setup(&guard) {
        runner
            .reporter()
            .error(&mut err, &format_args!("Test setup failed: {}", error));
        return ExitCode::from(EXIT_FAILURE);
    }
    let registry = guard.snapshot();

    ExitCode::from(run(&program, &args, &registry, &runner, &mut out, &mut err))
}
