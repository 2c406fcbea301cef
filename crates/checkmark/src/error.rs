//! Harness error types

use thiserror::Error;

pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that end a harness invocation with a failing exit status.
///
/// Check failures are not errors: they are recorded in
/// [`Checks`](crate::check::Checks) and only change the verdict.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Unknown test \"{identifier}\"")]
    UnknownTest { identifier: String },

    #[error("Unrecognized option \"{option}\" for test program {program}")]
    UnrecognizedOption { option: String, program: String },

    #[error("Too many arguments to test program {program}")]
    TooManyArguments { program: String },

    #[error("Registration failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Create an unknown test error
    pub fn unknown_test(identifier: impl Into<String>) -> Self {
        Self::UnknownTest {
            identifier: identifier.into(),
        }
    }

    /// Create an unrecognized option error
    pub fn unrecognized_option(option: impl Into<String>, program: impl Into<String>) -> Self {
        Self::UnrecognizedOption {
            option: option.into(),
            program: program.into(),
        }
    }
}

/// Errors raised when a unit is added to a [`Registry`](crate::registry::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("suite name '{suite}' contains the '-' separator (test '{name}')")]
    SeparatorInSuite { suite: String, name: String },

    #[error("test in suite '{suite}' has an empty name")]
    EmptyName { suite: String },
}
