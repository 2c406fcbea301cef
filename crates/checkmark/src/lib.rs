//! Checkmark: a small self-registering unit test harness
//!
//! Test units declare themselves with macros, are collected into an ordered
//! [`Registry`] at startup, and are addressed as `name` or `suite-name`.
//! A test executable built with [`test_main!`] can list its units, run all
//! of them, or run one by identifier.
//!
//! Checks inside a test body never abort it: a failing check writes a
//! diagnostic line and marks the invocation failed, and the body carries on.
//!
//! # Example
//!
//! ```ignore
//! use checkmark::prelude::*;
//!
//! test_case! {
//!     fn Addition(t) {
//!         check_equal!(t, 2 + 2, 4);
//!     }
//! }
//!
//! suite! {
//!     Events {
//!         test_case! {
//!             fn Constructor(t) {
//!                 check!(t, Event::new().is_pending());
//!             }
//!         }
//!     }
//! }
//!
//! test_main!();
//! ```
//!
//! ```text
//! $ ./tests
//! Addition: [Passed]
//! Events-Constructor: [Passed]
//! $ ./tests --list
//! Addition
//! Events-Constructor
//! $ ./tests Events-Constructor
//! ```

pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
mod macros;
pub mod registry;
pub mod reporter;
pub mod runner;
pub mod unit;

pub use check::{Checks, Failure};
pub use error::{HarnessError, HarnessResult, RegistryError};
pub use registry::{Registry, RegistryGuard};
pub use reporter::TestReporter;
pub use runner::{RunSummary, TestRun, TestRunner, Verdict};
pub use unit::{TestFn, TestId, TestUnit};

/// Everything a file declaring tests needs.
///
/// Glob-import it (`use checkmark::prelude::*;`) in every module that
/// declares units; it also provides the default (empty) suite name.
pub mod prelude {
    pub use crate::check::Checks;
    pub use crate::registry::RegistryGuard;
    pub use crate::unit::TestUnit;
    pub use crate::{
        check, check_array2d_close, check_array2d_equal, check_array_close, check_array_equal,
        check_close, check_equal, check_with_message, suite, test_case, test_fixture, test_main,
    };

    #[doc(hidden)]
    pub const __UNIT_TEST_SUITE: &str = "";
}

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
