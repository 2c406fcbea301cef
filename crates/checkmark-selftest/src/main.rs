//! Self-test executable for the checkmark harness
//!
//! Declares passing units in the default suite, a named suite with a
//! fixture, a suite of deliberately failing units, and one unit registered
//! explicitly at startup. The integration tests in `tests/` drive this
//! binary through its command line.

mod arith;
mod events;
mod failing;

use anyhow::Context;
use checkmark::prelude::*;

fn explicit(t: &mut Checks<'_>) {
    check_equal!(t, events::Descriptor::any().specificity(), 0);
}

static EXPLICIT: TestUnit = TestUnit::new("Registered", "Explicit", explicit, file!(), line!());

fn setup(guard: &RegistryGuard) -> anyhow::Result<()> {
    guard
        .register(&EXPLICIT)
        .context("registering explicit units")
}

test_main!(setup);
