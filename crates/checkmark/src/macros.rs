//! Declaration and check macros
//!
//! Units are declared with [`test_case!`] or [`test_fixture!`] and grouped
//! with [`suite!`]. Every declaration picks up the suite name from the
//! `__UNIT_TEST_SUITE` constant in scope: the prelude supplies the empty
//! default and each `suite!` module shadows it with its own name, so
//! `use checkmark::prelude::*;` must be in scope wherever tests are declared.

/// Submit a unit for the body function `$name` to the declared-unit inventory.
#[doc(hidden)]
#[macro_export]
macro_rules! __checkmark_register {
    ($name:ident) => {
        const _: () = {
            static UNIT: $crate::TestUnit = $crate::TestUnit::new(
                __UNIT_TEST_SUITE,
                ::core::stringify!($name),
                $name,
                ::core::file!(),
                ::core::line!(),
            );
            $crate::__private::inventory::submit! {
                $crate::registry::TestRegistration(&UNIT)
            }
        };
    };
}

/// Declare a test unit in the enclosing suite.
///
/// ```ignore
/// test_case! {
///     fn Addition(t) {
///         check_equal!(t, 2 + 2, 4);
///     }
/// }
/// ```
#[macro_export]
macro_rules! test_case {
    ($(#[$meta:meta])* fn $name:ident($t:ident) $body:block) => {
        $(#[$meta])*
        #[allow(non_snake_case)]
        fn $name($t: &mut $crate::Checks<'_>) $body

        $crate::__checkmark_register!($name);
    };
}

/// Declare a test unit that runs against a fresh fixture value.
///
/// The fixture type must implement `Default`; it is constructed before the
/// body and dropped after it.
///
/// ```ignore
/// test_fixture! {
///     fn Counting(fx: Counter, t) {
///         fx.hits += 1;
///         check_equal!(t, fx.hits, 1);
///     }
/// }
/// ```
#[macro_export]
macro_rules! test_fixture {
    ($(#[$meta:meta])* fn $name:ident($fx:ident : $fixture:ty, $t:ident) $body:block) => {
        $(#[$meta])*
        #[allow(non_snake_case)]
        fn $name(checks: &mut $crate::Checks<'_>) {
            $crate::unit::with_fixture::<$fixture>(checks, |$fx, $t| $body)
        }

        $crate::__checkmark_register!($name);
    };
}

/// Group the enclosed declarations under a suite name.
///
/// Expands to a module named after the suite that sees everything its
/// parent sees. Nested suites replace the outer name rather than extend it.
#[macro_export]
macro_rules! suite {
    ($suite:ident { $($item:item)* }) => {
        #[allow(non_snake_case)]
        mod $suite {
            #[allow(unused_imports)]
            use super::*;

            #[allow(dead_code)]
            const __UNIT_TEST_SUITE: &str = ::core::stringify!($suite);

            $($item)*
        }
    };
}

/// Fail the test unless the condition holds.
#[macro_export]
macro_rules! check {
    ($t:expr, $cond:expr $(,)?) => {
        $t.check(
            $cond,
            ::core::concat!("check!(", ::core::stringify!($cond), ")"),
        )
    };
}

/// Fail the test with a custom description unless the condition holds.
#[macro_export]
macro_rules! check_with_message {
    ($t:expr, $cond:expr, $message:expr $(,)?) => {
        $t.check($cond, $message)
    };
}

/// Fail the test unless `expected == actual`.
#[macro_export]
macro_rules! check_equal {
    ($t:expr, $expected:expr, $actual:expr $(,)?) => {
        $t.check(
            ($expected) == ($actual),
            ::core::concat!(
                "check_equal!(",
                ::core::stringify!($expected),
                ", ",
                ::core::stringify!($actual),
                ")"
            ),
        )
    };
}

/// Fail the test unless `|a - b| < tolerance`.
#[macro_export]
macro_rules! check_close {
    ($t:expr, $a:expr, $b:expr, $tolerance:expr $(,)?) => {
        $t.check(
            $crate::check::close(($a) as f64, ($b) as f64, ($tolerance) as f64),
            ::core::concat!(
                "check_close!(",
                ::core::stringify!($a),
                ", ",
                ::core::stringify!($b),
                ", ",
                ::core::stringify!($tolerance),
                ")"
            ),
        )
    };
}

/// Fail the test unless the first `size` elements are equal.
#[macro_export]
macro_rules! check_array_equal {
    ($t:expr, $a:expr, $b:expr, $size:expr $(,)?) => {
        $t.check(
            $crate::check::array_equal(&($a)[..], &($b)[..], $size),
            ::core::concat!(
                "check_array_equal!(",
                ::core::stringify!($a),
                ", ",
                ::core::stringify!($b),
                ", ",
                ::core::stringify!($size),
                ")"
            ),
        )
    };
}

/// Fail the test unless a `rows` x `cols` window of two 2D arrays is equal.
#[macro_export]
macro_rules! check_array2d_equal {
    ($t:expr, $a:expr, $b:expr, $rows:expr, $cols:expr $(,)?) => {
        $t.check(
            $crate::check::array2d_equal(&($a)[..], &($b)[..], $rows, $cols),
            ::core::concat!(
                "check_array2d_equal!(",
                ::core::stringify!($a),
                ", ",
                ::core::stringify!($b),
                ", ",
                ::core::stringify!($rows),
                ", ",
                ::core::stringify!($cols),
                ")"
            ),
        )
    };
}

/// Fail the test unless the first `size` elements are pairwise close.
#[macro_export]
macro_rules! check_array_close {
    ($t:expr, $a:expr, $b:expr, $size:expr, $tolerance:expr $(,)?) => {
        $t.check(
            $crate::check::array_close(&($a)[..], &($b)[..], $size, ($tolerance) as f64),
            ::core::concat!(
                "check_array_close!(",
                ::core::stringify!($a),
                ", ",
                ::core::stringify!($b),
                ", ",
                ::core::stringify!($size),
                ", ",
                ::core::stringify!($tolerance),
                ")"
            ),
        )
    };
}

/// Fail the test unless a `rows` x `cols` window of two 2D arrays is
/// pairwise close.
#[macro_export]
macro_rules! check_array2d_close {
    ($t:expr, $a:expr, $b:expr, $rows:expr, $cols:expr, $tolerance:expr $(,)?) => {
        $t.check(
            $crate::check::array2d_close(
                &($a)[..],
                &($b)[..],
                $rows,
                $cols,
                ($tolerance) as f64,
            ),
            ::core::concat!(
                "check_array2d_close!(",
                ::core::stringify!($a),
                ", ",
                ::core::stringify!($b),
                ", ",
                ::core::stringify!($rows),
                ", ",
                ::core::stringify!($cols),
                ", ",
                ::core::stringify!($tolerance),
                ")"
            ),
        )
    };
}

/// Generate `fn main` for a test executable.
///
/// `test_main!(setup)` calls `setup(&RegistryGuard)` before dispatching so a
/// program can register units explicitly.
#[macro_export]
macro_rules! test_main {
    () => {
        fn main() -> ::std::process::ExitCode {
            $crate::cli::main()
        }
    };
    ($setup:path) => {
        fn main() -> ::std::process::ExitCode {
            $crate::cli::main_with_setup($setup)
        }
    };
}
