//! Units that fail on purpose

use checkmark::prelude::*;

suite! {
    Failing {
        test_case! {
            fn TwoChecks(t) {
                check_equal!(t, 1, 2);
                check!(t, "ab".len() == 3);
            }
        }

        test_case! {
            fn Boundary(t) {
                check_close!(t, 1.0, 1.1, 0.1);
            }
        }
    }
}
