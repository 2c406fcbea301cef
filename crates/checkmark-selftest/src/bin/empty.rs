//! A test executable with no units at all

checkmark::test_main!();
