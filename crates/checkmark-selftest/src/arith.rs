//! Default-suite units

use checkmark::prelude::*;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn transpose(m: [[i32; 2]; 3]) -> [[i32; 3]; 2] {
    let mut out = [[0; 3]; 2];
    for (i, row) in m.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            out[j][i] = *value;
        }
    }
    out
}

test_case! {
    fn Addition(t) {
        check_equal!(t, 2 + 2, 4);
        check_equal!(t, i32::MAX.checked_add(1), None);
    }
}

test_case! {
    fn Closeness(t) {
        check_close!(t, mean(&[1.0, 2.0, 3.0]), 2.0, 1e-12);
        check_close!(t, 1.0, 1.0999, 0.1);
        check_array_close!(t, [0.1 + 0.2, 0.3], [0.3, 0.3], 2, 1e-9);
    }
}

test_case! {
    fn Arrays(t) {
        let m = [[1, 2], [3, 4], [5, 6]];
        check_array2d_equal!(t, transpose(m), [[1, 3, 5], [2, 4, 6]], 2, 3);
        check_array2d_close!(t, [[0.5, 1.5]], vec![vec![0.5, 1.49]], 1, 2, 0.05);
        check_array_equal!(t, "abc".as_bytes(), b"abc", 3);
    }
}
