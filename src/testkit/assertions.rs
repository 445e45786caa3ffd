//! Assertion macros for register operations.
//!
//! - [`crate::assert_result_ok!`] - Assert Result is Ok and extract value
//! - [`crate::assert_register_err!`] - Assert a `RegisterError` variant
//! - [`crate::assert_approx_eq!`] - Compare floats with a tolerance

/// Assert that a Result is Ok and extract the value.
#[macro_export]
macro_rules! assert_result_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!(
                "Expected Ok, got Err: {:?}\n  at {}:{}:{}",
                e,
                file!(),
                line!(),
                column!()
            ),
        }
    };
}

/// Assert that a Result failed with the given `RegisterError` pattern.
///
/// ```rust,ignore
/// assert_register_err!(register.remove_modality("X"), RegisterError::NotFound { .. });
/// ```
#[macro_export]
macro_rules! assert_register_err {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err(ref e @ $pattern) => e.clone(),
            Err(e) => panic!(
                "Expected {}, got {:?}\n  at {}:{}",
                stringify!($pattern),
                e,
                file!(),
                line!()
            ),
            Ok(value) => panic!(
                "Expected {}, got Ok: {:?}\n  at {}:{}",
                stringify!($pattern),
                value,
                file!(),
                line!()
            ),
        }
    };
}

/// Assert two floats are within `1e-9` (or the given tolerance).
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-9)
    };
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() <= $tolerance,
            "{} = {} is not within {} of {}",
            stringify!($left),
            left,
            $tolerance,
            right
        );
    }};
}
