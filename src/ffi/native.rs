//! Native helper bindings
//!
//! Declarations for the C helper library compiled by `build.rs`, plus thin
//! safe wrappers. Calling C is always unsafe since it can do anything; the
//! wrappers uphold the array-view contract on the Rust side.

use interop_abi::IncrementReport;
use libc::size_t;

extern "C" {
    pub fn c_double_input(input: i32) -> i32;

    pub fn c_increment_int_array(length: size_t, array: *mut i32) -> size_t;
}

/// Double through the native helper. Returns 0 on overflow.
pub fn double(input: i32) -> i32 {
    // SAFETY: pure function over a scalar
    unsafe { c_double_input(input) }
}

/// Increment every element through the native helper, skipping elements at
/// `i32::MAX`.
pub fn increment(values: &mut [i32]) -> IncrementReport {
    // SAFETY: the slice is a valid, exclusive view of `values.len()` elements
    let skipped = unsafe { c_increment_int_array(values.len(), values.as_mut_ptr()) };
    IncrementReport::from_skipped(values.len(), skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_double() {
        assert_eq!(double(4), 8);
        assert_eq!(double(-4), -8);
        assert_eq!(double(i32::MAX / 2), i32::MAX - 1);
        assert_eq!(double(i32::MAX / 2 + 1), 0);
        assert_eq!(double(i32::MIN / 2 - 1), 0);
    }

    #[test]
    fn test_native_increment() {
        let mut values = [0, 1, i32::MAX, -5];
        let report = increment(&mut values);
        assert_eq!(values, [1, 2, i32::MAX, -4]);
        assert_eq!(report, IncrementReport::from_skipped(4, 1));
    }

    #[test]
    fn test_native_increment_empty() {
        let report = increment(&mut []);
        assert!(report.is_empty());
    }
}
