//! In-place array mutation
//!
//! Both entry points write through the caller's pointer+length view and
//! apply the same per-element policy: an element at `INT32_MAX` is left
//! unchanged, the rest are incremented. The `_via_c` variant does the work
//! in the native helper, so a call that entered Rust from C re-enters C and
//! mutates the very same storage.

use interop_abi::{increment_each, ArrayViewMut, IncrementReport};
use libc::size_t;

use crate::ffi::native;

/// Increment in Rust.
pub fn increment(values: &mut [i32]) -> IncrementReport {
    increment_each(values)
}

/// Increment by delegating to the native helper.
pub fn increment_via_native(values: &mut [i32]) -> IncrementReport {
    native::increment(values)
}

fn log_report(entry: &str, report: IncrementReport) {
    log::trace!(
        "{}: {} incremented, {} skipped",
        entry,
        report.incremented,
        report.skipped
    );
    if !report.is_complete() {
        log::warn!(
            "{}: {} element(s) already at i32::MAX were left unchanged",
            entry,
            report.skipped
        );
    }
}

#[no_mangle]
/// Increment every element of a C array in place.
///
/// # Safety
///
/// When `length > 0`, `array` must point to `length` writable `int32_t`s not
/// accessed by anyone else for the duration of the call.
pub unsafe extern "C" fn increment_array(length: size_t, array: *mut i32) {
    debug_assert!(length == 0 || !array.is_null());
    let mut numbers = ArrayViewMut::from_raw_parts(array, length);
    log_report("increment_array", increment(&mut numbers));
}

#[no_mangle]
/// Increment every element of a C array in place, by calling the native
/// helper from Rust.
///
/// # Safety
///
/// Same contract as [`increment_array`].
pub unsafe extern "C" fn increment_array_via_c(length: size_t, array: *mut i32) {
    debug_assert!(length == 0 || !array.is_null());
    let mut numbers = ArrayViewMut::from_raw_parts(array, length);
    log_report("increment_array_via_c", increment_via_native(&mut numbers));
}
