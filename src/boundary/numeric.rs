//! Scalar, array-reduction and by-value aggregate functions
//!
//! Nothing here owns anything: scalars and `Tuple` are copied, the array
//! view is borrowed read-only for the call.

use interop_abi::{
    checked_double_i32, checked_sum_even, ArrayView, Tuple, DOUBLE_OVERFLOW_SENTINEL,
    SUM_OVERFLOW_SENTINEL,
};
use libc::size_t;

use crate::error::{BoundaryError, BoundaryResult};
use crate::ffi::native;

/// Sum of the even elements, or an overflow error if it exceeds `u32`.
pub fn sum_even(values: &[u32]) -> BoundaryResult<u32> {
    checked_sum_even(values).ok_or(BoundaryError::ArithmeticOverflow { op: "sum_of_even" })
}

/// `(y + 1, x - 1)`, or an overflow error if either field leaves `u32`.
pub fn flip(tup: Tuple) -> BoundaryResult<Tuple> {
    tup.checked_flip().ok_or(BoundaryError::ArithmeticOverflow {
        op: "flip_things_around",
    })
}

#[no_mangle]
/// Double the value of an `int32_t`. Returns 0 if the result would overflow.
pub extern "C" fn double_input(input: i32) -> i32 {
    checked_double_i32(input).unwrap_or_else(|| {
        log::warn!("double_input: doubling {} overflows int32_t", input);
        DOUBLE_OVERFLOW_SENTINEL
    })
}

#[no_mangle]
/// Double the value of an `int32_t` by calling back into the native helper.
pub extern "C" fn double_input_via_c(input: i32) -> i32 {
    let doubled = native::double(input);
    if doubled == DOUBLE_OVERFLOW_SENTINEL && input != 0 {
        log::warn!("double_input_via_c: doubling {} overflows int32_t", input);
    }
    doubled
}

#[no_mangle]
/// Add all the even numbers in an input array from C. Returns 0 if the sum
/// does not fit in a `uint32_t`.
///
/// # Safety
///
/// When `len > 0`, `n` must point to `len` readable `uint32_t`s, live for
/// the call.
pub unsafe extern "C" fn sum_of_even(n: *const u32, len: size_t) -> u32 {
    debug_assert!(len == 0 || !n.is_null());
    let numbers = ArrayView::from_raw_parts(n, len);
    sum_even(&numbers).unwrap_or_else(|err| {
        log::warn!("{}", err);
        SUM_OVERFLOW_SENTINEL
    })
}

#[no_mangle]
/// Swap and perturb a tuple passed by value. Returns `{0, 0}` when `tup.x`
/// is 0 or `tup.y` is `UINT32_MAX`.
pub extern "C" fn flip_things_around(tup: Tuple) -> Tuple {
    flip(tup).unwrap_or_else(|err| {
        log::warn!("{}", err);
        Tuple::default()
    })
}
