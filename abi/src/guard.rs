//! Overflow guards
//!
//! Signed overflow is undefined behavior on the native side, so every
//! operation that can overflow is checked before it runs. The native helper
//! library applies the same rules in C; the two must agree bit for bit.

/// Value returned by a guarded doubling whose result would not fit in `i32`.
pub const DOUBLE_OVERFLOW_SENTINEL: i32 = 0;

/// Value returned by a guarded reduction whose result would not fit in `u32`.
pub const SUM_OVERFLOW_SENTINEL: u32 = 0;

/// Double `input`, or `None` if the product does not fit in `i32`.
///
/// # Test Cases
/// - checked_double_i32(4) = Some(8)
/// - checked_double_i32(i32::MAX / 2) = Some(i32::MAX - 1)
/// - checked_double_i32(i32::MAX / 2 + 1) = None
#[inline]
pub fn checked_double_i32(input: i32) -> Option<i32> {
    input.checked_mul(2)
}

/// Double `input`, returning [`DOUBLE_OVERFLOW_SENTINEL`] on overflow.
#[inline]
pub fn guarded_double_i32(input: i32) -> i32 {
    checked_double_i32(input).unwrap_or(DOUBLE_OVERFLOW_SENTINEL)
}

/// Outcome of an in-place, per-element guarded increment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncrementReport {
    /// Elements that were incremented
    pub incremented: usize,
    /// Elements left unchanged because they were already at `i32::MAX`
    pub skipped: usize,
}

impl IncrementReport {
    /// Report for `len` elements of which `skipped` hit the guard.
    pub fn from_skipped(len: usize, skipped: usize) -> Self {
        Self {
            incremented: len.saturating_sub(skipped),
            skipped,
        }
    }

    /// True when every element was incremented.
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }

    /// Total number of elements visited.
    pub fn len(&self) -> usize {
        self.incremented + self.skipped
    }

    /// True when no element was visited.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Increment every element by one.
///
/// The policy is decided per element: an element at `i32::MAX` is skipped
/// and left as is, every other element is still incremented.
pub fn increment_each(values: &mut [i32]) -> IncrementReport {
    let mut report = IncrementReport::default();

    for value in values.iter_mut() {
        match value.checked_add(1) {
            Some(next) => {
                *value = next;
                report.incremented += 1;
            }
            None => report.skipped += 1,
        }
    }

    report
}

/// Sum the even-valued elements, or `None` if the sum does not fit in `u32`.
///
/// # Test Cases
/// - checked_sum_even([1, 2, 3, 4, 5, 6]) = Some(12)
/// - checked_sum_even([]) = Some(0)
pub fn checked_sum_even(values: &[u32]) -> Option<u32> {
    values
        .iter()
        .filter(|&&v| v % 2 == 0)
        .try_fold(0u32, |acc, &v| acc.checked_add(v))
}
