//! Array views
//!
//! The caller allocates and owns the storage and passes a pointer plus an
//! explicit element count. The callee reads or writes in place, never past
//! the count, and never resizes or frees the storage.

use std::ops::{Deref, DerefMut};
use std::slice;

/// Read-only view over caller-owned elements.
#[derive(Debug, Clone, Copy)]
pub struct ArrayView<'a, T> {
    elements: &'a [T],
}

impl<'a, T> ArrayView<'a, T> {
    /// Build a view from a raw pointer and length.
    ///
    /// A zero length yields an empty view whatever `ptr` is, null included.
    ///
    /// # Safety
    ///
    /// When `len > 0`, `ptr` must be non-null, aligned, and point to `len`
    /// initialized elements that stay valid and unmodified for `'a`.
    pub unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        let elements = if len == 0 {
            &[]
        } else {
            slice::from_raw_parts(ptr, len)
        };
        Self { elements }
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.elements
    }
}

impl<T> Deref for ArrayView<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.elements
    }
}

/// Mutable view over caller-owned elements.
#[derive(Debug)]
pub struct ArrayViewMut<'a, T> {
    elements: &'a mut [T],
}

impl<'a, T> ArrayViewMut<'a, T> {
    /// Build a mutable view from a raw pointer and length.
    ///
    /// A zero length yields an empty view whatever `ptr` is, null included.
    ///
    /// # Safety
    ///
    /// When `len > 0`, `ptr` must be non-null, aligned, point to `len`
    /// initialized elements, and not be aliased for `'a`.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        let elements = if len == 0 {
            Default::default()
        } else {
            slice::from_raw_parts_mut(ptr, len)
        };
        Self { elements }
    }

    /// Base address of the view. Never changes for the life of the view.
    pub fn as_ptr(&self) -> *const T {
        self.elements.as_ptr()
    }
}

impl<T> Deref for ArrayViewMut<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &*self.elements
    }
}

impl<T> DerefMut for ArrayViewMut<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut *self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_reads_caller_storage() {
        let storage = [1u32, 2, 3];
        let view = unsafe { ArrayView::from_raw_parts(storage.as_ptr(), storage.len()) };
        assert_eq!(view.len(), 3);
        assert_eq!(view.iter().sum::<u32>(), 6);
    }

    #[test]
    fn test_view_partial_length() {
        let storage = [1u32, 2, 3, 4];
        let view = unsafe { ArrayView::from_raw_parts(storage.as_ptr(), 2) };
        assert_eq!(view.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_empty_view_accepts_null() {
        let view = unsafe { ArrayView::<u32>::from_raw_parts(std::ptr::null(), 0) };
        assert!(view.is_empty());

        let view = unsafe { ArrayViewMut::<i32>::from_raw_parts(std::ptr::null_mut(), 0) };
        assert!(view.is_empty());
    }

    #[test]
    fn test_mut_view_writes_in_place() {
        let mut storage = [10i32, 20, 30];
        let base = storage.as_ptr();
        {
            let mut view = unsafe { ArrayViewMut::from_raw_parts(storage.as_mut_ptr(), 3) };
            assert_eq!(view.as_ptr(), base);
            view[1] = 99;
        }
        assert_eq!(storage, [10, 99, 30]);
    }
}
