//! String transfer
//!
//! Strings produced by the managed side are allocated by the Rust allocator
//! and handed to the caller as a bare `char*`. The caller must give the
//! pointer back to the managed release function exactly once; freeing it
//! with the C allocator is undefined behavior.
//!
//! Strings that are only inspected are borrowed: the callee reads them for
//! the duration of the call and never keeps the pointer.

use std::ffi::{c_char, CStr, CString, NulError};

use crate::side::Side;

/// A NUL-terminated string owned by the managed allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedCString {
    inner: CString,
}

impl OwnedCString {
    /// The allocator that produced every `OwnedCString`.
    pub const ALLOCATOR: Side = Side::Managed;

    /// Allocate a new string. Fails if `bytes` contains an interior NUL.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, NulError> {
        Ok(Self {
            inner: CString::new(bytes)?,
        })
    }

    /// Hand ownership to the caller. The pointer must come back through
    /// [`OwnedCString::from_raw`] exactly once.
    pub fn into_raw(self) -> *mut c_char {
        self.inner.into_raw()
    }

    /// Reclaim a pointer previously produced by [`OwnedCString::into_raw`].
    ///
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or come from `into_raw`, and must not have been
    /// reclaimed before. Passing a pointer allocated by the native side is
    /// an allocator mismatch.
    pub unsafe fn from_raw(ptr: *mut c_char) -> Option<Self> {
        if ptr.is_null() {
            return None;
        }
        Some(Self {
            inner: CString::from_raw(ptr),
        })
    }

    pub fn as_c_str(&self) -> &CStr {
        self.inner.as_c_str()
    }

    /// Length in bytes, without the terminator.
    pub fn len(&self) -> usize {
        self.inner.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.as_bytes().is_empty()
    }
}

/// Borrow a caller-owned NUL-terminated string.
///
/// # Safety
///
/// `ptr` must be non-null, point to a NUL-terminated byte sequence, and stay
/// valid and unmodified for `'a`. The callee must not keep the reference
/// past the call.
pub unsafe fn borrow_c_str<'a>(ptr: *const c_char) -> &'a CStr {
    CStr::from_ptr(ptr)
}
