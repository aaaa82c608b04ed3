//! Opaque handles
//!
//! A stateful object created on the managed side is handed to native code as
//! a pointer the caller never dereferences. Inside Rust the object lives in
//! an [`OwnedHandle`], a scoped guard that releases the state on every exit
//! path. `into_raw` / `from_raw` are the export/import pair for the bare
//! pointer the native side holds between calls.
//!
//! Handles are single-owner and single-thread. Nothing here synchronizes.

use std::ops::{Deref, DerefMut};

use crate::side::Side;

/// Scoped owner of a heap-allocated boundary object.
#[derive(Debug)]
pub struct OwnedHandle<T> {
    inner: Box<T>,
}

impl<T> OwnedHandle<T> {
    /// The allocator that produced every `OwnedHandle`.
    pub const ALLOCATOR: Side = Side::Managed;

    pub fn new(value: T) -> Self {
        Self {
            inner: Box::new(value),
        }
    }

    /// Export the handle. The caller now owns it and must hand it back to
    /// the matching destructor exactly once.
    pub fn into_raw(self) -> *mut T {
        Box::into_raw(self.inner)
    }

    /// Import a handle previously exported with [`OwnedHandle::into_raw`].
    ///
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or come from `into_raw` for the same `T`, and must
    /// not have been imported before.
    pub unsafe fn from_raw(ptr: *mut T) -> Option<Self> {
        if ptr.is_null() {
            return None;
        }
        Some(Self {
            inner: Box::from_raw(ptr),
        })
    }

    /// Consume the guard and return the state.
    pub fn into_inner(self) -> T {
        *self.inner
    }
}

impl<T> Deref for OwnedHandle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for OwnedHandle<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

/// Borrow the state behind a raw handle for the duration of a call.
///
/// # Safety
///
/// `ptr` must be a live handle from [`OwnedHandle::into_raw`] with no
/// outstanding mutable borrow.
pub unsafe fn handle_ref<'a, T>(ptr: *const T) -> &'a T {
    &*ptr
}

/// Mutably borrow the state behind a raw handle for the duration of a call.
///
/// # Safety
///
/// `ptr` must be a live handle from [`OwnedHandle::into_raw`] with no other
/// outstanding borrow.
pub unsafe fn handle_mut<'a, T>(ptr: *mut T) -> &'a mut T {
    &mut *ptr
}
