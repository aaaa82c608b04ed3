//! Interop ABI - Value Marshaling Rules
//!
//! This crate is the contract every boundary function obeys. It holds no
//! exported symbols of its own; it only defines how each data shape crosses
//! between the native (C) runtime and the managed (Rust) runtime.
//!
//! # Shapes
//!
//! | Shape | Type | Ownership |
//! |---|---|---|
//! | Scalar | `i32` / `u32` by value | copied |
//! | Owned string | [`OwnedCString`] | managed allocates, caller releases through the managed side |
//! | Borrowed string | [`borrow_c_str`] | caller owns, callee reads for the call only |
//! | Array view | [`ArrayView`] / [`ArrayViewMut`] | caller owns, callee never resizes or frees |
//! | Aggregate | [`Tuple`] | copied by value, `#[repr(C)]` |
//! | Opaque handle | [`OwnedHandle`] | creator side allocates, one matching destructor releases |
//!
//! # Overflow
//!
//! Arithmetic that can overflow is checked before it happens. Guarded
//! operations return a documented sentinel instead of wrapping, see
//! [`guard`].

pub mod guard;
pub mod handle;
pub mod pair;
pub mod side;
pub mod string;
pub mod view;

// Re-export commonly used items
pub use guard::*;
pub use handle::{handle_mut, handle_ref, OwnedHandle};
pub use pair::Tuple;
pub use side::Side;
pub use string::{borrow_c_str, OwnedCString};
pub use view::{ArrayView, ArrayViewMut};
