//! Interop Boundary - C and Rust across two memory models
//!
//! A managed (Rust) library exposed to native (C) callers through a plain C
//! ABI, plus a small native helper library that the managed side calls back
//! into. The subject is the boundary contract itself: how scalars, strings,
//! array views, by-value structs and opaque handles cross without leaks,
//! double frees or dangling pointers.
//!
//! # Ownership at a glance
//!
//! | Shape | Allocated by | Released by |
//! |---|---|---|
//! | `char*` from `return_hello_world` | managed | `free_rust_allocated_string` |
//! | `ZipCodeDatabase*` from `zip_code_database_new` | managed | `zip_code_database_free` |
//! | `const char*` arguments | caller | caller |
//! | array pointer + length | caller | caller |
//! | `Tuple` | copied | nobody |
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   Native caller     │  include/interop_boundary.h
//! └──────────┬──────────┘
//!            │ extern "C"
//!            ▼
//! ┌─────────────────────┐
//! │  boundary (Rust)    │  strings, numeric, arrays, zipcode
//! └──────────┬──────────┘
//!            │ ffi::native
//!            ▼
//! ┌─────────────────────┐
//! │  native helper (C)  │  native/c_helper.c
//! └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use interop_boundary::boundary::{increment_array, increment_array_via_c};
//!
//! let mut numbers = [0, 1, 2, 3, 4, 5, 6, 7];
//! unsafe {
//!     increment_array(numbers.len(), numbers.as_mut_ptr());
//!     increment_array_via_c(numbers.len(), numbers.as_mut_ptr());
//! }
//! assert_eq!(numbers, [2, 3, 4, 5, 6, 7, 8, 9]);
//! ```
//!
//! Every exported function is single-threaded and blocking; nothing here
//! synchronizes, and a handle must not be shared between threads.

#![warn(clippy::all)]

pub mod boundary;
pub mod config;
pub mod error;
pub mod ffi;

// Re-export commonly used types
pub use boundary::ZipCodeDatabase;
pub use config::{BoundaryConfig, ConfigError, ConfigResult};
pub use error::{BoundaryError, BoundaryResult};
pub use ffi::{ContractRegistry, FfiFunctionInfo, FfiSignature, FfiType, Ownership};

// Marshaling rules
pub use interop_abi::{IncrementReport, OwnedCString, OwnedHandle, Side, Tuple};
