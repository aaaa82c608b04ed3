//! FFI Module
//!
//! Everything the boundary knows about itself: bindings to the native helper
//! library, the type system used to describe prototypes, and the registry
//! that records who allocates and who releases.
//!
//! # Architecture
//!
//! ```text
//! Native caller (C)
//!       │  include/interop_boundary.h
//!       ▼
//! Managed exports (crate::boundary, #[no_mangle] extern "C")
//!       │  ffi::native
//!       ▼
//! Native helper (native/c_helper.c)
//! ```
//!
//! # Example
//!
//! ```
//! use interop_boundary::ffi::ContractRegistry;
//!
//! let registry = ContractRegistry::builtin();
//! registry.validate().unwrap();
//!
//! let releaser = registry.releaser_for("return_hello_world").unwrap();
//! assert_eq!(releaser.name(), "free_rust_allocated_string");
//! ```

pub mod header;
pub mod native;
mod registry;
mod types;

pub use header::parse_header;
pub use registry::{ContractRegistry, FfiFunctionInfo, Role, SignatureMismatch};
pub use types::{FfiSignature, FfiType, Ownership};

#[cfg(test)]
mod tests;
