//! Boundary error type
//!
//! Safe cores return these. The `extern "C"` surface never lets one cross:
//! each export maps an error onto its documented sentinel.

use std::ffi::NulError;
use std::str::Utf8Error;

use thiserror::Error;

/// Errors raised on the managed side of the boundary.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    #[error("string contains an interior NUL byte: {0}")]
    InteriorNul(#[from] NulError),

    #[error("length {len} does not fit in a u32")]
    LengthOverflow { len: usize },

    #[error("arithmetic overflow in {op}")]
    ArithmeticOverflow { op: &'static str },

    #[error("contract violation: {0}")]
    Contract(String),

    #[error("header parse error at line {line}: {msg}")]
    HeaderParse { line: usize, msg: String },
}

/// Result type for boundary operations.
pub type BoundaryResult<T> = Result<T, BoundaryError>;
