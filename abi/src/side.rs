//! Allocation provenance
//!
//! Every owned value that crosses the boundary was produced by exactly one
//! side's allocator and must be released by that same side.

use std::fmt;

/// The runtime that allocated (and therefore must release) a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Manual allocation, C calling convention, no ownership tracking
    Native,
    /// Rust allocator, ownership tracked by the borrow checker
    Managed,
}

impl Side {
    /// The other runtime.
    pub fn opposite(self) -> Self {
        match self {
            Side::Native => Side::Managed,
            Side::Managed => Side::Native,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Native => write!(f, "native"),
            Side::Managed => write!(f, "managed"),
        }
    }
}
