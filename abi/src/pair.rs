//! Plain aggregate passed by value
//!
//! `Tuple` is copied whole on every crossing. Its layout is fixed: two `u32`
//! fields, `x` then `y`, no padding. The C header declares the same struct.

/// A tuple of two `u32`s. To C, this is `typedef struct { uint32_t x; uint32_t y; } Tuple;`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Tuple {
    pub x: u32,
    pub y: u32,
}

const _: () = assert!(std::mem::size_of::<Tuple>() == 8);
const _: () = assert!(std::mem::align_of::<Tuple>() == 4);

impl Tuple {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Swap and perturb: `(y + 1, x - 1)`, or `None` if either field would
    /// leave the `u32` range.
    pub fn checked_flip(self) -> Option<Tuple> {
        Some(Tuple {
            x: self.y.checked_add(1)?,
            y: self.x.checked_sub(1)?,
        })
    }
}

impl From<(u32, u32)> for Tuple {
    fn from(tup: (u32, u32)) -> Tuple {
        Tuple { x: tup.0, y: tup.1 }
    }
}

impl From<Tuple> for (u32, u32) {
    fn from(tup: Tuple) -> (u32, u32) {
        (tup.x, tup.y)
    }
}
