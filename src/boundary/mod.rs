//! Managed Boundary Library
//!
//! Every `#[no_mangle] extern "C"` function native code can call. Each one
//! is a thin shell over a safe Rust core in the same file: the shell turns
//! raw pointers into [`interop_abi`] views, runs the core, and maps any
//! error onto the function's documented sentinel. No panic or error ever
//! unwinds across the boundary.
//!
//! | File | Shapes |
//! |---|---|
//! | `strings` | owned string producer + releaser, borrowed string queries |
//! | `numeric` | scalars, read-only array view, by-value `Tuple` |
//! | `arrays` | mutable array view, direct and native-delegated |
//! | `zipcode` | opaque handle lifecycle |

pub mod arrays;
pub mod numeric;
pub mod strings;
pub mod zipcode;

pub use arrays::{increment_array, increment_array_via_c};
pub use numeric::{double_input, double_input_via_c, flip_things_around, sum_of_even};
pub use strings::{
    contains_hotdog, free_rust_allocated_string, how_many_bytes, how_many_characters,
    println_hello_world, return_hello_world,
};
pub use zipcode::{
    zip_code_database_free, zip_code_database_len, zip_code_database_lookup,
    zip_code_database_new, zip_code_database_populate, zip_code_database_population_of,
    ZipCodeDatabase,
};
