//! Build script for the native helper library
//!
//! Compiles `native/c_helper.c` with the host C compiler into a static
//! library linked into this crate. The managed side calls into it to prove
//! that a call which entered Rust from C can re-enter C.

use std::env;
use std::path::PathBuf;

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let native_dir = manifest_dir.join("native");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=native/c_helper.c");
    println!("cargo:rerun-if-changed=native/c_helper.h");
    println!("cargo:rerun-if-changed=include/interop_boundary.h");

    let profile = env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());

    let mut build = cc::Build::new();
    build
        .file(native_dir.join("c_helper.c"))
        .include(&native_dir)
        .warnings(true)
        .extra_warnings(true)
        .flag_if_supported("-std=c11");

    // Trap on signed overflow in debug builds so a missing guard fails loudly
    if profile == "debug" {
        build.flag_if_supported("-ftrapv");
    }

    build.compile("c_helper");
}
