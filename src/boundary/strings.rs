//! String boundary functions
//!
//! Producers allocate with the Rust allocator and hand ownership to the
//! caller, who must give it back to [`free_rust_allocated_string`].
//! Queries borrow the caller's string and never allocate.

use std::ffi::{c_char, CStr};

use interop_abi::{borrow_c_str, OwnedCString};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{BoundaryError, BoundaryResult};

/// Line printed by [`println_hello_world`].
pub const PRINTED_GREETING: &str = "Hello, World from Rust!";

/// String produced by [`return_hello_world`].
pub const PRODUCED_GREETING: &str = "Hello, World from a Rust string!";

/// Substring looked for by [`contains_hotdog`].
pub const FORBIDDEN_FOOD: &str = "hotdog";

/// Allocate the greeting on the managed side.
pub fn greeting() -> BoundaryResult<OwnedCString> {
    Ok(OwnedCString::new(PRODUCED_GREETING)?)
}

/// Whether the forbidden food appears anywhere in `s`. Works on raw bytes,
/// so any byte string is accepted.
pub fn mentions_forbidden_food(s: &CStr) -> bool {
    let needle = FORBIDDEN_FOOD.as_bytes();
    s.to_bytes().windows(needle.len()).any(|window| window == needle)
}

/// Number of user-perceived characters (extended grapheme clusters).
pub fn grapheme_count(s: &CStr) -> BoundaryResult<u32> {
    let text = s.to_str()?;
    let count = text.graphemes(true).count();
    u32::try_from(count).map_err(|_| BoundaryError::LengthOverflow { len: count })
}

/// Number of storage bytes, excluding the terminator. Matches C `strlen`.
pub fn byte_count(s: &CStr) -> BoundaryResult<u32> {
    let len = s.to_bytes().len();
    u32::try_from(len).map_err(|_| BoundaryError::LengthOverflow { len })
}

#[no_mangle]
/// Print a line to stdout. Newline is included.
pub extern "C" fn println_hello_world() {
    println!("{}", PRINTED_GREETING);
}

#[no_mangle]
/// Return a string to C. The string is owned by Rust, and must be freed by
/// Rust through [`free_rust_allocated_string`]. Returns null if the string
/// could not be built.
pub extern "C" fn return_hello_world() -> *mut c_char {
    match greeting() {
        Ok(owned) => {
            let ptr = owned.into_raw();
            log::debug!("handing owned string {:p} to the caller", ptr);
            ptr
        }
        Err(err) => {
            log::warn!("return_hello_world: {}", err);
            std::ptr::null_mut()
        }
    }
}

#[no_mangle]
/// Free a string owned by Rust. Null is ignored.
///
/// # Safety
///
/// `s` must be null or a pointer returned by [`return_hello_world`] that has
/// not been freed yet. Freeing twice, or freeing a string allocated by C,
/// is undefined behavior.
pub unsafe extern "C" fn free_rust_allocated_string(s: *mut c_char) {
    if let Some(owned) = OwnedCString::from_raw(s) {
        log::debug!("releasing owned string {:p} ({} bytes)", s, owned.len());
        drop(owned);
    }
}

#[no_mangle]
/// Report whether the string mentions "hotdog".
///
/// # Safety
///
/// `s` must be a valid NUL-terminated string, live for the call.
pub unsafe extern "C" fn contains_hotdog(s: *const c_char) -> bool {
    debug_assert!(!s.is_null());
    mentions_forbidden_food(borrow_c_str(s))
}

#[no_mangle]
/// Count how many Unicode extended grapheme clusters are in a string.
/// Returns 0 if the string is not valid UTF-8.
///
/// Never more than [`how_many_bytes`], and strictly fewer whenever the
/// string has a non-ASCII character. Pure ASCII counts one per byte except
/// that each CR LF pair is a single cluster: `"a\r\nb"` has 3 characters
/// and 4 bytes.
///
/// # Safety
///
/// `s` must be a valid NUL-terminated string, live for the call.
pub unsafe extern "C" fn how_many_characters(s: *const c_char) -> u32 {
    debug_assert!(!s.is_null());
    grapheme_count(borrow_c_str(s)).unwrap_or_else(|err| {
        log::warn!("how_many_characters: {}", err);
        0
    })
}

#[no_mangle]
/// Count how many bytes are in a string.
///
/// # Safety
///
/// `s` must be a valid NUL-terminated string, live for the call.
pub unsafe extern "C" fn how_many_bytes(s: *const c_char) -> u32 {
    debug_assert!(!s.is_null());
    byte_count(borrow_c_str(s)).unwrap_or_else(|err| {
        log::warn!("how_many_bytes: {}", err);
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_forbidden_food() {
        let with = CString::new("This string has \"hotdog\" in it").unwrap();
        let without = CString::new("This string doesn't have the forbidden food").unwrap();
        assert!(mentions_forbidden_food(&with));
        assert!(!mentions_forbidden_food(&without));
        assert!(!mentions_forbidden_food(c""));
        assert!(mentions_forbidden_food(c"hotdog"));
        assert!(!mentions_forbidden_food(c"hotdo"));
    }

    #[test]
    fn test_forbidden_food_in_invalid_utf8() {
        let bytes = CString::new(vec![0xff, b'h', b'o', b't', b'd', b'o', b'g']).unwrap();
        assert!(mentions_forbidden_food(&bytes));
    }

    #[test]
    fn test_counts() {
        let s = CString::new("göes to élevên").unwrap();
        assert_eq!(grapheme_count(&s).unwrap(), 14);
        assert_eq!(byte_count(&s).unwrap(), 17);
    }

    #[test]
    fn test_grapheme_clusters_not_code_points() {
        // "e" + combining acute accent is one user-perceived character
        let s = CString::new("e\u{301}").unwrap();
        assert_eq!(grapheme_count(&s).unwrap(), 1);
        assert_eq!(byte_count(&s).unwrap(), 3);

        // Family emoji joined by zero-width joiners
        let s = CString::new("👨\u{200d}👩\u{200d}👧").unwrap();
        assert_eq!(grapheme_count(&s).unwrap(), 1);
    }

    #[test]
    fn test_crlf_is_one_cluster() {
        let s = CString::new("a\r\nb").unwrap();
        assert!(s.to_str().unwrap().is_ascii());
        assert_eq!(unsafe { how_many_characters(s.as_ptr()) }, 3);
        assert_eq!(unsafe { how_many_bytes(s.as_ptr()) }, 4);

        // Lone CR and LF are clusters of their own
        let s = CString::new("a\n\rb").unwrap();
        assert_eq!(grapheme_count(&s).unwrap(), 4);
    }

    #[test]
    fn test_grapheme_count_invalid_utf8() {
        let s = CString::new(vec![0xc3, 0x28]).unwrap();
        assert!(matches!(grapheme_count(&s), Err(BoundaryError::InvalidUtf8(_))));
        assert_eq!(byte_count(&s).unwrap(), 2);
        assert_eq!(unsafe { how_many_characters(s.as_ptr()) }, 0);
    }

    #[test]
    fn test_greeting_round_trip() {
        let ptr = return_hello_world();
        assert!(!ptr.is_null());
        let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        unsafe { free_rust_allocated_string(ptr) };
        assert_eq!(text, PRODUCED_GREETING);
    }

    #[test]
    fn test_free_null_is_noop() {
        unsafe { free_rust_allocated_string(std::ptr::null_mut()) };
    }
}
