//! Zip code database behind an opaque handle
//!
//! C sees `ZipCodeDatabase*` and never looks inside. The handle is created
//! by [`zip_code_database_new`], mutated and queried by the methods that
//! take it as their first argument, and released by exactly one call to
//! [`zip_code_database_free`]. Using it afterwards is undefined behavior.
//!
//! Handles are single-owner and single-thread.

use std::collections::HashMap;
use std::ffi::c_char;

use interop_abi::{borrow_c_str, handle_mut, handle_ref, OwnedHandle};
use libc::size_t;

/// Population returned for a zip code that is not in the database.
pub const MISSING_POPULATION: u32 = 0;

/// Number of zip codes in the default dataset, `00000` through `99999`.
pub const DATASET_SIZE: u32 = 100_000;

/// Zip code to population map
#[derive(Debug, Default)]
pub struct ZipCodeDatabase {
    population: HashMap<String, u32>,
}

impl ZipCodeDatabase {
    pub fn new() -> ZipCodeDatabase {
        ZipCodeDatabase {
            population: HashMap::new(),
        }
    }

    /// Fill with the default dataset: every five-digit zip code maps to its
    /// own numeric value.
    pub fn populate(&mut self) {
        self.population.reserve(DATASET_SIZE as usize);
        for i in 0..DATASET_SIZE {
            let zip = format!("{:05}", i);
            self.population.insert(zip, i);
        }
    }

    pub fn lookup(&self, zip: &str) -> Option<u32> {
        self.population.get(zip).copied()
    }

    /// Population of `zip`, or [`MISSING_POPULATION`] when absent.
    pub fn population_of(&self, zip: &str) -> u32 {
        self.lookup(zip).unwrap_or(MISSING_POPULATION)
    }

    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }
}

#[no_mangle]
/// Create a new, empty ZipCodeDatabase. Release with
/// [`zip_code_database_free`].
pub extern "C" fn zip_code_database_new() -> *mut ZipCodeDatabase {
    let ptr = OwnedHandle::new(ZipCodeDatabase::new()).into_raw();
    log::debug!("created zip code database {:p}", ptr);
    ptr
}

#[no_mangle]
/// Free an existing ZipCodeDatabase. Null is ignored.
///
/// # Safety
///
/// `ptr` must be null or a handle from [`zip_code_database_new`] that has
/// not been freed yet.
pub unsafe extern "C" fn zip_code_database_free(ptr: *mut ZipCodeDatabase) {
    if let Some(database) = OwnedHandle::from_raw(ptr) {
        log::debug!(
            "releasing zip code database {:p} ({} entries)",
            ptr,
            database.len()
        );
        drop(database);
    }
}

#[no_mangle]
/// Populate a ZipCodeDatabase with the default dataset.
///
/// # Safety
///
/// `ptr` must be a live handle from [`zip_code_database_new`], not in use
/// by any other call.
pub unsafe extern "C" fn zip_code_database_populate(ptr: *mut ZipCodeDatabase) {
    debug_assert!(!ptr.is_null());
    let database = handle_mut(ptr);
    database.populate();
    log::debug!("populated zip code database {:p}", ptr);
}

#[no_mangle]
/// Get the population of a zip code, or 0 if the zip code is unknown.
///
/// A stored population of 0 looks the same as a missing key; use
/// [`zip_code_database_lookup`] to tell them apart.
///
/// # Safety
///
/// `ptr` must be a live handle and `zip` a valid NUL-terminated string,
/// both live for the call.
pub unsafe extern "C" fn zip_code_database_population_of(
    ptr: *const ZipCodeDatabase,
    zip: *const c_char,
) -> u32 {
    debug_assert!(!ptr.is_null());
    debug_assert!(!zip.is_null());
    let database = handle_ref(ptr);
    match borrow_c_str(zip).to_str() {
        Ok(zip) => database.population_of(zip),
        Err(err) => {
            log::warn!("zip_code_database_population_of: {}", err);
            MISSING_POPULATION
        }
    }
}

#[no_mangle]
/// Look up a zip code. On a hit, writes the population to `*population`
/// and returns true; on a miss, leaves `*population` untouched and returns
/// false.
///
/// # Safety
///
/// `ptr` must be a live handle, `zip` a valid NUL-terminated string and
/// `population` a writable `uint32_t`, all live for the call.
pub unsafe extern "C" fn zip_code_database_lookup(
    ptr: *const ZipCodeDatabase,
    zip: *const c_char,
    population: *mut u32,
) -> bool {
    debug_assert!(!ptr.is_null());
    debug_assert!(!zip.is_null());
    debug_assert!(!population.is_null());
    let database = handle_ref(ptr);
    let found = borrow_c_str(zip)
        .to_str()
        .ok()
        .and_then(|zip| database.lookup(zip));
    match found {
        Some(value) => {
            *population = value;
            true
        }
        None => false,
    }
}

#[no_mangle]
/// Number of zip codes stored.
///
/// # Safety
///
/// `ptr` must be a live handle.
pub unsafe extern "C" fn zip_code_database_len(ptr: *const ZipCodeDatabase) -> size_t {
    debug_assert!(!ptr.is_null());
    handle_ref(ptr).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_before_and_after_populate() {
        let mut database = ZipCodeDatabase::new();
        assert!(database.is_empty());
        assert_eq!(database.population_of("90210"), MISSING_POPULATION);

        database.populate();
        assert_eq!(database.len(), DATASET_SIZE as usize);
        assert_eq!(database.population_of("90210"), 90210);
        assert_eq!(database.population_of("20500"), 20500);
        assert_eq!(database.population_of("00000"), 0);
        assert_eq!(database.lookup("00000"), Some(0));
        assert_eq!(database.lookup("100000"), None);
        assert_eq!(database.lookup("9021"), None);
    }

    #[test]
    fn test_handle_lifecycle() {
        let handle = zip_code_database_new();
        assert!(!handle.is_null());

        unsafe {
            assert_eq!(zip_code_database_len(handle), 0);
            assert_eq!(zip_code_database_population_of(handle, c"90210".as_ptr()), 0);

            zip_code_database_populate(handle);
            assert_eq!(zip_code_database_len(handle), DATASET_SIZE as usize);

            let pop1 = zip_code_database_population_of(handle, c"90210".as_ptr());
            let pop2 = zip_code_database_population_of(handle, c"20500".as_ptr());
            assert_eq!(pop1 as i32 - pop2 as i32, 69710);

            zip_code_database_free(handle);
        }
    }

    #[test]
    fn test_lookup_distinguishes_zero_from_missing() {
        let handle = zip_code_database_new();
        unsafe {
            zip_code_database_populate(handle);

            let mut population = u32::MAX;
            assert!(zip_code_database_lookup(handle, c"00000".as_ptr(), &mut population));
            assert_eq!(population, 0);

            let mut population = 7;
            assert!(!zip_code_database_lookup(handle, c"abcde".as_ptr(), &mut population));
            assert_eq!(population, 7);

            zip_code_database_free(handle);
        }
    }

    #[test]
    fn test_free_null_is_noop() {
        unsafe { zip_code_database_free(std::ptr::null_mut()) };
    }
}
