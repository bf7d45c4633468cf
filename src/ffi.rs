//! FFI bindings for Workout Flux
//!
//! This module provides C-compatible functions for calling Flux from other languages.
//! All functions use C strings (null-terminated) and return allocated memory that
//! must be freed by the caller using `workout_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::WorkoutError;
use crate::pipeline::{compute_metrics, package_to_summary, packages_to_summaries};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Read the tag and the JSON-encoded value array shared by the single-package calls
unsafe fn read_package_args(
    workout_type: *const c_char,
    data_json: *const c_char,
) -> Result<(String, Vec<f64>), String> {
    let tag = cstr_to_string(workout_type).ok_or("Invalid workout type string pointer")?;
    let json = cstr_to_string(data_json).ok_or("Invalid data string pointer")?;
    let data: Vec<f64> = serde_json::from_str(&json).map_err(|e| {
        WorkoutError::InvalidInput(format!("Failed to parse package data: {e}")).to_string()
    })?;
    Ok((tag, data))
}

/// Compute one package and return its English summary line.
///
/// # Safety
/// - `workout_type` (`SWM`, `RUN`, `WLK`) and `data_json` (a JSON array of
///   numbers) must be valid null-terminated C strings.
/// - Returns a newly allocated string that must be freed with `workout_free_string`.
/// - Returns NULL on error; call `workout_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn workout_summary(
    workout_type: *const c_char,
    data_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let (tag, data) = match read_package_args(workout_type, data_json) {
        Ok(args) => args,
        Err(msg) => {
            set_last_error(&msg);
            return ptr::null_mut();
        }
    };

    match package_to_summary(&tag, &data) {
        Ok(line) => string_to_cstr(&line),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Compute one package and return its metrics record as JSON.
///
/// # Safety
/// - Same contract as `workout_summary`.
#[no_mangle]
pub unsafe extern "C" fn workout_metrics_json(
    workout_type: *const c_char,
    data_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let (tag, data) = match read_package_args(workout_type, data_json) {
        Ok(args) => args,
        Err(msg) => {
            set_last_error(&msg);
            return ptr::null_mut();
        }
    };

    let json = compute_metrics(&tag, &data)
        .and_then(|record| serde_json::to_string(&record).map_err(WorkoutError::from));

    match json {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Process a JSON array of packages and return a JSON array of summary lines.
///
/// # Safety
/// - `packages_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `workout_free_string`.
/// - Returns NULL on error; call `workout_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn workout_batch_summary(packages_json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(packages_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let result = packages_to_summaries(&json_str)
        .and_then(|lines| serde_json::to_string(&lines).map_err(WorkoutError::from));

    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Flux functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Flux function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn workout_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Flux function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn workout_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the Flux library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn workout_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetricsRecord;

    #[test]
    fn test_ffi_summary() {
        let tag = CString::new("SWM").unwrap();
        let data = CString::new("[720, 1, 80, 25, 40]").unwrap();

        unsafe {
            let result = workout_summary(tag.as_ptr(), data.as_ptr());
            assert!(!result.is_null());

            let line = CStr::from_ptr(result).to_str().unwrap();
            assert!(line.starts_with("Training type: Swimming;"));
            assert!(line.ends_with("Calories spent: 336.000."));

            workout_free_string(result);
        }
    }

    #[test]
    fn test_ffi_metrics_json() {
        let tag = CString::new("RUN").unwrap();
        let data = CString::new("[15000, 1, 75]").unwrap();

        unsafe {
            let result = workout_metrics_json(tag.as_ptr(), data.as_ptr());
            assert!(!result.is_null());

            let json = CStr::from_ptr(result).to_str().unwrap();
            let value: serde_json::Value = serde_json::from_str(json).unwrap();
            assert_eq!(value["training_type"], "Running");
            assert!((value["distance_km"].as_f64().unwrap() - 9.75).abs() < 1e-9);

            let record: MetricsRecord = serde_json::from_str(json).unwrap();
            assert_eq!(record, compute_metrics("RUN", &[15000.0, 1.0, 75.0]).unwrap());

            workout_free_string(result);
        }
    }

    #[test]
    fn test_ffi_batch_summary() {
        let packages = CString::new(r#"[["RUN", [15000, 1, 75]], ["WLK", [9000, 1, 75, 180]]]"#)
            .unwrap();

        unsafe {
            let result = workout_batch_summary(packages.as_ptr());
            assert!(!result.is_null());

            let json = CStr::from_ptr(result).to_str().unwrap();
            let lines: Vec<String> = serde_json::from_str(json).unwrap();
            assert_eq!(lines.len(), 2);
            assert!(lines[1].starts_with("Training type: SportsWalking;"));

            workout_free_string(result);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        let tag = CString::new("XYZ").unwrap();
        let data = CString::new("[1, 1, 1]").unwrap();

        unsafe {
            let result = workout_summary(tag.as_ptr(), data.as_ptr());
            assert!(result.is_null());

            let error = workout_last_error();
            assert!(!error.is_null());

            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(error_str.contains("XYZ"));

            let bad_data = CString::new("not json").unwrap();
            let run = CString::new("RUN").unwrap();
            assert!(workout_summary(run.as_ptr(), bad_data.as_ptr()).is_null());
            assert!(!workout_last_error().is_null());

            let wrong_typed = CString::new(r#"["a", 1, 75]"#).unwrap();
            assert!(workout_metrics_json(run.as_ptr(), wrong_typed.as_ptr()).is_null());
            let error_str = CStr::from_ptr(workout_last_error()).to_str().unwrap();
            assert!(error_str.starts_with("Invalid input:"));
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = workout_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
