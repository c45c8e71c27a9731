use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use lazy_static::lazy_static;

use crate::config::NamingConfig;
use crate::error::NamingError;
use crate::naming::{NamespaceNamingStrategy, NamingStrategy};

lazy_static! {
    // Used whenever a caller passes a NULL handle
    static ref DEFAULT_STRATEGY: NamespaceNamingStrategy = NamespaceNamingStrategy::default();
}

/// Result code for FFI functions
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingResult {
    Ok = 0,
    ConfigError = 1,
    InvalidArgument = 2,
    InternalError = 3,
}

impl From<&NamingError> for NamingResult {
    fn from(e: &NamingError) -> Self {
        match e {
            NamingError::Config(_) | NamingError::UnknownOption(_) => NamingResult::ConfigError,
            NamingError::NullArgument(_) | NamingError::InvalidUtf8(_) => {
                NamingResult::InvalidArgument
            }
            NamingError::InteriorNul(_) => NamingResult::InternalError,
        }
    }
}

/// Create a naming strategy from a JSON options document
///
/// # Safety
/// - `config_json` must be NULL or a valid null-terminated C string;
///   NULL means the default configuration
/// - The returned handle must be released with `namespace_naming_free`
/// - Returns NULL on error, check `error_out` for details
#[no_mangle]
pub unsafe extern "C" fn namespace_naming_new(
    config_json: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut NamespaceNamingStrategy {
    let config = match read_opt_str(config_json, "config_json") {
        Ok(Some(json)) => NamingConfig::from_json(json),
        Ok(None) => Ok(NamingConfig::default()),
        Err(e) => Err(e),
    };

    match config {
        Ok(config) => Box::into_raw(Box::new(NamespaceNamingStrategy::new(config))),
        Err(e) => {
            set_error(error_out, &e.to_string());
            ptr::null_mut()
        }
    }
}

/// Validate a JSON options document without creating a strategy
///
/// # Safety
/// `config_json` must be a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn namespace_naming_validate_config(
    config_json: *const c_char,
    error_out: *mut *mut c_char,
) -> NamingResult {
    let result = read_str(config_json, "config_json").and_then(NamingConfig::from_json);
    match result {
        Ok(_) => NamingResult::Ok,
        Err(e) => {
            set_error(error_out, &e.to_string());
            NamingResult::from(&e)
        }
    }
}

/// Release a strategy created by `namespace_naming_new`
///
/// # Safety
/// `handle` must be NULL or a pointer returned by `namespace_naming_new`
/// that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn namespace_naming_free(handle: *mut NamespaceNamingStrategy) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// # Safety
/// - `handle` must be NULL (default strategy) or a live handle
/// - `class_name` must be a valid null-terminated C string
/// - Caller must free the returned string with `namespace_naming_free_string`
#[no_mangle]
pub unsafe extern "C" fn namespace_naming_class_to_table_name(
    handle: *const NamespaceNamingStrategy,
    class_name: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let result = read_str(class_name, "class_name")
        .map(|class_name| strategy(handle).class_to_table_name(class_name));
    into_c_string(result, error_out)
}

/// # Safety
/// Same contract as `namespace_naming_class_to_table_name`; `class_name`
/// may be NULL.
#[no_mangle]
pub unsafe extern "C" fn namespace_naming_property_to_column_name(
    handle: *const NamespaceNamingStrategy,
    property_name: *const c_char,
    class_name: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let result = read_str(property_name, "property_name").and_then(|property| {
        let class_name = read_opt_str(class_name, "class_name")?;
        Ok(strategy(handle).property_to_column_name(property, class_name))
    });
    into_c_string(result, error_out)
}

/// # Safety
/// `handle` must be NULL or a live handle. Caller frees the result.
#[no_mangle]
pub unsafe extern "C" fn namespace_naming_reference_column_name(
    handle: *const NamespaceNamingStrategy,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    into_c_string(Ok(strategy(handle).reference_column_name()), error_out)
}

/// # Safety
/// Same contract as `namespace_naming_class_to_table_name`.
#[no_mangle]
pub unsafe extern "C" fn namespace_naming_join_column_name(
    handle: *const NamespaceNamingStrategy,
    property_name: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let result = read_str(property_name, "property_name")
        .map(|property| strategy(handle).join_column_name(property));
    into_c_string(result, error_out)
}

/// # Safety
/// Same contract as `namespace_naming_class_to_table_name`;
/// `property_name` may be NULL.
#[no_mangle]
pub unsafe extern "C" fn namespace_naming_join_table_name(
    handle: *const NamespaceNamingStrategy,
    source_class: *const c_char,
    target_class: *const c_char,
    property_name: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let result = (|| -> Result<String, NamingError> {
        let source = read_str(source_class, "source_class")?;
        let target = read_str(target_class, "target_class")?;
        let property = read_opt_str(property_name, "property_name")?;
        Ok(strategy(handle).join_table_name(source, target, property))
    })();
    into_c_string(result, error_out)
}

/// # Safety
/// Same contract as `namespace_naming_class_to_table_name`;
/// `referenced_column` may be NULL.
#[no_mangle]
pub unsafe extern "C" fn namespace_naming_join_key_column_name(
    handle: *const NamespaceNamingStrategy,
    class_name: *const c_char,
    referenced_column: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let result = read_str(class_name, "class_name").and_then(|class_name| {
        let referenced = read_opt_str(referenced_column, "referenced_column")?;
        Ok(strategy(handle).join_key_column_name(class_name, referenced))
    });
    into_c_string(result, error_out)
}

/// Free a string allocated by Rust
#[no_mangle]
pub unsafe extern "C" fn namespace_naming_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Get the version of the library
#[no_mangle]
pub extern "C" fn namespace_naming_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr() as *const c_char
}

// ============================================================
// HELPERS
// ============================================================

unsafe fn strategy<'a>(handle: *const NamespaceNamingStrategy) -> &'a NamespaceNamingStrategy {
    handle.as_ref().unwrap_or(&*DEFAULT_STRATEGY)
}

unsafe fn read_str<'a>(input: *const c_char, name: &'static str) -> Result<&'a str, NamingError> {
    if input.is_null() {
        return Err(NamingError::NullArgument(name));
    }
    CStr::from_ptr(input)
        .to_str()
        .map_err(|e| NamingError::InvalidUtf8(e.to_string()))
}

unsafe fn read_opt_str<'a>(
    input: *const c_char,
    name: &'static str,
) -> Result<Option<&'a str>, NamingError> {
    if input.is_null() {
        Ok(None)
    } else {
        read_str(input, name).map(Some)
    }
}

unsafe fn into_c_string(
    result: Result<String, NamingError>,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let converted = result.and_then(|name| {
        CString::new(name).map_err(|e| NamingError::InteriorNul(e.to_string()))
    });

    match converted {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            set_error(error_out, &e.to_string());
            ptr::null_mut()
        }
    }
}

unsafe fn set_error(error_out: *mut *mut c_char, message: &str) {
    if !error_out.is_null() {
        if let Ok(c_str) = CString::new(message) {
            *error_out = c_str.into_raw();
        }
    }
}
