//
// Copyright (c) The yang-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::error::{Error, Result};

/// Convert C String to owned string.
pub(crate) fn char_ptr_to_string(c_str: *const c_char) -> String {
    unsafe { CStr::from_ptr(c_str).to_string_lossy().into_owned() }
}

/// Convert C String to optional owned string.
pub(crate) fn char_ptr_to_opt_string(c_str: *const c_char) -> Option<String> {
    if c_str.is_null() {
        None
    } else {
        Some(char_ptr_to_string(c_str))
    }
}

/// Convert C String to string slice.
///
/// libyang only stores UTF-8 strings (YANG mandates it), anything else is
/// mapped to an empty string.
pub(crate) fn char_ptr_to_str<'a>(c_str: *const c_char) -> &'a str {
    unsafe { CStr::from_ptr(c_str).to_str().unwrap_or_default() }
}

/// Convert C String to optional string slice.
pub(crate) fn char_ptr_to_opt_str<'a>(c_str: *const c_char) -> Option<&'a str> {
    if c_str.is_null() {
        None
    } else {
        Some(char_ptr_to_str(c_str))
    }
}

/// Take ownership of a string allocated by libyang, releasing the C buffer.
pub(crate) fn malloc_ptr_to_string(c_str: *mut c_char) -> Option<String> {
    let string = char_ptr_to_opt_string(c_str);
    if !c_str.is_null() {
        unsafe { libc::free(c_str as *mut c_void) };
    }
    string
}

/// Convert a Rust string to a C String.
pub(crate) fn str_to_cstring(value: &str) -> Result<CString> {
    CString::new(value)
        .map_err(|_| Error::invalid_arg("string contains an interior NUL byte"))
}

/// Convert a filesystem path to a C String.
pub(crate) fn path_to_cstring<P: AsRef<Path>>(path: P) -> Result<CString> {
    CString::new(path.as_ref().as_os_str().as_bytes())
        .map_err(|_| Error::invalid_arg("path contains an interior NUL byte"))
}

/// A trait implemented by all types that can be created from a raw C pointer
/// and a generic container type.
#[doc(hidden)]
pub unsafe trait Binding<'a>
where
    Self: Sized,
    <Self as Binding<'a>>::Container: 'a,
{
    type CType;
    type Container;

    unsafe fn from_raw(
        container: &'a Self::Container,
        raw: *mut Self::CType,
    ) -> Self;

    unsafe fn from_raw_opt(
        container: &'a Self::Container,
        raw: *mut Self::CType,
    ) -> Option<Self> {
        if raw.is_null() {
            None
        } else {
            Some(Self::from_raw(container, raw))
        }
    }
}
