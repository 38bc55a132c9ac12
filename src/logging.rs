//
// Copyright (c) The yang-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Forwarding of libyang log messages.

use std::borrow::Cow;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::OnceLock;

use crate::ffi;

static LOG_CALLBACK: OnceLock<Box<dyn LogCallback>> = OnceLock::new();

/// A custom logger to pass to libyang.
pub trait LogCallback: Send + Sync + 'static {
    fn log<'a>(
        &'a self,
        level: ffi::LY_LOG_LEVEL::Type,
        msg: Option<Cow<'a, str>>,
        data_path: Option<Cow<'a, str>>,
        schema_path: Option<Cow<'a, str>>,
        line: u64,
    );
}

/// An error returned when the logging callback has already been initialized.
#[derive(Debug)]
pub struct LoggingCallbackAlreadySet {
    _private: (),
}

/// A logger that forwards libyang messages to the `log` crate, under the
/// `libyang3` target.
#[derive(Debug, Default)]
pub struct DefaultLogger {
    _private: (),
}

pub(crate) fn set_log_level_trace() {
    set_log_level(ffi::LY_LOG_LEVEL::LY_LLDBG);
}

pub(crate) fn set_log_level_debug() {
    set_log_level(ffi::LY_LOG_LEVEL::LY_LLVRB);
}

pub(crate) fn set_log_level_warn() {
    set_log_level(ffi::LY_LOG_LEVEL::LY_LLWRN);
}

pub(crate) fn set_log_level_error() {
    set_log_level(ffi::LY_LOG_LEVEL::LY_LLERR);
}

fn set_log_level(level: ffi::LY_LOG_LEVEL::Type) {
    unsafe { ffi::ly_log_level(level) };
}

/// Install the logging callback.
///
/// The callback can only be installed once per process. The last error keeps
/// being stored in the context so that [`crate::Error`] snapshots still work.
pub(crate) fn init_logger<C>(
    callback: C,
) -> Result<(), LoggingCallbackAlreadySet>
where
    C: LogCallback,
{
    LOG_CALLBACK
        .set(Box::new(callback))
        .map_err(|_| LoggingCallbackAlreadySet { _private: () })?;
    unsafe {
        ffi::ly_log_options(ffi::LY_LOLOG | ffi::LY_LOSTORE_LAST);
        ffi::ly_set_log_clb(Some(log_callback));
    }
    Ok(())
}

// SAFETY: libyang hands over NUL-terminated strings (or NULL) that stay valid
// for the duration of the callback.
unsafe fn borrow_c_str<'a>(ptr: *const c_char) -> Option<Cow<'a, str>> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy())
    }
}

extern "C" fn log_callback(
    level: ffi::LY_LOG_LEVEL::Type,
    msg: *const c_char,
    data_path: *const c_char,
    schema_path: *const c_char,
    line: u64,
) {
    let Some(cb) = LOG_CALLBACK.get() else {
        return;
    };

    let (msg, data_path, schema_path) = unsafe {
        (
            borrow_c_str(msg),
            borrow_c_str(data_path),
            borrow_c_str(schema_path),
        )
    };
    cb.log(level, msg, data_path, schema_path, line);
}

// ===== impl LoggingCallbackAlreadySet =====

impl std::fmt::Display for LoggingCallbackAlreadySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Logging callback already set")
    }
}

impl std::error::Error for LoggingCallbackAlreadySet {}

// ===== impl DefaultLogger =====

impl DefaultLogger {
    fn level(level: ffi::LY_LOG_LEVEL::Type) -> log::Level {
        match level {
            ffi::LY_LOG_LEVEL::LY_LLERR => log::Level::Error,
            ffi::LY_LOG_LEVEL::LY_LLWRN => log::Level::Warn,
            ffi::LY_LOG_LEVEL::LY_LLVRB => log::Level::Info,
            _ => log::Level::Debug,
        }
    }
}

impl LogCallback for DefaultLogger {
    fn log<'a>(
        &'a self,
        level: ffi::LY_LOG_LEVEL::Type,
        msg: Option<Cow<'a, str>>,
        data_path: Option<Cow<'a, str>>,
        schema_path: Option<Cow<'a, str>>,
        line: u64,
    ) {
        let msg = msg.unwrap_or_default();
        log::log! {
            target: "libyang3",
            DefaultLogger::level(level),
            "{msg} (data_path={data_path:?}, schema_path={schema_path:?}, line={line})",
        }
    }
}
