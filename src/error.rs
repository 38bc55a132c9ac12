//
// Copyright (c) The yang-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::context::Context;
use crate::ffi;
use crate::utils::*;

/// A convenience wrapper around `Result` for `yangwalk::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Snapshot of the last error recorded by libyang.
///
/// libyang keeps its error records per context and per thread. The snapshot
/// must therefore be taken right after the failing call, on the same thread.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    /// libyang return code.
    pub errcode: ffi::LY_ERR::Type,
    /// Validation error code, meaningful when `errcode` is `LY_EVALID`.
    pub vecode: ffi::LY_VECODE::Type,
    pub msg: Option<String>,
    /// Data path of the offending node, if any.
    pub path: Option<String>,
    pub schema_path: Option<String>,
    pub apptag: Option<String>,
}

impl Error {
    /// Take a snapshot of the last error stored in the given context.
    pub fn new(ctx: &Context) -> Error {
        let eitem = unsafe { ffi::ly_err_last(ctx.raw) };
        if eitem.is_null() {
            return Error::from_code(ffi::LY_ERR::LY_EOTHER);
        }

        let eitem = unsafe { &*eitem };
        Error {
            errcode: eitem.err,
            vecode: eitem.vecode,
            msg: char_ptr_to_opt_string(eitem.msg),
            path: char_ptr_to_opt_string(eitem.data_path),
            schema_path: char_ptr_to_opt_string(eitem.schema_path),
            apptag: char_ptr_to_opt_string(eitem.apptag),
        }
    }

    /// Take a snapshot of the last error stored in the given context, keeping
    /// the return code of the failing call.
    ///
    /// Some failures (e.g. `LY_EEXIST`) are returned without being recorded,
    /// in which case only the code is kept. A stored record carrying a
    /// different code belongs to an earlier call and is ignored.
    pub fn with_code(ctx: &Context, errcode: ffi::LY_ERR::Type) -> Error {
        let error = Error::new(ctx);
        if error.errcode != errcode {
            return Error::from_code(errcode);
        }
        error
    }

    /// Discard the error records stored in the given context, so that the
    /// next snapshot can only come from a later call.
    pub(crate) fn clean(ctx: &Context) {
        unsafe { ffi::ly_err_clean(ctx.raw, std::ptr::null_mut()) };
    }

    /// Build an error out of a bare libyang return code.
    ///
    /// Used when there is no context holding further details, e.g. when the
    /// context itself failed to be created.
    pub fn from_code(errcode: ffi::LY_ERR::Type) -> Error {
        Error {
            errcode,
            vecode: ffi::LY_VECODE::LYVE_SUCCESS,
            msg: None,
            path: None,
            schema_path: None,
            apptag: None,
        }
    }

    pub(crate) fn invalid_arg(msg: &str) -> Error {
        Error {
            msg: Some(msg.to_owned()),
            ..Error::from_code(ffi::LY_ERR::LY_EINVAL)
        }
    }

    /// Returns whether the error was raised by data or schema validation.
    pub fn is_validation(&self) -> bool {
        self.errcode == ffi::LY_ERR::LY_EVALID
    }
}

impl std::fmt::Display for Error {
    // Print only the base error message by default.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(msg) = &self.msg {
            write!(f, "{}", msg)
        } else {
            write!(f, "Unknown error: {}", self.errcode)
        }
    }
}

impl std::error::Error for Error {}
