//
// Copyright (c) The yang-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! YANG context.

use bitflags::bitflags;
use std::os::raw::c_char;
use std::path::Path;

use crate::error::{Error, Result};
use crate::ffi;
use crate::iter::{SchemaModules, Searchdirs};
use crate::logging::{self, LogCallback, LoggingCallbackAlreadySet};
use crate::schema::{SchemaInputFormat, SchemaModule, SchemaNode};
use crate::utils::*;

/// Context of the YANG schemas.
///
/// The context holds the loaded modules and the list of directories searched
/// when a module has to be loaded. All data trees, schema nodes and modules
/// borrow from it, so it outlives them and is destroyed when dropped.
///
/// [Official C documentation]
///
/// [Official C documentation]: https://netopeer.liberouter.org/doc/libyang/master/html/howto_context.html
#[derive(Debug)]
pub struct Context {
    pub(crate) raw: *mut ffi::ly_ctx,
}

bitflags! {
    /// Options to change context behavior.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct ContextFlags: u16 {
        /// All the imported modules of the schema being parsed are implemented.
        const ALL_IMPLEMENTED = ffi::LY_CTX_ALL_IMPLEMENTED as u16;

        /// Implement all imported modules "referenced" from an implemented
        /// module (leafref, augment and deviation targets, when/must
        /// expressions and default values).
        const REF_IMPLEMENTED = ffi::LY_CTX_REF_IMPLEMENTED as u16;

        /// Do not internally implement ietf-yang-library module. This option
        /// cannot be changed on existing context.
        const NO_YANGLIBRARY = ffi::LY_CTX_NO_YANGLIBRARY as u16;

        /// Do not search for schemas in context's searchdirs neither in current
        /// working directory.
        const DISABLE_SEARCHDIRS = ffi::LY_CTX_DISABLE_SEARCHDIRS as u16;

        /// Do not automatically search for schemas in current working
        /// directory, which is by default searched automatically (despite not
        /// recursively).
        const DISABLE_SEARCHDIR_CWD = ffi::LY_CTX_DISABLE_SEARCHDIR_CWD as u16;
    }
}

impl Context {
    /// Create libyang context without any search directory.
    pub fn new(options: ContextFlags) -> Result<Context> {
        Context::create(std::ptr::null(), options)
    }

    /// Create libyang context searching for schemas in the given directory.
    ///
    /// Several directories can be given at once separated by `:`. The
    /// creation fails if any of them can't be accessed.
    pub fn open<P: AsRef<Path>>(
        search_dir: P,
        options: ContextFlags,
    ) -> Result<Context> {
        log::debug!("opening context on {}", search_dir.as_ref().display());
        let search_dir = path_to_cstring(search_dir)?;
        Context::create(search_dir.as_ptr(), options)
    }

    fn create(
        search_dir: *const c_char,
        options: ContextFlags,
    ) -> Result<Context> {
        let mut context = std::ptr::null_mut();

        let ret =
            unsafe { ffi::ly_ctx_new(search_dir, options.bits(), &mut context) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            // The context doesn't exist, so there's nothing to query for
            // further error details.
            return Err(Error::from_code(ret));
        }

        Ok(Context { raw: context })
    }

    /// Add the search path into libyang context.
    pub fn set_searchdir<P: AsRef<Path>>(
        &mut self,
        search_dir: P,
    ) -> Result<()> {
        let search_dir = path_to_cstring(search_dir)?;
        let ret =
            unsafe { ffi::ly_ctx_set_searchdir(self.raw, search_dir.as_ptr()) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::with_code(self, ret));
        }

        Ok(())
    }

    /// Remove the given search path from the libyang context.
    pub fn unset_searchdir<P: AsRef<Path>>(
        &mut self,
        search_dir: P,
    ) -> Result<()> {
        let search_dir = path_to_cstring(search_dir)?;
        let ret = unsafe {
            ffi::ly_ctx_unset_searchdir(self.raw, search_dir.as_ptr())
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::with_code(self, ret));
        }

        Ok(())
    }

    /// Clean all search paths from the libyang context.
    pub fn unset_searchdirs(&mut self) -> Result<()> {
        let ret =
            unsafe { ffi::ly_ctx_unset_searchdir(self.raw, std::ptr::null()) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::with_code(self, ret));
        }

        Ok(())
    }

    /// Remove the most recently added search path(s) from the libyang context.
    pub fn unset_searchdir_last(&mut self, count: u32) -> Result<()> {
        let ret = unsafe { ffi::ly_ctx_unset_searchdir_last(self.raw, count) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::with_code(self, ret));
        }

        Ok(())
    }

    /// Returns an iterator over the search directories, in the order they were
    /// added.
    ///
    /// libyang stores the canonical form of every directory, so relative paths
    /// come back absolute.
    pub fn searchdirs(&self) -> Searchdirs<'_> {
        Searchdirs::new(self)
    }

    /// Get the currently set context's options.
    pub fn get_options(&self) -> ContextFlags {
        let options = unsafe { ffi::ly_ctx_get_options(self.raw) };
        ContextFlags::from_bits_truncate(options as u16)
    }

    /// Get YANG module of the given name and revision.
    ///
    /// If the revision is not specified, the schema with no revision is
    /// returned (if it is present in the context).
    pub fn get_module(
        &self,
        name: &str,
        revision: Option<&str>,
    ) -> Option<SchemaModule<'_>> {
        let name = str_to_cstring(name).ok()?;
        let revision = match revision {
            Some(revision) => Some(str_to_cstring(revision).ok()?),
            None => None,
        };
        let revision_ptr = revision
            .as_ref()
            .map_or(std::ptr::null(), |revision| revision.as_ptr());

        let module = unsafe {
            ffi::ly_ctx_get_module(self.raw, name.as_ptr(), revision_ptr)
        };
        unsafe { SchemaModule::from_raw_opt(self, module) }
    }

    /// Get the latest revision of the YANG module specified by its name.
    ///
    /// YANG modules with no revision are supposed to be the oldest one.
    pub fn get_module_latest(&self, name: &str) -> Option<SchemaModule<'_>> {
        let name = str_to_cstring(name).ok()?;
        let module =
            unsafe { ffi::ly_ctx_get_module_latest(self.raw, name.as_ptr()) };
        unsafe { SchemaModule::from_raw_opt(self, module) }
    }

    /// Get the (only) implemented YANG module specified by its name.
    pub fn get_module_implemented(
        &self,
        name: &str,
    ) -> Option<SchemaModule<'_>> {
        let name = str_to_cstring(name).ok()?;
        let module = unsafe {
            ffi::ly_ctx_get_module_implemented(self.raw, name.as_ptr())
        };
        unsafe { SchemaModule::from_raw_opt(self, module) }
    }

    /// Try to find the module in the search paths and load it.
    ///
    /// The context itself is searched for the requested module first. If
    /// revision is not specified, the latest revision is loaded, unless an
    /// implemented revision is already present in the context.
    ///
    /// Loading a module may recompile the whole context, which is why no
    /// schema reference can be held across this call.
    pub fn load_module(
        &mut self,
        name: &str,
        revision: Option<&str>,
        features: &[&str],
    ) -> Result<SchemaModule<'_>> {
        let name = str_to_cstring(name)?;
        let revision = revision.map(str_to_cstring).transpose()?;
        let revision_ptr = revision
            .as_ref()
            .map_or(std::ptr::null(), |revision| revision.as_ptr());

        // NULL-terminated array of enabled features.
        let features = features
            .iter()
            .map(|feature| str_to_cstring(feature))
            .collect::<Result<Vec<_>>>()?;
        let mut features_ptr = features
            .iter()
            .map(|feature| feature.as_ptr())
            .chain(std::iter::once(std::ptr::null()))
            .collect::<Vec<_>>();

        Error::clean(self);
        let module = unsafe {
            ffi::ly_ctx_load_module(
                self.raw,
                name.as_ptr(),
                revision_ptr,
                features_ptr.as_mut_ptr(),
            )
        };
        if module.is_null() {
            return Err(Error::new(self));
        }

        Ok(unsafe { SchemaModule::from_raw(self, module) })
    }

    /// Look the module up and load it only when it isn't in the context yet.
    ///
    /// Without revision, a module lacking revision or else the implemented
    /// revision is looked up.
    pub fn get_or_load_module(
        &mut self,
        name: &str,
        revision: Option<&str>,
    ) -> Result<SchemaModule<'_>> {
        if self.lookup_module(name, revision).is_none() {
            log::debug!("module {} not in context, loading it", name);
            return self.load_module(name, revision, &[]);
        }

        let ctx: &Context = self;
        ctx.lookup_module(name, revision)
            .ok_or_else(|| Error::new(ctx))
    }

    fn lookup_module(
        &self,
        name: &str,
        revision: Option<&str>,
    ) -> Option<SchemaModule<'_>> {
        match revision {
            Some(_) => self.get_module(name, revision),
            None => self
                .get_module(name, None)
                .or_else(|| self.get_module_implemented(name)),
        }
    }

    /// Parse a schema module from the given file and implement it.
    ///
    /// Imports of the module are still resolved through the search
    /// directories.
    pub fn parse_module_path<P: AsRef<Path>>(
        &mut self,
        path: P,
        format: SchemaInputFormat,
    ) -> Result<SchemaModule<'_>> {
        log::debug!("parsing schema module from {}", path.as_ref().display());
        let path = path_to_cstring(path)?;
        let mut module = std::ptr::null_mut();

        Error::clean(self);
        let ret = unsafe {
            ffi::lys_parse_path(
                self.raw,
                path.as_ptr(),
                format as u32,
                &mut module,
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::with_code(self, ret));
        }

        Ok(unsafe { SchemaModule::from_raw(self, module) })
    }

    /// Parse a schema module from a string and implement it.
    pub fn parse_module_str(
        &mut self,
        data: &str,
        format: SchemaInputFormat,
    ) -> Result<SchemaModule<'_>> {
        let data = str_to_cstring(data)?;
        let mut module = std::ptr::null_mut();

        Error::clean(self);
        let ret = unsafe {
            ffi::lys_parse_mem(
                self.raw,
                data.as_ptr(),
                format as u32,
                &mut module,
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::with_code(self, ret));
        }

        Ok(unsafe { SchemaModule::from_raw(self, module) })
    }

    /// Returns an iterator over the loaded modules.
    pub fn modules(&self) -> SchemaModules<'_> {
        SchemaModules::new(self)
    }

    /// Returns an iterator over all data nodes from all modules in the YANG
    /// context (depth-first search algorithm).
    pub fn traverse(&self) -> impl Iterator<Item = SchemaNode<'_>> {
        self.modules()
            .flat_map(|module| module.data())
            .flat_map(|snode| snode.traverse())
    }

    /// Learn the number of internal modules of the context. Internal modules is
    /// considered one that was loaded during the context creation.
    pub fn internal_module_count(&self) -> u32 {
        unsafe { ffi::ly_ctx_internal_modules_count(self.raw) }
    }

    /// Log every libyang message, debug ones included.
    pub fn set_log_level_trace(&self) {
        logging::set_log_level_trace();
    }

    /// Log libyang verbose messages and above.
    pub fn set_log_level_debug(&self) {
        logging::set_log_level_debug();
    }

    /// Log libyang warnings and errors.
    pub fn set_log_level_warn(&self) {
        logging::set_log_level_warn();
    }

    /// Log libyang errors only.
    pub fn set_log_level_error(&self) {
        logging::set_log_level_error();
    }

    /// Route libyang messages to the `log` crate.
    ///
    /// The logger is process-wide and can only be installed once.
    pub fn init_default_logger(
        &self,
    ) -> std::result::Result<(), LoggingCallbackAlreadySet> {
        logging::init_logger(logging::DefaultLogger::default())
    }

    /// Route libyang messages to a custom callback.
    pub fn init_logger<C: LogCallback>(
        &self,
        callback: C,
    ) -> std::result::Result<(), LoggingCallbackAlreadySet> {
        logging::init_logger(callback)
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        unsafe { ffi::ly_ctx_destroy(self.raw) };
    }
}
