//
// Copyright (c) The yang-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! YANG instance data.

use bitflags::bitflags;
use std::path::Path;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::ffi;
use crate::iter::{Ancestors, NodeIterable, Set, Siblings, Traverse};
use crate::schema::{DataValue, SchemaModule, SchemaNode};
use crate::utils::*;

/// YANG data tree.
///
/// Owns the parsed top-level nodes (and their subtrees), which are freed when
/// the tree is dropped.
#[derive(Debug)]
pub struct DataTree<'a> {
    context: &'a Context,
    raw: *mut ffi::lyd_node,
}

/// YANG data node reference.
#[derive(Clone, Debug)]
pub struct DataNodeRef<'a, 'b> {
    tree: &'a DataTree<'b>,
    raw: *mut ffi::lyd_node,
}

/// Data input/output formats supported by libyang.
#[allow(clippy::upper_case_acronyms)]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DataFormat {
    /// XML instance data format.
    XML = ffi::LYD_FORMAT::LYD_XML,
    /// JSON instance data format.
    JSON = ffi::LYD_FORMAT::LYD_JSON,
    /// LYB instance data format.
    LYB = ffi::LYD_FORMAT::LYD_LYB,
}

bitflags! {
    /// Data parser options.
    ///
    /// By default the complete input is parsed, data without a matching
    /// schema node definition are silently ignored, and the result is fully
    /// validated (implicit nodes such as non-presence containers and default
    /// values are added).
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct DataParserFlags: u32 {
        /// Data will be only parsed and no validation will be performed. When
        /// statements are kept unevaluated, union types may not be fully
        /// resolved, if-feature statements are not checked, and default values
        /// are not added (only the ones parsed are present).
        const NO_VALIDATION = ffi::LYD_PARSE_ONLY;
        /// Instead of silently ignoring data without schema definition raise an
        /// error.
        const STRICT = ffi::LYD_PARSE_STRICT;
        /// Forbid state data in the parsed data, leaving configuration only.
        const NO_STATE = ffi::LYD_PARSE_NO_STATE;
    }
}

bitflags! {
    /// Data validation options.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct DataValidationFlags: u32 {
        /// Consider state data not allowed and raise an error if they are found.
        const NO_STATE = ffi::LYD_VALIDATE_NO_STATE;
        /// Validate only modules whose data actually exist.
        const PRESENT = ffi::LYD_VALIDATE_PRESENT;
    }
}

bitflags! {
    /// Data printer flags.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct DataPrinterFlags: u32 {
        /// Flag for printing also the (following) sibling nodes of the data
        /// node.
        const WITH_SIBLINGS = ffi::LYD_PRINT_WITHSIBLINGS;
        /// Flag for output without indentation and formatting new lines.
        const SHRINK = ffi::LYD_PRINT_SHRINK;
        /// Preserve empty non-presence containers.
        const KEEP_EMPTY_CONT = ffi::LYD_PRINT_KEEPEMPTYCONT;
        /// Only the data explicitly present in the tree are printed.
        const WD_EXPLICIT = ffi::LYD_PRINT_WD_EXPLICIT;
        /// Do not print the nodes with the value equal to their default value.
        const WD_TRIM = ffi::LYD_PRINT_WD_TRIM;
        /// Include implicit default nodes.
        const WD_ALL = ffi::LYD_PRINT_WD_ALL;
    }
}

/// Methods common to data trees and data node references.
pub trait Data<'a> {
    #[doc(hidden)]
    fn context(&self) -> &'a Context {
        self.tree().context
    }

    #[doc(hidden)]
    fn tree(&self) -> &DataTree<'a>;

    #[doc(hidden)]
    fn raw(&self) -> *mut ffi::lyd_node;

    /// Search in the given data for instances of nodes matching the provided
    /// XPath.
    ///
    /// The expected format of the expression is JSON, meaning the first node in
    /// every path must have its module name as prefix or be the special `*`
    /// value for all the nodes. No match yields an empty set.
    fn find_xpath(&self, xpath: &str) -> Result<Set<'_, DataNodeRef<'_, 'a>>> {
        // Nothing can match in an empty tree.
        if self.raw().is_null() {
            return Ok(Set::new(self.tree(), std::ptr::null_mut()));
        }

        let xpath = str_to_cstring(xpath)?;
        let mut set = std::ptr::null_mut();

        let ret =
            unsafe { ffi::lyd_find_xpath(self.raw(), xpath.as_ptr(), &mut set) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::with_code(self.context(), ret));
        }

        Ok(Set::new(self.tree(), set))
    }

    /// Search in the given data for a single node matching the provided path.
    ///
    /// Returns `None` when no node exists at that path.
    fn find_path(&self, path: &str) -> Result<Option<DataNodeRef<'_, 'a>>> {
        if self.raw().is_null() {
            return Ok(None);
        }

        let path = str_to_cstring(path)?;
        let mut rnode = std::ptr::null_mut();

        let ret = unsafe {
            ffi::lyd_find_path(self.raw(), path.as_ptr(), 0u8, &mut rnode)
        };
        match ret {
            ffi::LY_ERR::LY_SUCCESS => {
                Ok(unsafe { DataNodeRef::from_raw_opt(self.tree(), rnode) })
            }
            ffi::LY_ERR::LY_ENOTFOUND => Ok(None),
            _ => Err(Error::with_code(self.context(), ret)),
        }
    }

    /// Print data tree in the specified format to a `String`.
    ///
    /// The binary `DataFormat::LYB` format can't be represented as a string
    /// and is rejected.
    fn print_string(
        &self,
        format: DataFormat,
        options: DataPrinterFlags,
    ) -> Result<String> {
        if format == DataFormat::LYB {
            return Err(Error::invalid_arg("LYB data can't be printed as text"));
        }

        let mut cstr = std::ptr::null_mut();
        let ret = unsafe {
            ffi::lyd_print_mem(
                &mut cstr,
                self.raw(),
                format as u32,
                options.bits(),
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::with_code(self.context(), ret));
        }

        // An empty tree prints nothing and leaves the buffer unset.
        Ok(malloc_ptr_to_string(cstr).unwrap_or_default())
    }
}

// ===== impl DataTree =====

impl<'a> DataTree<'a> {
    /// Create new empty data tree.
    pub fn new(context: &'a Context) -> DataTree<'a> {
        DataTree {
            context,
            raw: std::ptr::null_mut(),
        }
    }

    /// Parse (and validate) the data file at the given path.
    ///
    /// A document without any node yields an empty tree.
    pub fn parse_path<P: AsRef<Path>>(
        context: &'a Context,
        path: P,
        format: DataFormat,
        parser_options: DataParserFlags,
        validation_options: DataValidationFlags,
    ) -> Result<DataTree<'a>> {
        log::debug!("parsing {:?} data from {}", format, path.as_ref().display());
        let path = path_to_cstring(path)?;
        let mut rnode = std::ptr::null_mut();
        Error::clean(context);

        let ret = unsafe {
            ffi::lyd_parse_data_path(
                context.raw,
                path.as_ptr(),
                format as u32,
                parser_options.bits(),
                validation_options.bits(),
                &mut rnode,
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::with_code(context, ret));
        }

        Ok(unsafe { DataTree::from_raw(context, rnode) })
    }

    /// Parse (and validate) input data as a YANG data tree.
    pub fn parse_string(
        context: &'a Context,
        data: &str,
        format: DataFormat,
        parser_options: DataParserFlags,
        validation_options: DataValidationFlags,
    ) -> Result<DataTree<'a>> {
        let data = str_to_cstring(data)?;
        let mut rnode = std::ptr::null_mut();
        Error::clean(context);

        let ret = unsafe {
            ffi::lyd_parse_data_mem(
                context.raw,
                data.as_ptr(),
                format as u32,
                parser_options.bits(),
                validation_options.bits(),
                &mut rnode,
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::with_code(context, ret));
        }

        Ok(unsafe { DataTree::from_raw(context, rnode) })
    }

    /// Fully validate the data tree.
    ///
    /// Meant for trees parsed with `DataParserFlags::NO_VALIDATION`. Implicit
    /// nodes may be added to the tree.
    pub fn validate(&mut self, options: DataValidationFlags) -> Result<()> {
        Error::clean(self.context);
        let ret = unsafe {
            ffi::lyd_validate_all(
                &mut self.raw,
                self.context.raw,
                options.bits(),
                std::ptr::null_mut(),
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::with_code(self.context, ret));
        }

        Ok(())
    }

    /// Create a copy of the data tree.
    pub fn duplicate(&self) -> Result<DataTree<'a>> {
        // Special handling for empty data trees.
        if self.raw.is_null() {
            return Ok(DataTree::new(self.context));
        }

        let mut dup = std::ptr::null_mut();
        let options = ffi::LYD_DUP_RECURSIVE | ffi::LYD_DUP_WITH_FLAGS;
        let ret = unsafe {
            ffi::lyd_dup_siblings(
                self.raw,
                std::ptr::null_mut(),
                options,
                &mut dup,
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::with_code(self.context, ret));
        }

        Ok(unsafe { DataTree::from_raw(self.context, dup) })
    }

    /// Returns a reference to the first top-level data node, unless the data
    /// tree is empty.
    pub fn reference<'b>(&'b self) -> Option<DataNodeRef<'b, 'a>> {
        unsafe { DataNodeRef::from_raw_opt(self, self.raw) }
    }

    /// Returns whether the tree holds no node at all.
    pub fn is_empty(&self) -> bool {
        self.raw.is_null()
    }

    /// Returns an iterator over the top-level data nodes.
    pub fn top_level<'b>(&'b self) -> Siblings<'b, DataNodeRef<'b, 'a>> {
        Siblings::new(self.reference())
    }

    /// Returns an iterator over all elements in the data tree and its sibling
    /// trees (depth-first search algorithm).
    pub fn traverse<'b>(&'b self) -> impl Iterator<Item = DataNodeRef<'b, 'a>> {
        self.top_level().flat_map(|dnode| dnode.traverse())
    }
}

impl<'a> Data<'a> for DataTree<'a> {
    fn tree(&self) -> &DataTree<'a> {
        self
    }

    fn raw(&self) -> *mut ffi::lyd_node {
        self.raw
    }
}

unsafe impl<'a> Binding<'a> for DataTree<'a> {
    type CType = ffi::lyd_node;
    type Container = Context;

    unsafe fn from_raw(
        context: &'a Context,
        raw: *mut ffi::lyd_node,
    ) -> DataTree<'a> {
        DataTree { context, raw }
    }
}

impl Drop for DataTree<'_> {
    fn drop(&mut self) {
        unsafe { ffi::lyd_free_all(self.raw) };
    }
}

// ===== impl DataNodeRef =====

impl<'a, 'b> DataNodeRef<'a, 'b> {
    /// Schema definition of this node.
    pub fn schema(&self) -> SchemaNode<'b> {
        let raw = unsafe { (*self.raw).schema };
        unsafe { SchemaNode::from_raw(self.tree.context, raw as *mut _) }
    }

    /// Get the owner module of the data node. It is the module of the top-level
    /// schema node. Generally, in case of augments it is the target module,
    /// recursively, otherwise it is the module where the data node is defined.
    pub fn owner_module(&self) -> SchemaModule<'b> {
        let module = unsafe { ffi::lyd_owner_module(self.raw) };
        unsafe { SchemaModule::from_raw(self.tree.context, module as *mut _) }
    }

    /// Returns an iterator over the ancestor data nodes.
    pub fn ancestors(&self) -> Ancestors<'a, DataNodeRef<'a, 'b>> {
        Ancestors::new(self.parent())
    }

    /// Returns an iterator over the sibling data nodes that follow this one.
    pub fn siblings(&self) -> Siblings<'a, DataNodeRef<'a, 'b>> {
        Siblings::new(self.next_sibling())
    }

    /// Returns an iterator over this data node and the siblings that follow
    /// it.
    pub fn inclusive_siblings(&self) -> Siblings<'a, DataNodeRef<'a, 'b>> {
        Siblings::new(Some(self.clone()))
    }

    /// Returns an iterator over the child data nodes.
    pub fn children(&self) -> Siblings<'a, DataNodeRef<'a, 'b>> {
        Siblings::new(self.first_child())
    }

    /// Returns an iterator over all elements in the data subtree (depth-first
    /// search algorithm).
    pub fn traverse(&self) -> Traverse<'a, DataNodeRef<'a, 'b>> {
        Traverse::new(self.clone())
    }

    /// Generate path of the given node.
    pub fn path(&self) -> String {
        // A NULL buffer makes libyang allocate one of the right size.
        let rpath = unsafe {
            ffi::lyd_path(
                self.raw,
                ffi::LYD_PATH_TYPE::LYD_PATH_STD,
                std::ptr::null_mut(),
                0,
            )
        };
        malloc_ptr_to_string(rpath).unwrap_or_default()
    }

    /// Node's value (canonical string representation).
    ///
    /// Only leaf and leaf-list nodes have a value.
    pub fn value_canonical(&self) -> Option<String> {
        if !self.schema().is_term() {
            return None;
        }

        let rnode = self.raw as *mut ffi::lyd_node_term;
        let mut value = unsafe { (*rnode).value._canonical };
        if value.is_null() {
            value = unsafe {
                ffi::lyd_value_get_canonical(
                    self.tree.context.raw,
                    &(*rnode).value,
                )
            };
        }
        char_ptr_to_opt_string(value)
    }

    /// Node's value (typed representation).
    pub fn value(&self) -> Option<DataValue> {
        if !self.schema().is_term() {
            return None;
        }

        let rnode = self.raw as *const ffi::lyd_node_term;
        let value = unsafe {
            DataValue::from_raw(self.tree.context, &(*rnode).value)
        };
        Some(value)
    }

    /// Check whether a node value equals to its default one.
    pub fn is_default(&self) -> bool {
        self.schema().is_term() && unsafe { ffi::lyd_is_default(self.raw) } != 0
    }
}

impl<'a> Data<'a> for DataNodeRef<'_, 'a> {
    fn tree(&self) -> &DataTree<'a> {
        self.tree
    }

    fn raw(&self) -> *mut ffi::lyd_node {
        self.raw
    }
}

unsafe impl<'a, 'b> Binding<'a> for DataNodeRef<'a, 'b> {
    type CType = ffi::lyd_node;
    type Container = DataTree<'b>;

    unsafe fn from_raw(
        tree: &'a DataTree<'b>,
        raw: *mut ffi::lyd_node,
    ) -> DataNodeRef<'a, 'b> {
        DataNodeRef { tree, raw }
    }
}

impl<'a, 'b> NodeIterable<'a> for DataNodeRef<'a, 'b> {
    fn parent(&self) -> Option<DataNodeRef<'a, 'b>> {
        // NOTE: can't use lyd_parent() since it's an inline function. The
        // generic node header comes first in every inner node.
        let rparent = unsafe { (*self.raw).parent } as *mut ffi::lyd_node;
        unsafe { DataNodeRef::from_raw_opt(self.tree, rparent) }
    }

    fn next_sibling(&self) -> Option<DataNodeRef<'a, 'b>> {
        let rsibling = unsafe { (*self.raw).next };
        unsafe { DataNodeRef::from_raw_opt(self.tree, rsibling) }
    }

    fn first_child(&self) -> Option<DataNodeRef<'a, 'b>> {
        // NOTE: can't use lyd_child() since it's an inline function.
        let snode = unsafe { (*self.raw).schema };
        let nodetype = unsafe { (*snode).nodetype } as u32;
        let rchild = match nodetype {
            ffi::LYS_CONTAINER
            | ffi::LYS_LIST
            | ffi::LYS_RPC
            | ffi::LYS_ACTION
            | ffi::LYS_NOTIF => {
                let rinner = self.raw as *mut ffi::lyd_node_inner;
                unsafe { (*rinner).child }
            }
            _ => std::ptr::null_mut(),
        };
        unsafe { DataNodeRef::from_raw_opt(self.tree, rchild) }
    }
}

impl PartialEq for DataNodeRef<'_, '_> {
    fn eq(&self, other: &DataNodeRef<'_, '_>) -> bool {
        self.raw == other.raw
    }
}
