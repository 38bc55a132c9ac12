//
// Copyright (c) The yang-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! YANG schema data.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;

use crate::context::Context;
use crate::ffi;
use crate::iter::{Ancestors, NodeIterable, Siblings, Traverse};
use crate::utils::*;

/// Available YANG schema tree structures representing YANG module.
#[derive(Clone, Debug)]
pub struct SchemaModule<'a> {
    context: &'a Context,
    raw: *mut ffi::lys_module,
}

/// Role of a module in the context.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModuleType {
    /// The module's data nodes can be instantiated.
    Implemented,
    /// The module is only present to resolve imports.
    Imported,
}

/// Schema input formats accepted by libyang.
#[allow(clippy::upper_case_acronyms)]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SchemaInputFormat {
    YANG = ffi::LYS_INFORMAT::LYS_IN_YANG,
    YIN = ffi::LYS_INFORMAT::LYS_IN_YIN,
}

/// Schema path format.
#[allow(clippy::upper_case_acronyms)]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SchemaPathFormat {
    /// Descriptive path format used in log messages.
    LOG = ffi::LYSC_PATH_TYPE::LYSC_PATH_LOG,
    /// Similar to LOG except that schema-only nodes (choice, case) are
    /// skipped.
    DATA = ffi::LYSC_PATH_TYPE::LYSC_PATH_DATA,
}

/// Generic YANG schema node.
#[derive(Clone, Debug)]
pub struct SchemaNode<'a> {
    context: &'a Context,
    raw: *mut ffi::lysc_node,
    kind: SchemaNodeKind,
}

/// YANG schema node kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchemaNodeKind {
    Container,
    Case,
    Choice,
    Leaf,
    LeafList,
    List,
    AnyXml,
    AnyData,
    Rpc,
    Input,
    Output,
    Action,
    Notification,
}

/// YANG built-in base type of a leaf(-list).
#[derive(Copy, Clone, Debug, PartialEq, FromPrimitive)]
pub enum DataValueType {
    Unknown = 0,
    Binary = 1,
    Uint8 = 2,
    Uint16 = 3,
    Uint32 = 4,
    Uint64 = 5,
    String = 6,
    Bits = 7,
    Bool = 8,
    Dec64 = 9,
    Empty = 10,
    Enum = 11,
    IdentityRef = 12,
    InstanceId = 13,
    LeafRef = 14,
    Union = 15,
    Int8 = 16,
    Int16 = 17,
    Int32 = 18,
    Int64 = 19,
}

/// YANG data value.
///
/// Integer and boolean values are decoded, every other type is kept in its
/// canonical string form.
#[derive(Clone, Debug, PartialEq)]
pub enum DataValue {
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Bool(bool),
    Empty,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Other(String),
}

// ===== impl SchemaModule =====

impl<'a> SchemaModule<'a> {
    /// Name of the module.
    pub fn name(&self) -> &str {
        char_ptr_to_str(unsafe { (*self.raw).name })
    }

    /// Revision of the module.
    pub fn revision(&self) -> Option<&str> {
        char_ptr_to_opt_str(unsafe { (*self.raw).revision })
    }

    /// Namespace of the module.
    pub fn namespace(&self) -> &str {
        char_ptr_to_str(unsafe { (*self.raw).ns })
    }

    /// Prefix of the module.
    pub fn prefix(&self) -> &str {
        char_ptr_to_str(unsafe { (*self.raw).prefix })
    }

    /// File path, if the schema was read from a file.
    pub fn filepath(&self) -> Option<&str> {
        char_ptr_to_opt_str(unsafe { (*self.raw).filepath })
    }

    /// Return true if the module is implemented, not just imported.
    pub fn is_implemented(&self) -> bool {
        unsafe { (*self.raw).implemented != 0 }
    }

    /// Whether the module is implemented or only imported.
    pub fn module_type(&self) -> ModuleType {
        if self.is_implemented() {
            ModuleType::Implemented
        } else {
            ModuleType::Imported
        }
    }

    /// Returns an iterator over the top-level data nodes.
    ///
    /// Imported modules aren't compiled and have no data nodes.
    pub fn data(&self) -> Siblings<'a, SchemaNode<'a>> {
        let compiled = unsafe { (*self.raw).compiled };
        let rdata = if compiled.is_null() {
            std::ptr::null_mut()
        } else {
            unsafe { (*compiled).data }
        };
        let data = unsafe { SchemaNode::from_raw_opt(self.context, rdata) };
        Siblings::new(data)
    }

    /// Returns an iterator over all data nodes in the schema module
    /// (depth-first search algorithm).
    pub fn traverse(&self) -> impl Iterator<Item = SchemaNode<'a>> {
        self.data().flat_map(|snode| snode.traverse())
    }
}

unsafe impl<'a> Binding<'a> for SchemaModule<'a> {
    type CType = ffi::lys_module;
    type Container = Context;

    unsafe fn from_raw(
        context: &'a Context,
        raw: *mut ffi::lys_module,
    ) -> SchemaModule<'a> {
        SchemaModule { context, raw }
    }
}

impl PartialEq for SchemaModule<'_> {
    fn eq(&self, other: &SchemaModule<'_>) -> bool {
        self.raw == other.raw
    }
}

// ===== impl ModuleType =====

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleType::Implemented => write!(f, "implemented"),
            ModuleType::Imported => write!(f, "imported"),
        }
    }
}

// ===== impl SchemaNode =====

impl<'a> SchemaNode<'a> {
    fn check_flag(&self, flag: u32) -> bool {
        let flags = unsafe { (*self.raw).flags } as u32;
        flags & flag != 0
    }

    /// Schema node module.
    pub fn module(&self) -> SchemaModule<'a> {
        let module = unsafe { (*self.raw).module };
        unsafe { SchemaModule::from_raw(self.context, module) }
    }

    /// Returns the kind of the schema node.
    pub fn kind(&self) -> SchemaNodeKind {
        self.kind
    }

    /// Schema node name.
    pub fn name(&self) -> &str {
        char_ptr_to_str(unsafe { (*self.raw).name })
    }

    /// Description statement.
    pub fn description(&self) -> Option<&str> {
        char_ptr_to_opt_str(unsafe { (*self.raw).dsc })
    }

    /// Generate path of the node.
    pub fn path(&self, format: SchemaPathFormat) -> String {
        // A NULL buffer makes libyang allocate one of the right size.
        let rpath = unsafe {
            ffi::lysc_path(self.raw, format as u32, std::ptr::null_mut(), 0)
        };
        malloc_ptr_to_string(rpath).unwrap_or_default()
    }

    /// Returns whether the node is a configuration node.
    pub fn is_config(&self) -> bool {
        match self.kind {
            SchemaNodeKind::Container
            | SchemaNodeKind::Case
            | SchemaNodeKind::Choice
            | SchemaNodeKind::Leaf
            | SchemaNodeKind::LeafList
            | SchemaNodeKind::List
            | SchemaNodeKind::AnyXml
            | SchemaNodeKind::AnyData => self.check_flag(ffi::LYS_CONFIG_W),
            _ => false,
        }
    }

    /// Returns whether the node is a list's key.
    pub fn is_list_key(&self) -> bool {
        match self.kind {
            SchemaNodeKind::Leaf => self.check_flag(ffi::LYS_KEY),
            _ => false,
        }
    }

    /// Returns whether the node carries a scalar value in data trees.
    pub fn is_term(&self) -> bool {
        matches!(self.kind, SchemaNodeKind::Leaf | SchemaNodeKind::LeafList)
    }

    /// Resolved base type of a leaf(-list).
    pub fn base_type(&self) -> Option<DataValueType> {
        let rtype = unsafe {
            match self.kind {
                SchemaNodeKind::Leaf => {
                    (*(self.raw as *mut ffi::lysc_node_leaf)).type_
                }
                SchemaNodeKind::LeafList => {
                    (*(self.raw as *mut ffi::lysc_node_leaflist)).type_
                }
                _ => return None,
            }
        };
        if rtype.is_null() {
            return None;
        }

        let basetype = unsafe { (*rtype).basetype };
        DataValueType::from_u32(basetype)
    }

    /// Returns an iterator over the ancestor schema nodes.
    pub fn ancestors(&self) -> Ancestors<'a, SchemaNode<'a>> {
        Ancestors::new(self.parent())
    }

    /// Returns an iterator over the sibling schema nodes.
    pub fn siblings(&self) -> Siblings<'a, SchemaNode<'a>> {
        Siblings::new(self.next_sibling())
    }

    /// Returns an iterator over this schema node and its siblings.
    pub fn inclusive_siblings(&self) -> Siblings<'a, SchemaNode<'a>> {
        Siblings::new(Some(self.clone()))
    }

    /// Returns an iterator over the child schema nodes, excluding action and
    /// notification nodes.
    pub fn children(&self) -> Siblings<'a, SchemaNode<'a>> {
        Siblings::new(self.first_child())
    }

    /// Returns an iterator over all elements in the schema tree (depth-first
    /// search algorithm).
    pub fn traverse(&self) -> Traverse<'a, SchemaNode<'a>> {
        Traverse::new(self.clone())
    }
}

unsafe impl<'a> Binding<'a> for SchemaNode<'a> {
    type CType = ffi::lysc_node;
    type Container = Context;

    unsafe fn from_raw(
        context: &'a Context,
        raw: *mut ffi::lysc_node,
    ) -> SchemaNode<'a> {
        let nodetype = (*raw).nodetype as u32;
        let kind = SchemaNodeKind::from_nodetype(nodetype);
        SchemaNode { context, raw, kind }
    }
}

impl<'a> NodeIterable<'a> for SchemaNode<'a> {
    fn parent(&self) -> Option<SchemaNode<'a>> {
        let rparent = unsafe { (*self.raw).parent };
        unsafe { SchemaNode::from_raw_opt(self.context, rparent) }
    }

    fn next_sibling(&self) -> Option<SchemaNode<'a>> {
        let rnext = unsafe { (*self.raw).next };
        unsafe { SchemaNode::from_raw_opt(self.context, rnext) }
    }

    fn first_child(&self) -> Option<SchemaNode<'a>> {
        let rchild = unsafe { ffi::lysc_node_child(self.raw) };
        unsafe { SchemaNode::from_raw_opt(self.context, rchild as *mut _) }
    }
}

impl PartialEq for SchemaNode<'_> {
    fn eq(&self, other: &SchemaNode<'_>) -> bool {
        self.raw == other.raw
    }
}

// ===== impl SchemaNodeKind =====

impl SchemaNodeKind {
    fn from_nodetype(nodetype: u32) -> SchemaNodeKind {
        match nodetype {
            ffi::LYS_CONTAINER => SchemaNodeKind::Container,
            ffi::LYS_CASE => SchemaNodeKind::Case,
            ffi::LYS_CHOICE => SchemaNodeKind::Choice,
            ffi::LYS_LEAF => SchemaNodeKind::Leaf,
            ffi::LYS_LEAFLIST => SchemaNodeKind::LeafList,
            ffi::LYS_LIST => SchemaNodeKind::List,
            ffi::LYS_ANYXML => SchemaNodeKind::AnyXml,
            ffi::LYS_ANYDATA => SchemaNodeKind::AnyData,
            ffi::LYS_ACTION => SchemaNodeKind::Action,
            ffi::LYS_RPC => SchemaNodeKind::Rpc,
            ffi::LYS_INPUT => SchemaNodeKind::Input,
            ffi::LYS_OUTPUT => SchemaNodeKind::Output,
            ffi::LYS_NOTIF => SchemaNodeKind::Notification,
            // libyang never hands out compiled nodes of other types.
            _ => unreachable!("unknown schema node type {:#x}", nodetype),
        }
    }

    /// The YANG statement keyword defining nodes of this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            SchemaNodeKind::Container => "container",
            SchemaNodeKind::Case => "case",
            SchemaNodeKind::Choice => "choice",
            SchemaNodeKind::Leaf => "leaf",
            SchemaNodeKind::LeafList => "leaf-list",
            SchemaNodeKind::List => "list",
            SchemaNodeKind::AnyXml => "anyxml",
            SchemaNodeKind::AnyData => "anydata",
            SchemaNodeKind::Rpc => "rpc",
            SchemaNodeKind::Input => "input",
            SchemaNodeKind::Output => "output",
            SchemaNodeKind::Action => "action",
            SchemaNodeKind::Notification => "notification",
        }
    }
}

impl fmt::Display for SchemaNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

// ===== impl DataValue =====

impl DataValue {
    pub(crate) unsafe fn from_raw(
        context: &Context,
        raw: *const ffi::lyd_value,
    ) -> DataValue {
        let rtype = (*(*raw).realtype).basetype;
        let value = &(*raw).__bindgen_anon_1;
        match rtype {
            ffi::LY_DATA_TYPE::LY_TYPE_UINT8 => DataValue::Uint8(value.uint8),
            ffi::LY_DATA_TYPE::LY_TYPE_UINT16 => DataValue::Uint16(value.uint16),
            ffi::LY_DATA_TYPE::LY_TYPE_UINT32 => DataValue::Uint32(value.uint32),
            ffi::LY_DATA_TYPE::LY_TYPE_UINT64 => DataValue::Uint64(value.uint64),
            ffi::LY_DATA_TYPE::LY_TYPE_BOOL => {
                DataValue::Bool(value.boolean != 0)
            }
            ffi::LY_DATA_TYPE::LY_TYPE_EMPTY => DataValue::Empty,
            ffi::LY_DATA_TYPE::LY_TYPE_INT8 => DataValue::Int8(value.int8),
            ffi::LY_DATA_TYPE::LY_TYPE_INT16 => DataValue::Int16(value.int16),
            ffi::LY_DATA_TYPE::LY_TYPE_INT32 => DataValue::Int32(value.int32),
            ffi::LY_DATA_TYPE::LY_TYPE_INT64 => DataValue::Int64(value.int64),
            _ => {
                let mut canonical = (*raw)._canonical;
                if canonical.is_null() {
                    canonical = ffi::lyd_value_get_canonical(context.raw, raw);
                }
                DataValue::Other(char_ptr_to_string(canonical))
            }
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Uint8(value) => write!(f, "{}", value),
            DataValue::Uint16(value) => write!(f, "{}", value),
            DataValue::Uint32(value) => write!(f, "{}", value),
            DataValue::Uint64(value) => write!(f, "{}", value),
            DataValue::Bool(value) => write!(f, "{}", value),
            DataValue::Empty => Ok(()),
            DataValue::Int8(value) => write!(f, "{}", value),
            DataValue::Int16(value) => write!(f, "{}", value),
            DataValue::Int32(value) => write!(f, "{}", value),
            DataValue::Int64(value) => write!(f, "{}", value),
            DataValue::Other(value) => write!(f, "{}", value),
        }
    }
}
