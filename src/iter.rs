//
// Copyright (c) The yang-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! YANG iterators.

use std::marker::PhantomData;
use std::os::raw::c_char;

use crate::context::Context;
use crate::ffi;
use crate::schema::SchemaModule;
use crate::utils::*;

/// Common methods used by multiple data and schema node iterators.
#[doc(hidden)]
pub trait NodeIterable<'a>: Sized + Clone + PartialEq + Binding<'a> {
    /// Returns the parent node.
    fn parent(&self) -> Option<Self>;

    /// Returns the next sibling node.
    fn next_sibling(&self) -> Option<Self>;

    /// Returns the first child node.
    fn first_child(&self) -> Option<Self>;
}

/// An iterator over the siblings of a node.
#[derive(Debug)]
pub struct Siblings<'a, T>
where
    T: NodeIterable<'a>,
{
    next: Option<T>,
    _marker: PhantomData<&'a T>,
}

/// An iterator over the ancestors of a node.
#[derive(Debug)]
pub struct Ancestors<'a, T>
where
    T: NodeIterable<'a>,
{
    next: Option<T>,
    _marker: PhantomData<&'a T>,
}

/// An iterator over all elements of a subtree (depth-first search algorithm).
///
/// The iteration never leaves the subtree of the starting node: its
/// following siblings are not visited.
#[derive(Debug)]
pub struct Traverse<'a, T>
where
    T: NodeIterable<'a>,
{
    start: T,
    next: Option<T>,
    _marker: PhantomData<&'a T>,
}

/// An iterator over the nodes matched by an XPath query.
///
/// This is a safe wrapper around ffi::ly_set. The set container is released
/// on drop, the nodes themselves stay owned by their tree.
#[derive(Debug)]
pub struct Set<'a, T>
where
    T: NodeIterable<'a>,
{
    container: &'a T::Container,
    raw: *mut ffi::ly_set,
    index: usize,
}

/// An iterator over the modules loaded in a context.
#[derive(Debug)]
pub struct SchemaModules<'a> {
    context: &'a Context,
    index: u32,
}

/// An iterator over the search directories of a context.
#[derive(Debug)]
pub struct Searchdirs<'a> {
    raw: *const *const c_char,
    _marker: PhantomData<&'a Context>,
}

// ===== impl Siblings =====

impl<'a, T> Siblings<'a, T>
where
    T: NodeIterable<'a>,
{
    pub fn new(next: Option<T>) -> Siblings<'a, T> {
        Siblings {
            next,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Siblings<'a, T>
where
    T: NodeIterable<'a>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let node = self.next.take()?;
        self.next = node.next_sibling();
        Some(node)
    }
}

// ===== impl Ancestors =====

impl<'a, T> Ancestors<'a, T>
where
    T: NodeIterable<'a>,
{
    pub fn new(next: Option<T>) -> Ancestors<'a, T> {
        Ancestors {
            next,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Ancestors<'a, T>
where
    T: NodeIterable<'a>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let node = self.next.take()?;
        self.next = node.parent();
        Some(node)
    }
}

// ===== impl Traverse =====

impl<'a, T> Traverse<'a, T>
where
    T: NodeIterable<'a>,
{
    pub fn new(start: T) -> Traverse<'a, T> {
        let next = Some(start.clone());

        Traverse {
            start,
            next,
            _marker: PhantomData,
        }
    }

    // Children first, then siblings, then the siblings of the closest
    // ancestor that has one, stopping at the starting node.
    fn successor(&self, node: &T) -> Option<T> {
        if let Some(child) = node.first_child() {
            return Some(child);
        }

        let mut node = node.clone();
        loop {
            if node == self.start {
                return None;
            }
            if let Some(sibling) = node.next_sibling() {
                return Some(sibling);
            }
            node = node.parent()?;
        }
    }
}

impl<'a, T> Iterator for Traverse<'a, T>
where
    T: NodeIterable<'a>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let node = self.next.take()?;
        self.next = self.successor(&node);
        Some(node)
    }
}

// ===== impl Set =====

impl<'a, T> Set<'a, T>
where
    T: NodeIterable<'a>,
{
    /// Wrap a set returned by libyang, taking ownership of it. A null set is
    /// treated as empty.
    pub(crate) fn new(
        container: &'a T::Container,
        raw: *mut ffi::ly_set,
    ) -> Set<'a, T> {
        Set {
            container,
            raw,
            index: 0,
        }
    }

    fn total(&self) -> usize {
        if self.raw.is_null() {
            0
        } else {
            unsafe { (*self.raw).count as usize }
        }
    }
}

impl<'a, T> Iterator for Set<'a, T>
where
    T: NodeIterable<'a>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.index >= self.total() {
            return None;
        }

        let objs = unsafe { (*self.raw).__bindgen_anon_1.objs };
        let robj = unsafe { *objs.add(self.index) };
        self.index += 1;
        unsafe { T::from_raw_opt(self.container, robj as *mut T::CType) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, T> Drop for Set<'a, T>
where
    T: NodeIterable<'a>,
{
    fn drop(&mut self) {
        if !self.raw.is_null() {
            unsafe { ffi::ly_set_free(self.raw, None) };
        }
    }
}

// ===== impl SchemaModules =====

impl<'a> SchemaModules<'a> {
    pub fn new(context: &'a Context) -> SchemaModules<'a> {
        SchemaModules { context, index: 0 }
    }
}

impl<'a> Iterator for SchemaModules<'a> {
    type Item = SchemaModule<'a>;

    fn next(&mut self) -> Option<SchemaModule<'a>> {
        let rmodule = unsafe {
            ffi::ly_ctx_get_module_iter(self.context.raw, &mut self.index)
        };
        unsafe { SchemaModule::from_raw_opt(self.context, rmodule) }
    }
}

// ===== impl Searchdirs =====

impl<'a> Searchdirs<'a> {
    pub fn new(context: &'a Context) -> Searchdirs<'a> {
        let raw = unsafe { ffi::ly_ctx_get_searchdirs(context.raw) };
        Searchdirs {
            raw,
            _marker: PhantomData,
        }
    }
}

impl<'a> Iterator for Searchdirs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.raw.is_null() {
            return None;
        }

        // The array is NULL-terminated.
        let rdir = unsafe { *self.raw };
        if rdir.is_null() {
            self.raw = std::ptr::null();
            return None;
        }
        self.raw = unsafe { self.raw.add(1) };
        Some(char_ptr_to_str(rdir))
    }
}
