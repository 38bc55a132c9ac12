//
// Copyright (c) The yang-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Textual reports over contexts, modules, data and schema trees.
//!
//! These are the routines the demo programs print with. They write into any
//! [`Write`] sink, one line per visited item.

use std::io::{self, Write};

use crate::context::Context;
use crate::data::DataNodeRef;
use crate::error::Error;
use crate::iter::NodeIterable;
use crate::schema::SchemaNode;

/// Print every field of an error snapshot. Missing strings print empty.
pub fn write_error<W: Write>(out: &mut W, error: &Error) -> io::Result<()> {
    writeln!(out, "err: {}", error.errcode)?;
    writeln!(out, "vecode: {}", error.vecode)?;
    writeln!(out, "errmsg: {}", error.msg.as_deref().unwrap_or_default())?;
    writeln!(out, "errpath: {}", error.path.as_deref().unwrap_or_default())?;
    writeln!(
        out,
        "errapptag: {}",
        error.apptag.as_deref().unwrap_or_default()
    )
}

/// Print the search directories of the context, one per line.
pub fn write_searchdirs<W: Write>(out: &mut W, ctx: &Context) -> io::Result<()> {
    for dir in ctx.searchdirs() {
        writeln!(out, "{}", dir)?;
    }
    Ok(())
}

/// Print every module loaded in the context.
pub fn write_modules<W: Write>(out: &mut W, ctx: &Context) -> io::Result<()> {
    for module in ctx.modules() {
        writeln!(
            out,
            "module: {} prefix: {} type: {}",
            module.name(),
            module.prefix(),
            module.module_type()
        )?;
    }
    Ok(())
}

/// Walk the data subtree of `dnode` depth-first, printing the schema name and
/// kind of every node, plus the value of leaves and leaf-lists.
pub fn write_tree<W: Write>(
    out: &mut W,
    dnode: &DataNodeRef<'_, '_>,
) -> io::Result<()> {
    for dnode in dnode.traverse() {
        let snode = dnode.schema();
        writeln!(out, "name: {} type: {}", snode.name(), snode.kind())?;
        if let Some(value) = dnode.value_canonical() {
            writeln!(out, "node {} has value {}", snode.name(), value)?;
        }
    }
    Ok(())
}

/// Print `dnode` and the siblings that follow it, naming their common parent.
pub fn write_siblings<W: Write>(
    out: &mut W,
    dnode: &DataNodeRef<'_, '_>,
) -> io::Result<()> {
    let parent = match dnode.parent() {
        Some(parent) => parent.schema().name().to_owned(),
        None => "top level".to_owned(),
    };

    for dnode in dnode.inclusive_siblings() {
        let snode = dnode.schema();
        writeln!(
            out,
            "child of {} is: {} type: {}",
            parent,
            snode.name(),
            snode.kind()
        )?;
    }
    Ok(())
}

/// Walk the schema subtree of `snode` depth-first.
pub fn write_schema_tree<W: Write>(
    out: &mut W,
    snode: &SchemaNode<'_>,
) -> io::Result<()> {
    for snode in snode.traverse() {
        writeln!(out, "schema name: {} type: {}", snode.name(), snode.kind())?;
    }
    Ok(())
}

/// Print the nodes matched by an XPath query along with their paths.
///
/// Returns the number of printed nodes.
pub fn write_node_set<'a, 'b, W, I>(out: &mut W, nodes: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = DataNodeRef<'a, 'b>>,
    'b: 'a,
{
    let mut count = 0;
    for dnode in nodes {
        let snode = dnode.schema();
        writeln!(
            out,
            "name: {} type: {} path: {}",
            snode.name(),
            snode.kind(),
            dnode.path()
        )?;
        count += 1;
    }
    Ok(count)
}
