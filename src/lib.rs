//
// Copyright (c) The yang-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Walk YANG schema and data trees through [libyang3].
//!
//! The crate opens a libyang context over a schema search directory, looks up
//! or loads YANG modules, parses instance data and then walks the resulting
//! trees: depth-first, sibling by sibling, or through XPath queries. All YANG
//! semantics (schema compilation, data parsing, validation and XPath
//! evaluation) are performed by libyang itself.
//!
//! [libyang3]: https://github.com/CESNET/libyang/tree/master
//!
//! ## Feature flags
//! By default, the pre-generated FFI bindings of [libyang3-sys] are used and
//! libyang3 is linked dynamically. The following feature flags can be used to
//! change that behavior:
//! * **bundled**: build libyang3 from the sources and link it statically.
//! * **bindgen**: generate the C FFI bindings at build time.
//!
//! [libyang3-sys]: https://docs.rs/libyang3-sys
//!
//! ## Example
//!
//! ```no_run
//! use yangwalk::context::{Context, ContextFlags};
//! use yangwalk::data::{DataFormat, DataParserFlags, DataTree, DataValidationFlags};
//!
//! let mut ctx = Context::open("./assets/yang", ContextFlags::NO_YANGLIBRARY)?;
//! ctx.get_or_load_module("turing-machine", None)?;
//! let dtree = DataTree::parse_path(
//!     &ctx,
//!     "./assets/data/turing-machine.xml",
//!     DataFormat::XML,
//!     DataParserFlags::NO_STATE,
//!     DataValidationFlags::NO_STATE,
//! )?;
//! for dnode in dtree.traverse() {
//!     println!("{} {:?}", dnode.path(), dnode.value_canonical());
//! }
//! # Ok::<(), yangwalk::Error>(())
//! ```
//!
//! See the programs under `demos/` for complete walkthroughs.

mod error;

pub mod client;
pub mod context;
pub mod data;
pub mod iter;
pub mod logging;
pub mod schema;
pub mod utils;

pub use crate::error::{Error, Result};

// Re-export the raw FFI bindings for convenience.
pub use libyang3_sys as ffi;
