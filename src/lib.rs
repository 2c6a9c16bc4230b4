//! This crate reads the Vulkan XML registry and resolves it into a model
//! ready for binding generation.
//!
//! Loading happens in two stages. [`parse_file`] reads the document into
//! [`RawRegistry`], a faithful record of its elements and attributes.
//! [`Registry::build`] then normalizes names and types, links enums to
//! their value sets and bitmasks, and drops aliases and disabled
//! extensions. [`load_file`] does both.
//!
//! A [`Selection`] of features, extension authors and platforms picks the
//! part of the registry bindings should be generated for:
//!
//! ```no_run
//! use vk_bindgen::{load_file, Selection, DEFAULT_API};
//!
//! let registry = load_file("vk.xml".as_ref(), DEFAULT_API)?;
//! let enabled = Selection::new()
//!     .feature("VK_VERSION_1_0")
//!     .author("KHR")
//!     .apply(&registry);
//! for command in enabled.commands() {
//!     println!("{}", command.name);
//! }
//! # Ok::<(), vk_bindgen::Error>(())
//! ```

#[cfg(feature = "serialize")]
#[macro_use]
extern crate serde_derive;

#[macro_use]
mod parse;
mod error;
mod filter;
mod model;
pub mod normalize;
mod partition;
mod registry;
mod types;

use std::path::Path;

pub use error::*;
pub use filter::*;
pub use model::*;
pub use parse::parse_file;
pub use parse::parse_stream;
pub use partition::{Named, Partition};
pub use registry::*;
pub use types::*;

/// Reads the document at `path` and builds the registry for `api`.
pub fn load_file(path: &Path, api: &str) -> Result<Registry, Error> {
    let raw = parse_file(path)?;
    Ok(Registry::build_for_api(&raw, api)?)
}
