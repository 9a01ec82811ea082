#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `zel-rs` decodes the ZEL container format: palette-indexed animated
//! raster imagery for embedded LCD/OLED displays.
//!
//! The decoder only reads already-encoded ZEL files; it has no encoder and
//! no dependency on the display hardware it was designed for. See
//! [`zel_types::context::Context`] for the entry point.

pub use zel_internal::*;
