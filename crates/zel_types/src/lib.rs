//! Core types and decoder for the ZEL container format.
//!
//! ZEL packages palette-indexed animated raster imagery for constrained
//! LCD/OLED displays: a fixed-size header, an optional global palette, a
//! frame index table, and per-frame zone-chunked pixel data that can carry
//! its own local palette and compression.
//!
//! # Examples
//!
//! ```rust
//! use zel_types::context::Context;
//!
//! let err = Context::open_memory(b"too short").unwrap_err();
//! assert!(matches!(err, zel_types::error::ZelError::InvalidArgument(_)));
//! ```

pub mod blit;
pub mod codec;
pub mod context;
pub mod error;
pub mod frame;
pub mod header;
pub mod layout;
pub mod palette;
pub mod range;
pub mod source;
pub mod timeline;

pub mod prelude;

pub use context::Context;
pub use error::{Result, ZelError};
pub use header::{ColorEncoding, ColorFormat, CompressionType, PaletteType};
