//! Prelude module for `zel_types`.
//!
//! This module provides a convenient way to import commonly used types.
//!
//! # Examples
//!
//! ```no_run
//! use zel_types::prelude::*;
//!
//! let data = std::fs::read("animation.zel").unwrap();
//! let ctx = Context::open_memory(&data).unwrap();
//! println!("{}x{}, {} frames", ctx.width(), ctx.height(), ctx.frame_count());
//! ```

#[doc(inline)]
pub use crate::codec::ZoneCodec;
#[doc(inline)]
pub use crate::context::Context;
#[doc(inline)]
pub use crate::error::{Result, ZelError};
#[doc(inline)]
pub use crate::frame::FrameZoneStream;
#[doc(inline)]
pub use crate::header::{
	ColorEncoding, ColorFormat, CompressionType, FileHeader, FrameFlags, FrameHeader,
	FrameIndexEntry, HeaderFlags, PaletteHeader, PaletteType,
};
#[doc(inline)]
pub use crate::layout::ZoneLayout;
#[doc(inline)]
pub use crate::source::{ByteSource, ByteStream};
