//! Prelude module for `zel_internal`.
//!
//! This module provides a convenient way to import commonly used types and
//! traits.
//!
//! # Examples
//!
//! ```rust
//! use zel_internal::prelude::*;
//!
//! let _ = ZelError::OutOfMemory;
//! ```

// Re-export everything from zel_types::prelude
#[doc(inline)]
pub use zel_types::prelude::*;

// Re-export the entire zel_types module for advanced usage
#[doc(inline)]
pub use zel_types;
