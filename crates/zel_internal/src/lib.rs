//! Internal crate for `zel-rs`.
//!
//! This crate is separated from `zel_types` the way `dvine-rs` separates its
//! internal crate from its type crate, keeping the door open for an
//! alternative root crate (bindings, a WASM shim) without duplicating the
//! decoder itself.
//!
//! # Examples
//!
//! ```rust
//! use zel_internal::prelude::*;
//!
//! let data = b"not a real ZEL file";
//! assert!(Context::open_memory(data).is_err());
//! ```

/// `use zel_internal::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export zel_types for convenience
pub use zel_types;
