//! Error types for ZEL container parsing and decoding.

use thiserror::Error;

/// Result alias for fallible ZEL operations.
pub type Result<T> = std::result::Result<T, ZelError>;

/// Errors that can occur when opening or decoding a ZEL container.
///
/// Variants correspond one-to-one with the error kinds a ZEL decoder is
/// expected to distinguish: a caller can match on the variant to decide
/// whether a problem is a programming error (`InvalidArgument`), a format
/// mismatch (`InvalidMagic`, `UnsupportedVersion`, `UnsupportedFormat`), a
/// malformed file (`CorruptData`, `OutOfBounds`), a resource limit
/// (`OutOfMemory`), an I/O failure (`Io`), or a decoder bug (`Internal`).
#[derive(Debug, Error)]
pub enum ZelError {
	/// A caller-supplied argument was invalid independent of file content.
	#[error("invalid argument: {0}")]
	InvalidArgument(&'static str),

	/// The file did not start with the `"ZEL0"` magic.
	#[error("invalid magic: expected \"ZEL0\", found {found:02X?}")]
	InvalidMagic {
		/// The four bytes actually found at the start of the file.
		found: [u8; 4],
	},

	/// The file declares a format version this decoder does not support.
	#[error("unsupported version: {version}")]
	UnsupportedVersion {
		/// The version field read from the file header.
		version: u16,
	},

	/// The file uses a feature this decoder recognizes but does not support.
	#[error("unsupported format: {reason}")]
	UnsupportedFormat {
		/// Human-readable description of the unsupported feature.
		reason: &'static str,
	},

	/// The file is structurally inconsistent (bad sizes, bad counts, etc).
	#[error("corrupt data: {reason}")]
	CorruptData {
		/// Human-readable description of the inconsistency.
		reason: &'static str,
	},

	/// An internal allocation could not be satisfied.
	#[error("out of memory")]
	OutOfMemory,

	/// A requested index or range fell outside the bounds it must fit in.
	#[error("out of bounds: {reason}")]
	OutOfBounds {
		/// Human-readable description of what was out of bounds.
		reason: &'static str,
	},

	/// Reading from the underlying byte source failed.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// A decoder invariant was violated; this indicates a bug in the decoder
	/// rather than a malformed file.
	#[error("internal error: {0}")]
	Internal(&'static str),
}

impl ZelError {
	/// Returns the stable, locale-independent identifier for this error's
	/// kind, e.g. `"ZEL_ERR_CORRUPT_DATA"`.
	///
	/// This mirrors what a C ABI's `result-to-string` function would return
	/// for its error enum: a tag suitable for logging or for callers that
	/// need to compare kinds without matching on `Display` text.
	pub fn code_name(&self) -> &'static str {
		match self {
			Self::InvalidArgument(_) => "ZEL_ERR_INVALID_ARGUMENT",
			Self::InvalidMagic { .. } => "ZEL_ERR_INVALID_MAGIC",
			Self::UnsupportedVersion { .. } => "ZEL_ERR_UNSUPPORTED_VERSION",
			Self::UnsupportedFormat { .. } => "ZEL_ERR_UNSUPPORTED_FORMAT",
			Self::CorruptData { .. } => "ZEL_ERR_CORRUPT_DATA",
			Self::OutOfMemory => "ZEL_ERR_OUT_OF_MEMORY",
			Self::OutOfBounds { .. } => "ZEL_ERR_OUT_OF_BOUNDS",
			Self::Io(_) => "ZEL_ERR_IO",
			Self::Internal(_) => "ZEL_ERR_INTERNAL",
		}
	}
}
