//! Polymorphic byte access over a whole in-memory buffer or a caller-driven
//! stream.

use crate::error::{Result, ZelError};
use crate::range::fits;

/// A caller-supplied stream of bytes, read by absolute offset.
///
/// Implementors own whatever resource backs the stream (a file handle, a
/// socket, a flash-memory driver) the way a C `ZELInputStream`'s `userData`
/// does; `Context::open_stream` requires `'static` so the stream can be
/// boxed without tying its lifetime to the buffer it owns.
pub trait ByteStream {
	/// Total size of the stream in bytes.
	fn size(&self) -> u64;

	/// Reads `dst.len()` bytes starting at `offset`.
	///
	/// Implementations should return an error if fewer bytes are available
	/// than requested; a short read is always a bug in the caller, since
	/// every read in this crate is preceded by a [`fits`] check against
	/// `size()`.
	fn read_at(&mut self, offset: u64, dst: &mut [u8]) -> Result<()>;
}

/// A byte source backing a [`Context`](crate::context::Context): either a
/// whole in-memory buffer borrowed for the context's lifetime, or a stream
/// read on demand.
pub enum ByteSource<'a> {
	/// The entire file is already in memory; reads borrow from it directly.
	Whole(&'a [u8]),
	/// The file is read on demand through a caller-supplied stream; reads
	/// copy into owned buffers.
	Stream(Box<dyn ByteStream + 'a>),
}

impl<'a> ByteSource<'a> {
	/// Total size of the underlying data, in bytes.
	pub fn size(&self) -> u64 {
		match self {
			Self::Whole(data) => data.len() as u64,
			Self::Stream(stream) => stream.size(),
		}
	}

	/// Reads `length` bytes at `offset`, returning a borrowed slice for a
	/// whole-buffer source or an owned copy for a stream.
	///
	/// Returns [`ZelError::OutOfBounds`] if the range does not fit within
	/// the source's total size.
	pub fn read_at(&mut self, offset: u64, length: u64) -> Result<ByteSlice<'a>> {
		if !fits(offset, length, self.size()) {
			return Err(ZelError::OutOfBounds { reason: "read range exceeds source size" });
		}
		match self {
			Self::Whole(data) => {
				let start = offset as usize;
				let end = start + length as usize;
				Ok(ByteSlice::Borrowed(&data[start..end]))
			}
			Self::Stream(stream) => {
				let mut buf = vec![0u8; length as usize];
				stream.read_at(offset, &mut buf)?;
				Ok(ByteSlice::Owned(buf))
			}
		}
	}
}

/// A run of bytes that is either borrowed from a whole in-memory buffer or
/// owned because it was copied out of a stream.
pub enum ByteSlice<'a> {
	/// Borrowed directly from the source buffer; no copy was made.
	Borrowed(&'a [u8]),
	/// Copied out of a stream.
	Owned(Vec<u8>),
}

impl ByteSlice<'_> {
	/// Returns the bytes as a slice, regardless of ownership.
	pub fn as_slice(&self) -> &[u8] {
		match self {
			Self::Borrowed(s) => s,
			Self::Owned(v) => v,
		}
	}

	/// Number of bytes held.
	pub fn len(&self) -> usize {
		self.as_slice().len()
	}

	/// Returns `true` if this slice holds no bytes.
	pub fn is_empty(&self) -> bool {
		self.as_slice().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct VecStream(Vec<u8>);

	impl ByteStream for VecStream {
		fn size(&self) -> u64 {
			self.0.len() as u64
		}

		fn read_at(&mut self, offset: u64, dst: &mut [u8]) -> Result<()> {
			let start = offset as usize;
			let end = start + dst.len();
			if end > self.0.len() {
				return Err(ZelError::OutOfBounds { reason: "stream read past end" });
			}
			dst.copy_from_slice(&self.0[start..end]);
			Ok(())
		}
	}

	#[test]
	fn whole_source_borrows() {
		let data = [1u8, 2, 3, 4, 5];
		let mut source = ByteSource::Whole(&data);
		let slice = source.read_at(1, 3).unwrap();
		assert!(matches!(slice, ByteSlice::Borrowed(_)));
		assert_eq!(slice.as_slice(), &[2, 3, 4]);
	}

	#[test]
	fn stream_source_copies() {
		let mut source = ByteSource::Stream(Box::new(VecStream(vec![9, 8, 7, 6])));
		let slice = source.read_at(1, 2).unwrap();
		assert!(matches!(slice, ByteSlice::Owned(_)));
		assert_eq!(slice.as_slice(), &[8, 7]);
	}

	#[test]
	fn read_past_end_is_out_of_bounds() {
		let data = [1u8, 2, 3];
		let mut source = ByteSource::Whole(&data);
		assert!(matches!(source.read_at(2, 5), Err(ZelError::OutOfBounds { .. })));
	}
}
