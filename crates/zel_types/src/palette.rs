//! Palette resolution: the global palette's memoized encoding conversion,
//! and per-frame local palette parsing.

use std::cell::{Ref, RefCell};

use crate::error::{Result, ZelError};
use crate::header::{ColorEncoding, PaletteHeader, swap_rgb565};
use crate::range::fits;
use crate::source::ByteSlice;

/// The file's shared default palette, decoded once at context-build time.
///
/// The on-disk bytes are parsed into an owned `Vec<u16>` immediately
/// (rather than kept as a raw byte slice reinterpreted later) because Rust
/// cannot soundly reinterpret an arbitrarily-aligned `&[u8]` as `&[u16]`;
/// see `DESIGN.md`. The decoded entries stay in the palette's *source*
/// encoding — re-encoding to whatever the caller requests happens lazily
/// and is cached in [`PaletteCache`].
#[derive(Debug, Clone)]
pub struct GlobalPalette {
	entries: Vec<u16>,
	encoding: ColorEncoding,
}

impl GlobalPalette {
	/// Decodes a global palette's raw little-endian `u16` entries.
	pub fn decode(bytes: &[u8], count: u16, encoding: ColorEncoding) -> Self {
		let entries = (0..count as usize)
			.map(|i| u16::from_le_bytes([bytes[i * 2], bytes[i * 2 + 1]]))
			.collect();
		Self { entries, encoding }
	}

	/// The palette's encoding as stored in the file.
	pub fn source_encoding(&self) -> ColorEncoding {
		self.encoding
	}

	/// Number of entries in the palette.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if the palette has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Memoized re-encoding of a [`GlobalPalette`] to an output color encoding.
///
/// Mirrors the C decoder's cache: conversion only happens again when the
/// requested output encoding changes, not on every decode call.
#[derive(Debug, Default)]
pub struct PaletteCache {
	converted_encoding: Option<ColorEncoding>,
	converted: Vec<u16>,
}

/// A resolved, read-only view of palette entries in the caller's requested
/// output encoding.
///
/// Borrows either straight from the palette's already-matching entries or
/// from a [`RefCell`]-guarded cache/scratch buffer, unifying both behind
/// `Deref<Target = [u16]>` so callers never need to know which case applies.
pub enum PaletteRef<'a> {
	/// No re-encoding was needed; entries are used as stored.
	Direct(&'a [u16]),
	/// Borrowed from a memoized or scratch buffer that needed conversion.
	Cached(Ref<'a, Vec<u16>>),
}

impl std::ops::Deref for PaletteRef<'_> {
	type Target = [u16];

	fn deref(&self) -> &[u16] {
		match self {
			Self::Direct(s) => s,
			Self::Cached(r) => r.as_slice(),
		}
	}
}

fn convert(src: &[u16], src_encoding: ColorEncoding, dst_encoding: ColorEncoding, out: &mut Vec<u16>) {
	out.clear();
	if src_encoding == dst_encoding {
		out.extend_from_slice(src);
	} else {
		out.extend(src.iter().map(|&v| swap_rgb565(v)));
	}
}

/// Resolves the global palette to `desired`, using and updating `cache`.
pub fn resolve_global<'a>(
	palette: &'a GlobalPalette,
	desired: ColorEncoding,
	cache: &'a RefCell<PaletteCache>,
) -> PaletteRef<'a> {
	if desired == palette.encoding {
		return PaletteRef::Direct(&palette.entries);
	}

	{
		let needs_refresh = {
			let cache_ref = cache.borrow();
			cache_ref.converted_encoding != Some(desired)
		};
		if needs_refresh {
			let mut cache_mut = cache.borrow_mut();
			convert(&palette.entries, palette.encoding, desired, &mut cache_mut.converted);
			cache_mut.converted_encoding = Some(desired);
		}
	}

	PaletteRef::Cached(Ref::map(cache.borrow(), |c| &c.converted))
}

/// Resolves a frame's local palette into `scratch`, applying any requested
/// re-encoding in place.
///
/// Unlike the global palette, the local palette is always freshly parsed
/// and decoded: there is no cross-call cache, only a reused scratch buffer
/// that the next call is free to overwrite.
pub fn resolve_local<'a>(
	header: &PaletteHeader,
	raw_entries: &[u8],
	desired: ColorEncoding,
	scratch: &'a RefCell<Vec<u16>>,
) -> PaletteRef<'a> {
	let source_encoding = ColorEncoding::try_from(header.color_encoding)
		.expect("color encoding already validated during frame-palette lookup");

	let mut scratch_mut = scratch.borrow_mut();
	scratch_mut.clear();
	scratch_mut.extend((0..header.entry_count as usize).map(|i| {
		let raw = u16::from_le_bytes([raw_entries[i * 2], raw_entries[i * 2 + 1]]);
		if source_encoding == desired { raw } else { swap_rgb565(raw) }
	}));
	drop(scratch_mut);

	PaletteRef::Cached(scratch.borrow())
}

/// Parses and range-validates a local palette header from within a frame's
/// own byte region, returning the palette header and the byte range (within
/// the frame) its raw, still source-encoded entries occupy.
///
/// Also returns the offset just past the palette's entries, where the
/// frame's zone chunk stream begins.
pub fn parse_local_palette_region(
	frame_bytes: &ByteSlice<'_>,
	palette_header_offset: u64,
	frame_size: u64,
) -> Result<(PaletteHeader, std::ops::Range<usize>, u64)> {
	let bytes = frame_bytes.as_slice();

	if !fits(palette_header_offset, PaletteHeader::SIZE as u64, frame_size) {
		return Err(ZelError::CorruptData { reason: "local palette header does not fit in frame" });
	}
	let ph_start = palette_header_offset as usize;
	let header = PaletteHeader::parse(&bytes[ph_start..ph_start + PaletteHeader::SIZE]);

	if (header.header_size as usize) < PaletteHeader::SIZE {
		return Err(ZelError::CorruptData { reason: "local palette header_size too small" });
	}
	if header.entry_count == 0 {
		return Err(ZelError::CorruptData { reason: "local palette has zero entries" });
	}
	ColorEncoding::try_from(header.color_encoding)?;

	let data_offset = palette_header_offset + header.header_size as u64;
	let data_bytes = header.entry_count as u64 * 2;
	if !fits(data_offset, data_bytes, frame_size) {
		return Err(ZelError::CorruptData { reason: "local palette entries do not fit in frame" });
	}

	let start = data_offset as usize;
	let end = start + data_bytes as usize;
	Ok((header, start..end, data_offset + data_bytes))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_bytes(values: &[u16]) -> Vec<u8> {
		values.iter().flat_map(|v| v.to_le_bytes()).collect()
	}

	#[test]
	fn global_palette_direct_when_encoding_matches() {
		let bytes = sample_bytes(&[0x1234, 0x5678]);
		let palette = GlobalPalette::decode(&bytes, 2, ColorEncoding::Rgb565Le);
		let cache = RefCell::new(PaletteCache::default());
		let resolved = resolve_global(&palette, ColorEncoding::Rgb565Le, &cache);
		assert!(matches!(resolved, PaletteRef::Direct(_)));
		assert_eq!(&*resolved, &[0x1234, 0x5678]);
	}

	#[test]
	fn global_palette_converts_and_caches() {
		let bytes = sample_bytes(&[0x1234, 0x5678]);
		let palette = GlobalPalette::decode(&bytes, 2, ColorEncoding::Rgb565Le);
		let cache = RefCell::new(PaletteCache::default());

		let resolved = resolve_global(&palette, ColorEncoding::Rgb565Be, &cache);
		assert_eq!(&*resolved, &[0x3412, 0x7856]);
		drop(resolved);

		// second call with same desired encoding must hit the cache, not
		// recompute (behaviorally verified by still returning correct data)
		let resolved_again = resolve_global(&palette, ColorEncoding::Rgb565Be, &cache);
		assert_eq!(&*resolved_again, &[0x3412, 0x7856]);
	}

	#[test]
	fn local_palette_resolves_from_scratch() {
		let mut header_bytes = vec![0u8; PaletteHeader::SIZE];
		header_bytes[0] = 1; // local
		header_bytes[1] = PaletteHeader::SIZE as u8;
		header_bytes[2..4].copy_from_slice(&2u16.to_le_bytes());
		header_bytes[4] = 0; // Rgb565Le
		let header = PaletteHeader::parse(&header_bytes);

		let entries = sample_bytes(&[0x0F0F, 0x00FF]);
		let scratch = RefCell::new(Vec::new());
		let resolved = resolve_local(&header, &entries, ColorEncoding::Rgb565Be, &scratch);
		assert_eq!(&*resolved, &[swap_rgb565(0x0F0F), swap_rgb565(0x00FF)]);
	}
}
