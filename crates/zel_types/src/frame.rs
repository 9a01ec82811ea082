//! Per-decode frame zone stream: locates a frame's zone chunks and decodes
//! them into caller-provided pixel buffers.

use crate::blit;
use crate::codec::ZoneCodec;
use crate::context::Context;
use crate::error::{Result, ZelError};
use crate::header::{ColorEncoding, CompressionType, FrameHeader, PaletteHeader};
use crate::palette::{self, PaletteRef};
use crate::range::fits;
use crate::source::ByteSlice;

/// An ephemeral view over one frame's zone data, opened fresh for each
/// decode call.
///
/// Holds the frame's header and the byte region its zone chunks live in
/// (borrowed from a whole in-memory source, or copied out of a stream),
/// plus the offset the local palette (if any) was skipped to reach the
/// first zone chunk.
pub struct FrameZoneStream<'ctx, 'a> {
	ctx: &'ctx Context<'a>,
	frame_bytes: ByteSlice<'a>,
	header: FrameHeader,
	compression: CompressionType,
	zone_data_offset: u64,
	frame_size: u64,
	local_palette: Option<(PaletteHeader, std::ops::Range<usize>)>,
}

impl<'ctx, 'a> FrameZoneStream<'ctx, 'a> {
	/// Opens the zone stream for `frame_index`, validating the frame header,
	/// skipping any local palette, and checking the frame's declared zone
	/// count against the file's zone layout.
	pub fn open(ctx: &'ctx Context<'a>, frame_index: u32) -> Result<Self> {
		let entry = ctx.frame_index_entry(frame_index)?;
		let frame_offset = entry.frame_offset as u64;
		let frame_size = entry.frame_size as u64;
		if frame_size == 0 {
			return Err(ZelError::CorruptData { reason: "frame size is zero" });
		}

		let frame_bytes = ctx.read_source_bytes(frame_offset, frame_size)?;

		if !fits(0, FrameHeader::SIZE as u64, frame_size) {
			return Err(ZelError::CorruptData { reason: "frame too small to hold a frame header" });
		}
		let header = FrameHeader::parse(&frame_bytes.as_slice()[0..FrameHeader::SIZE]);
		if (header.header_size as u64) < FrameHeader::SIZE as u64 {
			return Err(ZelError::CorruptData { reason: "frame header_size is smaller than the header" });
		}

		let mut cursor = header.header_size as u64;
		let mut local_palette = None;

		if header.flags.has_local_palette {
			if header.local_palette_entry_count == 0 {
				return Err(ZelError::CorruptData {
					reason: "frame flags claim a local palette but entry count is zero",
				});
			}
			let (ph, range, next_cursor) = palette::parse_local_palette_region(&frame_bytes, cursor, frame_size)?;
			local_palette = Some((ph, range));
			cursor = next_cursor;
		}

		if header.zone_count != ctx.layout().zone_count {
			return Err(ZelError::CorruptData {
				reason: "frame zone_count does not match the file's zone layout",
			});
		}

		let compression = CompressionType::try_from(header.compression_type)?;

		log::trace!(
			"opened frame {frame_index}: {} zones, compression {:?}",
			header.zone_count,
			compression
		);

		Ok(Self {
			ctx,
			frame_bytes,
			header,
			compression,
			zone_data_offset: cursor,
			frame_size,
			local_palette,
		})
	}

	/// Number of zones in this frame.
	pub fn zone_count(&self) -> u16 {
		self.header.zone_count
	}

	/// Whether this frame can be decoded without reference to another frame.
	pub fn is_keyframe(&self) -> bool {
		self.header.flags.keyframe
	}

	/// Resolves this frame's effective palette (local if present, otherwise
	/// the file's global palette) to `desired`'s encoding.
	pub fn resolve_palette(&self, desired: ColorEncoding) -> Result<PaletteRef<'ctx>> {
		match &self.local_palette {
			Some((header, range)) => {
				let raw = &self.frame_bytes.as_slice()[range.clone()];
				Ok(palette::resolve_local(header, raw, desired, self.ctx.local_scratch()))
			}
			None => self.ctx.resolve_global_palette(desired),
		}
	}

	/// Walks every zone chunk in cursor order, invoking `f` with the zone
	/// index and its still-compressed payload bytes.
	///
	/// After the last zone chunk is visited, the cursor must land exactly
	/// on the end of the frame's data region; any gap or overlap is
	/// reported as [`ZelError::CorruptData`].
	fn for_each_zone_chunk<F>(&self, mut f: F) -> Result<()>
	where
		F: FnMut(u16, &[u8]) -> Result<()>,
	{
		let bytes = self.frame_bytes.as_slice();
		let mut cursor = self.zone_data_offset;

		for zone_index in 0..self.header.zone_count {
			let payload = self.read_chunk_at(bytes, &mut cursor)?;
			f(zone_index, payload)?;
		}

		if cursor != self.frame_size {
			return Err(ZelError::CorruptData {
				reason: "zone chunks did not exactly cover the frame's data region",
			});
		}
		Ok(())
	}

	/// Reads one `u32`-length-prefixed zone chunk at `*cursor`, advancing it
	/// past the chunk, and returns the chunk's payload slice.
	fn read_chunk_at<'b>(&self, bytes: &'b [u8], cursor: &mut u64) -> Result<&'b [u8]> {
		if !fits(*cursor, 4, self.frame_size) {
			return Err(ZelError::CorruptData { reason: "zone chunk length prefix does not fit in frame" });
		}
		let len_start = *cursor as usize;
		let chunk_len =
			u32::from_le_bytes(bytes[len_start..len_start + 4].try_into().expect("4-byte slice")) as u64;
		if chunk_len == 0 {
			return Err(ZelError::CorruptData { reason: "zone chunk declares a zero payload size" });
		}

		let payload_offset = *cursor + 4;
		if !fits(payload_offset, chunk_len, self.frame_size) {
			return Err(ZelError::CorruptData { reason: "zone chunk payload does not fit in frame" });
		}

		let payload_start = payload_offset as usize;
		let payload = &bytes[payload_start..payload_start + chunk_len as usize];
		*cursor = payload_offset + chunk_len;
		Ok(payload)
	}

	/// Sequentially scans zone chunks from the start of zone data until
	/// `target` is reached, returning its payload without requiring the
	/// remaining chunks to be visited.
	fn locate_zone_chunk(&self, target: u16) -> Result<&[u8]> {
		let bytes = self.frame_bytes.as_slice();
		let mut cursor = self.zone_data_offset;
		for zone_index in 0..=target {
			let payload = self.read_chunk_at(bytes, &mut cursor)?;
			if zone_index == target {
				return Ok(payload);
			}
		}
		unreachable!("loop always returns once zone_index reaches a validated target")
	}

	fn validate_zone_index(&self, zone_index: u32) -> Result<u16> {
		if zone_index >= self.header.zone_count as u32 {
			return Err(ZelError::OutOfBounds { reason: "zone index out of range" });
		}
		Ok(zone_index as u16)
	}

	/// Decodes every zone into `dst`, a whole-frame indexed-8bpp buffer with
	/// row stride `dst_stride` bytes.
	pub fn decode_into_index8(&self, dst: &mut [u8], dst_stride: usize) -> Result<()> {
		let zone_pixel_bytes = self.ctx.layout().zone_pixel_bytes as usize;
		let mut zone_buf = vec![0u8; zone_pixel_bytes];
		self.for_each_zone_chunk(|zone_index, payload| {
			ZoneCodec::decode(self.compression, payload, &mut zone_buf)?;
			blit::blit_zone_index8(dst, dst_stride, zone_index, self.ctx.layout(), &zone_buf)
		})
	}

	/// Decodes every zone into `dst`, a whole-frame RGB565 buffer with row
	/// stride `dst_stride_pixels` pixels, mapping indices through `palette`.
	pub fn decode_into_rgb565(
		&self,
		dst: &mut [u16],
		dst_stride_pixels: usize,
		palette: &[u16],
	) -> Result<()> {
		let zone_pixel_bytes = self.ctx.layout().zone_pixel_bytes as usize;
		let mut zone_buf = vec![0u8; zone_pixel_bytes];
		self.for_each_zone_chunk(|zone_index, payload| {
			ZoneCodec::decode(self.compression, payload, &mut zone_buf)?;
			blit::blit_zone_rgb565(dst, dst_stride_pixels, zone_index, self.ctx.layout(), &zone_buf, palette)
		})
	}

	/// Decodes a single zone's indexed-8bpp pixels into `dst`, which must be
	/// exactly one zone's pixel size.
	pub fn decode_zone_index8(&self, zone_index: u32, dst: &mut [u8]) -> Result<()> {
		let zone_index = self.validate_zone_index(zone_index)?;
		let zone_pixel_bytes = self.ctx.layout().zone_pixel_bytes as usize;
		if dst.len() != zone_pixel_bytes {
			return Err(ZelError::InvalidArgument("destination buffer is not one zone's pixel size"));
		}
		let payload = self.locate_zone_chunk(zone_index)?;
		ZoneCodec::decode(self.compression, payload, dst)
	}

	/// Decodes a single zone's RGB565 pixels into `dst`, mapping indices
	/// through `palette`.
	pub fn decode_zone_rgb565(&self, zone_index: u32, dst: &mut [u16], palette: &[u16]) -> Result<()> {
		let zone_index = self.validate_zone_index(zone_index)?;
		let zone_pixel_bytes = self.ctx.layout().zone_pixel_bytes as usize;
		if dst.len() != zone_pixel_bytes {
			return Err(ZelError::InvalidArgument("destination buffer is not one zone's pixel size"));
		}
		let payload = self.locate_zone_chunk(zone_index)?;
		let mut zone_buf = vec![0u8; zone_pixel_bytes];
		ZoneCodec::decode(self.compression, payload, &mut zone_buf)?;
		blit::map_zone_rgb565(&zone_buf, palette, dst)
	}
}
