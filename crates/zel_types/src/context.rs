//! The validated, opened view of a ZEL container: the entry point for every
//! other operation in this crate.

use std::cell::{Cell, RefCell};

use crate::error::{Result, ZelError};
use crate::frame::FrameZoneStream;
use crate::header::{ColorEncoding, ColorFormat, FileHeader, FrameIndexEntry, PaletteHeader};
use crate::layout::ZoneLayout;
use crate::palette::{self, GlobalPalette, PaletteCache, PaletteRef};
use crate::range::fits;
use crate::source::{ByteSlice, ByteSource, ByteStream};
use crate::timeline;

/// Raw bytes of the frame index table, parsed lazily per entry on access.
struct FrameIndexTable<'a> {
	bytes: ByteSlice<'a>,
	count: u32,
}

impl FrameIndexTable<'_> {
	fn get(&self, index: u32) -> FrameIndexEntry {
		let start = index as usize * FrameIndexEntry::SIZE;
		let bytes = self.bytes.as_slice();
		FrameIndexEntry::parse(&bytes[start..start + FrameIndexEntry::SIZE])
	}
}

/// A validated, opened ZEL container.
///
/// `Context` borrows or owns its backing bytes depending on how it was
/// opened (see [`Context::open_memory`] vs [`Context::open_stream`]), holds
/// the parsed file header and derived zone layout, and exposes the
/// container's metadata, palettes, and per-frame decode operations.
///
/// A `Context` is meant for single-owner, single-thread use: its internal
/// caches use [`RefCell`]/[`Cell`], not atomics, so two threads must not
/// share one `Context` concurrently. Distinct contexts are fully
/// independent and may each be used on their own thread.
pub struct Context<'a> {
	source: RefCell<ByteSource<'a>>,
	header: FileHeader,
	layout: ZoneLayout,
	global_palette: Option<GlobalPalette>,
	frame_index: FrameIndexTable<'a>,
	output_encoding: Cell<Option<ColorEncoding>>,
	palette_cache: RefCell<PaletteCache>,
	local_scratch: RefCell<Vec<u16>>,
}

impl std::fmt::Debug for Context<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Context")
			.field("header", &self.header)
			.field("layout", &self.layout)
			.field("global_palette", &self.global_palette)
			.finish_non_exhaustive()
	}
}

impl<'a> Context<'a> {
	/// Opens a ZEL container from a buffer already fully in memory.
	///
	/// Reads borrow directly from `data` for the lifetime of the returned
	/// context; nothing is copied except the small, once-decoded global
	/// palette.
	pub fn open_memory(data: &'a [u8]) -> Result<Self> {
		Self::build(ByteSource::Whole(data))
	}

	/// Opens a ZEL container from a caller-driven stream.
	///
	/// Every read copies bytes out of the stream into owned buffers; the
	/// stream must own whatever resource backs it, since it is boxed with
	/// no borrowed lifetime.
	pub fn open_stream(stream: impl ByteStream + 'a) -> Result<Self> {
		Self::build(ByteSource::Stream(Box::new(stream)))
	}

	fn build(mut source: ByteSource<'a>) -> Result<Self> {
		let size = source.size();
		if size < FileHeader::SIZE as u64 {
			return Err(ZelError::InvalidArgument("source is smaller than a file header"));
		}

		let header_bytes = source.read_at(0, FileHeader::SIZE as u64)?;
		let header = FileHeader::parse(header_bytes.as_slice());

		if header.magic != crate::header::MAGIC {
			return Err(ZelError::InvalidMagic { found: header.magic });
		}
		if header.version != crate::header::SUPPORTED_VERSION {
			return Err(ZelError::UnsupportedVersion { version: header.version });
		}
		let color_format = ColorFormat::try_from(header.color_format)?;
		let _ = color_format; // validated; only Indexed8 exists today

		if (header.header_size as u64) < FileHeader::SIZE as u64 || header.header_size as u64 > size {
			return Err(ZelError::CorruptData { reason: "file header_size is out of range" });
		}

		// Zone geometry failures (zero/non-divisible dimensions, zone count
		// overflow) are part of the same initial static header validation as
		// the magic check, so they collapse to the same error kind.
		let layout = ZoneLayout::compute(header.width, header.height, header.zone_width, header.zone_height)
			.map_err(|_| ZelError::InvalidMagic { found: header.magic })?;

		let mut offset = header.header_size as u64;

		let global_palette = if header.flags.has_global_palette {
			if !fits(offset, PaletteHeader::SIZE as u64, size) {
				return Err(ZelError::CorruptData { reason: "global palette header does not fit" });
			}
			let ph_bytes = source.read_at(offset, PaletteHeader::SIZE as u64)?;
			let ph = PaletteHeader::parse(ph_bytes.as_slice());

			if ph.entry_count == 0 {
				return Err(ZelError::CorruptData { reason: "global palette has zero entries" });
			}
			let encoding = ColorEncoding::try_from(ph.color_encoding)?;
			if (ph.header_size as u64) < PaletteHeader::SIZE as u64 {
				return Err(ZelError::CorruptData { reason: "global palette header_size too small" });
			}

			let data_offset = offset + ph.header_size as u64;
			let data_bytes = ph.entry_count as u64 * 2;
			if !fits(data_offset, data_bytes, size) {
				return Err(ZelError::CorruptData { reason: "global palette entries do not fit" });
			}
			let entries_bytes = source.read_at(data_offset, data_bytes)?;
			let palette = GlobalPalette::decode(entries_bytes.as_slice(), ph.entry_count, encoding);

			offset = data_offset + data_bytes;
			Some(palette)
		} else {
			None
		};

		if !header.flags.has_frame_index_table {
			return Err(ZelError::UnsupportedFormat {
				reason: "file has no frame index table, which this decoder requires",
			});
		}

		let frame_index_bytes_len = header.frame_count as u64 * FrameIndexEntry::SIZE as u64;
		if !fits(offset, frame_index_bytes_len, size) {
			return Err(ZelError::CorruptData { reason: "frame index table does not fit" });
		}
		let frame_index_bytes = source.read_at(offset, frame_index_bytes_len)?;
		let frame_count = header.frame_count;

		log::debug!(
			"opened ZEL container: {}x{}, {} frames, {} zones",
			header.width,
			header.height,
			header.frame_count,
			layout.zone_count
		);

		Ok(Self {
			source: RefCell::new(source),
			header,
			layout,
			global_palette,
			frame_index: FrameIndexTable { bytes: frame_index_bytes, count: frame_count },
			output_encoding: Cell::new(None),
			palette_cache: RefCell::new(PaletteCache::default()),
			local_scratch: RefCell::new(Vec::new()),
		})
	}

	/// Canvas width in pixels.
	pub fn width(&self) -> u16 {
		self.header.width
	}

	/// Canvas height in pixels.
	pub fn height(&self) -> u16 {
		self.header.height
	}

	/// Number of frames in the animation.
	pub fn frame_count(&self) -> u32 {
		self.header.frame_count
	}

	/// Duration, in milliseconds, used for frames that don't specify one.
	pub fn default_frame_duration_ms(&self) -> u16 {
		self.header.default_frame_duration
	}

	/// Zone width in pixels.
	pub fn zone_width(&self) -> u16 {
		self.header.zone_width
	}

	/// Zone height in pixels.
	pub fn zone_height(&self) -> u16 {
		self.header.zone_height
	}

	/// Pixel storage format (always `Indexed8` today).
	pub fn color_format(&self) -> ColorFormat {
		ColorFormat::try_from(self.header.color_format).expect("validated during open")
	}

	/// Returns `true` if the container carries a global (file-wide default)
	/// palette.
	pub fn has_global_palette(&self) -> bool {
		self.global_palette.is_some()
	}

	/// Sets the color encoding future RGB565 decode calls should produce.
	///
	/// Passing `None` restores the default of using each palette's own
	/// source encoding.
	pub fn set_output_color_encoding(&self, encoding: Option<ColorEncoding>) {
		self.output_encoding.set(encoding);
	}

	/// Returns the color encoding RGB565 decode calls currently produce.
	///
	/// If no override was set, this is the global palette's source
	/// encoding when a global palette is present, otherwise
	/// [`ColorEncoding::Rgb565Le`].
	pub fn output_color_encoding(&self) -> ColorEncoding {
		self.output_encoding.get().unwrap_or_else(|| {
			self.global_palette
				.as_ref()
				.map(GlobalPalette::source_encoding)
				.unwrap_or(ColorEncoding::Rgb565Le)
		})
	}

	fn select_output_encoding(&self, source_encoding: ColorEncoding) -> ColorEncoding {
		self.output_encoding.get().unwrap_or(source_encoding)
	}

	pub(crate) fn layout(&self) -> &ZoneLayout {
		&self.layout
	}

	pub(crate) fn local_scratch(&self) -> &RefCell<Vec<u16>> {
		&self.local_scratch
	}

	pub(crate) fn read_source_bytes(&self, offset: u64, length: u64) -> Result<ByteSlice<'a>> {
		self.source.borrow_mut().read_at(offset, length)
	}

	pub(crate) fn frame_index_entry(&self, frame_index: u32) -> Result<FrameIndexEntry> {
		if frame_index >= self.header.frame_count {
			return Err(ZelError::OutOfBounds { reason: "frame index out of range" });
		}
		Ok(self.frame_index.get(frame_index))
	}

	/// Resolves the global palette to `desired`'s encoding, using the
	/// current [`Self::output_color_encoding`] override if `desired` is the
	/// palette's own source encoding's selected counterpart.
	pub(crate) fn resolve_global_palette(&self, desired: ColorEncoding) -> Result<PaletteRef<'_>> {
		let palette = self
			.global_palette
			.as_ref()
			.ok_or(ZelError::OutOfBounds { reason: "container has no global palette" })?;
		Ok(palette::resolve_global(palette, desired, &self.palette_cache))
	}

	/// Returns the container's global palette resolved to the current
	/// output color encoding.
	pub fn global_palette(&self) -> Result<PaletteRef<'_>> {
		let encoding = self.output_color_encoding();
		self.resolve_global_palette(encoding)
	}

	/// Returns `frame_index`'s effective palette (its own local palette if
	/// it has one, otherwise the container's global palette), resolved to
	/// the current output color encoding.
	pub fn frame_palette(&self, frame_index: u32) -> Result<PaletteRef<'_>> {
		let entry = self.frame_index_entry(frame_index)?;
		let desired_source_encoding =
			self.global_palette.as_ref().map(GlobalPalette::source_encoding).unwrap_or(ColorEncoding::Rgb565Le);

		if !entry.flags.has_local_palette {
			return self.resolve_global_palette(self.select_output_encoding(desired_source_encoding));
		}

		let stream = FrameZoneStream::open(self, frame_index)?;
		let desired = self.output_color_encoding();
		stream.resolve_palette(desired)
	}

	/// Duration, in milliseconds, that `frame_index` is shown for.
	pub fn frame_duration_ms(&self, frame_index: u32) -> Result<u16> {
		let entry = self.frame_index_entry(frame_index)?;
		Ok(if entry.frame_duration != 0 { entry.frame_duration } else { self.header.default_frame_duration })
	}

	/// Returns `true` if `frame_index` can be decoded without reference to
	/// any other frame.
	pub fn frame_is_keyframe(&self, frame_index: u32) -> Result<bool> {
		Ok(self.frame_index_entry(frame_index)?.flags.keyframe)
	}

	/// Returns `true` if `frame_index` carries its own local palette.
	pub fn frame_uses_local_palette(&self, frame_index: u32) -> Result<bool> {
		Ok(self.frame_index_entry(frame_index)?.flags.has_local_palette)
	}

	/// Decodes `frame_index` into a whole-frame indexed-8bpp buffer.
	///
	/// `dst` must be at least `dst_stride * height` bytes.
	pub fn decode_frame_index8(&self, frame_index: u32, dst: &mut [u8], dst_stride: usize) -> Result<()> {
		if dst_stride < self.header.width as usize {
			return Err(ZelError::InvalidArgument("destination stride is smaller than the canvas width"));
		}
		let required = dst_stride * self.header.height as usize;
		if dst.len() < required {
			return Err(ZelError::InvalidArgument("destination buffer is smaller than stride * height"));
		}
		FrameZoneStream::open(self, frame_index)?.decode_into_index8(dst, dst_stride)
	}

	/// Decodes a single zone of `frame_index` into an indexed-8bpp buffer
	/// sized exactly for one zone.
	pub fn decode_frame_index8_zone(&self, frame_index: u32, zone_index: u32, dst: &mut [u8]) -> Result<()> {
		FrameZoneStream::open(self, frame_index)?.decode_zone_index8(zone_index, dst)
	}

	/// Decodes `frame_index` into a whole-frame RGB565 buffer.
	///
	/// `dst` must be at least `dst_stride_pixels * height` pixels.
	pub fn decode_frame_rgb565(
		&self,
		frame_index: u32,
		dst: &mut [u16],
		dst_stride_pixels: usize,
	) -> Result<()> {
		if dst_stride_pixels < self.header.width as usize {
			return Err(ZelError::InvalidArgument("destination stride is smaller than the canvas width"));
		}
		let required = dst_stride_pixels * self.header.height as usize;
		if dst.len() < required {
			return Err(ZelError::InvalidArgument("destination buffer is smaller than stride * height"));
		}
		let stream = FrameZoneStream::open(self, frame_index)?;
		let palette = stream.resolve_palette(self.output_color_encoding())?;
		stream.decode_into_rgb565(dst, dst_stride_pixels, &palette)
	}

	/// Decodes a single zone of `frame_index` into an RGB565 buffer sized
	/// exactly for one zone.
	pub fn decode_frame_rgb565_zone(&self, frame_index: u32, zone_index: u32, dst: &mut [u16]) -> Result<()> {
		let stream = FrameZoneStream::open(self, frame_index)?;
		let palette = stream.resolve_palette(self.output_color_encoding())?;
		stream.decode_zone_rgb565(zone_index, dst, &palette)
	}

	/// Total duration, in milliseconds, of the whole animation.
	pub fn total_duration_ms(&self) -> Result<u32> {
		timeline::total_duration_ms(self)
	}

	/// Finds the frame shown at `time_ms`, modulo the animation's total
	/// duration, returning `(frame_index, frame_start_ms)`.
	pub fn find_frame_by_time_ms(&self, time_ms: u32) -> Result<(u32, u32)> {
		timeline::find_frame_by_time_ms(self, time_ms)
	}
}
